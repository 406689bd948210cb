mod auth_mode;
mod overlay_mode;
mod read_mode;
mod todo_mode;
mod write_mode;

use crate::cli::{Cli, Command};
use crate::render::{RenderOptions, Renderer};
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use mindleaf_core::{
    CanvasEntry, Config, EntryStore, Record, Resource, StoreError,
    auth::{Authenticator, FirebaseAuth, effective_user_id},
    backend::{Backend, FileBackend, HttpBackend},
    config::BackendKind,
    dates::{format_date, resolve_date},
};
use std::sync::Arc;

type Store = EntryStore<Arc<dyn Backend>>;

/// Everything a command needs: settings, output, the chosen backend, the
/// signed-in user and the day being worked on.
pub struct App {
    config: Config,
    renderer: Renderer,
    backend: Arc<dyn Backend>,
    auth: FirebaseAuth,
    date: NaiveDate,
}

impl App {
    pub fn new(cli: &Cli, config: Config) -> Result<Self> {
        let renderer = Renderer::new(Some(RenderOptions {
            date_format: config.date_format.clone(),
            use_color: cli.color.use_color(),
        }));

        let today = Local::now().date_naive();
        let Some(date) = resolve_date(&cli.on, today, &config.input_date_formats) else {
            bail!("could not understand the date '{}'", cli.on);
        };

        let backend: Arc<dyn Backend> = match config.backend {
            BackendKind::Http => Arc::new(
                HttpBackend::new(&config.api_url)
                    .with_context(|| format!("setting up a client for {}", config.api_url))?,
            ),
            BackendKind::File => Arc::new(FileBackend::new(&config.data_dir)),
        };
        debug!("using the {} backend", config.backend);

        let auth = FirebaseAuth::from_config(&config);
        Ok(Self {
            config,
            renderer,
            backend,
            auth,
            date,
        })
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Path => read_mode::path(self),
            Command::Show { resource } => read_mode::show(self, resource).await,
            Command::Dates { resource } => read_mode::dates(self, resource).await,
            Command::Palette { screen } => read_mode::palette(self, screen),
            Command::Write { resource, text } => write_mode::write(self, resource, &text).await,
            Command::Append { resource, text } => write_mode::append(self, resource, &text).await,
            Command::Insert {
                screen,
                item,
                at,
                to,
            } => write_mode::insert(self, screen, item, at, to).await,
            Command::Clear { resource } => write_mode::clear(self, resource).await,
            Command::Sticker(cmd) => overlay_mode::sticker(self, cmd).await,
            Command::Image(cmd) => overlay_mode::image(self, cmd).await,
            Command::Todo(cmd) => todo_mode::todo(self, cmd).await,
            Command::Login(creds) => auth_mode::login(self, creds).await,
            Command::Signup(creds) => auth_mode::signup(self, creds).await,
            Command::Logout => auth_mode::logout(self).await,
            Command::Whoami => auth_mode::whoami(self),
        }
    }

    fn user_id(&self) -> String {
        effective_user_id(self.auth.current_user().as_ref(), &self.config.user_id)
    }

    fn store(&self, resource: Resource) -> Store {
        EntryStore::new(self.backend.clone(), resource, self.user_id())
    }

    /// The day's canvas for `resource`, with the store it came from.
    async fn open_canvas(&self, resource: Resource) -> Result<(Store, CanvasEntry)> {
        if resource == Resource::Todo {
            bail!("the to-do list has no text; use `mindleaf todo`");
        }
        let store = self.store(resource);
        let entry = store
            .load(self.date)
            .await
            .with_context(|| format!("loading {resource} for {}", self.date))?;
        Ok((store, entry))
    }

    /// Saves and reports. A failed index refresh still counts as saved.
    async fn save<R: Record>(&self, store: &Store, record: &R) -> Result<()> {
        let resource = store.resource();
        let shown = format_date(record.date(), &self.config.date_format);
        match store.save(record).await {
            Ok(index) => {
                self.renderer.print_info(&format!(
                    "Saved {resource} for {shown} ({} saved days).",
                    index.len()
                ));
                Ok(())
            }
            Err(StoreError::IndexRefresh(e)) => {
                warn!("{e}");
                self.renderer.print_info(&format!(
                    "Saved {resource} for {shown}, but could not refresh the saved days: {e}"
                ));
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("saving {resource} for {}", record.date())),
        }
    }
}
