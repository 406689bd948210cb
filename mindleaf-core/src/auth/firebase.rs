use super::{AuthError, Authenticator, User};
use crate::config::Config;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const IDENTITY_TOOLKIT: &str = "https://identitytoolkit.googleapis.com/v1";
const SESSION_FILE: &str = "session.json";

/// Email/password sign-in against Firebase Authentication's REST API.
///
/// The signed-in user is kept in `<data_dir>/session.json` so it survives
/// between runs.
pub struct FirebaseAuth {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    session_path: PathBuf,
    current: RwLock<Option<User>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Pulls the provider's message (e.g. `EMAIL_NOT_FOUND`) out of an error body.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

fn read_session(path: &Path) -> Option<User> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("ignoring malformed session {}: {e}", path.display());
            None
        }
    }
}

impl FirebaseAuth {
    pub fn new(api_key: Option<String>, data_dir: &Path) -> Self {
        let session_path = data_dir.join(SESSION_FILE);
        let current = read_session(&session_path);
        Self {
            client: Client::new(),
            endpoint: IDENTITY_TOOLKIT.to_string(),
            api_key,
            session_path,
            current: RwLock::new(current),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.firebase_api_key.clone(), &config.data_dir)
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    async fn call(&self, action: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let key = self.api_key.as_deref().ok_or(AuthError::MissingApiKey)?;
        let url = format!("{}/accounts:{action}", self.endpoint);
        debug!("POST {url} for {email}");
        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&Credentials {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(
                provider_message(&body).unwrap_or_else(|| status.to_string()),
            ));
        }

        let signed_in: SignInResponse = response.json().await?;
        let user = User {
            uid: signed_in.local_id,
            email: if signed_in.email.is_empty() {
                email.to_string()
            } else {
                signed_in.email
            },
            id_token: signed_in.id_token,
            refresh_token: signed_in.refresh_token,
        };
        self.remember(&user).await?;
        info!("signed in as {}", user.email);
        Ok(user)
    }

    async fn remember(&self, user: &User) -> Result<(), AuthError> {
        if let Some(dir) = self.session_path.parent() {
            fs::create_dir_all(dir).await?;
        }
        let contents =
            serde_json::to_string_pretty(user).map_err(|e| AuthError::Decode(e.to_string()))?;
        write_private(&self.session_path, &contents).await?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        Ok(())
    }
}

/// Writes a file only its owner can read. The session holds live tokens.
async fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options.open(path).await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    }
    Ok(())
}

#[async_trait]
impl Authenticator for FirebaseAuth {
    fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.call("signInWithPassword", email, password).await
    }

    async fn login_with_google(&self) -> Result<User, AuthError> {
        Err(AuthError::Unsupported(
            "Google sign-in needs a browser; use email and password",
        ))
    }

    async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.call("signUp", email, password).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.session_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        info!("signed out");
        Ok(())
    }
}
