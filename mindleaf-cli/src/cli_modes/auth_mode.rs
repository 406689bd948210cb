use super::App;
use crate::cli::Credentials;
use anyhow::Result;
use mindleaf_core::auth::Authenticator;

pub async fn login(app: &App, creds: Credentials) -> Result<()> {
    let user = app.auth.login(&creds.email, &creds.password).await?;
    app.renderer.print_user(Some(&user), &user.uid);
    Ok(())
}

pub async fn signup(app: &App, creds: Credentials) -> Result<()> {
    let user = app.auth.signup(&creds.email, &creds.password).await?;
    app.renderer.print_user(Some(&user), &user.uid);
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.auth.logout().await?;
    app.renderer.print_user(None, &app.config.user_id);
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    app.renderer
        .print_user(app.auth.current_user().as_ref(), &app.user_id());
    Ok(())
}
