use crate::{
    cli::{actions::render, globals::GlobalArgs},
    components::UserMenu,
    routes::{dashboard::DashboardScreen, Mounted, Route},
};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if the session cannot be read or cleared.
pub async fn dashboard(globals: &GlobalArgs) -> Result<()> {
    match DashboardScreen::mount(globals.api_client()?).await? {
        Mounted::Ready(screen) => {
            render::dashboard(screen.view());
            println!("change password: {}", screen.change_password());
            Ok(())
        }
        Mounted::Redirect { route, alert } => {
            render::redirect(&route, alert.as_ref())?;
            anyhow::bail!("not signed in or the session expired")
        }
    }
}

/// # Errors
/// Returns an error if the session cannot be cleared.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let config = globals.config();
    let menu = UserMenu::new(globals.session(&config));
    let initial = menu.initial();
    let route = menu.logout().context("failed to clear session")?;
    println!("Signed out ({initial})");
    render::navigation(&route);
    Ok(())
}

/// # Errors
/// Returns an error if the path does not lead to a screen.
pub fn open(path: &str) -> Result<()> {
    let route = Route::parse(path)?;
    render::navigation(&route);
    if let Route::ResetPassword { email: Some(email) } = &route {
        println!("email: {email}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_known_and_unknown() {
        assert!(open("/reset-password?email=a%40b.io").is_ok());
        assert!(open("/nowhere").is_err());
    }

    #[test]
    fn test_logout_removes_session_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path: PathBuf = dir.path().join("session.json");
        let globals = GlobalArgs::new(None, Some(path.clone()));
        globals.session(&globals.config()).set("token", "alice")?;
        assert!(path.exists());

        logout(&globals)?;
        assert!(!path.exists());
        Ok(())
    }
}
