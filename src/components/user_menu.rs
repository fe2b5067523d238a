use crate::{
    features::auth::state::{Session, SessionError},
    routes::Route,
};

/// Account menu shown in the header of authenticated screens.
#[derive(Clone, Debug)]
pub struct UserMenu {
    session: Session,
}

impl UserMenu {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Uppercased first letter of the token's `name` claim, `U` otherwise.
    #[must_use]
    pub fn initial(&self) -> String {
        self.session
            .claims()
            .and_then(|claims| claims.name)
            .and_then(|name| name.chars().next())
            .map_or_else(|| "U".to_string(), |first| first.to_uppercase().collect())
    }

    /// Drops the session and returns the login route.
    ///
    /// # Errors
    /// Returns an error if the session cannot be cleared.
    pub fn logout(&self) -> Result<Route, SessionError> {
        self.session.clear()?;
        Ok(Route::Login)
    }
}
