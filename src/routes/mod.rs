//! Screens and the routes that lead to them.
//!
//! | Path                          | Screen                            |
//! |-------------------------------|-----------------------------------|
//! | `/`                           | [`login::LoginScreen`]            |
//! | `/register`                   | [`register::RegisterScreen`]      |
//! | `/forgot-password`            | [`forgot_password::ForgotPasswordScreen`] |
//! | `/reset-password?email=<e>`   | [`reset_password::ResetPasswordScreen`]   |
//! | `/dashboard`                  | [`dashboard::DashboardScreen`]    |
//! | `/dashboard/change-password`  | [`change_password::ChangePasswordScreen`] |

pub mod change_password;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod register;
pub mod reset_password;

use crate::{components::Alert, features::auth::validation::FieldErrors};
use std::fmt;
use thiserror::Error;
use url::{form_urlencoded::byte_serialize, Url};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    ResetPassword { email: Option<String> },
    Dashboard,
    ChangePassword,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid path {0}")]
    Invalid(String),
    #[error("no screen for path {0}")]
    NotFound(String),
}

impl Route {
    /// Path with query string, ready to be opened.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { email: None } => "/reset-password".to_string(),
            Self::ResetPassword { email: Some(email) } => {
                let encoded: String = byte_serialize(email.as_bytes()).collect();
                format!("/reset-password?email={encoded}")
            }
            Self::Dashboard => "/dashboard".to_string(),
            Self::ChangePassword => "/dashboard/change-password".to_string(),
        }
    }

    /// Human-readable screen name.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::ForgotPassword => "Forgot Password",
            Self::ResetPassword { .. } => "Reset Password",
            Self::Dashboard => "Dashboard",
            Self::ChangePassword => "Change Password",
        }
    }

    /// Maps a path (optionally with a query string) to its route.
    /// A trailing slash is ignored and an empty `email` counts as absent.
    ///
    /// # Errors
    /// Returns an error for unparseable or unknown paths.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let base = Url::parse("http://localhost/")
            .map_err(|_| RouteError::Invalid(path.to_string()))?;
        let url = base
            .join(path.trim())
            .map_err(|_| RouteError::Invalid(path.to_string()))?;

        let trimmed = url.path().trim_end_matches('/');
        match trimmed {
            "" => Ok(Self::Login),
            "/register" => Ok(Self::Register),
            "/forgot-password" => Ok(Self::ForgotPassword),
            "/reset-password" => {
                let email = url
                    .query_pairs()
                    .find(|(key, _)| key == "email")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty());
                Ok(Self::ResetPassword { email })
            }
            "/dashboard" => Ok(Self::Dashboard),
            "/dashboard/change-password" => Ok(Self::ChangePassword),
            _ => Err(RouteError::NotFound(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.path())
    }
}

/// Outcome of one form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The request failed or was rejected; the form is editable again.
    Failed(Alert),
    /// Success without leaving the screen.
    Completed(Alert),
    Navigated { route: Route, alert: Option<Alert> },
}

impl Submission {
    #[must_use]
    pub fn alert(&self) -> Option<&Alert> {
        match self {
            Self::Failed(alert) | Self::Completed(alert) => Some(alert),
            Self::Navigated { alert, .. } => alert.as_ref(),
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Navigated { route, .. } => Some(route),
            _ => None,
        }
    }
}

/// Result of opening a screen that may bounce the user elsewhere.
#[derive(Clone, Debug)]
pub enum Mounted<P> {
    Ready(P),
    Redirect { route: Route, alert: Option<Alert> },
}
