//! Login screen (`/`).

use crate::{
    app_lib::ApiClient,
    components::{Alert, FormError, FormEvent, FormState},
    features::auth::{
        client,
        validation::{required, FieldErrors},
    },
    routes::{Route, Submission},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

const LOGIN_FAILED: &str = "Login Failed";

#[derive(Clone, Debug, Default)]
pub struct LoginInput {
    pub username: String,
    pub password: SecretString,
}

impl LoginInput {
    /// # Errors
    /// Returns the per-field messages when a field is empty.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "username", &self.username, "Username is required.");
        required(
            &mut errors,
            "password",
            self.password.expose_secret(),
            "Password is required.",
        );
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct LoginScreen {
    api: ApiClient,
    state: FormState,
}

impl LoginScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: FormState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Validates, authenticates and on success stores the token and moves to
    /// the dashboard.
    ///
    /// # Errors
    /// Returns [`FormError`] if the screen cannot accept a submission.
    pub async fn submit(&mut self, input: &LoginInput) -> Result<Submission, FormError> {
        if let Err(errors) = input.validate() {
            return Ok(Submission::Invalid(errors));
        }
        self.state.apply(FormEvent::Submit)?;

        let response = match client::login(&self.api, &input.username, &input.password).await {
            Ok(response) => response,
            Err(err) => {
                self.state.apply(FormEvent::Failed)?;
                return Ok(Submission::Failed(Alert::error(LOGIN_FAILED, err.message())));
            }
        };

        let Some(token) = response.token else {
            self.state.apply(FormEvent::Failed)?;
            return Ok(Submission::Failed(Alert::error(
                LOGIN_FAILED,
                "No token received from server.",
            )));
        };

        if let Err(err) = self.api.session().set(&token, &input.username) {
            error!("Failed to store session: {err}");
            self.state.apply(FormEvent::Failed)?;
            return Ok(Submission::Failed(Alert::error(LOGIN_FAILED, err.to_string())));
        }

        debug!("logged in as {}", input.username);
        self.state.apply(FormEvent::Navigate(Route::Dashboard))?;
        Ok(Submission::Navigated {
            route: Route::Dashboard,
            alert: None,
        })
    }
}
