//! Registration screen (`/register`).

use crate::{
    app_lib::ApiClient,
    components::{Alert, FormError, FormEvent, FormState},
    features::auth::{
        client,
        validation::{confirms, email, min_len, required, FieldErrors, MIN_PASSWORD_LENGTH},
    },
    routes::{Route, Submission},
};
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug, Default)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegisterInput {
    /// # Errors
    /// Returns the per-field messages for every failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "username", &self.username, "Username is required.");
        email(&mut errors, "email", &self.email, "Invalid email address.");
        min_len(
            &mut errors,
            "password",
            self.password.expose_secret(),
            MIN_PASSWORD_LENGTH,
            "Password must be at least 8 characters.",
        );
        confirms(
            &mut errors,
            "confirm_password",
            self.password.expose_secret(),
            self.confirm_password.expose_secret(),
            "Passwords don't match",
        );
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct RegisterScreen {
    api: ApiClient,
    state: FormState,
}

impl RegisterScreen {
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

    /// Creates the account and sends the user back to login.
    ///
    /// # Errors
    /// Returns [`FormError`] if the screen cannot accept a submission.
    pub async fn submit(&mut self, input: &RegisterInput) -> Result<Submission, FormError> {
        if let Err(errors) = input.validate() {
            return Ok(Submission::Invalid(errors));
        }
        self.state.apply(FormEvent::Submit)?;

        match client::register(&self.api, &input.username, &input.email, &input.password).await {
            Ok(_) => {
                self.state.apply(FormEvent::Navigate(Route::Login))?;
                Ok(Submission::Navigated {
                    route: Route::Login,
                    alert: Some(Alert::success(
                        "Registration Successful",
                        "You can now log in with your credentials.",
                    )),
                })
            }
            Err(err) => {
                self.state.apply(FormEvent::Failed)?;
                Ok(Submission::Failed(Alert::error(
                    "Registration Failed",
                    err.message(),
                )))
            }
        }
    }
}
