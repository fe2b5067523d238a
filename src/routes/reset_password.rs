//! Reset-password screen (`/reset-password?email=<email>`).
//!
//! Reachable only with an email in the query; without one the screen
//! redirects to `/forgot-password` instead of rendering a form.

use crate::{
    app_lib::ApiClient,
    components::{Alert, FormError, FormEvent, FormState},
    features::auth::{
        client,
        validation::{
            confirms, email, min_len, FieldErrors, MIN_OTP_LENGTH, MIN_PASSWORD_LENGTH,
        },
    },
    routes::{Mounted, Route, Submission},
};
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug, Default)]
pub struct ResetPasswordInput {
    pub otp: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

/// Shared by the reset and change-password forms, which differ only in
/// messages.
pub(crate) fn validate_reset(
    address: &str,
    input: &ResetPasswordInput,
    email_message: &str,
    mismatch_message: &str,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    email(&mut errors, "email", address, email_message);
    min_len(
        &mut errors,
        "otp",
        input.otp.expose_secret(),
        MIN_OTP_LENGTH,
        "OTP must be 6 characters.",
    );
    min_len(
        &mut errors,
        "new_password",
        input.new_password.expose_secret(),
        MIN_PASSWORD_LENGTH,
        "Password must be at least 8 characters.",
    );
    confirms(
        &mut errors,
        "confirm_password",
        input.new_password.expose_secret(),
        input.confirm_password.expose_secret(),
        mismatch_message,
    );
    errors.into_result()
}

#[derive(Debug)]
pub struct ResetPasswordScreen {
    api: ApiClient,
    email: String,
    state: FormState,
}

impl ResetPasswordScreen {
    /// Opens the screen for the email taken from the route.
    #[must_use]
    pub fn mount(api: ApiClient, email: Option<String>) -> Mounted<Self> {
        match email.filter(|email| !email.is_empty()) {
            Some(email) => Mounted::Ready(Self {
                api,
                email,
                state: FormState::Idle,
            }),
            None => Mounted::Redirect {
                route: Route::ForgotPassword,
                alert: Some(Alert::error(
                    "Error",
                    "No email address provided. Please go back to the forgot password page.",
                )),
            },
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// # Errors
    /// Returns the per-field messages for every failing field.
    pub fn validate(&self, input: &ResetPasswordInput) -> Result<(), FieldErrors> {
        validate_reset(
            &self.email,
            input,
            "Invalid email address.",
            "Passwords don't match",
        )
    }

    /// Sets the new password and returns to login.
    ///
    /// # Errors
    /// Returns [`FormError`] if the screen cannot accept a submission.
    pub async fn submit(&mut self, input: &ResetPasswordInput) -> Result<Submission, FormError> {
        if let Err(errors) = self.validate(input) {
            return Ok(Submission::Invalid(errors));
        }
        self.state.apply(FormEvent::Submit)?;

        match client::reset_password(&self.api, &self.email, &input.otp, &input.new_password)
            .await
        {
            Ok(_) => {
                self.state.apply(FormEvent::Navigate(Route::Login))?;
                Ok(Submission::Navigated {
                    route: Route::Login,
                    alert: Some(Alert::success(
                        "Password Reset Successful",
                        "You can now log in with your new password.",
                    )),
                })
            }
            Err(err) => {
                self.state.apply(FormEvent::Failed)?;
                Ok(Submission::Failed(Alert::error(
                    "Password Reset Failed",
                    err.message(),
                )))
            }
        }
    }

    /// "Didn't receive an OTP?": back to the forgot-password screen.
    ///
    /// # Errors
    /// Returns [`FormError`] while a submission is pending or after leaving.
    pub fn resend(&mut self) -> Result<Route, FormError> {
        if self.state.is_submitting() {
            return Err(FormError::InFlight);
        }
        self.state.apply(FormEvent::Navigate(Route::ForgotPassword))?;
        Ok(Route::ForgotPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_lib::AppConfig, features::auth::state::Session};
    use anyhow::{bail, Result};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn input(otp: &str, password: &str, confirm: &str) -> ResetPasswordInput {
        ResetPasswordInput {
            otp: secret(otp),
            new_password: secret(password),
            confirm_password: secret(confirm),
        }
    }

    fn mount(server: &MockServer, email: Option<&str>) -> Result<Mounted<ResetPasswordScreen>> {
        let config = AppConfig::default().with_api_base_url(&server.uri());
        let api = ApiClient::new(&config, Session::in_memory())?;
        Ok(ResetPasswordScreen::mount(api, email.map(ToString::to_string)))
    }

    #[tokio::test]
    async fn mount_without_email_redirects() -> Result<()> {
        let server = MockServer::start().await;
        for email in [None, Some("")] {
            let Mounted::Redirect { route, alert } = mount(&server, email)? else {
                bail!("expected a redirect");
            };
            assert_eq!(route, Route::ForgotPassword);
            let alert = alert.expect("redirect carries an alert");
            assert!(alert.is_destructive());
            assert_eq!(alert.title, "Error");
        }
        Ok(())
    }

    #[tokio::test]
    async fn short_otp_and_mismatch_are_reported() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let Mounted::Ready(mut screen) = mount(&server, Some("alice@example.com"))? else {
            bail!("expected the form");
        };
        let Submission::Invalid(errors) = screen
            .submit(&input("123", "password1", "password2"))
            .await?
        else {
            bail!("expected validation errors");
        };
        assert_eq!(errors.get("otp"), Some("OTP must be 6 characters."));
        assert_eq!(errors.get("confirm_password"), Some("Passwords don't match"));
        Ok(())
    }

    #[tokio::test]
    async fn success_returns_to_login() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .and(body_json(json!({
                "email": "alice@example.com",
                "otp": "123456",
                "newPassword": "password1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let Mounted::Ready(mut screen) = mount(&server, Some("alice@example.com"))? else {
            bail!("expected the form");
        };
        assert_eq!(screen.email(), "alice@example.com");
        let outcome = screen
            .submit(&input("123456", "password1", "password1"))
            .await?;
        assert_eq!(outcome.route(), Some(&Route::Login));
        assert_eq!(
            outcome.alert().map(|alert| alert.title.as_str()),
            Some("Password Reset Successful")
        );
        Ok(())
    }

    #[tokio::test]
    async fn failure_and_resend() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid OTP"})))
            .mount(&server)
            .await;

        let Mounted::Ready(mut screen) = mount(&server, Some("alice@example.com"))? else {
            bail!("expected the form");
        };
        let outcome = screen
            .submit(&input("000000", "password1", "password1"))
            .await?;
        assert_eq!(
            outcome,
            Submission::Failed(Alert::error("Password Reset Failed", "Invalid OTP"))
        );

        assert_eq!(screen.resend()?, Route::ForgotPassword);
        assert_eq!(
            screen.resend(),
            Err(FormError::Finished(Route::ForgotPassword))
        );
        Ok(())
    }
}
