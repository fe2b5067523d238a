//! Change-password screen (`/dashboard/change-password`).
//!
//! Uses the same OTP flow as the reset screen, but stays on the page after a
//! success and offers a separate "send OTP" action.

use crate::{
    app_lib::ApiClient,
    components::{Alert, FormError, FormEvent, FormState},
    features::auth::{client, validation::FieldErrors},
    routes::{
        reset_password::{validate_reset, ResetPasswordInput},
        Submission,
    },
};
use secrecy::SecretString;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct ChangePasswordInput {
    pub email: String,
    pub otp: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl ChangePasswordInput {
    /// # Errors
    /// Returns the per-field messages for every failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let reset = ResetPasswordInput {
            otp: self.otp.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        };
        validate_reset(
            &self.email,
            &reset,
            "Valid email is required.",
            "New passwords don't match",
        )
    }
}

#[derive(Debug)]
pub struct ChangePasswordScreen {
    api: ApiClient,
    values: ChangePasswordInput,
    state: FormState,
}

impl ChangePasswordScreen {
    /// Opens the form, prefilling the email from the session token when it
    /// can be decoded.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let email = api
            .session()
            .claims()
            .and_then(|claims| claims.email)
            .unwrap_or_default();
        if !email.is_empty() {
            debug!("prefilled email from session token");
        }

        Self {
            api,
            values: ChangePasswordInput {
                email,
                ..ChangePasswordInput::default()
            },
            state: FormState::Idle,
        }
    }

    /// Current form values; after a successful change they are blank.
    #[must_use]
    pub fn values(&self) -> &ChangePasswordInput {
        &self.values
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Sends an OTP to `email`. Never touches the form state.
    pub async fn send_otp(&self, email: &str) -> Alert {
        if email.is_empty() {
            return Alert::error(
                "Email Required",
                "Please enter your email to receive an OTP.",
            );
        }

        match client::send_otp(&self.api, email).await {
            Ok(_) => Alert::success("OTP Sent", format!("An OTP has been sent to {email}.")),
            Err(err) => Alert::error("Failed to Send OTP", err.message()),
        }
    }

    /// Changes the password and resets the form to blank values.
    ///
    /// # Errors
    /// Returns [`FormError`] if the screen cannot accept a submission.
    pub async fn submit(&mut self, input: ChangePasswordInput) -> Result<Submission, FormError> {
        if let Err(errors) = input.validate() {
            self.values = input;
            return Ok(Submission::Invalid(errors));
        }
        self.state.apply(FormEvent::Submit)?;

        let result =
            client::reset_password(&self.api, &input.email, &input.otp, &input.new_password).await;
        match result {
            Ok(_) => {
                self.state.apply(FormEvent::Reset)?;
                self.values = ChangePasswordInput::default();
                Ok(Submission::Completed(Alert::success(
                    "Success!",
                    "Your password has been changed successfully.",
                )))
            }
            Err(err) => {
                self.state.apply(FormEvent::Failed)?;
                self.values = input;
                Ok(Submission::Failed(Alert::error(
                    "Password Change Failed",
                    err.message(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_lib::AppConfig, features::auth::state::Session};
    use anyhow::{bail, Result};
    use base64ct::{Base64UrlUnpadded, Encoding};
    use secrecy::ExposeSecret;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn input(email: &str, password: &str, confirm: &str) -> ChangePasswordInput {
        ChangePasswordInput {
            email: email.to_string(),
            otp: secret("123456"),
            new_password: secret(password),
            confirm_password: secret(confirm),
        }
    }

    fn screen_for(server: &MockServer, token: Option<&str>) -> Result<ChangePasswordScreen> {
        let session = Session::in_memory();
        if let Some(token) = token {
            session.set(token, "alice")?;
        }
        let config = AppConfig::default().with_api_base_url(&server.uri());
        Ok(ChangePasswordScreen::new(ApiClient::new(&config, session)?))
    }

    #[tokio::test]
    async fn prefills_email_from_token() -> Result<()> {
        let server = MockServer::start().await;
        let payload = Base64UrlUnpadded::encode_string(br#"{"email":"alice@example.com"}"#);
        let screen = screen_for(&server, Some(&format!("h.{payload}.s")))?;
        assert_eq!(screen.values().email, "alice@example.com");

        let screen = screen_for(&server, Some("garbage"))?;
        assert_eq!(screen.values().email, "");
        Ok(())
    }

    #[tokio::test]
    async fn send_otp_requires_email_and_keeps_state() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-otp"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "SMTP down"})))
            .expect(1)
            .mount(&server)
            .await;

        let screen = screen_for(&server, None)?;
        let alert = screen.send_otp("").await;
        assert_eq!(alert.title, "Email Required");
        assert!(alert.is_destructive());

        let alert = screen.send_otp("alice@example.com").await;
        assert_eq!(alert, Alert::error("Failed to Send OTP", "SMTP down"));
        assert_eq!(screen.state(), &FormState::Idle);
        Ok(())
    }

    #[tokio::test]
    async fn mismatch_uses_change_password_message() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = screen_for(&server, None)?;
        let Submission::Invalid(errors) = screen
            .submit(input("not-an-email", "password1", "password2"))
            .await?
        else {
            bail!("expected validation errors");
        };
        assert_eq!(errors.get("email"), Some("Valid email is required."));
        assert_eq!(
            errors.get("confirm_password"),
            Some("New passwords don't match")
        );
        assert_eq!(screen.values().email, "not-an-email");
        Ok(())
    }

    #[tokio::test]
    async fn success_resets_form_to_blank() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .and(body_json(json!({
                "email": "alice@example.com",
                "otp": "123456",
                "newPassword": "password1"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen_for(&server, None)?;
        let outcome = screen
            .submit(input("alice@example.com", "password1", "password1"))
            .await?;

        assert_eq!(
            outcome,
            Submission::Completed(Alert::success(
                "Success!",
                "Your password has been changed successfully."
            ))
        );
        assert_eq!(screen.state(), &FormState::Idle);
        assert_eq!(screen.values().email, "");
        assert_eq!(screen.values().otp.expose_secret(), "");
        Ok(())
    }

    #[tokio::test]
    async fn failure_keeps_values() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reset-password"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid OTP"})))
            .mount(&server)
            .await;

        let mut screen = screen_for(&server, None)?;
        let outcome = screen
            .submit(input("alice@example.com", "password1", "password1"))
            .await?;
        assert_eq!(
            outcome,
            Submission::Failed(Alert::error("Password Change Failed", "Invalid OTP"))
        );
        assert_eq!(screen.values().email, "alice@example.com");
        Ok(())
    }
}
