//! Forgot-password screen (`/forgot-password`): requests an OTP by email.

use crate::{
    app_lib::ApiClient,
    components::{Alert, FormError, FormEvent, FormState},
    features::auth::{
        client,
        validation::{email, FieldErrors},
    },
    routes::{Route, Submission},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForgotPasswordInput {
    pub email: String,
}

impl ForgotPasswordInput {
    /// # Errors
    /// Returns the field message when the email is malformed.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        email(&mut errors, "email", &self.email, "Invalid email address.");
        errors.into_result()
    }
}

#[derive(Debug)]
pub struct ForgotPasswordScreen {
    api: ApiClient,
    state: FormState,
}

impl ForgotPasswordScreen {
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

    /// Sends the OTP and moves on to the reset screen for the same address.
    ///
    /// # Errors
    /// Returns [`FormError`] if the screen cannot accept a submission.
    pub async fn submit(&mut self, input: &ForgotPasswordInput) -> Result<Submission, FormError> {
        if let Err(errors) = input.validate() {
            return Ok(Submission::Invalid(errors));
        }
        self.state.apply(FormEvent::Submit)?;

        match client::send_otp(&self.api, &input.email).await {
            Ok(_) => {
                let route = Route::ResetPassword {
                    email: Some(input.email.clone()),
                };
                self.state.apply(FormEvent::Navigate(route.clone()))?;
                Ok(Submission::Navigated {
                    route,
                    alert: Some(Alert::success(
                        "OTP Sent",
                        format!("An OTP has been sent to {}.", input.email),
                    )),
                })
            }
            Err(err) => {
                self.state.apply(FormEvent::Failed)?;
                Ok(Submission::Failed(Alert::error(
                    "Failed to send OTP",
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
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn screen_for(server: &MockServer) -> Result<ForgotPasswordScreen> {
        let config = AppConfig::default().with_api_base_url(&server.uri());
        Ok(ForgotPasswordScreen::new(ApiClient::new(
            &config,
            Session::in_memory(),
        )?))
    }

    #[tokio::test]
    async fn success_navigates_with_encoded_email() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-otp"))
            .and(body_json(json!({"email": "a+b@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("OTP sent"))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen_for(&server)?;
        let outcome = screen
            .submit(&ForgotPasswordInput {
                email: "a+b@example.com".to_string(),
            })
            .await?;

        let route = outcome.route().cloned().expect("should navigate");
        assert_eq!(route.path(), "/reset-password?email=a%2Bb%40example.com");
        assert_eq!(
            outcome.alert(),
            Some(&Alert::success(
                "OTP Sent",
                "An OTP has been sent to a+b@example.com."
            ))
        );
        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_sends_nothing() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = screen_for(&server)?;
        let outcome = screen
            .submit(&ForgotPasswordInput {
                email: "nope".to_string(),
            })
            .await?;
        let Submission::Invalid(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.get("email"), Some("Invalid email address."));
        Ok(())
    }

    #[tokio::test]
    async fn failure_keeps_form_open() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-otp"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})))
            .mount(&server)
            .await;

        let mut screen = screen_for(&server)?;
        let outcome = screen
            .submit(&ForgotPasswordInput {
                email: "ghost@example.com".to_string(),
            })
            .await?;
        assert_eq!(
            outcome,
            Submission::Failed(Alert::error("Failed to send OTP", "User not found"))
        );
        assert_eq!(screen.state(), &FormState::Idle);
        Ok(())
    }
}
