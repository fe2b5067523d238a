//! Client wrappers for the auth API endpoints. Each function issues exactly one
//! request and logs failures by operation name, never with the payload.

use crate::{
    app_lib::{ApiClient, ApiError},
    features::auth::types::{
        LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest, SendOtpRequest,
    },
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{error, instrument};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const SEND_OTP_FAILED: &str = "Failed to send OTP";
const RESET_PASSWORD_FAILED: &str = "Failed to reset password";

/// Authenticates with username and password.
/// A 2xx answer without a token is returned as `LoginResponse { token: None }`.
///
/// # Errors
/// Returns the normalized [`ApiError`] on transport failure or non-2xx status.
#[instrument(skip(api, password))]
pub async fn login(
    api: &ApiClient,
    username: &str,
    password: &SecretString,
) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest {
        username,
        password: password.expose_secret(),
    };
    let value = api
        .post_value("/existinguser", &request, LOGIN_FAILED)
        .await
        .inspect_err(|err| error!("Login error: {err}"))?;

    Ok(LoginResponse::from_value(&value))
}

/// Creates a new account. The success body is returned untouched.
///
/// # Errors
/// Returns the normalized [`ApiError`] on transport failure or non-2xx status.
#[instrument(skip(api, password))]
pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &SecretString,
) -> Result<Value, ApiError> {
    let request = RegisterRequest {
        username,
        email,
        password: password.expose_secret(),
    };
    api.post_value("/newuser", &request, REGISTRATION_FAILED)
        .await
        .inspect_err(|err| error!("Registration error: {err}"))
}

/// Requests a one-time password for `email`. Calls are independent; sending
/// twice issues two requests.
///
/// # Errors
/// Returns the normalized [`ApiError`] on transport failure or non-2xx status.
#[instrument(skip(api))]
pub async fn send_otp(api: &ApiClient, email: &str) -> Result<Value, ApiError> {
    api.post_value("/send-otp", &SendOtpRequest { email }, SEND_OTP_FAILED)
        .await
        .inspect_err(|err| error!("Send OTP error: {err}"))
}

/// Sets a new password using an emailed OTP.
///
/// # Errors
/// Returns the normalized [`ApiError`] on transport failure or non-2xx status.
#[instrument(skip(api, otp, new_password))]
pub async fn reset_password(
    api: &ApiClient,
    email: &str,
    otp: &SecretString,
    new_password: &SecretString,
) -> Result<Value, ApiError> {
    let request = ResetPasswordRequest {
        email,
        otp: otp.expose_secret(),
        new_password: new_password.expose_secret(),
    };
    api.post_value("/reset-password", &request, RESET_PASSWORD_FAILED)
        .await
        .inspect_err(|err| error!("Reset password error: {err}"))
}
