//! Request and response payloads for auth API calls. Request bodies carry
//! passwords and OTPs, so they deliberately do not implement `Debug`.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct SendOtpRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub new_password: &'a str,
}

/// Login result; the server may answer 2xx without a token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: Option<String>,
}

impl LoginResponse {
    /// Reads `token` from any success body; non-objects and blank tokens yield `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let token = value
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.trim().is_empty())
            .map(ToString::to_string);
        Self { token }
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginResponse")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
