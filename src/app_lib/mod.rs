//! Shared client utilities for API access, configuration and errors.
//!
//! ## Remote Operations
//!
//! All operations target a single base URL (default
//! `https://os-project-server.vercel.app/auth`):
//!
//! 1. **Login:** `POST /existinguser` with `{username, password}` returns `{token}`.
//! 2. **Register:** `POST /newuser` with `{username, email, password}`.
//! 3. **Send OTP:** `POST /send-otp` with `{email}`.
//! 4. **Reset password:** `POST /reset-password` with `{email, otp, newPassword}`.
//! 5. **List users:** `GET /users` returns an array or `{users: [...]}`.
//!
//! Centralizing the HTTP plumbing keeps bearer handling and error normalization
//! in one place. Callers must still avoid logging passwords or token material.

pub mod api;
pub mod config;
pub mod errors;

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::ApiError;
