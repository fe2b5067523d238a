//! # Authdesk (login, registration and password reset client)
//!
//! `authdesk` drives the client side of a small authentication API: login,
//! registration, OTP-based password reset, change password and a post-login
//! dashboard.
//!
//! ## Session
//!
//! A successful login stores an opaque bearer token and the username in a
//! [`Session`](features::auth::state::Session). The session is an explicit
//! context object handed to the API client and every screen; there is no
//! ambient global state. Every request carries `Authorization: Bearer <token>`
//! while a token is present.
//!
//! ## Screens
//!
//! Each screen in [`routes`] owns a [`FormState`](components::FormState) and
//! moves `Idle -> Submitting -> Idle | NavigatedAway`. Input is validated
//! locally before anything reaches the network, and every remote failure is
//! converted into a single [`Alert`](components::Alert) at the screen boundary.
//!
//! ## Errors
//!
//! Server error payloads come in several shapes (`{message}`, `{error}`, plain
//! text). They are resolved once, in [`app_lib::api`], into a tagged
//! [`ApiError`](app_lib::ApiError).

pub mod app_lib;
pub mod cli;
pub mod components;
pub mod features;
pub mod routes;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
