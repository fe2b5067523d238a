//! Dashboard (`/dashboard`), the landing screen after login.
//!
//! Mounting checks the stored token locally: missing, undecodable or expired
//! tokens send the user back to `/` (the last two also clear the session).
//! The identity comes from the token claims and is enriched, best effort, from
//! the user directory. A failed lookup is silent.

use crate::{
    app_lib::ApiClient,
    components::avatar::{initials, string_to_color},
    features::{
        auth::{state::SessionError, token::now_millis},
        users::{client::list_users, types::User},
    },
    routes::{Mounted, Route},
};
use tracing::{debug, warn};

/// Where the displayed identity came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileSource {
    /// A matching directory entry was found.
    Directory,
    /// Only the token claims (and the cached username) were available.
    Token,
}

/// Resolved identity shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardView {
    pub username: String,
    pub email: Option<String>,
    pub initials: String,
    pub avatar_color: String,
    pub source: ProfileSource,
}

impl DashboardView {
    fn resolve(
        profile: Option<&User>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Self {
        let username = profile
            .and_then(|user| non_empty(user.username.as_deref()))
            .or_else(|| non_empty(username))
            .or_else(|| {
                non_empty(email)
                    .and_then(|email| email.split('@').next())
                    .and_then(|local| non_empty(Some(local)))
            })
            .unwrap_or("User")
            .to_string();

        let email = profile
            .and_then(|user| non_empty(user.email.as_deref()))
            .or_else(|| non_empty(email))
            .map(ToString::to_string);

        Self {
            initials: initials(&username),
            avatar_color: string_to_color(&username),
            username,
            email,
            source: if profile.is_some() {
                ProfileSource::Directory
            } else {
                ProfileSource::Token
            },
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub struct DashboardScreen {
    api: ApiClient,
    view: DashboardView,
}

impl DashboardScreen {
    /// Mounts against the current time.
    ///
    /// # Errors
    /// Returns an error if an invalid session cannot be cleared.
    pub async fn mount(api: ApiClient) -> Result<Mounted<Self>, SessionError> {
        Self::mount_at(api, now_millis()).await
    }

    /// Mounts as if the clock read `now` (milliseconds since the epoch).
    ///
    /// # Errors
    /// Returns an error if an invalid session cannot be cleared.
    pub async fn mount_at(api: ApiClient, now: i64) -> Result<Mounted<Self>, SessionError> {
        let session = api.session();
        if session.get().is_none() {
            debug!("no session token, redirecting to login");
            return Ok(redirect_to_login());
        }

        let claims = match session.claims() {
            Some(claims) if !claims.is_expired(now) => claims,
            Some(_) => {
                debug!("session token expired, clearing");
                session.clear()?;
                return Ok(redirect_to_login());
            }
            None => {
                debug!("session token undecodable, clearing");
                session.clear()?;
                return Ok(redirect_to_login());
            }
        };

        let username = claims
            .username
            .clone()
            .filter(|username| !username.is_empty())
            .or_else(|| session.username().filter(|username| !username.is_empty()));
        let email = claims.email.clone().filter(|email| !email.is_empty());

        let profile = match list_users(&api).await {
            Ok(users) => users
                .into_iter()
                .find(|user| user.matches(username.as_deref(), email.as_deref())),
            Err(err) => {
                warn!("profile lookup failed, using token fields: {err}");
                None
            }
        };

        let view = DashboardView::resolve(profile.as_ref(), username.as_deref(), email.as_deref());
        debug!("dashboard user -> username: {}, email: {:?}", view.username, view.email);

        Ok(Mounted::Ready(Self { api, view }))
    }

    #[must_use]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Link target of the "Change Password" action.
    #[must_use]
    pub fn change_password(&self) -> Route {
        Route::ChangePassword
    }

    /// Drops the session and returns to login.
    ///
    /// # Errors
    /// Returns an error if the session cannot be cleared.
    pub fn logout(self) -> Result<Route, SessionError> {
        self.api.session().clear()?;
        Ok(Route::Login)
    }
}

fn redirect_to_login() -> Mounted<DashboardScreen> {
    Mounted::Redirect {
        route: Route::Login,
        alert: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_lib::AppConfig, features::auth::state::Session};
    use anyhow::{bail, Result};
    use base64ct::{Base64UrlUnpadded, Encoding};
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const NOW: i64 = 1_700_000_000_000;

    fn token(payload: &Value) -> String {
        let body = Base64UrlUnpadded::encode_string(payload.to_string().as_bytes());
        format!("h.{body}.s")
    }

    fn api_for(server: &MockServer, session: Session) -> Result<ApiClient> {
        let config = AppConfig::default().with_api_base_url(&server.uri());
        Ok(ApiClient::new(&config, session)?)
    }

    #[test]
    fn resolve_prefers_profile_then_claims_then_email() {
        let profile = User {
            username: Some("alice_p".to_string()),
            email: Some("p@example.com".to_string()),
            name: None,
        };
        let view = DashboardView::resolve(Some(&profile), Some("alice"), Some("a@example.com"));
        assert_eq!(view.username, "alice_p");
        assert_eq!(view.email.as_deref(), Some("p@example.com"));
        assert_eq!(view.source, ProfileSource::Directory);

        let view = DashboardView::resolve(None, None, Some("bob@example.com"));
        assert_eq!(view.username, "bob");
        assert_eq!(view.initials, "B");

        let view = DashboardView::resolve(None, None, None);
        assert_eq!(view.username, "User");
        assert_eq!(view.initials, "U");
        assert_eq!(view.email, None);
        assert_eq!(view.avatar_color, string_to_color("User"));
    }

    #[tokio::test]
    async fn no_token_redirects_without_requests() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mounted = DashboardScreen::mount_at(api_for(&server, Session::in_memory())?, NOW).await?;
        assert!(matches!(
            mounted,
            Mounted::Redirect {
                route: Route::Login,
                alert: None
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn expired_token_clears_session() -> Result<()> {
        let server = MockServer::start().await;
        let session = Session::in_memory();
        // exp lands exactly one second before now
        session.set(&token(&json!({"username": "alice", "exp": NOW / 1000 - 1})), "alice")?;

        let mounted = DashboardScreen::mount_at(api_for(&server, session.clone())?, NOW).await?;
        assert!(matches!(mounted, Mounted::Redirect { route: Route::Login, .. }));
        assert_eq!(session.get(), None);
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_token_clears_session() -> Result<()> {
        let server = MockServer::start().await;
        let session = Session::in_memory();
        session.set("garbage", "alice")?;

        let mounted = DashboardScreen::mount_at(api_for(&server, session.clone())?, NOW).await?;
        assert!(matches!(mounted, Mounted::Redirect { .. }));
        assert!(!session.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn enriches_from_directory() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"username": "bob", "email": "bob@example.com"},
                {"username": "alice", "email": "alice@corp.example"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::in_memory();
        session.set(&token(&json!({"exp": NOW / 1000 + 3600})), "alice")?;

        let Mounted::Ready(screen) =
            DashboardScreen::mount_at(api_for(&server, session.clone())?, NOW).await?
        else {
            bail!("expected the dashboard");
        };
        // username falls back to the cached one and matches the directory
        assert_eq!(screen.view().username, "alice");
        assert_eq!(screen.view().email.as_deref(), Some("alice@corp.example"));
        assert_eq!(screen.view().source, ProfileSource::Directory);
        assert_eq!(screen.change_password(), Route::ChangePassword);

        assert_eq!(screen.logout()?, Route::Login);
        assert_eq!(session.get(), None);
        Ok(())
    }

    #[tokio::test]
    async fn empty_username_claim_falls_back_to_cached_username() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"username": "", "email": "blank@example.com"},
                {"username": "erin", "email": "erin@example.com"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::in_memory();
        session.set(
            &token(&json!({"username": "", "exp": NOW / 1000 + 60})),
            "erin",
        )?;

        let Mounted::Ready(screen) = DashboardScreen::mount_at(api_for(&server, session)?, NOW).await?
        else {
            bail!("expected the dashboard");
        };
        assert_eq!(screen.view().username, "erin");
        assert_eq!(screen.view().email.as_deref(), Some("erin@example.com"));
        assert_eq!(screen.view().source, ProfileSource::Directory);
        Ok(())
    }

    #[tokio::test]
    async fn directory_failure_uses_token_fields() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::in_memory();
        session.set(
            &token(&json!({
                "username": "carol",
                "email": "carol@example.com",
                "exp": NOW / 1000 + 60
            })),
            "carol",
        )?;

        let Mounted::Ready(screen) = DashboardScreen::mount_at(api_for(&server, session)?, NOW).await?
        else {
            bail!("expected the dashboard");
        };
        assert_eq!(screen.view().username, "carol");
        assert_eq!(screen.view().email.as_deref(), Some("carol@example.com"));
        assert_eq!(screen.view().initials, "C");
        assert_eq!(screen.view().source, ProfileSource::Token);
        Ok(())
    }
}
