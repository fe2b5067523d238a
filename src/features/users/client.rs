use crate::{
    app_lib::{ApiClient, ApiError},
    features::users::types::{users_from_value, User},
};
use tracing::{error, instrument};

const FETCH_USERS_FAILED: &str = "Failed to fetch users";

/// Fetches the user directory with the current session's bearer token.
///
/// # Errors
/// Returns the normalized [`ApiError`] on transport failure or non-2xx status.
#[instrument(skip(api))]
pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    let value = api
        .get_value("/users", FETCH_USERS_FAILED)
        .await
        .inspect_err(|err| error!("Get users error: {err}"))?;

    Ok(users_from_value(value))
}
