use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Directory entry; unknown server fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl User {
    /// True when `username` or `email` equals the given identity.
    /// Absent values never match each other.
    #[must_use]
    pub fn matches(&self, username: Option<&str>, email: Option<&str>) -> bool {
        let same = |left: Option<&String>, right: Option<&str>| {
            matches!((left, right), (Some(left), Some(right)) if left == right)
        };
        same(self.username.as_ref(), username) || same(self.email.as_ref(), email)
    }
}

/// Accepts a bare array or `{"users": [...]}`. Any other shape is an empty
/// list; entries that do not look like users are skipped.
#[must_use]
pub fn users_from_value(value: Value) -> Vec<User> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("users") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .inspect_err(|err| debug!("skipping user entry: {err}"))
                .ok()
        })
        .collect()
}
