//! User directory lookups used to enrich the dashboard profile.

pub mod client;
pub mod types;
