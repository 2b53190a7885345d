//! Session keys.

/// Account id minted at signup.
pub const USER_ID: &str = "user_id";
