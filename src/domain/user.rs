use serde::{Deserialize, Serialize};

/// Minimal user identity as it appears inside other payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

/// A profile with both directions of the follow graph resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub followers: Vec<UserRef>,
    pub following: Vec<UserRef>,
}
