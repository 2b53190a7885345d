use time::{OffsetDateTime, macros::format_description};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub email: String,
    pub profile_image_url: String,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StatusMessage {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub message: String,
    /// Milliseconds since the epoch, UTC.
    pub timestamp: i64,
}

impl StatusMessage {
    pub fn posted_at(&self) -> String {
        format_millis(self.timestamp)
    }
}

/// A status message joined with its author, as shown in a news feed.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FeedEntry {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub message: String,
    pub timestamp: i64,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
}

impl FeedEntry {
    pub fn posted_at(&self) -> String {
        format_millis(self.timestamp)
    }
}

/// An undirected friendship. The lower id is always `low`, so (a, b) and
/// (b, a) are the same value and the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FriendEdge {
    low: Uuid,
    high: Uuid,
}

impl FriendEdge {
    /// `None` for a self-pairing.
    pub fn new(a: Uuid, b: Uuid) -> Option<FriendEdge> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(FriendEdge { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(FriendEdge { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }

    /// The far end of the edge as seen from `me`.
    pub fn other(&self, me: Uuid) -> Option<Uuid> {
        if me == self.low {
            Some(self.high)
        } else if me == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub email: String,
    pub profile_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub city: String,
    pub email: String,
    pub profile_image_url: String,
}

pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn format_millis(millis: i64) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .ok()
        .and_then(|at| at.format(format).ok())
        .unwrap_or_else(|| millis.to_string())
}
