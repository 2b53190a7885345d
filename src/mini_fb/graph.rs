//! The friend graph and everything derived from it: friend lists,
//! suggestions and the news feed.
//!
//! Each friendship is one row in `friends`, keyed by the canonical
//! [`FriendEdge`] pair. Queries look at both columns to find the other side.
//! Nothing here is cached; every call reads the current graph.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{
    models::{FeedEntry, FriendEdge, Profile, now_millis},
    store::PROFILE_COLUMNS,
};

/// Ids of everyone on the other side of an edge touching `?`.
/// Binds the profile id twice.
const FRIEND_IDS: &str = "SELECT profile2 FROM friends WHERE profile1=?
    UNION SELECT profile1 FROM friends WHERE profile2=?";

/// Links two profiles. Self-pairing and existing edges, in either
/// orientation, are ignored.
pub async fn add_friend(db_pool: &SqlitePool, profile_id: Uuid, other_id: Uuid) -> sqlx::Result<()> {
    let Some(edge) = FriendEdge::new(profile_id, other_id) else {
        tracing::debug!("ignoring self friendship for {profile_id}");
        return Ok(());
    };

    let result = sqlx::query(
        "INSERT INTO friends (profile1,profile2,timestamp) VALUES (?,?,?)
        ON CONFLICT (profile1,profile2) DO NOTHING",
    )
    .bind(edge.low())
    .bind(edge.high())
    .bind(now_millis())
    .execute(db_pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::debug!("{profile_id} and {other_id} are already friends");
    } else {
        tracing::info!("{profile_id} and {other_id} are now friends");
    }
    Ok(())
}

pub async fn get_friends(db_pool: &SqlitePool, profile_id: Uuid) -> sqlx::Result<Vec<Profile>> {
    let columns = PROFILE_COLUMNS
        .split(',')
        .map(|column| format!("p.{column}"))
        .collect::<Vec<_>>()
        .join(",");

    sqlx::query_as(&format!(
        "SELECT {columns} FROM friends f
        JOIN profiles p ON p.id = CASE WHEN f.profile1=? THEN f.profile2 ELSE f.profile1 END
        WHERE f.profile1=? OR f.profile2=?
        ORDER BY f.timestamp, p.last_name, p.first_name"
    ))
    .bind(profile_id)
    .bind(profile_id)
    .bind(profile_id)
    .fetch_all(db_pool)
    .await
}

/// Everyone who is neither `profile_id` nor already a friend.
pub async fn get_friend_suggestions(db_pool: &SqlitePool, profile_id: Uuid) -> sqlx::Result<Vec<Profile>> {
    sqlx::query_as(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles
        WHERE id<>? AND id NOT IN ({FRIEND_IDS})
        ORDER BY last_name,first_name"
    ))
    .bind(profile_id)
    .bind(profile_id)
    .bind(profile_id)
    .fetch_all(db_pool)
    .await
}

/// Posts by `profile_id` and its friends, newest first.
pub async fn get_news_feed(db_pool: &SqlitePool, profile_id: Uuid) -> sqlx::Result<Vec<FeedEntry>> {
    sqlx::query_as(&format!(
        "SELECT s.id,s.profile_id,s.message,s.timestamp,p.first_name,p.last_name,p.profile_image_url
        FROM status_messages s JOIN profiles p ON p.id = s.profile_id
        WHERE s.profile_id=? OR s.profile_id IN ({FRIEND_IDS})
        ORDER BY s.timestamp DESC, s.id DESC"
    ))
    .bind(profile_id)
    .bind(profile_id)
    .bind(profile_id)
    .fetch_all(db_pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db,
        mini_fb::store::{self, tests::new_profile},
    };

    async fn profiles(db_pool: &SqlitePool, names: &[&str]) -> Vec<Profile> {
        let mut out = Vec::new();
        for name in names {
            out.push(store::create_profile(db_pool, new_profile(name, "Test")).await.unwrap());
        }
        out
    }

    async fn edge_count(db_pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM friends")
            .fetch_one(db_pool)
            .await
            .unwrap();
        count
    }

    fn ids(profiles: &[Profile]) -> Vec<Uuid> {
        profiles.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn friendship_is_visible_from_both_sides() {
        let db_pool = db::memory().await;
        let [a, b]: [Profile; 2] = profiles(&db_pool, &["Alice", "Bob"]).await.try_into().unwrap();

        add_friend(&db_pool, a.id, b.id).await.unwrap();

        assert_eq!(ids(&get_friends(&db_pool, a.id).await.unwrap()), [b.id]);
        assert_eq!(ids(&get_friends(&db_pool, b.id).await.unwrap()), [a.id]);
    }

    #[tokio::test]
    async fn reverse_orientation_is_stored_canonically() {
        let db_pool = db::memory().await;
        let [a, b]: [Profile; 2] = profiles(&db_pool, &["Alice", "Bob"]).await.try_into().unwrap();

        // b was created later, so its id sorts higher
        add_friend(&db_pool, b.id, a.id).await.unwrap();

        let (profile1, profile2): (Uuid, Uuid) = sqlx::query_as("SELECT profile1,profile2 FROM friends")
            .fetch_one(&db_pool)
            .await
            .unwrap();
        assert_eq!((profile1, profile2), (a.id, b.id));
        assert_eq!(ids(&get_friends(&db_pool, a.id).await.unwrap()), [b.id]);
    }

    #[tokio::test]
    async fn adding_twice_keeps_one_edge() {
        let db_pool = db::memory().await;
        let [a, b]: [Profile; 2] = profiles(&db_pool, &["Alice", "Bob"]).await.try_into().unwrap();

        add_friend(&db_pool, a.id, b.id).await.unwrap();
        add_friend(&db_pool, a.id, b.id).await.unwrap();
        add_friend(&db_pool, b.id, a.id).await.unwrap();

        assert_eq!(edge_count(&db_pool).await, 1);
        assert_eq!(get_friends(&db_pool, a.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn self_friendship_is_ignored() {
        let db_pool = db::memory().await;
        let [a]: [Profile; 1] = profiles(&db_pool, &["Alice"]).await.try_into().unwrap();

        add_friend(&db_pool, a.id, a.id).await.unwrap();

        assert_eq!(edge_count(&db_pool).await, 0);
        assert!(get_friends(&db_pool, a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn schema_rejects_non_canonical_rows() {
        let db_pool = db::memory().await;
        let [a, b]: [Profile; 2] = profiles(&db_pool, &["Alice", "Bob"]).await.try_into().unwrap();

        let reversed = sqlx::query("INSERT INTO friends (profile1,profile2,timestamp) VALUES (?,?,0)")
            .bind(b.id)
            .bind(a.id)
            .execute(&db_pool)
            .await;
        assert!(reversed.is_err());
    }

    #[tokio::test]
    async fn friend_of_unknown_profile_fails() {
        let db_pool = db::memory().await;
        let [a]: [Profile; 1] = profiles(&db_pool, &["Alice"]).await.try_into().unwrap();

        assert!(add_friend(&db_pool, a.id, Uuid::now_v7()).await.is_err());
        assert_eq!(edge_count(&db_pool).await, 0);
    }

    #[tokio::test]
    async fn suggestions_exclude_self_and_friends() {
        let db_pool = db::memory().await;
        let [a, b, c, d]: [Profile; 4] = profiles(&db_pool, &["Alice", "Bob", "Carol", "Dave"])
            .await
            .try_into()
            .unwrap();

        assert_eq!(
            ids(&get_friend_suggestions(&db_pool, a.id).await.unwrap()).len(),
            3
        );

        add_friend(&db_pool, a.id, b.id).await.unwrap();
        add_friend(&db_pool, d.id, a.id).await.unwrap();

        let suggestions = ids(&get_friend_suggestions(&db_pool, a.id).await.unwrap());
        assert_eq!(suggestions, [c.id]);

        // b only knows a
        let mut for_b = ids(&get_friend_suggestions(&db_pool, b.id).await.unwrap());
        for_b.sort();
        let mut expected = vec![c.id, d.id];
        expected.sort();
        assert_eq!(for_b, expected);
    }

    #[tokio::test]
    async fn news_feed_covers_self_and_friends_newest_first() {
        let db_pool = db::memory().await;
        let [a, b, c]: [Profile; 3] = profiles(&db_pool, &["Alice", "Bob", "Carol"]).await.try_into().unwrap();
        add_friend(&db_pool, a.id, b.id).await.unwrap();

        let from_a = store::create_status_at(&db_pool, a.id, "a", 1_000).await.unwrap();
        let from_b = store::create_status_at(&db_pool, b.id, "b", 2_000).await.unwrap();
        store::create_status_at(&db_pool, c.id, "c", 3_000).await.unwrap();

        let feed = get_news_feed(&db_pool, a.id).await.unwrap();
        let feed_ids: Vec<Uuid> = feed.iter().map(|entry| entry.id).collect();
        assert_eq!(feed_ids, [from_b.id, from_a.id]);
        assert_eq!(feed[0].first_name, "Bob");

        // b sees a's post too, but not c's
        let feed_ids: Vec<Uuid> = get_news_feed(&db_pool, b.id).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(feed_ids, [from_b.id, from_a.id]);
    }

    #[tokio::test]
    async fn news_feed_follows_new_friendships() {
        let db_pool = db::memory().await;
        let [a, b, c]: [Profile; 3] = profiles(&db_pool, &["Alice", "Bob", "Carol"]).await.try_into().unwrap();
        add_friend(&db_pool, a.id, b.id).await.unwrap();

        let from_a = store::create_status_at(&db_pool, a.id, "a", 1_000).await.unwrap();
        let from_b = store::create_status_at(&db_pool, b.id, "b", 2_000).await.unwrap();
        let from_c = store::create_status_at(&db_pool, c.id, "c", 3_000).await.unwrap();

        let before: Vec<Uuid> = get_news_feed(&db_pool, a.id).await.unwrap().iter().map(|e| e.id).collect();
        assert!(!before.contains(&from_c.id));

        add_friend(&db_pool, a.id, c.id).await.unwrap();

        let after: Vec<Uuid> = get_news_feed(&db_pool, a.id).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(after, [from_c.id, from_b.id, from_a.id]);
    }

    #[tokio::test]
    async fn same_timestamp_orders_by_creation() {
        let db_pool = db::memory().await;
        let [a]: [Profile; 1] = profiles(&db_pool, &["Alice"]).await.try_into().unwrap();

        let first = store::create_status_at(&db_pool, a.id, "first", 5_000).await.unwrap();
        let second = store::create_status_at(&db_pool, a.id, "second", 5_000).await.unwrap();

        let feed: Vec<Uuid> = get_news_feed(&db_pool, a.id).await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(feed, [second.id, first.id]);
    }

    #[tokio::test]
    async fn deleting_profile_removes_its_edges() {
        let db_pool = db::memory().await;
        let [a, b]: [Profile; 2] = profiles(&db_pool, &["Alice", "Bob"]).await.try_into().unwrap();
        add_friend(&db_pool, a.id, b.id).await.unwrap();

        store::delete_profile(&db_pool, b.id).await.unwrap();

        assert_eq!(edge_count(&db_pool).await, 0);
        assert!(get_friends(&db_pool, a.id).await.unwrap().is_empty());
    }
}
