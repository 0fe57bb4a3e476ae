//! Repository for the `sessions` table.

use sqlx::SqlitePool;
use uuid::Uuid;
use warden_core::types::UnixMillis;

use crate::models::session::{CreateSession, Session, SessionPrincipal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "token_hash, user_id, created_at, expires_at";

/// Provides operations on operator sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(&input.token_hash)
            .bind(input.user_id)
            .bind(input.created_at)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by token hash.
    pub async fn find_by_token_hash(
        pool: &SqlitePool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE token_hash = ?");
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a session token hash to its principal (session joined with
    /// user) in a single lookup. Expiry is checked by the caller so an
    /// expired row can be deleted and reported distinctly.
    pub async fn find_principal(
        pool: &SqlitePool,
        token_hash: &str,
    ) -> Result<Option<SessionPrincipal>, sqlx::Error> {
        sqlx::query_as::<_, SessionPrincipal>(
            "SELECT s.token_hash, s.user_id, s.expires_at, u.name, u.permissions
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Delete a session by token hash. Absent rows are not an error;
    /// returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all sessions for a user. Returns the count of deleted rows.
    pub async fn delete_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every session that expired at or before `now`.
    /// Returns the count of deleted rows.
    pub async fn delete_expired(pool: &SqlitePool, now: UnixMillis) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use warden_core::types::now_ms;

    use super::*;
    use crate::models::user::CreateUser;
    use crate::repositories::UserRepo;

    async fn seed_user(pool: &SqlitePool) -> Uuid {
        let input = CreateUser {
            id: Uuid::new_v4(),
            name: "operator".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            permissions: 0,
            created_at: now_ms(),
        };
        UserRepo::create(pool, &input).await.unwrap().id
    }

    fn sample_session(user_id: Uuid, hash: &str, expires_at: UnixMillis) -> CreateSession {
        CreateSession {
            token_hash: hash.to_string(),
            user_id,
            created_at: now_ms(),
            expires_at,
        }
    }

    #[sqlx::test]
    async fn create_and_resolve_principal(pool: SqlitePool) {
        let user_id = seed_user(&pool).await;
        let session = sample_session(user_id, "hash-a", now_ms() + 60_000);
        SessionRepo::create(&pool, &session).await.unwrap();

        let principal = SessionRepo::find_principal(&pool, "hash-a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.name, "operator");

        assert!(SessionRepo::find_principal(&pool, "hash-b")
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test]
    async fn delete_is_idempotent(pool: SqlitePool) {
        let user_id = seed_user(&pool).await;
        let session = sample_session(user_id, "hash-a", now_ms() + 60_000);
        SessionRepo::create(&pool, &session).await.unwrap();

        assert!(SessionRepo::delete(&pool, "hash-a").await.unwrap());
        assert!(!SessionRepo::delete(&pool, "hash-a").await.unwrap());
    }

    #[sqlx::test]
    async fn expired_sweep_removes_only_expired(pool: SqlitePool) {
        let user_id = seed_user(&pool).await;
        let now = now_ms();
        SessionRepo::create(&pool, &sample_session(user_id, "stale", now - 1))
            .await
            .unwrap();
        SessionRepo::create(&pool, &sample_session(user_id, "live", now + 60_000))
            .await
            .unwrap();

        let removed = SessionRepo::delete_expired(&pool, now).await.unwrap();
        assert_eq!(removed, 1);
        assert!(SessionRepo::find_by_token_hash(&pool, "stale")
            .await
            .unwrap()
            .is_none());
        assert!(SessionRepo::find_by_token_hash(&pool, "live")
            .await
            .unwrap()
            .is_some());
    }

    #[sqlx::test]
    async fn user_deletion_cascades_sessions(pool: SqlitePool) {
        let user_id = seed_user(&pool).await;
        SessionRepo::create(&pool, &sample_session(user_id, "hash-a", now_ms() + 60_000))
            .await
            .unwrap();

        assert!(UserRepo::delete(&pool, user_id).await.unwrap());
        assert!(SessionRepo::find_by_token_hash(&pool, "hash-a")
            .await
            .unwrap()
            .is_none());
    }
}
