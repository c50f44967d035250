use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::user::User;

#[derive(Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                AppError::validation("Username already exists")
            }
            other => other.into(),
        })?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = UserRepo::new(test_pool().await);
        repo.create("alice", "not-a-real-hash").await.unwrap();

        let user = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let repo = UserRepo::new(test_pool().await);
        repo.create("alice", "hash-one").await.unwrap();

        assert!(matches!(
            repo.create("alice", "hash-two").await,
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
