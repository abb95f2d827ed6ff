use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::Storage,
    error::{AppError, AppResult},
    models::{NewRecommendation, NewUser, Recommendation, User},
};

/// Advisory lock serializing recommendation inserts
const RECOMMENDATION_INSERT_LOCK: i64 = 0x7065_6c69;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed storage
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait::async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Username {} already exists", user.username),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> AppResult<Recommendation> {
        // Ids and timestamps are assigned under the lock, so a higher id never
        // gets an earlier created_at even with concurrent writers.
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(RECOMMENDATION_INSERT_LOCK)
            .execute(&mut *tx)
            .await?;

        let created = sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations (user_query, ai_response, created_at)
            VALUES (
                $1,
                $2,
                GREATEST(clock_timestamp(), (SELECT MAX(created_at) FROM recommendations))
            )
            RETURNING id, user_query, ai_response, created_at
            "#,
        )
        .bind(&recommendation.user_query)
        .bind(&recommendation.ai_response)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_recent_recommendations(&self, limit: usize) -> AppResult<Vec<Recommendation>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, user_query, ai_response, created_at
            FROM recommendations
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
