pub mod memory;
pub mod postgres;

use crate::{
    error::AppResult,
    models::{NewRecommendation, NewUser, Recommendation, User},
};

pub use memory::MemStorage;
pub use postgres::{create_pool, PgStorage};

/// Persistence for users and recommendations
///
/// Both backends behave identically: ids start at 1 and strictly increase,
/// `created_at` never goes backwards, and recent listings are newest first.
/// Postgres serializes inserts with an advisory lock to keep this under
/// concurrent writers.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i32) -> AppResult<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Fails with a conflict when the username is taken
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    async fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> AppResult<Recommendation>;

    /// Returns at most `limit` records, newest first
    async fn get_recent_recommendations(&self, limit: usize) -> AppResult<Vec<Recommendation>>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
