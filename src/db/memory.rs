use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::Storage,
    error::{AppError, AppResult},
    models::{NewRecommendation, NewUser, Recommendation, User},
};

/// In-memory storage
///
/// Records live in ordered maps keyed by an auto-incrementing id. Nothing
/// survives a restart.
#[derive(Default)]
pub struct MemStorage {
    inner: RwLock<MemStorageInner>,
}

#[derive(Default)]
struct MemStorageInner {
    users: BTreeMap<i32, User>,
    recommendations: BTreeMap<i32, Recommendation>,
    last_user_id: i32,
    last_recommendation_id: i32,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username {} already exists",
                user.username
            )));
        }

        inner.last_user_id += 1;
        let user = User {
            id: inner.last_user_id,
            username: user.username,
            password: user.password,
        };
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn create_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> AppResult<Recommendation> {
        let mut inner = self.inner.write().await;

        // Clock steps backwards must not reorder the recent listing
        let now = Utc::now();
        let created_at = match inner.recommendations.values().next_back() {
            Some(previous) if previous.created_at > now => previous.created_at,
            _ => now,
        };

        inner.last_recommendation_id += 1;
        let recommendation = Recommendation {
            id: inner.last_recommendation_id,
            user_query: recommendation.user_query,
            ai_response: recommendation.ai_response,
            created_at,
        };
        inner
            .recommendations
            .insert(recommendation.id, recommendation.clone());

        Ok(recommendation)
    }

    async fn get_recent_recommendations(&self, limit: usize) -> AppResult<Vec<Recommendation>> {
        let inner = self.inner.read().await;
        Ok(inner
            .recommendations
            .values()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_recommendation(query: &str) -> NewRecommendation {
        NewRecommendation {
            user_query: query.to_string(),
            ai_response: format!("1. Respuesta para {} - Drama", query),
        }
    }

    #[tokio::test]
    async fn test_recommendation_ids_strictly_increase() {
        let storage = MemStorage::new();

        let mut previous: Option<Recommendation> = None;
        for i in 0..20 {
            let rec = storage
                .create_recommendation(new_recommendation(&format!("consulta {}", i)))
                .await
                .unwrap();
            if let Some(prev) = &previous {
                assert!(rec.id > prev.id);
                assert!(rec.created_at >= prev.created_at);
            } else {
                assert_eq!(rec.id, 1);
            }
            previous = Some(rec);
        }
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let storage = MemStorage::new();
        for query in ["a", "b", "c", "d"] {
            storage
                .create_recommendation(new_recommendation(query))
                .await
                .unwrap();
        }

        let recent = storage.get_recent_recommendations(3).await.unwrap();
        let queries: Vec<&str> = recent.iter().map(|r| r.user_query.as_str()).collect();
        assert_eq!(queries, vec!["d", "c", "b"]);

        let all = storage.get_recent_recommendations(10).await.unwrap();
        assert_eq!(all.len(), 4);

        let none = storage.get_recent_recommendations(0).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_recent_on_empty_storage() {
        let storage = MemStorage::new();
        assert!(storage.get_recent_recommendations(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let storage = MemStorage::new();
        let user = storage
            .create_user(NewUser {
                username: "cinefilo".to_string(),
                password: "secreto".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, 1);

        assert_eq!(storage.get_user(1).await.unwrap(), Some(user.clone()));
        assert_eq!(
            storage.get_user_by_username("cinefilo").await.unwrap(),
            Some(user)
        );
        assert_eq!(storage.get_user(2).await.unwrap(), None);
        assert_eq!(storage.get_user_by_username("nadie").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = MemStorage::new();
        let new_user = NewUser {
            username: "cinefilo".to_string(),
            password: "a".to_string(),
        };
        storage.create_user(new_user.clone()).await.unwrap();

        let err = storage.create_user(new_user).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
