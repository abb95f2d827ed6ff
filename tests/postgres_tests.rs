//! Runs against a real database only when `TEST_DATABASE_URL` is set

use pelicrush_api::{
    db::{create_pool, PgStorage, Storage},
    models::NewRecommendation,
};

async fn test_storage() -> Option<PgStorage> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = create_pool(&url).await.unwrap();
    let storage = PgStorage::new(pool);
    storage.migrate().await.unwrap();
    Some(storage)
}

#[tokio::test]
async fn test_concurrent_inserts_keep_ids_and_timestamps_ordered() {
    let Some(storage) = test_storage().await else {
        return;
    };
    let marker = uuid::Uuid::new_v4().to_string();

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let storage = storage.clone();
            let user_query = format!("{} {}", marker, i);
            tokio::spawn(async move {
                storage
                    .create_recommendation(NewRecommendation {
                        user_query,
                        ai_response: "1. Up (2009) - Animación".to_string(),
                    })
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        created.push(handle.await.unwrap());
    }
    created.sort_by_key(|r| r.id);

    for pair in created.windows(2) {
        assert!(pair[0].id < pair[1].id);
        assert!(pair[0].created_at <= pair[1].created_at);
    }

    let recent = storage.get_recent_recommendations(12).await.unwrap();
    let newest = created.last().unwrap();
    assert!(recent[0].id >= newest.id);
    for pair in recent.windows(2) {
        assert!(pair[0].id > pair[1].id);
    }
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let Some(storage) = test_storage().await else {
        return;
    };
    let username = format!("user-{}", uuid::Uuid::new_v4());
    let user = pelicrush_api::models::NewUser {
        username: username.clone(),
        password: "secreto".to_string(),
    };

    storage.create_user(user.clone()).await.unwrap();
    let err = storage.create_user(user).await.unwrap_err();
    assert!(matches!(err, pelicrush_api::error::AppError::Conflict(_)));
    assert!(storage.get_user_by_username(&username).await.unwrap().is_some());
}
