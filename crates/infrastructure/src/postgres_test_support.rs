use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use sprintboard_core::{UserId, UserIdentity};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connects to `DATABASE_URL` and migrates, or returns `None` when unset.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres tests: {error}");
    }

    Some(pool)
}

pub(crate) async fn insert_user(pool: &PgPool) -> UserIdentity {
    let user_id = UserId::new();
    let email = format!("{user_id}@sprintboard.test");
    let insert = sqlx::query(
        r#"
            INSERT INTO app_users (id, email, full_name)
            VALUES ($1, $2, $3)
            "#,
    )
    .bind(user_id.as_uuid())
    .bind(email.as_str())
    .bind("Test User")
    .execute(pool)
    .await;
    assert!(insert.is_ok());

    UserIdentity::new(user_id, email, Some("Test User".to_owned()))
}
