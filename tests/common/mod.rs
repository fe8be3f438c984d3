#![allow(dead_code)]

use inkwell::config::Settings;
use inkwell::db::Database;
use inkwell::entities::{novels, users, volumes};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use uuid::Uuid;

/// URL of a fresh file-backed `SQLite` database in the temp dir.
pub fn temp_db_url() -> String {
    let path = std::env::temp_dir().join(format!("inkwell-test-{}.db", Uuid::new_v4()));
    format!("sqlite:{}", path.display())
}

pub async fn test_db() -> Database {
    let db = Database::with_pool_options(&temp_db_url(), 5, 1)
        .await
        .expect("failed to open test database");
    db.migrate().await.expect("failed to migrate test database");
    db
}

pub fn test_settings(database_url: &str) -> Settings {
    Settings::from_lookup(|key| match key {
        "PROJECT_NAME" => Some("inkwell-test".to_string()),
        "DATABASE_URL" => Some(database_url.to_string()),
        _ => None,
    })
    .expect("test settings should load")
}

pub fn new_user(email: &str) -> users::ActiveModel {
    users::ActiveModel {
        email: Set(email.to_string()),
        password: Set("$argon2id$v=19$m=8192,t=3,p=1$c2FsdA$aGFzaA".to_string()),
        nickname: Set("reader".to_string()),
        ..users::ActiveModel::new()
    }
}

pub fn new_novel(user_id: Uuid, title: &str) -> novels::ActiveModel {
    novels::ActiveModel {
        user_id: Set(user_id),
        title: Set(title.to_string()),
        ..novels::ActiveModel::new()
    }
}

pub fn new_volume(novel_id: Uuid, title: &str, sort_order: i32) -> volumes::ActiveModel {
    volumes::ActiveModel {
        novel_id: Set(novel_id),
        title: Set(title.to_string()),
        sort_order: Set(sort_order),
        ..volumes::ActiveModel::new()
    }
}

pub async fn insert_user(db: &Database, email: &str) -> users::Model {
    new_user(email)
        .insert(db.conn())
        .await
        .expect("failed to insert user")
}

pub async fn insert_novel(db: &Database, user_id: Uuid, title: &str) -> novels::Model {
    new_novel(user_id, title)
        .insert(db.conn())
        .await
        .expect("failed to insert novel")
}

pub async fn insert_volume(
    db: &Database,
    novel_id: Uuid,
    title: &str,
    sort_order: i32,
) -> volumes::Model {
    new_volume(novel_id, title, sort_order)
        .insert(db.conn())
        .await
        .expect("failed to insert volume")
}
