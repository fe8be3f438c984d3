use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, Select, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum NovelStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "novels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub cover_url: Option<String>,

    pub status: NovelStatus,

    pub word_count: i32,

    /// Soft-delete flag; `deleted_at` records when it was set.
    pub is_deleted: bool,

    pub deleted_at: Option<DateTime>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Entity {
    /// Novels that have not been soft-deleted.
    #[must_use]
    pub fn find_live() -> Select<Self> {
        Self::find().filter(Column::IsDeleted.eq(false))
    }
}

impl ActiveModel {
    pub fn soft_delete(&mut self) {
        self.is_deleted = Set(true);
        self.deleted_at = Set(Some(chrono::Utc::now().naive_utc()));
    }

    pub fn restore(&mut self) {
        self.is_deleted = Set(false);
        self.deleted_at = Set(None);
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            status: Set(NovelStatus::Draft),
            word_count: Set(0),
            is_deleted: Set(false),
            deleted_at: Set(None),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::touch(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
