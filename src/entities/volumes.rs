use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, QueryOrder, Select, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "volumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub novel_id: Uuid,

    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Position among the volumes of the same novel. Not unique.
    pub sort_order: i32,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::novels::Entity",
        from = "Column::NovelId",
        to = "super::novels::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Novel,
}

impl Entity {
    #[must_use]
    pub fn find_by_novel(novel_id: Uuid) -> Select<Self> {
        Self::find()
            .filter(Column::NovelId.eq(novel_id))
            .order_by_asc(Column::SortOrder)
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
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
