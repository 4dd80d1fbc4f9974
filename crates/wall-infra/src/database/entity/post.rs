//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub is_automated: bool,
}

// Reports point at posts by id only; there is no foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for wall_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            created_at: model.created_at.into(),
            image_url: model.image_url,
            is_automated: model.is_automated,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<wall_core::domain::Post> for ActiveModel {
    fn from(post: wall_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            text: Set(post.text),
            created_at: Set(post.created_at.into()),
            image_url: Set(post.image_url),
            is_automated: Set(post.is_automated),
        }
    }
}
