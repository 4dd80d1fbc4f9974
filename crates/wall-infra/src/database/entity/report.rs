//! Report entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for wall_core::domain::Report {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            reason: model.reason,
            created_at: model.created_at.into(),
        }
    }
}

impl From<wall_core::domain::Report> for ActiveModel {
    fn from(report: wall_core::domain::Report) -> Self {
        Self {
            id: Set(report.id),
            post_id: Set(report.post_id),
            reason: Set(report.reason),
            created_at: Set(report.created_at.into()),
        }
    }
}
