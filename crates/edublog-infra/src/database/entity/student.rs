//! Student entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub enrollment: Option<String>,
    pub grade: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Student.
impl From<Model> for edublog_core::domain::Student {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            enrollment: model.enrollment,
            grade: model.grade,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Student to SeaORM ActiveModel.
impl From<edublog_core::domain::Student> for ActiveModel {
    fn from(student: edublog_core::domain::Student) -> Self {
        Self {
            id: Set(student.id),
            user_id: Set(student.user_id),
            enrollment: Set(student.enrollment),
            grade: Set(student.grade),
            created_at: Set(student.created_at.into()),
            updated_at: Set(student.updated_at.into()),
        }
    }
}
