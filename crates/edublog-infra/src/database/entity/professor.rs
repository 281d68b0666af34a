//! Professor entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub subject: Option<String>,
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
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Professor.
impl From<Model> for edublog_core::domain::Professor {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            bio: model.bio,
            subject: model.subject,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Professor to SeaORM ActiveModel.
impl From<edublog_core::domain::Professor> for ActiveModel {
    fn from(professor: edublog_core::domain::Professor) -> Self {
        Self {
            id: Set(professor.id),
            user_id: Set(professor.user_id),
            bio: Set(professor.bio),
            subject: Set(professor.subject),
            created_at: Set(professor.created_at.into()),
            updated_at: Set(professor.updated_at.into()),
        }
    }
}
