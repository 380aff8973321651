use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record that an order changed status. Rendered through its template.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub template_message_id: i32,
    pub hotel_order_id: Option<i32>,
    pub ticket_order_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::template_message::Entity",
        from = "Column::TemplateMessageId",
        to = "super::template_message::Column::Id"
    )]
    TemplateMessage,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::template_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateMessage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
