use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::train_carriage::TrainClass;

/// A seat name within a class, e.g. `A1`. Carriages of the same class share seat names.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "train_seat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub class: TrainClass,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
