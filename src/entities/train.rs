use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "train")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code_train: String,
    pub name: String,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::train_station::Entity")]
    TrainStations,
    #[sea_orm(has_many = "super::train_carriage::Entity")]
    TrainCarriages,
}

impl Related<super::train_station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainStations.def()
    }
}

impl Related<super::train_carriage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrainCarriages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
