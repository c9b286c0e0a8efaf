//! SeaORM entity for the users table

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use userapi_types::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        User {
            id: Some(m.id),
            name: m.name,
            email: m.email,
        }
    }
}

// A user without an assigned id maps to a NotSet primary key, which `save`
// turns into an insert; an assigned id makes it an update.
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            name: ActiveValue::Set(user.name.clone()),
            email: ActiveValue::Set(user.email.clone()),
        }
    }
}
