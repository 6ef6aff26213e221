use sea_orm::entity::prelude::*;

use crate::domain::model::VerificationToken;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique: a user holds at most one live token.
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub token: String,
    pub delivered: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VerificationToken {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            token: m.token,
            delivered: m.delivered,
            created_at: m.created_at,
        }
    }
}
