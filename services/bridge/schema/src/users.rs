use sea_orm::entity::prelude::*;

/// Web account record consulted by the bridge.
/// The bridge only reads these rows; account management lives elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique; looked up case-insensitively.
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub email: String,
    pub is_active: bool,
    pub email_verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::app_passwords::Entity")]
    AppPasswords,
}

impl Related<super::app_passwords::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppPasswords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
