use sea_orm::entity::prelude::*;

/// Account record. Exactly one of `email` / `phone` is set; `auth_type`
/// tags which. Both carry unique constraints — contact identity uniqueness
/// is enforced here, not in application code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    pub auth_type: i16,
    pub auth_status: i16,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::verify_codes::Entity")]
    VerifyCodes,
}

impl Related<super::verify_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerifyCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
