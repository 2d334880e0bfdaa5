use kernel::model::{id::PersonId, person::Person, role::Role};
use shared::error::AppError;
use std::str::FromStr;

// ページネーション用の adapter 内部の型
#[derive(sqlx::FromRow)]
pub struct PaginatedPersonRow {
    pub total: i64,
    pub person_id: PersonId,
}

#[derive(sqlx::FromRow)]
pub struct PersonRow {
    pub person_id: PersonId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
}

impl TryFrom<PersonRow> for Person {
    type Error = AppError;

    fn try_from(value: PersonRow) -> Result<Self, Self::Error> {
        let PersonRow {
            person_id,
            name,
            email,
            phone_number,
            role,
        } = value;
        let role = Role::from_str(&role).map_err(|e| {
            AppError::ConversionEntityError(format!("unknown role '{role}': {e}"))
        })?;
        Ok(Person {
            person_id,
            name,
            email,
            phone_number,
            role,
        })
    }
}
