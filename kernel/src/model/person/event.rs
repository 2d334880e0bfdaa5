use crate::model::{id::PersonId, role::Role};
use derive_new::new;

#[derive(new)]
pub struct CreatePerson {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

// 連絡先をまるごと入れ替える
#[derive(new)]
pub struct UpdatePerson {
    pub person_id: PersonId,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, new)]
pub struct DeletePerson {
    pub person_id: PersonId,
    pub role: Role,
}
