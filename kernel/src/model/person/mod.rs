use crate::model::{id::PersonId, role::Role};

pub mod event;

// 一覧取得のページネーション範囲
#[derive(Debug)]
pub struct PersonListOptions {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub person_id: PersonId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}
