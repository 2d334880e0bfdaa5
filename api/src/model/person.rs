use garde::Validate;
use kernel::model::{
    id::PersonId,
    list::PaginatedList,
    person::{
        event::{CreatePerson, UpdatePerson},
        Person, PersonListOptions,
    },
    role::Role,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    Candidate,
    Interviewer,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Candidate => Self::Candidate,
            Role::Interviewer => Self::Interviewer,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    // 国番号付きの電話番号のみ受け付ける
    #[garde(pattern(r"^\+[0-9]{7,15}$"))]
    pub phone_number: String,
}

impl CreatePersonRequest {
    pub fn into_event(self, role: Role) -> CreatePerson {
        let CreatePersonRequest {
            name,
            email,
            phone_number,
        } = self;
        CreatePerson::new(role, name, email, phone_number)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(pattern(r"^\+[0-9]{7,15}$"))]
    pub phone_number: String,
}

impl UpdatePersonRequest {
    pub fn into_event(self, person_id: PersonId, role: Role) -> UpdatePerson {
        let UpdatePersonRequest {
            name,
            email,
            phone_number,
        } = self;
        UpdatePerson::new(person_id, role, name, email, phone_number)
    }
}

const DEFAULT_LIMIT: i64 = 20;
const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize, Validate)]
pub struct PersonListQuery {
    #[garde(range(min = 0))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

impl From<PersonListQuery> for PersonListOptions {
    fn from(value: PersonListQuery) -> Self {
        let PersonListQuery { limit, offset } = value;
        Self { limit, offset }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedPersonResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<PersonResponse>,
}

impl From<PaginatedList<Person>> for PaginatedPersonResponse {
    fn from(value: PaginatedList<Person>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(PersonResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub person_id: PersonId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: RoleName,
}

impl From<Person> for PersonResponse {
    fn from(value: Person) -> Self {
        let Person {
            person_id,
            name,
            email,
            phone_number,
            role,
        } = value;
        Self {
            person_id,
            name,
            email,
            phone_number,
            role: RoleName::from(role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_person_request_validates_email_and_phone() {
        let ok = CreatePersonRequest {
            name: "Maria".into(),
            email: "maria@example.com".into(),
            phone_number: "+351912345678".into(),
        };
        assert!(ok.validate(&()).is_ok());

        let bad_email = CreatePersonRequest {
            name: "Maria".into(),
            email: "not-an-email".into(),
            phone_number: "+351912345678".into(),
        };
        assert!(bad_email.validate(&()).is_err());

        let bad_phone = CreatePersonRequest {
            name: "Maria".into(),
            email: "maria@example.com".into(),
            phone_number: "912345678".into(),
        };
        assert!(bad_phone.validate(&()).is_err());
    }

    #[test]
    fn person_list_query_defaults_limit_and_offset() {
        let query: PersonListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
        assert!(query.validate(&()).is_ok());
    }

    #[test]
    fn person_list_query_rejects_negative_range() {
        let query: PersonListQuery =
            serde_json::from_value(serde_json::json!({"limit": -1})).unwrap();
        assert!(query.validate(&()).is_err());
    }
}
