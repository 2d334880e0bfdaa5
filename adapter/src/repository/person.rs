use crate::database::{
    model::person::{PaginatedPersonRow, PersonRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::PersonId,
    list::PaginatedList,
    person::{
        event::{CreatePerson, DeletePerson, UpdatePerson},
        Person, PersonListOptions,
    },
    role::Role,
};
use kernel::repository::person::PersonRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct PersonRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PersonRepository for PersonRepositoryImpl {
    async fn create(&self, event: CreatePerson) -> AppResult<PersonId> {
        let person_id = PersonId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO persons (person_id, role, name, email, phone_number)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(person_id)
        .bind(event.role.as_ref())
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.phone_number)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            // email / phone_number の一意制約違反は入力エラーとして返す
            sqlx::Error::Database(ref de) if de.is_unique_violation() => {
                AppError::UnprocessableEntity(
                    "email or phone number is already registered".into(),
                )
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No person record has been created".into(),
            ));
        }

        Ok(person_id)
    }

    async fn find_by_id(&self, person_id: PersonId, role: Role) -> AppResult<Option<Person>> {
        let row: Option<PersonRow> = sqlx::query_as(
            r#"
                SELECT person_id, name, email, phone_number, role
                FROM persons
                WHERE person_id = $1 AND role = $2
            "#,
        )
        .bind(person_id)
        .bind(role.as_ref())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Person::try_from).transpose()
    }

    async fn find_all(
        &self,
        options: PersonListOptions,
        role: Role,
    ) -> AppResult<PaginatedList<Person>> {
        let PersonListOptions { limit, offset } = options;

        // 総件数とページ分の ID を先に取り、本体は find_all_by_ids で引く。
        // どちらも (created_at, person_id) 順なので並びは一致する
        let rows: Vec<PaginatedPersonRow> = sqlx::query_as(
            r#"
                SELECT COUNT(*) OVER() AS total, person_id
                FROM persons
                WHERE role = $1
                ORDER BY created_at ASC, person_id ASC
                LIMIT $2 OFFSET $3
            "#,
        )
        .bind(role.as_ref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let total = rows.first().map(|r| r.total).unwrap_or_default();
        let person_ids: Vec<PersonId> = rows.into_iter().map(|r| r.person_id).collect();
        let items = self.find_all_by_ids(&person_ids, role).await?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_all_by_ids(&self, person_ids: &[PersonId], role: Role) -> AppResult<Vec<Person>> {
        let ids: Vec<Uuid> = person_ids.iter().map(|id| id.raw()).collect();
        let rows: Vec<PersonRow> = sqlx::query_as(
            r#"
                SELECT person_id, name, email, phone_number, role
                FROM persons
                WHERE person_id = ANY($1) AND role = $2
                ORDER BY created_at ASC, person_id ASC
            "#,
        )
        .bind(&ids)
        .bind(role.as_ref())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Person::try_from).collect()
    }

    async fn update(&self, event: UpdatePerson) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE persons
                SET name = $1, email = $2, phone_number = $3
                WHERE person_id = $4 AND role = $5
            "#,
        )
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.phone_number)
        .bind(event.person_id)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => {
                AppError::UnprocessableEntity(
                    "email or phone number is already registered".into(),
                )
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "{} {} is not found",
                event.role.as_ref(),
                event.person_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeletePerson) -> AppResult<()> {
        // 予約済みスロットを持つ人を消すと Booking が壊れるため削除を拒否する。
        // 未予約のスロットは FK の CASCADE で一緒に消える
        let res = sqlx::query(
            r#"
                DELETE FROM persons
                WHERE person_id = $1
                  AND role = $2
                  AND NOT EXISTS (
                      SELECT 1 FROM schedules
                      WHERE person_id = $1
                        AND (owned_booking_id IS NOT NULL OR parent_booking_id IS NOT NULL)
                  )
            "#,
        )
        .bind(event.person_id)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            let exists: Option<(PersonId,)> =
                sqlx::query_as("SELECT person_id FROM persons WHERE person_id = $1 AND role = $2")
                    .bind(event.person_id)
                    .bind(event.role.as_ref())
                    .fetch_optional(self.db.inner_ref())
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            return match exists {
                Some(_) => Err(AppError::UnprocessableEntity(format!(
                    "{} {} has booked meetings and cannot be deleted",
                    event.role.as_ref(),
                    event.person_id
                ))),
                None => Err(AppError::EntityNotFound(format!(
                    "{} {} is not found",
                    event.role.as_ref(),
                    event.person_id
                ))),
            };
        }

        Ok(())
    }
}
