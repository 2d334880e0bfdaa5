use crate::database::{model::schedule::ScheduleRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{PersonId, ScheduleId},
    schedule::{
        event::{CreateSchedule, DeleteSchedule, UpdateSchedule},
        Schedule,
    },
};
use kernel::repository::schedule::ScheduleRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ScheduleRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ScheduleRepository for ScheduleRepositoryImpl {
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId> {
        let exists: Option<(PersonId,)> =
            sqlx::query_as("SELECT person_id FROM persons WHERE person_id = $1")
                .bind(event.person_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        if exists.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "person {} is not found",
                event.person_id
            )));
        }

        let schedule_id = ScheduleId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO schedules (schedule_id, person_id, day, hour)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(schedule_id)
        .bind(event.person_id)
        .bind(event.day)
        .bind(event.hour)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            // 同じ人が同じ (day, hour) を二重登録することはできない
            sqlx::Error::Database(ref de) if de.is_unique_violation() => {
                AppError::UnprocessableEntity(format!(
                    "schedule at {} {} already exists",
                    event.day, event.hour
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No schedule record has been created".into(),
            ));
        }

        Ok(schedule_id)
    }

    async fn find_by_person_id(&self, person_id: PersonId) -> AppResult<Vec<Schedule>> {
        let rows: Vec<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT schedule_id, person_id, day, hour
                FROM schedules
                WHERE person_id = $1
                ORDER BY created_at ASC, schedule_id ASC
            "#,
        )
        .bind(person_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn find_by_id(
        &self,
        schedule_id: ScheduleId,
        person_id: PersonId,
    ) -> AppResult<Option<Schedule>> {
        let row: Option<ScheduleRow> = sqlx::query_as(
            r#"
                SELECT schedule_id, person_id, day, hour
                FROM schedules
                WHERE schedule_id = $1 AND person_id = $2
            "#,
        )
        .bind(schedule_id)
        .bind(person_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Schedule::from))
    }

    async fn update(&self, event: UpdateSchedule) -> AppResult<()> {
        // 予約済みスロットの時間をずらすと Booking と食い違うため、
        // 未予約のものだけ変更できる
        let res = sqlx::query(
            r#"
                UPDATE schedules
                SET day = $1, hour = $2
                WHERE schedule_id = $3
                  AND person_id = $4
                  AND owned_booking_id IS NULL
                  AND parent_booking_id IS NULL
            "#,
        )
        .bind(event.day)
        .bind(event.hour)
        .bind(event.schedule_id)
        .bind(event.person_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref de) if de.is_unique_violation() => {
                AppError::UnprocessableEntity(format!(
                    "schedule at {} {} already exists",
                    event.day, event.hour
                ))
            }
            e => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(
                unmodifiable_reason(&self.db, event.schedule_id, event.person_id, "updated").await,
            );
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteSchedule) -> AppResult<()> {
        // 予約済みスロットを消すと Booking が壊れるため、未予約のものだけ削除する
        let res = sqlx::query(
            r#"
                DELETE FROM schedules
                WHERE schedule_id = $1
                  AND person_id = $2
                  AND owned_booking_id IS NULL
                  AND parent_booking_id IS NULL
            "#,
        )
        .bind(event.schedule_id)
        .bind(event.person_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(
                unmodifiable_reason(&self.db, event.schedule_id, event.person_id, "deleted").await,
            );
        }

        Ok(())
    }
}

// 未予約条件付きの UPDATE / DELETE が 0 行に終わった原因を、
// 「予約済み」か「存在しない」かに切り分ける
async fn unmodifiable_reason(
    db: &ConnectionPool,
    schedule_id: ScheduleId,
    person_id: PersonId,
    verb: &str,
) -> AppError {
    let exists: Result<Option<(ScheduleId,)>, sqlx::Error> = sqlx::query_as(
        "SELECT schedule_id FROM schedules WHERE schedule_id = $1 AND person_id = $2",
    )
    .bind(schedule_id)
    .bind(person_id)
    .fetch_optional(db.inner_ref())
    .await;

    match exists {
        Ok(Some(_)) => AppError::UnprocessableEntity(format!(
            "schedule {schedule_id} is booked and cannot be {verb}"
        )),
        Ok(None) => AppError::EntityNotFound(format!("schedule {schedule_id} is not found")),
        Err(e) => AppError::SpecificOperationError(e),
    }
}
