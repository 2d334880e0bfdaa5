use crate::database::{
    model::{
        meeting::{build_bookings, BookingSlotRow},
        person::PersonRow,
        schedule::{ScheduleRow, ScheduleStateRow},
    },
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::availability::{match_meetings, plan_booking, screen_pool, MatchPool, SlotState};
use kernel::model::{
    id::{BookingId, PersonId},
    meeting::{event::BookMeeting, AvailableMeeting, Booking},
    person::Person,
    role::Role,
    schedule::Schedule,
};
use kernel::repository::meeting::MeetingRepository;
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;
use uuid::Uuid;

// Booking と、その owner / children スロットを平坦に読む共通 SELECT。
// WHERE 句を足して使い回す
const SELECT_BOOKING_SLOTS: &str = r#"
    SELECT
        b.booking_id,
        b.created_at,
        s.schedule_id,
        s.person_id,
        s.day,
        s.hour,
        (s.owned_booking_id IS NOT NULL) AS is_owner
    FROM bookings AS b
    INNER JOIN schedules AS s
        ON s.owned_booking_id = b.booking_id
        OR s.parent_booking_id = b.booking_id
"#;

#[derive(new)]
pub struct MeetingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MeetingRepository for MeetingRepositoryImpl {
    async fn query(
        &self,
        candidate_id: PersonId,
        interviewer_ids: &[PersonId],
    ) -> AppResult<Vec<AvailableMeeting>> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;

        let pool = load_snapshot(&mut conn, candidate_id, interviewer_ids).await?;

        // ロックは取らない。ここで見えた空きはあくまで読み取り時点のもので、
        // 確定時に book が再検証する
        Ok(match_meetings(&pool.candidate_slots, &pool.interviewers))
    }

    async fn book(&self, event: BookMeeting) -> AppResult<Booking> {
        // 面接官ゼロの予約は受け付けない
        if event.interviewer_ids.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "at least one interviewer is required".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // 再検証と確定を 1 つの直列化可能トランザクションで行う
        self.set_transaction_serializable(&mut tx).await?;

        // 以前のクエリ結果は信用せず、スナップショットを取り直して
        // マッチングを再実行する
        let pool = load_snapshot(&mut tx, event.candidate_id, &event.interviewer_ids).await?;
        let plan = plan_booking(
            event.schedule_id,
            &event.interviewer_ids,
            &pool.candidate_slots,
            &pool.interviewers,
        )?;

        let booking_id = BookingId::new();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
                INSERT INTO bookings (booking_id)
                VALUES ($1)
                RETURNING created_at
            "#,
        )
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_exclusivity_conflict)?;

        // スロットの確保は compare-and-set で行う。
        // スナップショット取得後に他の予約がスロットを取った場合、
        // WHERE 句が成立せず rows_affected が 0 になる
        claim_slot(
            &mut tx,
            "UPDATE schedules SET owned_booking_id = $1 WHERE schedule_id = $2 AND owned_booking_id IS NULL AND parent_booking_id IS NULL",
            booking_id,
            &plan.owner_schedule,
        )
        .await?;
        for child in &plan.children_schedules {
            claim_slot(
                &mut tx,
                "UPDATE schedules SET parent_booking_id = $1 WHERE schedule_id = $2 AND owned_booking_id IS NULL AND parent_booking_id IS NULL",
                booking_id,
                child,
            )
            .await?;
        }

        // SERIALIZABLE の競合はコミット時にも検出され得る。
        // その場合も「スロットはもう空いていない」として返す
        tx.commit().await.map_err(map_exclusivity_conflict)?;

        Ok(Booking {
            booking_id,
            created_at,
            owner_schedule: plan.owner_schedule,
            children_schedules: plan.children_schedules,
        })
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let rows: Vec<BookingSlotRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKING_SLOTS} WHERE b.booking_id = $1 ORDER BY is_owner DESC, s.created_at ASC"
        ))
        .bind(booking_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(build_bookings(rows)?.pop())
    }

    async fn cancel(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let rows: Vec<BookingSlotRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKING_SLOTS} WHERE b.booking_id = $1 ORDER BY is_owner DESC, s.created_at ASC"
        ))
        .bind(booking_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 存在しない予約の取り消しはエラーにしない
        let Some(booking) = build_bookings(rows)?.pop() else {
            return Ok(None);
        };

        // スロット解放と Booking 削除を同一トランザクションで行い、
        // 「Booking は消えたがスロットは埋まったまま」を観測させない
        sqlx::query(
            r#"
                UPDATE schedules
                SET owned_booking_id = NULL, parent_booking_id = NULL
                WHERE owned_booking_id = $1 OR parent_booking_id = $1
            "#,
        )
        .bind(booking_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Some(booking))
    }

    async fn find_by_owner_person(&self, person_id: PersonId) -> AppResult<Vec<Booking>> {
        self.find_by_participant(
            person_id,
            "EXISTS (SELECT 1 FROM schedules AS os WHERE os.owned_booking_id = b.booking_id AND os.person_id = $1)",
        )
        .await
    }

    async fn find_by_child_person(&self, person_id: PersonId) -> AppResult<Vec<Booking>> {
        self.find_by_participant(
            person_id,
            "EXISTS (SELECT 1 FROM schedules AS cs WHERE cs.parent_booking_id = b.booking_id AND cs.person_id = $1)",
        )
        .await
    }
}

impl MeetingRepositoryImpl {
    // book / cancel のトランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    async fn find_by_participant(
        &self,
        person_id: PersonId,
        condition: &str,
    ) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingSlotRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKING_SLOTS} WHERE {condition} ORDER BY b.created_at ASC, b.booking_id ASC, is_owner DESC, s.created_at ASC"
        ))
        .bind(person_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        build_bookings(rows)
    }
}

// 候補者の空きスロットと、対象面接官ごとのスロットを読み取り、
// screen_pool でマッチング入力に選別する。
// query と book の両方がこの同じスナップショットを入力にマッチングを走らせる
async fn load_snapshot(
    conn: &mut PgConnection,
    candidate_id: PersonId,
    interviewer_ids: &[PersonId],
) -> AppResult<MatchPool> {
    let candidate_row: Option<PersonRow> = sqlx::query_as(
        r#"
            SELECT person_id, name, email, phone_number, role
            FROM persons
            WHERE person_id = $1 AND role = $2
        "#,
    )
    .bind(candidate_id)
    .bind(Role::Candidate.as_ref())
    .fetch_optional(&mut *conn)
    .await
    .map_err(AppError::SpecificOperationError)?;
    let candidate = candidate_row.map(Person::try_from).transpose()?;

    let candidate_slots: Vec<ScheduleRow> = sqlx::query_as(
        r#"
            SELECT schedule_id, person_id, day, hour
            FROM schedules
            WHERE person_id = $1
              AND owned_booking_id IS NULL
              AND parent_booking_id IS NULL
            ORDER BY created_at ASC, schedule_id ASC
        "#,
    )
    .bind(candidate_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    // ID リストが空の場合はすべての面接官を対象にする
    let interviewer_rows: Vec<PersonRow> = if interviewer_ids.is_empty() {
        sqlx::query_as(
            r#"
                SELECT person_id, name, email, phone_number, role
                FROM persons
                WHERE role = $1
                ORDER BY created_at ASC, person_id ASC
            "#,
        )
        .bind(Role::Interviewer.as_ref())
        .fetch_all(&mut *conn)
        .await
    } else {
        let ids: Vec<Uuid> = interviewer_ids.iter().map(|id| id.raw()).collect();
        sqlx::query_as(
            r#"
                SELECT person_id, name, email, phone_number, role
                FROM persons
                WHERE person_id = ANY($1) AND role = $2
                ORDER BY created_at ASC, person_id ASC
            "#,
        )
        .bind(&ids)
        .bind(Role::Interviewer.as_ref())
        .fetch_all(&mut *conn)
        .await
    }
    .map_err(AppError::SpecificOperationError)?;

    let interviewer_persons = interviewer_rows
        .into_iter()
        .map(Person::try_from)
        .collect::<AppResult<Vec<Person>>>()?;

    let person_ids: Vec<Uuid> = interviewer_persons
        .iter()
        .map(|p| p.person_id.raw())
        .collect();
    let slot_rows: Vec<ScheduleStateRow> = sqlx::query_as(
        r#"
            SELECT
                schedule_id,
                person_id,
                day,
                hour,
                (owned_booking_id IS NULL AND parent_booking_id IS NULL) AS is_free
            FROM schedules
            WHERE person_id = ANY($1)
            ORDER BY created_at ASC, schedule_id ASC
        "#,
    )
    .bind(&person_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(AppError::SpecificOperationError)?;

    let interviewer_slots: Vec<(Person, Vec<SlotState>)> = interviewer_persons
        .into_iter()
        .map(|interviewer| {
            let slots = slot_rows
                .iter()
                .filter(|row| row.person_id == interviewer.person_id)
                .map(|row| SlotState {
                    schedule: Schedule {
                        schedule_id: row.schedule_id,
                        person_id: row.person_id,
                        day: row.day,
                        hour: row.hour,
                    },
                    is_free: row.is_free,
                })
                .collect();
            (interviewer, slots)
        })
        .collect();

    screen_pool(
        candidate_id,
        candidate,
        candidate_slots.into_iter().map(Schedule::from).collect(),
        interviewer_slots,
    )
}

async fn claim_slot(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    sql: &str,
    booking_id: BookingId,
    schedule: &Schedule,
) -> AppResult<()> {
    let res = sqlx::query(sql)
        .bind(booking_id)
        .bind(schedule.schedule_id)
        .execute(&mut **tx)
        .await
        .map_err(map_exclusivity_conflict)?;

    // 0 行更新はスナップショット取得後に他の予約に取られたことを意味する
    if res.rows_affected() < 1 {
        return Err(AppError::EntityNotFound(format!(
            "schedule {} is no longer available",
            schedule.schedule_id
        )));
    }

    Ok(())
}

// 一意制約違反と直列化失敗はどちらも「競合に負けた」であり、
// 呼び出し側には NotFound 系として返す。それ以外はそのまま基盤エラー
fn map_exclusivity_conflict(e: sqlx::Error) -> AppError {
    const SERIALIZATION_FAILURE: &str = "40001";
    match &e {
        sqlx::Error::Database(de)
            if de.is_unique_violation() || de.code().as_deref() == Some(SERIALIZATION_FAILURE) =>
        {
            AppError::EntityNotFound("schedule is no longer available".into())
        }
        _ => AppError::SpecificOperationError(e),
    }
}
