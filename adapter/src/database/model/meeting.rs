use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    id::{BookingId, PersonId, ScheduleId},
    meeting::Booking,
    schedule::Schedule,
};
use shared::error::{AppError, AppResult};

// Booking とそれに紐づくスロットを JOIN で平坦に読むための型。
// is_owner が true の行が候補者スロット、false の行が面接官スロット
#[derive(sqlx::FromRow)]
pub struct BookingSlotRow {
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub schedule_id: ScheduleId,
    pub person_id: PersonId,
    pub day: NaiveDate,
    pub hour: i16,
    pub is_owner: bool,
}

struct BookingAcc {
    booking_id: BookingId,
    created_at: DateTime<Utc>,
    owner: Option<Schedule>,
    children: Vec<Schedule>,
}

// 行の並び（booking 単位で連続している前提）を保ったまま Booking に組み立てる
pub fn build_bookings(rows: Vec<BookingSlotRow>) -> AppResult<Vec<Booking>> {
    let mut acc: Vec<BookingAcc> = Vec::new();

    for row in rows {
        let schedule = Schedule {
            schedule_id: row.schedule_id,
            person_id: row.person_id,
            day: row.day,
            hour: row.hour,
        };
        if acc.last().map_or(true, |b| b.booking_id != row.booking_id) {
            acc.push(BookingAcc {
                booking_id: row.booking_id,
                created_at: row.created_at,
                owner: None,
                children: Vec::new(),
            });
        }
        let last = acc.len() - 1;
        if row.is_owner {
            acc[last].owner = Some(schedule);
        } else {
            acc[last].children.push(schedule);
        }
    }

    acc.into_iter()
        .map(|b| match b.owner {
            Some(owner_schedule) => Ok(Booking {
                booking_id: b.booking_id,
                created_at: b.created_at,
                owner_schedule,
                children_schedules: b.children,
            }),
            // owner 行が無い Booking はデータ不整合
            None => Err(AppError::ConversionEntityError(format!(
                "booking {} has no owner schedule",
                b.booking_id
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        booking_id: BookingId,
        person_id: PersonId,
        hour: i16,
        is_owner: bool,
    ) -> BookingSlotRow {
        BookingSlotRow {
            booking_id,
            created_at: Utc::now(),
            schedule_id: ScheduleId::new(),
            person_id,
            day: NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(),
            hour,
            is_owner,
        }
    }

    #[test]
    fn build_groups_rows_into_bookings() {
        let first = BookingId::new();
        let second = BookingId::new();
        let candidate = PersonId::new();
        let interviewer = PersonId::new();

        let rows = vec![
            row(first, candidate, 12, true),
            row(first, interviewer, 12, false),
            row(second, interviewer, 9, false),
            row(second, candidate, 9, true),
        ];

        let bookings = build_bookings(rows).unwrap();

        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].booking_id, first);
        assert_eq!(bookings[0].owner_schedule.person_id, candidate);
        assert_eq!(bookings[0].children_schedules.len(), 1);
        assert_eq!(bookings[1].booking_id, second);
        assert_eq!(bookings[1].owner_schedule.hour, 9);
    }

    #[test]
    fn build_rejects_booking_without_owner_row() {
        let booking_id = BookingId::new();
        let rows = vec![row(booking_id, PersonId::new(), 12, false)];

        assert!(matches!(
            build_bookings(rows),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
