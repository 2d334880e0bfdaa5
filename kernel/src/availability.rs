use crate::model::{
    id::{PersonId, ScheduleId},
    meeting::{AvailableMeeting, InterviewerSlots},
    person::Person,
    schedule::Schedule,
};
use shared::error::{AppError, AppResult};

// 面接官のスロットと、その予約状態
#[derive(Debug, Clone)]
pub struct SlotState {
    pub schedule: Schedule,
    pub is_free: bool,
}

// マッチング 1 回分の入力。query と book は同じ形のプールを使う
#[derive(Debug)]
pub struct MatchPool {
    pub candidate_slots: Vec<Schedule>,
    pub interviewers: Vec<InterviewerSlots>,
}

// 読み取ったスナップショットをマッチング入力に選別する。
// - 候補者が見つからない場合は EntityNotFound
// - 候補者に空きスロットが 1 つもない場合は NoAvailability
// - スロットを 1 件も持たない面接官は対象から外す。
//   空きの有無ではなく登録の有無で判定するため、全スロットが予約済みの
//   面接官はプールに残る（マッチ結果が空になるだけでエラーにはしない）
// - 対象の面接官が 1 人も残らない場合は NoAvailability
pub fn screen_pool(
    candidate_id: PersonId,
    candidate: Option<Person>,
    free_candidate_slots: Vec<Schedule>,
    interviewer_slots: Vec<(Person, Vec<SlotState>)>,
) -> AppResult<MatchPool> {
    if candidate.is_none() {
        return Err(AppError::EntityNotFound(format!(
            "unable to find candidate {candidate_id}"
        )));
    }

    if free_candidate_slots.is_empty() {
        return Err(AppError::NoAvailability(format!(
            "candidate {candidate_id} has no free schedule"
        )));
    }

    let interviewers: Vec<InterviewerSlots> = interviewer_slots
        .into_iter()
        .filter(|(_, slots)| !slots.is_empty())
        .map(|(interviewer, slots)| InterviewerSlots {
            interviewer,
            free_slots: slots
                .into_iter()
                .filter(|s| s.is_free)
                .map(|s| s.schedule)
                .collect(),
        })
        .collect();

    if interviewers.is_empty() {
        return Err(AppError::NoAvailability("no available interviewer".into()));
    }

    Ok(MatchPool {
        candidate_slots: free_candidate_slots,
        interviewers,
    })
}

// 候補者の空きスロットごとに、同じ (day, hour) に空きスロットを持つ
// 面接官を集めて AvailableMeeting を組み立てる。
// 出力順は candidate_slots の順序をそのまま保つ（決定的であること）。
pub fn match_meetings(
    candidate_slots: &[Schedule],
    interviewers: &[InterviewerSlots],
) -> Vec<AvailableMeeting> {
    let mut available = Vec::new();
    for candidate_schedule in candidate_slots {
        let eligible: Vec<_> = interviewers
            .iter()
            .filter(|iv| {
                iv.free_slots.iter().any(|s| {
                    s.day == candidate_schedule.day && s.hour == candidate_schedule.hour
                })
            })
            .map(|iv| iv.interviewer.clone())
            .collect();
        if !eligible.is_empty() {
            available.push(AvailableMeeting {
                candidate_schedule: candidate_schedule.clone(),
                interviewers: eligible,
            });
        }
    }
    available
}

// 予約確定の直前に組み立てる、スロット割り当ての計画。
// owner が候補者スロット、children が面接官ごとに 1 件ずつのスロット
#[derive(Debug, PartialEq, Eq)]
pub struct BookingPlan {
    pub owner_schedule: Schedule,
    pub children_schedules: Vec<Schedule>,
}

// 渡されたスナップショットに対してマッチングを再実行し、
// 指定スロットが依然として予約可能かを検証したうえで計画を返す。
// - 指定スロットがマッチ結果にない場合は EntityNotFound
//   （他の予約に取られた・存在しない・空きでない、のいずれも同じ扱い）
// - 依頼した面接官の一部しか空いていない場合は InterviewerMismatch
//   （部分的な予約は認めない）
pub fn plan_booking(
    schedule_id: ScheduleId,
    requested_interviewer_ids: &[PersonId],
    candidate_slots: &[Schedule],
    interviewers: &[InterviewerSlots],
) -> AppResult<BookingPlan> {
    let available = match_meetings(candidate_slots, interviewers);
    let meeting = available
        .into_iter()
        .find(|m| m.candidate_schedule.schedule_id == schedule_id)
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("schedule {} is no longer available", schedule_id))
        })?;

    // マッチ対象は依頼された面接官に限られるため、
    // 件数が一致しなければ誰かが空いていないことになる
    if meeting.interviewers.len() != requested_interviewer_ids.len() {
        return Err(AppError::InterviewerMismatch {
            requested: requested_interviewer_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            available: meeting
                .interviewers
                .iter()
                .map(|p| p.person_id.to_string())
                .collect(),
        });
    }

    let day = meeting.candidate_schedule.day;
    let hour = meeting.candidate_schedule.hour;
    let children_schedules = meeting
        .interviewers
        .iter()
        .map(|eligible| {
            interviewers
                .iter()
                .find(|iv| iv.interviewer.person_id == eligible.person_id)
                .and_then(|iv| {
                    // (person, day, hour) は一意のはずだが、先頭の一致を採用する
                    iv.free_slots
                        .iter()
                        .find(|s| s.day == day && s.hour == hour)
                })
                .cloned()
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!(
                        "interviewer {} has no free slot at {} {}",
                        eligible.person_id, day, hour
                    ))
                })
        })
        .collect::<AppResult<Vec<Schedule>>>()?;

    Ok(BookingPlan {
        owner_schedule: meeting.candidate_schedule,
        children_schedules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{person::Person, role::Role};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 9, 15).unwrap()
    }

    fn interviewer(name: &str) -> Person {
        Person {
            person_id: PersonId::new(),
            name: name.into(),
            email: format!("{name}@example.com"),
            phone_number: "+351912345678".into(),
            role: Role::Interviewer,
        }
    }

    fn candidate(name: &str) -> Person {
        Person {
            person_id: PersonId::new(),
            name: name.into(),
            email: format!("{name}@example.com"),
            phone_number: "+351912345678".into(),
            role: Role::Candidate,
        }
    }

    fn slot(person_id: PersonId, d: NaiveDate, hour: i16) -> Schedule {
        Schedule {
            schedule_id: ScheduleId::new(),
            person_id,
            day: d,
            hour,
        }
    }

    fn with_slots(person: Person, slots: Vec<Schedule>) -> InterviewerSlots {
        InterviewerSlots {
            interviewer: person,
            free_slots: slots,
        }
    }

    #[test]
    fn match_single_interviewer_same_hour() {
        let candidate_id = PersonId::new();
        let candidate_slots = vec![slot(candidate_id, day(), 12)];

        let x = interviewer("x");
        let x_slot = slot(x.person_id, day(), 12);
        let interviewers = vec![with_slots(x.clone(), vec![x_slot])];

        let available = match_meetings(&candidate_slots, &interviewers);

        assert_eq!(available.len(), 1);
        assert_eq!(available[0].candidate_schedule, candidate_slots[0]);
        assert_eq!(available[0].interviewers, vec![x]);
    }

    #[test]
    fn match_excludes_interviewer_free_at_other_hour() {
        let candidate_id = PersonId::new();
        let candidate_slots = vec![slot(candidate_id, day(), 12)];

        let x = interviewer("x");
        let y = interviewer("y");
        let interviewers = vec![
            with_slots(x.clone(), vec![slot(x.person_id, day(), 12)]),
            with_slots(y.clone(), vec![slot(y.person_id, day(), 5)]),
        ];

        let available = match_meetings(&candidate_slots, &interviewers);

        assert_eq!(available.len(), 1);
        assert_eq!(available[0].interviewers, vec![x]);
    }

    #[test]
    fn match_requires_same_day_and_hour() {
        let candidate_id = PersonId::new();
        let candidate_slots = vec![slot(candidate_id, day(), 12)];

        let x = interviewer("x");
        let other_day = NaiveDate::from_ymd_opt(2023, 9, 16).unwrap();
        let interviewers = vec![with_slots(x.clone(), vec![slot(x.person_id, other_day, 12)])];

        assert!(match_meetings(&candidate_slots, &interviewers).is_empty());
    }

    #[test]
    fn match_keeps_candidate_slot_order() {
        let candidate_id = PersonId::new();
        let first = slot(candidate_id, day(), 9);
        let second = slot(candidate_id, day(), 12);
        let candidate_slots = vec![first.clone(), second.clone()];

        let x = interviewer("x");
        let interviewers = vec![with_slots(
            x.clone(),
            vec![slot(x.person_id, day(), 12), slot(x.person_id, day(), 9)],
        )];

        let available = match_meetings(&candidate_slots, &interviewers);

        assert_eq!(available.len(), 2);
        assert_eq!(available[0].candidate_schedule, first);
        assert_eq!(available[1].candidate_schedule, second);
    }

    #[test]
    fn match_with_no_common_hour_is_empty_not_error() {
        let candidate_id = PersonId::new();
        let candidate_slots = vec![slot(candidate_id, day(), 12)];

        let x = interviewer("x");
        let interviewers = vec![with_slots(x.clone(), vec![slot(x.person_id, day(), 13)])];

        assert!(match_meetings(&candidate_slots, &interviewers).is_empty());
    }

    #[test]
    fn plan_selects_owner_and_one_child_per_interviewer() {
        let candidate_id = PersonId::new();
        let candidate_slot = slot(candidate_id, day(), 12);

        let x = interviewer("x");
        let y = interviewer("y");
        let x_slot = slot(x.person_id, day(), 12);
        let y_slot = slot(y.person_id, day(), 12);
        let interviewers = vec![
            with_slots(x.clone(), vec![x_slot.clone()]),
            with_slots(y.clone(), vec![y_slot.clone()]),
        ];

        let plan = plan_booking(
            candidate_slot.schedule_id,
            &[x.person_id, y.person_id],
            &[candidate_slot.clone()],
            &interviewers,
        )
        .unwrap();

        assert_eq!(plan.owner_schedule, candidate_slot);
        assert_eq!(plan.children_schedules, vec![x_slot, y_slot]);
    }

    #[test]
    fn plan_rejects_slot_missing_from_match_result() {
        let candidate_id = PersonId::new();
        let candidate_slot = slot(candidate_id, day(), 12);

        let x = interviewer("x");
        let interviewers = vec![with_slots(x.clone(), vec![slot(x.person_id, day(), 12)])];

        // 実在しないスロット ID を指定した場合も、空きでなくなった場合と同じ扱い
        let res = plan_booking(
            ScheduleId::new(),
            &[x.person_id],
            &[candidate_slot],
            &interviewers,
        );

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[test]
    fn plan_rejects_partial_interviewer_availability() {
        let candidate_id = PersonId::new();
        let candidate_slot = slot(candidate_id, day(), 12);

        let x = interviewer("x");
        let y = interviewer("y");
        let interviewers = vec![
            with_slots(x.clone(), vec![slot(x.person_id, day(), 12)]),
            with_slots(y.clone(), vec![slot(y.person_id, day(), 5)]),
        ];

        let res = plan_booking(
            candidate_slot.schedule_id,
            &[x.person_id, y.person_id],
            &[candidate_slot],
            &interviewers,
        );

        match res {
            Err(AppError::InterviewerMismatch {
                requested,
                available,
            }) => {
                assert_eq!(
                    requested,
                    vec![x.person_id.to_string(), y.person_id.to_string()]
                );
                assert_eq!(available, vec![x.person_id.to_string()]);
            }
            other => panic!("expected InterviewerMismatch, got {other:?}"),
        }
    }

    #[test]
    fn plan_picks_first_slot_when_interviewer_has_duplicates() {
        let candidate_id = PersonId::new();
        let candidate_slot = slot(candidate_id, day(), 12);

        let x = interviewer("x");
        let first = slot(x.person_id, day(), 12);
        let duplicate = slot(x.person_id, day(), 12);
        let interviewers = vec![with_slots(x.clone(), vec![first.clone(), duplicate])];

        let plan = plan_booking(
            candidate_slot.schedule_id,
            &[x.person_id],
            &[candidate_slot],
            &interviewers,
        )
        .unwrap();

        assert_eq!(plan.children_schedules, vec![first]);
    }

    fn free(schedule: Schedule) -> SlotState {
        SlotState {
            schedule,
            is_free: true,
        }
    }

    fn booked(schedule: Schedule) -> SlotState {
        SlotState {
            schedule,
            is_free: false,
        }
    }

    #[test]
    fn screen_rejects_unknown_candidate() {
        let candidate_id = PersonId::new();
        let x = interviewer("x");
        let x_slot = free(slot(x.person_id, day(), 12));

        let res = screen_pool(
            candidate_id,
            None,
            vec![slot(candidate_id, day(), 12)],
            vec![(x, vec![x_slot])],
        );

        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[test]
    fn screen_rejects_candidate_without_free_slot() {
        let maria = candidate("maria");
        let x = interviewer("x");
        let x_slot = free(slot(x.person_id, day(), 12));

        let res = screen_pool(maria.person_id, Some(maria), vec![], vec![(x, vec![x_slot])]);

        assert!(matches!(res, Err(AppError::NoAvailability(_))));
    }

    #[test]
    fn screen_rejects_pool_without_any_interviewer_slot() {
        let maria = candidate("maria");
        let candidate_slots = vec![slot(maria.person_id, day(), 12)];
        let x = interviewer("x");
        let y = interviewer("y");

        // 面接官は実在するが、誰もスロットを 1 件も登録していない
        let res = screen_pool(
            maria.person_id,
            Some(maria),
            candidate_slots,
            vec![(x, vec![]), (y, vec![])],
        );

        assert!(matches!(res, Err(AppError::NoAvailability(_))));
    }

    #[test]
    fn screen_keeps_interviewer_whose_slots_are_all_booked() {
        let maria = candidate("maria");
        let candidate_slots = vec![slot(maria.person_id, day(), 12)];
        let x = interviewer("x");
        let x_slot = booked(slot(x.person_id, day(), 12));

        // 登録済みスロットが全部予約済みでもエラーにはならず、
        // マッチ結果が空になるだけ
        let pool = screen_pool(
            maria.person_id,
            Some(maria),
            candidate_slots,
            vec![(x, vec![x_slot])],
        )
        .unwrap();

        assert_eq!(pool.interviewers.len(), 1);
        assert!(pool.interviewers[0].free_slots.is_empty());
        assert!(match_meetings(&pool.candidate_slots, &pool.interviewers).is_empty());
    }

    #[test]
    fn screen_drops_interviewer_without_slots_but_keeps_the_rest() {
        let maria = candidate("maria");
        let candidate_slots = vec![slot(maria.person_id, day(), 12)];
        let x = interviewer("x");
        let y = interviewer("y");
        let y_slot = free(slot(y.person_id, day(), 12));

        let pool = screen_pool(
            maria.person_id,
            Some(maria),
            candidate_slots,
            vec![(x, vec![]), (y.clone(), vec![y_slot])],
        )
        .unwrap();

        assert_eq!(pool.interviewers.len(), 1);
        assert_eq!(pool.interviewers[0].interviewer, y);
    }
}
