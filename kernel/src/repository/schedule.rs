use crate::model::{
    id::{PersonId, ScheduleId},
    schedule::{
        event::{CreateSchedule, DeleteSchedule, UpdateSchedule},
        Schedule,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // 空きスロットを登録する。(person, day, hour) の重複は拒否する
    async fn create(&self, event: CreateSchedule) -> AppResult<ScheduleId>;
    // 本人のスロット一覧を登録順で取得する
    async fn find_by_person_id(&self, person_id: PersonId) -> AppResult<Vec<Schedule>>;
    // 本人のスロットを 1 件取得する
    async fn find_by_id(
        &self,
        schedule_id: ScheduleId,
        person_id: PersonId,
    ) -> AppResult<Option<Schedule>>;
    // 未予約のスロットのみ (day, hour) を変更できる
    async fn update(&self, event: UpdateSchedule) -> AppResult<()>;
    // 未予約のスロットのみ削除できる
    async fn delete(&self, event: DeleteSchedule) -> AppResult<()>;
}
