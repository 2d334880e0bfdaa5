use crate::model::{
    id::{BookingId, PersonId},
    meeting::{event::BookMeeting, AvailableMeeting, Booking},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait MeetingRepository: Send + Sync {
    // 候補者と面接官の双方が空いている時間帯を照会する。
    // interviewer_ids が空の場合はすべての面接官を対象とする
    async fn query(
        &self,
        candidate_id: PersonId,
        interviewer_ids: &[PersonId],
    ) -> AppResult<Vec<AvailableMeeting>>;
    // 空き状況を再検証したうえでミーティングを確定する
    async fn book(&self, event: BookMeeting) -> AppResult<Booking>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 予約を取り消してスロットを解放する。存在しない場合は None
    async fn cancel(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 候補者として参加しているミーティングの一覧
    async fn find_by_owner_person(&self, person_id: PersonId) -> AppResult<Vec<Booking>>;
    // 面接官として参加しているミーティングの一覧
    async fn find_by_child_person(&self, person_id: PersonId) -> AppResult<Vec<Booking>>;
}
