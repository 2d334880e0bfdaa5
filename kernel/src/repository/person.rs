use crate::model::{
    id::PersonId,
    list::PaginatedList,
    person::{
        event::{CreatePerson, DeletePerson, UpdatePerson},
        Person, PersonListOptions,
    },
    role::Role,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PersonRepository: Send + Sync {
    // 候補者または面接官を登録する
    async fn create(&self, event: CreatePerson) -> AppResult<PersonId>;
    // ロール付きで 1 名を取得する
    async fn find_by_id(&self, person_id: PersonId, role: Role) -> AppResult<Option<Person>>;
    // 指定ロールの一覧を登録順・ページネーション付きで取得する
    async fn find_all(
        &self,
        options: PersonListOptions,
        role: Role,
    ) -> AppResult<PaginatedList<Person>>;
    // ID リストに一致する指定ロールの人を取得する（存在しない ID は無視する）
    async fn find_all_by_ids(&self, person_ids: &[PersonId], role: Role) -> AppResult<Vec<Person>>;
    // 連絡先を更新する
    async fn update(&self, event: UpdatePerson) -> AppResult<()>;
    // 予約済みスロットを持たない人のみ削除できる
    async fn delete(&self, event: DeletePerson) -> AppResult<()>;
}
