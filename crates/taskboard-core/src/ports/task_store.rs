//! TaskStore port - Task / User の正本（source of truth）
//!
//! 呼び出しはすべて非同期。失敗は `StoreError` でリジェクトされる。
//!
//! # 実装
//! - `impls::InMemoryTaskStore`: 人工的な遅延付きのモック

use async_trait::async_trait;

use crate::domain::{StoreError, Task, TaskDraft, TaskId, User, UserId};

/// TaskStore は Task / User レコードの正本
///
/// # 契約
/// - `list_tasks` は保存順のスナップショット（新しく作成したものが先頭）
/// - `create_task` は新しい ID を採番し、`created_at == updated_at == now` で先頭に追加
/// - `update_task` は ID が無ければ `StoreError::NotFound`、あれば `updated_at = now` で置換
/// - `delete_task` は ID が無ければ `Ok(false)`（エラーではない）
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, StoreError>;

    async fn update_task(&self, task: Task) -> Result<Task, StoreError>;

    async fn delete_task(&self, id: &TaskId) -> Result<bool, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;
}
