//! Operation - board 操作ごとの状態機械
//!
//! # 状態遷移
//! - pending: Data Store の応答待ち
//! - succeeded: 成功
//! - failed: 失敗（メッセージ付き）
//!
//! `Pending -> Succeeded | Failed` の一方向のみ。終端状態からは遷移しない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OperationId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationKind {
    Initialize,
    CreateTask,
    UpdateTask { task_id: TaskId },
    DeleteTask { task_id: TaskId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OperationState {
    Pending,
    Succeeded,
    Failed { message: String },
}

impl OperationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: OperationId,
    pub kind: OperationKind,
    pub state: OperationState,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl OperationRecord {
    pub fn start(id: OperationId, kind: OperationKind, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind,
            state: OperationState::Pending,
            started_at: now,
            finished_at: None,
        }
    }

    /// Pending の場合のみ遷移する。戻り値は遷移したかどうか。
    pub fn finish(&mut self, outcome: Result<(), String>, now: DateTime<Utc>) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = match outcome {
            Ok(()) => OperationState::Succeeded,
            Err(message) => OperationState::Failed { message },
        };
        self.finished_at = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn finish_moves_pending_to_terminal_once() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        let mut op = OperationRecord::start(OperationId(1), OperationKind::CreateTask, t0);
        assert!(op.state.is_pending());

        assert!(op.finish(Err("Failed to create task".into()), t1));
        assert_eq!(
            op.state,
            OperationState::Failed {
                message: "Failed to create task".into()
            }
        );
        assert_eq!(op.finished_at, Some(t1));

        assert!(!op.finish(Ok(()), t1));
        assert!(op.state.is_terminal());
        assert!(matches!(op.state, OperationState::Failed { .. }));
    }

    #[test]
    fn operation_kind_is_tagged_in_json() {
        let kind = OperationKind::DeleteTask {
            task_id: TaskId::new("3"),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "delete_task", "task_id": "3"}));
    }
}
