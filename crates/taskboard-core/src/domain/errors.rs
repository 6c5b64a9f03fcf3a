//! Errors - エラー型と分類
//!
//! - `StoreError`: Data Store がリジェクトしたときのエラー
//! - `BoardError`: board の境界で捕捉され、toast / `error` に変換されるエラー

use thiserror::Error;

use super::TaskId;

/// StoreError は TaskStore の失敗
///
/// 構造化されたエラーコードは持たず、メッセージのみを運ぶ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Which board mutation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// BoardError は board 操作の失敗
///
/// `user_message()` が board の `error` と toast に出る文言。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("failed to fetch data: {0}")]
    Fetch(#[source] StoreError),

    #[error("failed to {action} task: {source}")]
    Mutation {
        action: Mutation,
        #[source]
        source: StoreError,
    },
}

impl BoardError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(_) => "Failed to fetch data".to_string(),
            Self::Mutation { action, .. } => format!("Failed to {action} task"),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Mutation {
                source: StoreError::NotFound(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_store_details() {
        let err = BoardError::Mutation {
            action: Mutation::Update,
            source: StoreError::NotFound(TaskId::new("42")),
        };
        assert_eq!(err.user_message(), "Failed to update task");
        assert_eq!(err.to_string(), "failed to update task: Task not found: 42");
        assert!(err.is_not_found());

        let fetch = BoardError::Fetch(StoreError::Unavailable("down".into()));
        assert_eq!(fetch.user_message(), "Failed to fetch data");
        assert!(!fetch.is_not_found());
    }
}
