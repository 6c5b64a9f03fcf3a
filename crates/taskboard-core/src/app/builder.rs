//! BoardBuilder - board の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 依存（store / clock）の明示的な注入

use std::sync::Arc;
use std::time::Duration;

use super::TaskBoard;
use crate::config::BoardConfig;
use crate::impls::InMemoryTaskStore;
use crate::ports::{Clock, SystemClock, TaskStore};

/// BuildError は board 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("toast ttl must be greater than zero")]
    ZeroToastTtl,

    #[error("operation history must keep at least one finished operation")]
    ZeroOperationHistory,
}

/// BoardBuilder は TaskBoard を構築
///
/// # 使用例
/// ```ignore
/// let board = BoardBuilder::new(store)
///     .clock(clock)
///     .toast_ttl(Duration::from_secs(3))
///     .build()?;
/// ```
pub struct BoardBuilder {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    toast_ttl: Duration,
    operation_history: usize,
}

impl BoardBuilder {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        let defaults = BoardConfig::default();
        Self {
            store,
            clock: Arc::new(SystemClock),
            toast_ttl: defaults.toast_ttl(),
            operation_history: defaults.operation_history,
        }
    }

    /// In-memory store wired from the config, sharing `clock` with the board.
    pub fn from_config(config: &BoardConfig, clock: Arc<dyn Clock>) -> Self {
        let store = InMemoryTaskStore::from_config(config, Arc::clone(&clock));
        Self::new(Arc::new(store))
            .clock(clock)
            .toast_ttl(config.toast_ttl())
            .operation_history(config.operation_history)
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn toast_ttl(mut self, ttl: Duration) -> Self {
        self.toast_ttl = ttl;
        self
    }

    pub fn operation_history(mut self, keep: usize) -> Self {
        self.operation_history = keep;
        self
    }

    /// # 検証
    /// - toast ttl が 0 でないこと
    /// - operation history が 0 でないこと
    pub fn build(self) -> Result<TaskBoard, BuildError> {
        if self.toast_ttl.is_zero() {
            return Err(BuildError::ZeroToastTtl);
        }
        if self.operation_history == 0 {
            return Err(BuildError::ZeroOperationHistory);
        }
        Ok(TaskBoard::new(
            self.store,
            self.clock,
            self.toast_ttl,
            self.operation_history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;

    fn config() -> BoardConfig {
        BoardConfig {
            latency: LatencyConfig::none(),
            ..BoardConfig::default()
        }
    }

    #[test]
    fn test_build_success() {
        let board = BoardBuilder::from_config(&config(), Arc::new(SystemClock)).build();
        assert!(board.is_ok());
    }

    #[test]
    fn test_build_rejects_zero_ttl() {
        let mut config = config();
        config.toast_ttl_ms = 0;
        let board = BoardBuilder::from_config(&config, Arc::new(SystemClock)).build();
        assert!(matches!(board, Err(BuildError::ZeroToastTtl)));
    }

    #[test]
    fn test_build_rejects_zero_history() {
        let board = BoardBuilder::from_config(&config(), Arc::new(SystemClock))
            .operation_history(0)
            .build();
        assert!(matches!(board, Err(BuildError::ZeroOperationHistory)));
    }

    #[tokio::test]
    async fn test_from_config_board_sees_seed_data() {
        let board = BoardBuilder::from_config(&config(), Arc::new(SystemClock))
            .build()
            .unwrap();
        board.initialize().await.unwrap();
        assert_eq!(board.snapshot().tasks.len(), 8);
        assert_eq!(board.snapshot().users.len(), 5);
    }
}
