//! App - アプリケーション層
//!
//! ports を組み合わせて Application State Container を実装します。
//!
//! # 主要コンポーネント
//! - **BoardBuilder**: board の構築とワイヤリング
//! - **TaskBoard**: 状態の保持・配信と CRUD 操作
//! - **ToastTimers**: toast の自動消去

pub mod board;
pub mod builder;
mod toasts;

pub use self::board::{BoardState, TaskBoard};
pub use self::builder::{BoardBuilder, BuildError};
