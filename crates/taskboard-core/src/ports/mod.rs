//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」。board は具体的な実装ではなく
//! この trait 越しに Data Store・時計・ID 生成器を使う。

pub mod clock;
pub mod id_generator;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, SequenceGenerator, UlidGenerator};
pub use self::task_store::TaskStore;
