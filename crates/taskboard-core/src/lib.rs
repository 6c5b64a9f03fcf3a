//! taskboard-core
//!
//! Core building blocks for the task board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, user, filter, toast, operation, errors）
//! - **ports**: 抽象化レイヤー（TaskStore, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryTaskStore と seed データ）
//! - **app**: Application State Container（TaskBoard, BoardBuilder）
//! - **view**: 派生ビュー（filter / group / stats）
//! - **config**: BoardConfig（TOML）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod view;

pub use app::{BoardBuilder, BoardState, BuildError, TaskBoard};
pub use config::{BoardConfig, ConfigError, IdStrategy, LatencyConfig};
