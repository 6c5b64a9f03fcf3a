//! Impls - ports の実装（開発用・デモ用）
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: 人工遅延付きの Data Store
//! - **seed**: デモ用の users / tasks

pub mod inmem_store;
pub mod seed;

pub use self::inmem_store::InMemoryTaskStore;
