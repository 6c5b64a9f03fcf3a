//! IdGenerator port - Task ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: 単調増加 ULID（デフォルト）
//! - **SequenceGenerator**: 単純な連番（seed の "1".."8" に続けたいとき）
//!
//! どちらも同一ミリ秒内の連続生成で衝突しない。

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use ulid::{Generator, Ulid};

use crate::domain::TaskId;
use crate::ports::Clock;

/// IdGenerator は Task ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数タスクから使える）
pub trait IdGenerator: Send + Sync {
    fn next_task_id(&self) -> TaskId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// 同じミリ秒内ではランダム部分をインクリメントするので、生成順に並ぶ。
pub struct UlidGenerator<C> {
    clock: C,
    generator: Mutex<Generator>,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            generator: Mutex::new(Generator::new()),
        }
    }

    fn next_ulid(&self) -> Ulid {
        let now: SystemTime = self.clock.now().into();
        let mut generator = self
            .generator
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match generator.generate_from_datetime(now) {
            Ok(ulid) => ulid,
            Err(_) => {
                // ランダム部分が溢れた場合のみ。新しい generator で仕切り直す
                *generator = Generator::new();
                let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
                Ulid::from_parts(timestamp_ms, rand::random())
            }
        }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn next_task_id(&self) -> TaskId {
        TaskId::new(self.next_ulid().to_string())
    }
}

/// Monotonic counter rendered as a decimal string.
#[derive(Debug)]
pub struct SequenceGenerator {
    next: AtomicU64,
}

impl SequenceGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequenceGenerator {
    fn next_task_id(&self) -> TaskId {
        TaskId::new(self.next.fetch_add(1, Ordering::SeqCst).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let ids: HashSet<TaskId> = (0..1000).map(|_| id_gen.next_task_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ulid_generator_is_monotonic_within_one_tick() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1: Ulid = id_gen.next_task_id().as_str().parse().unwrap();
        let id2: Ulid = id_gen.next_task_id().as_str().parse().unwrap();

        // 同じ時刻でも ID は異なり、生成順に並ぶ
        assert!(id1 < id2);
        assert_eq!(id1.timestamp_ms(), id2.timestamp_ms());
        assert_eq!(id1.timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }

    #[test]
    fn sequence_generator_counts_up() {
        let id_gen = SequenceGenerator::starting_at(9);
        assert_eq!(id_gen.next_task_id(), TaskId::new("9"));
        assert_eq!(id_gen.next_task_id(), TaskId::new("10"));
    }
}
