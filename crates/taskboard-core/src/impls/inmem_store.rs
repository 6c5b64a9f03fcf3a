//! InMemoryTaskStore - 人工的な遅延付きのモック Data Store
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による排他（遅延中はロックを持たない）
//! - Clock / IdGenerator の注入によるテスト容易性
//! - 呼び出しごとのスナップショット（clone）返却

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::seed;
use crate::config::{BoardConfig, IdStrategy, LatencyConfig};
use crate::domain::{StoreError, Task, TaskDraft, TaskId, User, UserId};
use crate::ports::{Clock, IdGenerator, SequenceGenerator, TaskStore, UlidGenerator};

/// Store state.
struct InMemoryStoreState {
    /// Most recently created first.
    tasks: Vec<Task>,

    /// Read-only reference data.
    users: Vec<User>,
}

impl InMemoryStoreState {
    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }
}

/// InMemoryTaskStore は開発用の Data Store
///
/// # 使用例
/// ```ignore
/// let store = InMemoryTaskStore::seeded(clock, ids, LatencyConfig::default());
/// let tasks = store.list_tasks().await?;
/// ```
pub struct InMemoryTaskStore {
    state: Mutex<InMemoryStoreState>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    latency: LatencyConfig,
}

impl InMemoryTaskStore {
    pub fn new(
        tasks: Vec<Task>,
        users: Vec<User>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            state: Mutex::new(InMemoryStoreState { tasks, users }),
            clock,
            ids,
            latency,
        }
    }

    /// Store pre-filled with the demo users and tasks.
    pub fn seeded(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>, latency: LatencyConfig) -> Self {
        let now = clock.now();
        Self::new(seed::demo_tasks(now), seed::demo_users(), clock, ids, latency)
    }

    /// Wires clock, id strategy, latency and seed data from a config.
    pub fn from_config(config: &BoardConfig, clock: Arc<dyn Clock>) -> Self {
        let ids: Arc<dyn IdGenerator> = match config.id_strategy {
            IdStrategy::Ulid => Arc::new(UlidGenerator::new(Arc::clone(&clock))),
            IdStrategy::Sequence => {
                let first = if config.seed_demo_data {
                    seed::DEMO_TASK_COUNT + 1
                } else {
                    1
                };
                Arc::new(SequenceGenerator::starting_at(first))
            }
        };
        if config.seed_demo_data {
            Self::seeded(clock, ids, config.latency.clone())
        } else {
            Self::new(Vec::new(), Vec::new(), clock, ids, config.latency.clone())
        }
    }

    async fn simulate_latency(&self, op: &'static str, millis: u64) {
        if millis == 0 {
            return;
        }
        tracing::debug!(op, latency_ms = millis, "simulating store latency");
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.simulate_latency("list_tasks", self.latency.list_tasks_ms)
            .await;
        let state = self.state.lock().await;
        Ok(state.tasks.clone())
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        self.simulate_latency("get_task", self.latency.get_task_ms).await;
        let state = self.state.lock().await;
        Ok(state.position(id).map(|i| state.tasks[i].clone()))
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        self.simulate_latency("create_task", self.latency.create_task_ms)
            .await;
        let task = Task::from_draft(self.ids.next_task_id(), draft, self.clock.now());

        let mut state = self.state.lock().await;
        state.tasks.insert(0, task.clone());
        tracing::info!(task_id = %task.id, total = state.tasks.len(), "task created");
        Ok(task)
    }

    async fn update_task(&self, task: Task) -> Result<Task, StoreError> {
        self.simulate_latency("update_task", self.latency.update_task_ms)
            .await;
        let mut state = self.state.lock().await;
        let Some(index) = state.position(&task.id) else {
            tracing::warn!(task_id = %task.id, "update of unknown task");
            return Err(StoreError::NotFound(task.id));
        };

        let created_at = state.tasks[index].created_at;
        let updated = Task {
            created_at,
            updated_at: self.clock.now(),
            ..task
        };
        state.tasks[index] = updated.clone();
        tracing::info!(task_id = %updated.id, "task updated");
        Ok(updated)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<bool, StoreError> {
        self.simulate_latency("delete_task", self.latency.delete_task_ms)
            .await;
        let mut state = self.state.lock().await;
        match state.position(id) {
            Some(index) => {
                state.tasks.remove(index);
                tracing::info!(task_id = %id, "task deleted");
                Ok(true)
            }
            None => {
                tracing::debug!(task_id = %id, "delete of unknown task is a no-op");
                Ok(false)
            }
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.simulate_latency("list_users", self.latency.list_users_ms)
            .await;
        let state = self.state.lock().await;
        Ok(state.users.clone())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.simulate_latency("get_user", self.latency.get_user_ms).await;
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|user| &user.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskPriority, TaskStatus};
    use crate::ports::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn store_with(clock: Arc<FixedClock>, latency: LatencyConfig) -> InMemoryTaskStore {
        InMemoryTaskStore::seeded(
            clock,
            Arc::new(SequenceGenerator::starting_at(seed::DEMO_TASK_COUNT + 1)),
            latency,
        )
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: "B".to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Low,
            assigned_to: UserId::new("1"),
            due_date: start(),
        }
    }

    #[tokio::test]
    async fn create_prepends_and_stamps_both_timestamps() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock, LatencyConfig::none());

        let created = store.create_task(draft("A")).await.unwrap();
        assert_eq!(created.id, TaskId::new("9"));
        assert_eq!(created.created_at, start());
        assert_eq!(created.updated_at, created.created_at);

        let tasks = store.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 9);
        assert_eq!(tasks[0], created);
    }

    #[tokio::test]
    async fn list_returns_a_snapshot() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock, LatencyConfig::none());

        let mut snapshot = store.list_tasks().await.unwrap();
        snapshot.clear();

        assert_eq!(store.list_tasks().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn update_forces_updated_at_and_keeps_created_at() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock.clone(), LatencyConfig::none());

        let mut task = store.get_task(&TaskId::new("2")).await.unwrap().unwrap();
        let original_created = task.created_at;
        task.title = "Review code changes again".to_string();
        task.created_at = start() + chrono::Duration::days(100);
        clock.advance(chrono::Duration::minutes(5));

        let updated = store.update_task(task).await.unwrap();
        assert_eq!(updated.title, "Review code changes again");
        assert_eq!(updated.created_at, original_created);
        assert_eq!(updated.updated_at, start() + chrono::Duration::minutes(5));

        // 位置は変わらない
        let tasks = store.list_tasks().await.unwrap();
        assert_eq!(tasks[1], updated);
    }

    #[tokio::test]
    async fn update_of_unknown_task_is_not_found() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock, LatencyConfig::none());
        let before = store.list_tasks().await.unwrap();

        let mut ghost = before[0].clone();
        ghost.id = TaskId::new("404");
        let err = store.update_task(ghost).await.unwrap_err();

        assert_eq!(err, StoreError::NotFound(TaskId::new("404")));
        assert_eq!(store.list_tasks().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_reports_whether_something_was_removed() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock, LatencyConfig::none());
        let before = store.list_tasks().await.unwrap();

        assert!(!store.delete_task(&TaskId::new("404")).await.unwrap());
        assert_eq!(store.list_tasks().await.unwrap(), before);

        assert!(store.delete_task(&TaskId::new("3")).await.unwrap());
        let after = store.list_tasks().await.unwrap();
        let expected: Vec<Task> = before
            .into_iter()
            .filter(|t| t.id != TaskId::new("3"))
            .collect();
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn users_are_looked_up_by_id() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock, LatencyConfig::none());

        assert_eq!(store.list_users().await.unwrap().len(), 5);
        let jane = store.get_user(&UserId::new("2")).await.unwrap().unwrap();
        assert_eq!(jane.name, "Jane Smith");
        assert!(store.get_user(&UserId::new("99")).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn calls_take_the_configured_latency() {
        let clock = Arc::new(FixedClock::new(start()));
        let store = store_with(clock, LatencyConfig::default());

        let started = tokio::time::Instant::now();
        store.create_task(draft("slow")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));

        let started = tokio::time::Instant::now();
        store.list_users().await.unwrap();
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn from_config_without_seed_starts_empty_with_sequence_one() {
        let config = BoardConfig {
            seed_demo_data: false,
            id_strategy: IdStrategy::Sequence,
            latency: LatencyConfig::none(),
            ..BoardConfig::default()
        };
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(start()));
        let store = InMemoryTaskStore::from_config(&config, clock);

        assert!(store.list_tasks().await.unwrap().is_empty());
        let created = store.create_task(draft("first")).await.unwrap();
        assert_eq!(created.id, TaskId::new("1"));
    }
}
