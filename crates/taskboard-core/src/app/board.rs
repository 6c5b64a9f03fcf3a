//! TaskBoard - Application State Container
//!
//! tasks / users / filters / toasts / error と操作ごとの状態を保持し、
//! すべての変更を TaskStore 経由で行う。
//!
//! # 学習ポイント
//! - `tokio::sync::watch` による状態の配信（暗黙のグローバル context の代わり）
//! - 操作ごとの状態機械（Pending → Succeeded | Failed）で共有 loading フラグを置き換え
//! - Drop ガードで「途中で drop された操作」も終端させる
//! - ローカル状態は Data Store の成功後にだけ変更する

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;

use super::toasts::ToastTimers;
use crate::domain::{
    BoardError, Mutation, OperationId, OperationKind, OperationRecord, StoreError,
    Task, TaskDraft, TaskFilter, TaskFilterPatch, TaskId, Toast, ToastId, ToastKind, User, UserId,
};
use crate::ports::{Clock, TaskStore};
use crate::view::BoardView;

const CANCELLED: &str = "Operation cancelled";

/// Published board state. Consumers only ever see clones or shared borrows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    /// Page-level message of the last failure.
    pub error: Option<String>,
    pub filters: TaskFilter,
    pub toasts: Vec<Toast>,
    /// Pending operations plus a bounded history of finished ones, oldest first.
    pub operations: VecDeque<OperationRecord>,
    /// Bumped whenever `tasks` changes.
    revision: u64,
}

impl BoardState {
    /// At least one operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.operations.iter().any(|op| op.state.is_pending())
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    pub fn operation(&self, id: OperationId) -> Option<&OperationRecord> {
        self.operations.iter().find(|op| op.id == id)
    }

    pub fn pending_operations(&self) -> impl Iterator<Item = &OperationRecord> {
        self.operations.iter().filter(|op| op.state.is_pending())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.revision += 1;
    }

    /// Keeps every pending record and the newest `keep` finished ones.
    fn prune_finished(&mut self, keep: usize) {
        let finished = self
            .operations
            .iter()
            .filter(|op| op.state.is_terminal())
            .count();
        let mut excess = finished.saturating_sub(keep);
        self.operations.retain(|op| {
            if excess > 0 && op.state.is_terminal() {
                excess -= 1;
                false
            } else {
                true
            }
        });
    }
}

struct CachedView {
    revision: u64,
    filters: TaskFilter,
    view: Arc<BoardView>,
}

pub(crate) struct BoardInner {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    state: watch::Sender<BoardState>,
    toast_timers: ToastTimers,
    toast_ttl: Duration,
    operation_history: usize,
    next_operation: AtomicU64,
    next_toast: AtomicU64,
    view_cache: Mutex<Option<CachedView>>,
}

impl BoardInner {
    fn remove_toast(&self, id: ToastId) -> bool {
        self.state.send_if_modified(|state| {
            let before = state.toasts.len();
            state.toasts.retain(|toast| toast.id != id);
            state.toasts.len() != before
        })
    }
}

/// TaskBoard は Application State Container
///
/// clone は同じ board へのハンドル（`Arc`）。必要なコンポーネントに明示的に渡す。
///
/// # 使用例
/// ```ignore
/// let board = BoardBuilder::new(store).build()?;
/// board.initialize().await?;
/// board.set_filters(TaskFilterPatch::default().search("docs"));
/// let view = board.view();
/// ```
#[derive(Clone)]
pub struct TaskBoard {
    inner: Arc<BoardInner>,
}

impl TaskBoard {
    pub(crate) fn new(
        store: Arc<dyn TaskStore>,
        clock: Arc<dyn Clock>,
        toast_ttl: Duration,
        operation_history: usize,
    ) -> Self {
        let (state, _) = watch::channel(BoardState::default());
        Self {
            inner: Arc::new(BoardInner {
                store,
                clock,
                state,
                toast_timers: ToastTimers::default(),
                toast_ttl,
                operation_history,
                next_operation: AtomicU64::new(1),
                next_toast: AtomicU64::new(1),
                view_cache: Mutex::new(None),
            }),
        }
    }

    // ========================================
    // 読み取り
    // ========================================

    /// Clone of the current state.
    pub fn snapshot(&self) -> BoardState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    pub fn filters(&self) -> TaskFilter {
        self.inner.state.borrow().filters.clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.state.borrow().toasts.clone()
    }

    /// Local lookup against the last fetched tasks. Never touches the store.
    pub fn get_task(&self, id: &TaskId) -> Option<Task> {
        self.inner.state.borrow().task(id).cloned()
    }

    pub fn user(&self, id: &UserId) -> Option<User> {
        self.inner.state.borrow().user(id).cloned()
    }

    pub fn operation(&self, id: OperationId) -> Option<OperationRecord> {
        self.inner.state.borrow().operation(id).cloned()
    }

    /// Derived view for the current tasks and filters.
    ///
    /// Recomputed only when the tasks or the filters changed since the last call.
    pub fn view(&self) -> Arc<BoardView> {
        let (revision, filters, tasks) = {
            let state = self.inner.state.borrow();
            if let Some(cached) = self.cached_view(state.revision, &state.filters) {
                return cached;
            }
            (state.revision, state.filters.clone(), state.tasks.clone())
        };

        // state borrow released here
        let view = Arc::new(BoardView::compute(&tasks, &filters));
        tracing::trace!(revision, "board view recomputed");
        *self
            .inner
            .view_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(CachedView {
            revision,
            filters,
            view: Arc::clone(&view),
        });
        view
    }

    fn cached_view(&self, revision: u64, filters: &TaskFilter) -> Option<Arc<BoardView>> {
        let cache = self
            .inner
            .view_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        cache
            .as_ref()
            .filter(|cached| cached.revision == revision && &cached.filters == filters)
            .map(|cached| Arc::clone(&cached.view))
    }

    // ========================================
    // 操作（非同期）
    // ========================================

    /// Fetches tasks and users concurrently and replaces the local copies.
    ///
    /// On failure `error` is set and the local collections stay as they were.
    pub async fn initialize(&self) -> Result<(), BoardError> {
        let op = self.begin(OperationKind::Initialize);
        let store = &self.inner.store;
        match tokio::try_join!(store.list_tasks(), store.list_users()) {
            Ok((tasks, users)) => {
                tracing::info!(tasks = tasks.len(), users = users.len(), "board initialized");
                self.inner.state.send_modify(|state| {
                    state.replace_tasks(tasks);
                    state.users = users;
                    state.error = None;
                });
                op.succeed();
                Ok(())
            }
            Err(source) => {
                let err = BoardError::Fetch(source);
                let message = err.user_message();
                tracing::warn!(error = %err, "initial fetch failed");
                self.inner.state.send_modify(|state| {
                    state.error = Some(message.clone());
                });
                op.fail(message);
                Err(err)
            }
        }
    }

    /// Creates a task in the store, then prepends it locally.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task, BoardError> {
        let op = self.begin(OperationKind::CreateTask);
        match self.inner.store.create_task(draft).await {
            Ok(task) => {
                self.inner.state.send_modify(|state| {
                    let mut tasks = std::mem::take(&mut state.tasks);
                    tasks.insert(0, task.clone());
                    state.replace_tasks(tasks);
                });
                op.succeed();
                self.add_toast(success_message(Mutation::Create), ToastKind::Success);
                Ok(task)
            }
            Err(source) => Err(self.mutation_failed(op, Mutation::Create, source)),
        }
    }

    /// Updates a task in the store, then replaces the local copy in place.
    pub async fn update_task(&self, task: Task) -> Result<Task, BoardError> {
        let op = self.begin(OperationKind::UpdateTask {
            task_id: task.id.clone(),
        });
        match self.inner.store.update_task(task).await {
            Ok(updated) => {
                self.inner.state.send_modify(|state| {
                    let mut tasks = std::mem::take(&mut state.tasks);
                    if let Some(slot) = tasks.iter_mut().find(|t| t.id == updated.id) {
                        *slot = updated.clone();
                    }
                    state.replace_tasks(tasks);
                });
                op.succeed();
                self.add_toast(success_message(Mutation::Update), ToastKind::Success);
                Ok(updated)
            }
            Err(source) => Err(self.mutation_failed(op, Mutation::Update, source)),
        }
    }

    /// Deletes a task in the store, then removes the local copy.
    ///
    /// A missing id is not an error: returns `Ok(false)` and emits an info toast.
    pub async fn delete_task(&self, id: &TaskId) -> Result<bool, BoardError> {
        let op = self.begin(OperationKind::DeleteTask {
            task_id: id.clone(),
        });
        match self.inner.store.delete_task(id).await {
            Ok(true) => {
                self.inner.state.send_modify(|state| {
                    let mut tasks = std::mem::take(&mut state.tasks);
                    tasks.retain(|task| &task.id != id);
                    state.replace_tasks(tasks);
                });
                op.succeed();
                self.add_toast(success_message(Mutation::Delete), ToastKind::Success);
                Ok(true)
            }
            Ok(false) => {
                tracing::debug!(task_id = %id, "delete of unknown task");
                op.succeed();
                self.add_toast("Task not found", ToastKind::Info);
                Ok(false)
            }
            Err(source) => Err(self.mutation_failed(op, Mutation::Delete, source)),
        }
    }

    // ========================================
    // フィルタ（同期、I/O なし）
    // ========================================

    pub fn set_filters(&self, patch: TaskFilterPatch) {
        self.inner.state.send_if_modified(|state| {
            let before = state.filters.clone();
            state.filters.merge(patch);
            state.filters != before
        });
    }

    pub fn reset_filters(&self) {
        self.inner.state.send_if_modified(|state| {
            if state.filters.is_default() {
                return false;
            }
            state.filters = TaskFilter::default();
            true
        });
    }

    // ========================================
    // Toast
    // ========================================

    /// Adds a toast and schedules its removal after the configured TTL.
    pub fn add_toast(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = ToastId(self.inner.next_toast.fetch_add(1, Ordering::Relaxed));
        let toast = Toast {
            id,
            message: message.into(),
            kind,
        };
        self.inner.state.send_modify(|state| state.toasts.push(toast));

        let board: Weak<BoardInner> = Arc::downgrade(&self.inner);
        self.inner
            .toast_timers
            .schedule(id, self.inner.toast_ttl, move || {
                if let Some(inner) = board.upgrade() {
                    inner.toast_timers.forget(id);
                    if inner.remove_toast(id) {
                        tracing::trace!(toast = %id, "toast expired");
                    }
                }
            });
        id
    }

    /// Dismisses a toast and cancels its timer. Returns whether it was shown.
    pub fn remove_toast(&self, id: ToastId) -> bool {
        self.inner.toast_timers.cancel(id);
        self.inner.remove_toast(id)
    }

    // ========================================
    // 内部
    // ========================================

    fn begin(&self, kind: OperationKind) -> PendingOperation<'_> {
        let id = OperationId(self.inner.next_operation.fetch_add(1, Ordering::Relaxed));
        let record = OperationRecord::start(id, kind, self.inner.clock.now());
        tracing::debug!(op = %id, kind = ?record.kind, "operation started");
        self.inner
            .state
            .send_modify(|state| state.operations.push_back(record));
        PendingOperation {
            board: self,
            id,
            finished: false,
        }
    }

    fn finish(&self, id: OperationId, outcome: Result<(), String>) {
        let now = self.inner.clock.now();
        let keep = self.inner.operation_history;
        self.inner.state.send_modify(|state| {
            if let Some(op) = state.operations.iter_mut().find(|op| op.id == id) {
                op.finish(outcome, now);
            }
            state.prune_finished(keep);
        });
    }

    fn mutation_failed(
        &self,
        op: PendingOperation<'_>,
        action: Mutation,
        source: StoreError,
    ) -> BoardError {
        let err = BoardError::Mutation { action, source };
        let message = err.user_message();
        tracing::warn!(error = %err, "mutation failed");
        self.inner
            .state
            .send_modify(|state| state.error = Some(message.clone()));
        op.fail(message.clone());
        self.add_toast(message, ToastKind::Error);
        err
    }
}

impl std::fmt::Debug for TaskBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("TaskBoard")
            .field("tasks", &state.tasks.len())
            .field("users", &state.users.len())
            .field("loading", &state.is_loading())
            .field("toasts", &state.toasts.len())
            .finish()
    }
}

fn success_message(action: Mutation) -> String {
    format!("Task {} successfully", action.past_tense())
}

/// Pending operation handle. Dropping it unfinished marks the record failed.
struct PendingOperation<'a> {
    board: &'a TaskBoard,
    id: OperationId,
    finished: bool,
}

impl PendingOperation<'_> {
    fn succeed(mut self) {
        self.finished = true;
        tracing::debug!(op = %self.id, "operation succeeded");
        self.board.finish(self.id, Ok(()));
    }

    fn fail(mut self, message: String) {
        self.finished = true;
        self.board.finish(self.id, Err(message));
    }
}

impl Drop for PendingOperation<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(op = %self.id, "operation dropped before completion");
            self.board.finish(self.id, Err(CANCELLED.to_string()));
        }
    }
}
