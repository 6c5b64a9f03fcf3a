//! Domain model (ids, tasks, users, filters, toasts, operations, errors).

pub mod errors;
pub mod filter;
pub mod ids;
pub mod operation;
pub mod task;
pub mod toast;
pub mod user;

pub use self::errors::{BoardError, Mutation, StoreError};
pub use self::filter::{FilterValue, TaskFilter, TaskFilterPatch};
pub use self::ids::{OperationId, TaskId, ToastId, UserId};
pub use self::operation::{OperationKind, OperationRecord, OperationState};
pub use self::task::{DraftError, DraftProblem, ParseEnumError, Task, TaskDraft, TaskPriority, TaskStatus};
pub use self::toast::{Toast, ToastKind};
pub use self::user::User;
