//! Derived view - `(tasks, filters)` からの純粋関数
//!
//! - `filtered_tasks`: フィルタ後の task（元の順序を保つ）
//! - `group_by_status`: status ごとのバケット
//! - `task_stats`: フィルタ前の task 全体に対する集計
//!
//! `BoardView` はこれらをまとめた所有型のスナップショットで、
//! board がメモ化して配る。

mod filter;
mod group;
mod stats;

pub use self::filter::{filtered_tasks, overdue_tasks};
pub use self::group::{TasksByStatus, group_by_status};
pub use self::stats::{TaskStats, task_stats};

use serde::Serialize;

use crate::domain::{Task, TaskFilter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub filtered_tasks: Vec<Task>,
    pub tasks_by_status: TasksByStatus<Task>,
    pub task_stats: TaskStats,
}

impl BoardView {
    pub fn compute(tasks: &[Task], filter: &TaskFilter) -> Self {
        let filtered = filtered_tasks(tasks, filter);
        let grouped = group_by_status(&filtered);
        let owned = |bucket: Vec<&Task>| bucket.into_iter().cloned().collect::<Vec<_>>();
        Self {
            tasks_by_status: TasksByStatus {
                todo: owned(grouped.todo),
                in_progress: owned(grouped.in_progress),
                completed: owned(grouped.completed),
            },
            filtered_tasks: owned(filtered),
            task_stats: task_stats(tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterValue, TaskFilterPatch, TaskStatus};
    use crate::impls::seed::demo_tasks;
    use chrono::{TimeZone, Utc};

    #[test]
    fn stats_ignore_the_active_filter() {
        let tasks = demo_tasks(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let mut filter = TaskFilter::default();
        filter.merge(TaskFilterPatch::default().status(FilterValue::Only(TaskStatus::Completed)));

        let view = BoardView::compute(&tasks, &filter);
        assert_eq!(view.filtered_tasks.len(), 2);
        assert_eq!(view.tasks_by_status.completed, view.filtered_tasks);
        assert!(view.tasks_by_status.todo.is_empty());
        assert_eq!(view.task_stats.total, tasks.len());
        assert_eq!(view.task_stats.percent_completed, 25);
    }
}
