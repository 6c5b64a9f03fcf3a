use chrono::{DateTime, Utc};

use crate::domain::{Task, TaskFilter};

/// Tasks that pass every active criterion, in their original order.
///
/// Criteria are conjunctive: status AND priority AND assignee AND, when the
/// search query is non-empty, a case-insensitive substring match on title or
/// description.
pub fn filtered_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let query = filter.search_query.to_lowercase();
    tasks
        .iter()
        .filter(|task| matches_filter(task, filter, &query))
        .collect()
}

fn matches_filter(task: &Task, filter: &TaskFilter, lowered_query: &str) -> bool {
    filter.status.matches(&task.status)
        && filter.priority.matches(&task.priority)
        && filter.assigned_to.matches(&task.assigned_to)
        && (lowered_query.is_empty() || task.matches_query(lowered_query))
}

pub fn overdue_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_overdue(now)).collect()
}
