use serde::Serialize;

use crate::domain::{Task, TaskStatus};

/// Counters over the unfiltered task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub percent_completed: u32,
}

/// `percent_completed` is `round(100 * completed / total)`, 0 for an empty list.
pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Todo => stats.todo += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
        }
    }
    stats.percent_completed = percent(stats.completed, stats.total);
    stats
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // half-up like Math.round, in integers
    ((part * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, TaskPriority, UserId};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn tasks(statuses: &[TaskStatus]) -> Vec<Task> {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Task {
                id: TaskId::new(i.to_string()),
                title: format!("t{i}"),
                description: String::new(),
                status: *status,
                priority: TaskPriority::Medium,
                assigned_to: UserId::new("1"),
                due_date: now,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    #[test]
    fn empty_list_has_zero_percent() {
        assert_eq!(task_stats(&[]), TaskStats::default());
    }

    #[rstest]
    #[case::one_of_three(1, 3, 33)]
    #[case::two_of_three(2, 3, 67)]
    #[case::half(1, 2, 50)]
    #[case::one_of_eight(1, 8, 13)]
    #[case::all(4, 4, 100)]
    #[case::none(0, 5, 0)]
    fn percent_rounds_half_up(#[case] completed: usize, #[case] total: usize, #[case] expected: u32) {
        assert_eq!(percent(completed, total), expected);
    }

    #[test]
    fn counts_each_status() {
        use TaskStatus::*;
        let stats = task_stats(&tasks(&[Todo, Completed, InProgress, Completed, Todo, Todo]));
        assert_eq!(
            stats,
            TaskStats {
                total: 6,
                todo: 3,
                in_progress: 1,
                completed: 2,
                percent_completed: 33,
            }
        );
    }
}
