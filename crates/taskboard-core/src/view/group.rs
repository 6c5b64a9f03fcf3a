use serde::Serialize;

use crate::domain::{Task, TaskStatus};

/// `filtered_tasks` partitioned by status, each bucket keeping input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TasksByStatus<T> {
    pub todo: Vec<T>,
    #[serde(rename = "in-progress")]
    pub in_progress: Vec<T>,
    pub completed: Vec<T>,
}

impl<T> TasksByStatus<T> {
    pub fn bucket(&self, status: TaskStatus) -> &[T] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<T> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn group_by_status<'a>(filtered: &[&'a Task]) -> TasksByStatus<&'a Task> {
    let mut grouped = TasksByStatus {
        todo: Vec::new(),
        in_progress: Vec::new(),
        completed: Vec::new(),
    };
    for task in filtered {
        grouped.bucket_mut(task.status).push(*task);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskFilter;
    use crate::impls::seed::demo_tasks;
    use crate::view::filtered_tasks;
    use chrono::{TimeZone, Utc};

    #[test]
    fn buckets_partition_the_input_exactly() {
        let tasks = demo_tasks(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let filtered = filtered_tasks(&tasks, &TaskFilter::default());
        let grouped = group_by_status(&filtered);

        assert_eq!(grouped.len(), filtered.len());
        for status in TaskStatus::ALL {
            assert!(grouped.bucket(status).iter().all(|t| t.status == status));
        }
        let ids = |bucket: &[&Task]| bucket.iter().map(|t| t.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&grouped.todo), vec!["1", "4", "6"]);
        assert_eq!(ids(&grouped.in_progress), vec!["2", "5", "8"]);
        assert_eq!(ids(&grouped.completed), vec!["3", "7"]);
    }

    #[test]
    fn empty_input_gives_empty_buckets() {
        let grouped = group_by_status(&[]);
        assert!(grouped.is_empty());
    }
}
