//! Demo data: 5 users and 8 tasks.
//!
//! Dates are offsets from the given `now`, so the same clock always yields the
//! same records.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Task, TaskId, TaskPriority, TaskStatus, User, UserId};

const AVATAR_COLORS: [&str; 8] = [
    "bg-blue-500",
    "bg-green-500",
    "bg-yellow-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-indigo-500",
    "bg-red-500",
    "bg-orange-500",
];

pub fn demo_users() -> Vec<User> {
    [
        ("1", "John Doe", "john.doe@example.com"),
        ("2", "Jane Smith", "jane.smith@example.com"),
        ("3", "Robert Johnson", "robert.johnson@example.com"),
        ("4", "Emily Davis", "emily.davis@example.com"),
        ("5", "Michael Wilson", "michael.wilson@example.com"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, email))| User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        avatar_color: AVATAR_COLORS[i % AVATAR_COLORS.len()].to_string(),
    })
    .collect()
}

struct SeedTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: &'static str,
    /// Days from now; negative is in the past.
    due_in_days: i64,
    created_days_ago: i64,
    updated_days_ago: i64,
}

const SEED_TASKS: [SeedTask; 8] = [
    SeedTask {
        id: "1",
        title: "Complete project proposal",
        description: "Draft and finalize the project proposal for the new client",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        assigned_to: "1",
        due_in_days: 5,
        created_days_ago: 9,
        updated_days_ago: 4,
    },
    SeedTask {
        id: "2",
        title: "Review code changes",
        description: "Review the pull request for the new feature implementation",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        assigned_to: "2",
        due_in_days: 2,
        created_days_ago: 14,
        updated_days_ago: 1,
    },
    SeedTask {
        id: "3",
        title: "Fix navigation bug",
        description: "Address the navigation issue reported by the QA team",
        status: TaskStatus::Completed,
        priority: TaskPriority::High,
        assigned_to: "3",
        due_in_days: -1,
        created_days_ago: 19,
        updated_days_ago: 1,
    },
    SeedTask {
        id: "4",
        title: "Update documentation",
        description: "Update the API documentation with the recent changes",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        assigned_to: "4",
        due_in_days: 8,
        created_days_ago: 24,
        updated_days_ago: 24,
    },
    SeedTask {
        id: "5",
        title: "Prepare for client meeting",
        description: "Compile reports and prepare slides for the upcoming client meeting",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        assigned_to: "5",
        due_in_days: 1,
        created_days_ago: 11,
        updated_days_ago: 6,
    },
    SeedTask {
        id: "6",
        title: "Implement search functionality",
        description: "Add search feature to the dashboard",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        assigned_to: "1",
        due_in_days: 4,
        created_days_ago: 17,
        updated_days_ago: 9,
    },
    SeedTask {
        id: "7",
        title: "Design new landing page",
        description: "Create mockups for the new website landing page",
        status: TaskStatus::Completed,
        priority: TaskPriority::Medium,
        assigned_to: "2",
        due_in_days: 0,
        created_days_ago: 29,
        updated_days_ago: 14,
    },
    SeedTask {
        id: "8",
        title: "Optimize database queries",
        description: "Improve performance of the main dashboard queries",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        assigned_to: "3",
        due_in_days: 2,
        created_days_ago: 21,
        updated_days_ago: 2,
    },
];

/// Number of seeded tasks. Sequence ids start right after it.
pub const DEMO_TASK_COUNT: u64 = SEED_TASKS.len() as u64;

pub fn demo_tasks(now: DateTime<Utc>) -> Vec<Task> {
    SEED_TASKS
        .iter()
        .map(|seed| Task {
            id: TaskId::new(seed.id),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            status: seed.status,
            priority: seed.priority,
            assigned_to: UserId::new(seed.assigned_to),
            due_date: now + Duration::days(seed.due_in_days),
            created_at: now - Duration::days(seed.created_days_ago),
            updated_at: now - Duration::days(seed.updated_days_ago),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn seed_tasks_reference_seed_users() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let users: HashSet<UserId> = demo_users().into_iter().map(|u| u.id).collect();
        let tasks = demo_tasks(now);

        assert_eq!(users.len(), 5);
        assert_eq!(tasks.len() as u64, DEMO_TASK_COUNT);
        assert!(tasks.iter().all(|t| users.contains(&t.assigned_to)));
        assert!(tasks.iter().all(|t| t.created_at <= t.updated_at));
    }
}
