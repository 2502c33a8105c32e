//! Read-only projections over a task collection.

use serde::Serialize;

use crate::task::Task;
use crate::text_matcher::{TextMatcher, matches_query};

/// Scalar counters shown next to the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    /// Every task ever created, including completed and deleted ones.
    pub created: usize,
    /// Tasks marked completed.
    pub completed: usize,
    /// Soft-deleted tasks.
    pub deleted: usize,
    /// Tasks that are neither completed nor deleted.
    pub active: usize,
}

impl TaskCounts {
    /// Count tasks by lifecycle state.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(
            Self {
                created: tasks.len(),
                ..Self::default()
            },
            |mut counts, task| {
                if task.completed {
                    counts.completed += 1;
                }
                if task.deleted_at.is_some() {
                    counts.deleted += 1;
                }
                if task.is_active() {
                    counts.active += 1;
                }
                counts
            },
        )
    }
}

/// Lists derived from a collection for a given search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskViews<'a> {
    /// Active tasks matching the search, newest first.
    pub active: Vec<&'a Task>,
    /// Completed tasks in store order.
    pub completed: Vec<&'a Task>,
    /// Deleted tasks in store order.
    pub deleted: Vec<&'a Task>,
    /// Counters over the whole collection (unaffected by search).
    pub counts: TaskCounts,
}

impl<'a> TaskViews<'a> {
    /// Compute every view for `search` (empty matches everything).
    #[must_use]
    pub fn derive(tasks: &'a [Task], search: &str) -> Self {
        let matcher = TextMatcher::new(search);
        Self {
            active: active_list(tasks, matcher.as_ref()),
            completed: completed_list(tasks),
            deleted: deleted_list(tasks),
            counts: TaskCounts::from_tasks(tasks),
        }
    }
}

/// Active tasks matching `matcher`, most recently created first.
///
/// Ties on the creation timestamp keep the later store entry first.
#[must_use]
pub fn active_list<'a>(tasks: &'a [Task], matcher: Option<&TextMatcher>) -> Vec<&'a Task> {
    let mut active: Vec<&Task> = tasks
        .iter()
        .rev()
        .filter(|task| task.is_active() && matches_query(matcher, task))
        .collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    active
}

/// Completed tasks in store order.
#[must_use]
pub fn completed_list(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.completed).collect()
}

/// Deleted tasks in store order.
#[must_use]
pub fn deleted_list(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.deleted_at.is_some()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, OffsetDateTime, macros::datetime};

    const BASE: OffsetDateTime = datetime!(2024-03-01 10:00 UTC);

    fn fixture() -> Vec<Task> {
        let mut milk = Task::new("Buy milk", BASE);
        let house = Task::new("Clean house", BASE + Duration::minutes(1));
        let mut report = Task::new("Write report", BASE + Duration::minutes(2));
        let bread = Task::new("Buy bread", BASE + Duration::minutes(3));
        milk.mark_deleted(BASE + Duration::minutes(5));
        report.mark_completed(BASE + Duration::minutes(6));
        vec![milk, house, report, bread]
    }

    fn titles(list: &[&Task]) -> Vec<String> {
        list.iter().map(|task| task.title.clone()).collect()
    }

    #[test]
    fn counts_cover_every_state() {
        let tasks = fixture();
        let counts = TaskCounts::from_tasks(&tasks);
        assert_eq!(
            counts,
            TaskCounts {
                created: 4,
                completed: 1,
                deleted: 1,
                active: 2,
            }
        );
    }

    #[test]
    fn active_list_is_newest_first() {
        let tasks = fixture();
        let views = TaskViews::derive(&tasks, "");
        assert_eq!(titles(&views.active), vec!["Buy bread", "Clean house"]);
        assert_eq!(titles(&views.completed), vec!["Write report"]);
        assert_eq!(titles(&views.deleted), vec!["Buy milk"]);
    }

    #[test]
    fn search_filters_only_the_active_list() {
        let tasks = vec![
            Task::new("Buy milk", BASE),
            Task::new("Clean house", BASE + Duration::minutes(1)),
        ];
        let views = TaskViews::derive(&tasks, "bUY");
        assert_eq!(titles(&views.active), vec!["Buy milk"]);
        assert_eq!(views.counts.created, 2);
    }

    #[test]
    fn search_does_not_trim_the_query() {
        let tasks = vec![Task::new("Buy milk", BASE)];
        assert!(TaskViews::derive(&tasks, "milk ").active.is_empty());
        assert_eq!(titles(&TaskViews::derive(&tasks, "y m").active), vec!["Buy milk"]);
    }

    #[test]
    fn equal_timestamps_keep_later_entries_first() {
        let tasks = vec![Task::new("first", BASE), Task::new("second", BASE)];
        let views = TaskViews::derive(&tasks, "");
        assert_eq!(titles(&views.active), vec!["second", "first"]);
    }

    #[test]
    fn empty_collection_yields_empty_views() {
        let views = TaskViews::derive(&[], "anything");
        assert!(views.active.is_empty());
        assert_eq!(views.counts, TaskCounts::default());
    }
}
