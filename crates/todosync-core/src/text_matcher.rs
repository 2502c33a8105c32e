use crate::task::Task;

/// Case-insensitive substring matcher for task titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Lowercase a query string into a matcher. Returns `None` for empty inputs.
    ///
    /// Whitespace is significant: `"milk "` only matches titles containing it.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Determine whether the task title contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_text(&task.title)
    }

    /// Match against arbitrary text.
    #[must_use]
    pub fn matches_text(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

/// Apply an optional matcher; `None` accepts every task.
#[must_use]
pub fn matches_query(matcher: Option<&TextMatcher>, task: &Task) -> bool {
    matcher.is_none_or(|m| m.matches(task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn task(title: &str) -> Task {
        Task::new(title, datetime!(2024-03-01 10:00 UTC))
    }

    #[test]
    fn matcher_skips_empty_queries() {
        assert!(TextMatcher::new("").is_none());
    }

    #[test]
    fn matcher_keeps_surrounding_whitespace() {
        let buy = task("Buy milk");
        let trailing = TextMatcher::new("milk ")
            .unwrap_or_else(|| panic!("matcher must exist for non-empty queries"));
        assert!(!trailing.matches(&buy));

        let space = TextMatcher::new(" ")
            .unwrap_or_else(|| panic!("matcher must exist for non-empty queries"));
        assert!(space.matches(&buy));
        assert!(!space.matches(&task("Laundry")));
    }

    #[test]
    fn matcher_respects_case_insensitive_search() {
        let buy = task("Buy milk");
        let clean = task("Clean house");

        for query in ["buy", "BUY", "bUy"] {
            let matcher = TextMatcher::new(query)
                .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
            assert!(matcher.matches(&buy));
            assert!(!matcher.matches(&clean));
        }
    }

    #[test]
    fn matcher_handles_non_ascii_titles() {
        let matcher = TextMatcher::new("ÇÃO")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&task("Revisão da apresentação")));
    }

    #[test]
    fn missing_matcher_accepts_everything() {
        assert!(matches_query(None, &task("anything")));
    }
}
