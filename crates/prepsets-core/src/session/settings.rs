//! Tunables for a browsing session.

use std::time::Duration;

use crate::pagination::DEFAULT_PAGE_SIZE;

/// Knobs the controller needs at runtime.
///
/// Built from the file configuration by the infrastructure layer; the
/// defaults match what the application ships with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Candidate topic ids probed during discovery are `1..=max_topics`.
    pub max_topics: u32,
    pub page_size: usize,
    /// Floor on how long a topic load takes, so the loading indicator is
    /// always visible.
    pub min_load_delay: Duration,
    /// Delay before a page change becomes visible.
    pub page_transition_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_topics: 6,
            page_size: DEFAULT_PAGE_SIZE,
            min_load_delay: Duration::from_millis(800),
            page_transition_delay: Duration::from_millis(500),
        }
    }
}

impl SessionSettings {
    /// Settings without artificial delays.
    pub fn immediate() -> Self {
        Self {
            min_load_delay: Duration::ZERO,
            page_transition_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
