//! Session state and the reducer that mutates it.

use serde::{Deserialize, Serialize};

use crate::annotation::Annotations;
use crate::question_id::QuestionId;
use crate::topic::TopicId;

/// The mutable state of one browsing session.
///
/// Created once per application load, seeded from storage, and from then on
/// only changed through [`SessionState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub selected_topic: Option<TopicId>,
    pub query: String,
    /// Show starred questions only.
    pub star_only: bool,
    /// 1-based page of the filtered list.
    pub current_page: usize,
    pub annotations: Annotations,
    /// Topic whose reviewed marks are waiting for a confirm/cancel decision.
    #[serde(skip)]
    pending_reset: Option<TopicId>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_topic: None,
            query: String::new(),
            star_only: false,
            current_page: 1,
            annotations: Annotations::default(),
            pending_reset: None,
        }
    }
}

/// A user intent, applied with [`SessionState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Switch topic. Clears the query and star filter, back to page 1.
    SelectTopic(TopicId),
    /// Deselect the topic entirely.
    ClearSelection,
    SetQuery(String),
    ClearQuery,
    SetStarOnly(bool),
    ToggleStarOnly,
    /// Jump to a page. The caller clamps against the filtered list.
    SetPage(usize),
    /// Pull the current page back into `[1, total_pages]`.
    ClampPage { total_pages: usize },
    ToggleStar(QuestionId),
    MarkReviewed { topic: TopicId, id: QuestionId },
    /// First half of the reset: remember the topic and wait for a decision.
    RequestResetReviewed(TopicId),
    ConfirmResetReviewed,
    CancelResetReviewed,
}

/// A field that is mirrored to durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackedKey {
    SelectedTopic,
    Query,
    StarOnly,
    CurrentPage,
    Starred,
    Reviewed,
}

impl TrackedKey {
    pub const ALL: [TrackedKey; 6] = [
        TrackedKey::SelectedTopic,
        TrackedKey::Query,
        TrackedKey::StarOnly,
        TrackedKey::CurrentPage,
        TrackedKey::Starred,
        TrackedKey::Reviewed,
    ];

    /// Key name in the key-value store.
    pub fn storage_key(self) -> &'static str {
        match self {
            TrackedKey::SelectedTopic => "selectedSetId",
            TrackedKey::Query => "query",
            TrackedKey::StarOnly => "starOnly",
            TrackedKey::CurrentPage => "currentPage",
            TrackedKey::Starred => "starredIds",
            TrackedKey::Reviewed => "reviewedByTopic",
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_reset(&self) -> Option<TopicId> {
        self.pending_reset
    }

    /// Applies `action` and returns the tracked keys whose value changed.
    pub fn apply(&mut self, action: SessionAction) -> Vec<TrackedKey> {
        let before = self.clone();

        match action {
            SessionAction::SelectTopic(topic) => {
                self.selected_topic = Some(topic);
                self.reset_filters();
            }
            SessionAction::ClearSelection => {
                self.selected_topic = None;
                self.reset_filters();
            }
            SessionAction::SetQuery(query) => {
                self.query = query;
                self.current_page = 1;
            }
            SessionAction::ClearQuery => {
                self.query.clear();
                self.current_page = 1;
            }
            SessionAction::SetStarOnly(star_only) => {
                self.star_only = star_only;
                self.current_page = 1;
            }
            SessionAction::ToggleStarOnly => {
                self.star_only = !self.star_only;
                self.current_page = 1;
            }
            SessionAction::SetPage(page) => {
                self.current_page = page.max(1);
            }
            SessionAction::ClampPage { total_pages } => {
                self.current_page = crate::pagination::clamp_page(self.current_page, total_pages);
            }
            SessionAction::ToggleStar(id) => {
                self.annotations.toggle_star(id);
            }
            SessionAction::MarkReviewed { topic, id } => {
                self.annotations.mark_reviewed(topic, id);
            }
            SessionAction::RequestResetReviewed(topic) => {
                self.pending_reset = Some(topic);
            }
            SessionAction::ConfirmResetReviewed => {
                if let Some(topic) = self.pending_reset.take() {
                    self.annotations.reset_reviewed(topic);
                }
            }
            SessionAction::CancelResetReviewed => {
                self.pending_reset = None;
            }
        }

        self.changed_since(&before)
    }

    fn reset_filters(&mut self) {
        self.query.clear();
        self.star_only = false;
        self.current_page = 1;
        self.pending_reset = None;
    }

    fn changed_since(&self, before: &SessionState) -> Vec<TrackedKey> {
        TrackedKey::ALL
            .into_iter()
            .filter(|key| match key {
                TrackedKey::SelectedTopic => self.selected_topic != before.selected_topic,
                TrackedKey::Query => self.query != before.query,
                TrackedKey::StarOnly => self.star_only != before.star_only,
                TrackedKey::CurrentPage => self.current_page != before.current_page,
                TrackedKey::Starred => self.annotations.starred != before.annotations.starred,
                TrackedKey::Reviewed => {
                    self.annotations.reviewed_by_topic != before.annotations.reviewed_by_topic
                }
            })
            .collect()
    }
}
