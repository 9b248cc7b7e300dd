//! Render-ready projection of the session.

use prepsets_core::pagination::{PageMarker, display_number, page_markers, paginate};
use prepsets_core::query::filter_items;
use prepsets_core::question_id::QuestionId;
use prepsets_core::session::SessionState;
use prepsets_core::topic::{QaItem, TopicDescriptor, TopicId};
use serde::Serialize;

/// One visible question row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    /// 1-based row number across pages.
    pub number: usize,
    /// Index in the topic's unfiltered list.
    pub position: usize,
    pub question_id: QuestionId,
    pub question: String,
    pub answer: String,
    pub starred: bool,
    pub reviewed: bool,
}

/// Why a view has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyState {
    NoTopicSelected,
    Loading,
    NoMatches,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub catalog: Vec<TopicDescriptor>,
    pub selected_topic: Option<TopicId>,
    /// Display name of the selected topic, if it is in the catalog.
    pub topic_name: Option<String>,
    pub loading: bool,
    pub page_loading: bool,
    pub query: String,
    pub star_only: bool,
    /// Items in the unfiltered list.
    pub total_items: usize,
    /// Items matching the current filter.
    pub filtered_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub rows: Vec<ViewRow>,
    pub page_markers: Vec<PageMarker>,
    pub reviewed_count: usize,
    pub progress_percent: u8,
    /// Topic awaiting confirmation of a reviewed-marks reset.
    pub pending_reset: Option<TopicId>,
}

impl SessionView {
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.selected_topic.is_none() {
            Some(EmptyState::NoTopicSelected)
        } else if self.loading {
            Some(EmptyState::Loading)
        } else if self.rows.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Inputs of [`project`] besides the session state.
pub(crate) struct ViewInputs<'a> {
    pub catalog: &'a [TopicDescriptor],
    /// Items of the selected topic, empty while loading.
    pub items: &'a [QaItem],
    pub loading: bool,
    pub page_loading: bool,
    pub page_size: usize,
}

pub(crate) fn project(state: &SessionState, inputs: ViewInputs<'_>) -> SessionView {
    let annotations = &state.annotations;
    let topic = state.selected_topic;

    let filtered = match topic {
        Some(topic) => filter_items(
            inputs.items,
            &state.query,
            state.star_only,
            &annotations.starred,
            topic,
        ),
        None => Vec::new(),
    };
    let page = paginate(&filtered, state.current_page, inputs.page_size);

    let rows = match topic {
        Some(topic) => page
            .items
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let question_id = entry.question_id(topic);
                ViewRow {
                    number: display_number(page.page, inputs.page_size, index),
                    position: entry.position,
                    starred: annotations.is_starred(&question_id),
                    reviewed: annotations.is_reviewed(topic, &question_id),
                    question_id,
                    question: entry.item.question.clone(),
                    answer: entry.item.answer.clone(),
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let reviewed_count = topic.map(|t| annotations.count_reviewed(t)).unwrap_or(0);
    let progress_percent = topic
        .map(|t| annotations.progress_percent(t, inputs.items.len()))
        .unwrap_or(0);

    SessionView {
        catalog: inputs.catalog.to_vec(),
        selected_topic: topic,
        topic_name: topic.and_then(|t| {
            inputs
                .catalog
                .iter()
                .find(|entry| entry.id == t)
                .map(|entry| entry.name.clone())
        }),
        loading: inputs.loading,
        page_loading: inputs.page_loading,
        query: state.query.clone(),
        star_only: state.star_only,
        total_items: inputs.items.len(),
        filtered_count: filtered.len(),
        current_page: state.current_page,
        total_pages: page.total_pages,
        page_markers: page_markers(state.current_page, page.total_pages),
        rows,
        reviewed_count,
        progress_percent,
        pending_reset: state.pending_reset(),
    }
}
