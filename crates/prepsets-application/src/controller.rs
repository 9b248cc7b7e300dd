//! The session controller: owns the state and sequences async work.

use prepsets_core::clipboard::Clipboard;
use prepsets_core::pagination::{clamp_page, total_pages};
use prepsets_core::query::filter_items;
use prepsets_core::question_id::QuestionId;
use prepsets_core::session::{SessionAction, SessionSettings, SessionState, TrackedKey};
use prepsets_core::storage::KeyValueStore;
use prepsets_core::topic::{QaItem, TopicDescriptor, TopicId, TopicSource};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::catalog::CatalogLoader;
use crate::content::ContentLoader;
use crate::reconciler::{HydrationReport, PersistenceReconciler};
use crate::request::RequestTracker;
use crate::view::{SessionView, ViewInputs, project};

/// Everything guarded by the controller lock.
#[derive(Default)]
struct Inner {
    state: SessionState,
    catalog: Vec<TopicDescriptor>,
    /// Items of the selected topic; empty while a load is in flight.
    items: Vec<QaItem>,
    loading: bool,
    page_loading: bool,
}

impl Inner {
    /// Pages of the currently filtered list.
    fn filtered_total_pages(&self, page_size: usize) -> usize {
        let count = match self.state.selected_topic {
            Some(topic) => filter_items(
                &self.items,
                &self.state.query,
                self.state.star_only,
                &self.state.annotations.starred,
                topic,
            )
            .len(),
            None => 0,
        };
        total_pages(count, page_size)
    }
}

/// Drives one browsing session.
///
/// All mutations go through [`dispatch`](Self::dispatch) (or the async
/// operations built on it) and are mirrored to storage by the reconciler.
/// Topic loads and page transitions may overlap; each is tagged with a
/// request ticket and only the newest of its kind is allowed to commit.
pub struct SessionController {
    settings: SessionSettings,
    catalog_loader: CatalogLoader,
    content_loader: ContentLoader,
    reconciler: PersistenceReconciler,
    inner: Mutex<Inner>,
    content_requests: RequestTracker,
    page_requests: RequestTracker,
}

impl SessionController {
    pub fn new(
        source: Arc<dyn TopicSource>,
        store: Arc<dyn KeyValueStore>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            catalog_loader: CatalogLoader::new(source.clone()),
            content_loader: ContentLoader::new(source, settings.min_load_delay),
            reconciler: PersistenceReconciler::new(store),
            settings,
            inner: Mutex::new(Inner::default()),
            content_requests: RequestTracker::new(),
            page_requests: RequestTracker::new(),
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.reconciler.is_hydrated()
    }

    /// Seeds the state from storage. Only the first call has an effect.
    pub async fn hydrate(&self) -> HydrationReport {
        let mut inner = self.inner.lock().await;
        self.reconciler.hydrate(&mut inner.state)
    }

    /// Startup sequence: hydrate, discover the catalog, then load the
    /// restored topic (if any) without resetting its restored query and page.
    pub async fn start(&self) -> HydrationReport {
        let report = self.hydrate().await;
        self.refresh_catalog().await;

        let restored = self.inner.lock().await.state.selected_topic;
        if let Some(topic) = restored {
            tracing::info!("Restoring topic {}", topic);
            self.load_selected().await;
        }
        report
    }

    /// Re-runs catalog discovery and returns the new catalog.
    pub async fn refresh_catalog(&self) -> Vec<TopicDescriptor> {
        let catalog = self.catalog_loader.discover(self.settings.max_topics).await;
        self.inner.lock().await.catalog = catalog.clone();
        catalog
    }

    /// Selects `topic` and loads its questions.
    ///
    /// Returns false if another selection superseded this one before its
    /// content arrived; the late result is then discarded.
    pub async fn select_topic(&self, topic: TopicId) -> bool {
        self.dispatch(SessionAction::SelectTopic(topic)).await;
        self.load_selected().await
    }

    /// Deselects the topic and drops its questions.
    pub async fn clear_selection(&self) {
        self.content_requests.issue();
        self.page_requests.issue();
        let mut inner = self.inner.lock().await;
        inner.items.clear();
        inner.loading = false;
        inner.page_loading = false;
        let changed = inner.state.apply(SessionAction::ClearSelection);
        self.reconciler.persist(&inner.state, &changed);
    }

    /// Loads the content of the currently selected topic.
    async fn load_selected(&self) -> bool {
        let ticket = self.content_requests.issue();
        // A pending page transition belongs to the previous list.
        self.page_requests.issue();

        let topic = {
            let mut inner = self.inner.lock().await;
            let Some(topic) = inner.state.selected_topic else {
                return false;
            };
            inner.items.clear();
            inner.loading = true;
            inner.page_loading = false;
            topic
        };

        tracing::debug!("Loading topic {}", topic);
        let items = self.content_loader.load(topic).await;

        let mut inner = self.inner.lock().await;
        // A selection dispatched before its own load was issued still wins.
        if !self.content_requests.is_current(ticket) || inner.state.selected_topic != Some(topic) {
            tracing::debug!("Discarding stale content for topic {}", topic);
            return false;
        }

        tracing::debug!("Topic {} loaded with {} item(s)", topic, items.len());
        inner.items = items;
        inner.loading = false;
        let pages = inner.filtered_total_pages(self.settings.page_size);
        let changed = inner.state.apply(SessionAction::ClampPage { total_pages: pages });
        self.reconciler.persist(&inner.state, &changed);
        true
    }

    /// Applies a synchronous action and writes changed keys back.
    ///
    /// `SetPage` is clamped to the filtered list, and once a topic's content
    /// is present any action that shrinks the list pulls the current page
    /// back into range.
    pub async fn dispatch(&self, action: SessionAction) -> Vec<TrackedKey> {
        let mut inner = self.inner.lock().await;
        let page_size = self.settings.page_size;

        let action = match action {
            SessionAction::SetPage(page) => {
                SessionAction::SetPage(clamp_page(page, inner.filtered_total_pages(page_size)))
            }
            other => other,
        };

        let mut changed = inner.state.apply(action);
        if !inner.loading && inner.state.selected_topic.is_some() {
            let pages = inner.filtered_total_pages(page_size);
            for key in inner.state.apply(SessionAction::ClampPage { total_pages: pages }) {
                if !changed.contains(&key) {
                    changed.push(key);
                }
            }
        }

        self.reconciler.persist(&inner.state, &changed);
        changed
    }

    /// Moves to `page` after the transition delay.
    ///
    /// Returns false when a later navigation (or a topic change) superseded
    /// this one before the delay elapsed.
    pub async fn go_to_page(&self, page: usize) -> bool {
        let ticket = self.page_requests.issue();
        self.inner.lock().await.page_loading = true;

        tokio::time::sleep(self.settings.page_transition_delay).await;

        if !self.page_requests.is_current(ticket) {
            return false;
        }
        self.inner.lock().await.page_loading = false;
        self.dispatch(SessionAction::SetPage(page)).await;
        true
    }

    /// Goes one page forward. No-op on the last page.
    pub async fn next_page(&self) -> bool {
        let (current, pages) = self.page_position().await;
        if current >= pages {
            return false;
        }
        self.go_to_page(current + 1).await
    }

    /// Goes one page back. No-op on the first page.
    pub async fn previous_page(&self) -> bool {
        let (current, _) = self.page_position().await;
        if current <= 1 {
            return false;
        }
        self.go_to_page(current - 1).await
    }

    async fn page_position(&self) -> (usize, usize) {
        let inner = self.inner.lock().await;
        (
            inner.state.current_page,
            inner.filtered_total_pages(self.settings.page_size),
        )
    }

    /// Toggles the star of the item at `position` in the selected topic.
    pub async fn toggle_star(&self, position: usize) -> Option<bool> {
        let id = self.question_id(position).await?;
        self.dispatch(SessionAction::ToggleStar(id.clone())).await;
        Some(self.inner.lock().await.state.annotations.is_starred(&id))
    }

    /// Toggles the reviewed mark of the item at `position` in the selected topic.
    pub async fn toggle_reviewed(&self, position: usize) -> Option<bool> {
        let id = self.question_id(position).await?;
        let topic = id.topic()?;
        self.dispatch(SessionAction::MarkReviewed {
            topic,
            id: id.clone(),
        })
        .await;
        Some(self.inner.lock().await.state.annotations.is_reviewed(topic, &id))
    }

    /// Asks for confirmation before wiping the selected topic's reviewed marks.
    pub async fn request_reset_reviewed(&self) -> Option<TopicId> {
        let topic = self.inner.lock().await.state.selected_topic?;
        self.dispatch(SessionAction::RequestResetReviewed(topic)).await;
        Some(topic)
    }

    pub async fn confirm_reset_reviewed(&self) {
        self.dispatch(SessionAction::ConfirmResetReviewed).await;
    }

    pub async fn cancel_reset_reviewed(&self) {
        self.dispatch(SessionAction::CancelResetReviewed).await;
    }

    /// Copies the item at `position` as `"Q: ...\nA: ..."`.
    ///
    /// Returns the copied text when the item exists. Clipboard failures are
    /// ignored.
    pub async fn copy_item(&self, position: usize, clipboard: &dyn Clipboard) -> Option<String> {
        let text = {
            let inner = self.inner.lock().await;
            inner.items.get(position)?.copy_text()
        };
        if let Err(e) = clipboard.copy_text(&text) {
            tracing::debug!("Clipboard unavailable: {}", e);
        }
        Some(text)
    }

    /// Maps a 1-based row number of the filtered list to the item's position
    /// in the unfiltered list.
    pub async fn position_of(&self, number: usize) -> Option<usize> {
        let inner = self.inner.lock().await;
        let topic = inner.state.selected_topic?;
        let filtered = filter_items(
            &inner.items,
            &inner.state.query,
            inner.state.star_only,
            &inner.state.annotations.starred,
            topic,
        );
        filtered.get(number.checked_sub(1)?).map(|entry| entry.position)
    }

    async fn question_id(&self, position: usize) -> Option<QuestionId> {
        let inner = self.inner.lock().await;
        let topic = inner.state.selected_topic?;
        (position < inner.items.len()).then(|| QuestionId::new(topic, position))
    }

    /// Snapshot of the session state.
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state.clone()
    }

    pub async fn catalog(&self) -> Vec<TopicDescriptor> {
        self.inner.lock().await.catalog.clone()
    }

    /// Render-ready projection of the current state.
    pub async fn view(&self) -> SessionView {
        let inner = self.inner.lock().await;
        project(
            &inner.state,
            ViewInputs {
                catalog: &inner.catalog,
                items: &inner.items,
                loading: inner.loading,
                page_loading: inner.page_loading,
                page_size: self.settings.page_size,
            },
        )
    }
}
