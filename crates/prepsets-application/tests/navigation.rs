mod common;

use common::*;
use prepsets_application::{EmptyState, SessionController};
use prepsets_core::pagination::PageMarker;
use prepsets_core::session::SessionAction;
use prepsets_core::topic::TopicId;
use prepsets_infrastructure::MemoryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

async fn loaded_controller(items: usize, transition: Duration) -> SessionController {
    let mut settings = immediate_settings();
    settings.page_transition_delay = transition;
    let source = StubSource::new().with_topic(1, None, numbered_items(items));
    let controller = SessionController::new(arc_source(source), Arc::new(MemoryStore::new()), settings);
    controller.start().await;
    controller.select_topic(TopicId(1)).await;
    controller
}

#[tokio::test(start_paused = true)]
async fn test_page_change_waits_for_transition() {
    let controller = loaded_controller(12, Duration::from_millis(500)).await;

    let started = Instant::now();
    let (moved, during) = tokio::join!(controller.go_to_page(2), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.view().await
    });

    assert!(moved);
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(during.page_loading);
    assert_eq!(during.current_page, 1);

    let view = controller.view().await;
    assert!(!view.page_loading);
    assert_eq!(view.current_page, 2);
}

#[tokio::test(start_paused = true)]
async fn test_last_navigation_wins() {
    let controller = loaded_controller(30, Duration::from_millis(500)).await;

    let (first, second) = tokio::join!(controller.go_to_page(2), async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        controller.go_to_page(5).await
    });

    assert!(!first);
    assert!(second);
    assert_eq!(controller.view().await.current_page, 5);
}

#[tokio::test(start_paused = true)]
async fn test_topic_change_cancels_pending_page_change() {
    let controller = loaded_controller(30, Duration::from_millis(500)).await;

    let (moved, _) = tokio::join!(controller.go_to_page(4), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.select_topic(TopicId(1)).await
    });

    assert!(!moved);
    assert_eq!(controller.view().await.current_page, 1);
}

#[tokio::test]
async fn test_previous_and_next_stop_at_bounds() {
    let controller = loaded_controller(7, Duration::ZERO).await;

    assert!(!controller.previous_page().await);
    assert!(controller.next_page().await);
    assert_eq!(controller.view().await.current_page, 2);
    assert!(!controller.next_page().await);
    assert!(controller.previous_page().await);
    assert_eq!(controller.view().await.current_page, 1);
}

#[tokio::test]
async fn test_go_to_page_is_clamped() {
    let controller = loaded_controller(7, Duration::ZERO).await;
    controller.go_to_page(40).await;
    assert_eq!(controller.view().await.current_page, 2);
}

#[tokio::test]
async fn test_shrinking_filter_pulls_page_back() {
    let controller = loaded_controller(12, Duration::ZERO).await;
    controller.go_to_page(3).await;
    controller.toggle_star(11).await;

    controller.dispatch(SessionAction::ToggleStarOnly).await;
    let view = controller.view().await;
    assert_eq!(view.current_page, 1);
    assert_eq!(view.filtered_count, 1);
    assert_eq!(view.rows[0].position, 11);
    assert_eq!(view.rows[0].number, 1);

    // Unstarring the only visible item leaves an empty filtered list.
    controller.toggle_star(11).await;
    let view = controller.view().await;
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.empty_state(), Some(EmptyState::NoMatches));
}

#[tokio::test]
async fn test_page_markers_follow_current_page() {
    let controller = loaded_controller(50, Duration::ZERO).await;
    controller.go_to_page(5).await;

    let view = controller.view().await;
    assert_eq!(view.total_pages, 10);
    assert_eq!(
        view.page_markers,
        vec![
            PageMarker::Page(1),
            PageMarker::Ellipsis,
            PageMarker::Page(4),
            PageMarker::Page(5),
            PageMarker::Page(6),
            PageMarker::Ellipsis,
            PageMarker::Page(10),
        ]
    );
}

#[tokio::test]
async fn test_row_numbers_resolve_to_positions() {
    let controller = loaded_controller(12, Duration::ZERO).await;
    controller.toggle_star(4).await;
    controller.toggle_star(9).await;
    controller.dispatch(SessionAction::SetStarOnly(true)).await;

    assert_eq!(controller.position_of(1).await, Some(4));
    assert_eq!(controller.position_of(2).await, Some(9));
    assert_eq!(controller.position_of(3).await, None);
    assert_eq!(controller.position_of(0).await, None);
}
