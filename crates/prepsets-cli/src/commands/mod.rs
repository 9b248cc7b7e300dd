pub mod browse;
pub mod marks;
pub mod show;
pub mod topics;

use anyhow::{Result, bail};
use prepsets_application::SessionController;
use prepsets_core::topic::TopicId;

/// Resolves a row number of the current filtered list to an item position.
pub async fn resolve_row(controller: &SessionController, number: usize) -> Result<usize> {
    if controller.state().await.selected_topic.is_none() {
        bail!("No topic selected. Run `prepsets show --topic <ID>` first.");
    }
    match controller.position_of(number).await {
        Some(position) => Ok(position),
        None => bail!("No question #{} in the current list", number),
    }
}

/// Checks that `id` is one of the discovered topics.
pub async fn ensure_known_topic(controller: &SessionController, id: TopicId) -> Result<()> {
    if controller.catalog().await.iter().any(|entry| entry.id == id) {
        Ok(())
    } else {
        bail!("Unknown topic {}. Run `prepsets topics` to list them.", id)
    }
}
