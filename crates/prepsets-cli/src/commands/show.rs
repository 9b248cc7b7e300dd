use anyhow::Result;
use clap::Args;
use prepsets_core::session::SessionAction;
use prepsets_core::topic::TopicId;

use super::ensure_known_topic;
use crate::app::{AppBootstrap, GlobalArgs, Pacing};
use crate::render;

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Switch to this topic (resets search and filters)
    #[arg(long, short)]
    pub topic: Option<u32>,

    /// Search question and answer text
    #[arg(long, short)]
    pub query: Option<String>,

    /// Only show starred questions
    #[arg(long, conflicts_with = "all")]
    pub starred: bool,

    /// Show all questions again (drops search and star filter)
    #[arg(long)]
    pub all: bool,

    /// Page to show
    #[arg(long, short)]
    pub page: Option<usize>,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

/// Applies the requested changes to the saved session and prints it.
pub async fn run(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let app = AppBootstrap::start(global, Pacing::Immediate).await?;
    let controller = &app.controller;

    if let Some(id) = args.topic.map(TopicId) {
        ensure_known_topic(controller, id).await?;
        controller.select_topic(id).await;
    }
    if args.all {
        controller.dispatch(SessionAction::ClearQuery).await;
        controller.dispatch(SessionAction::SetStarOnly(false)).await;
    }
    if let Some(query) = args.query {
        controller.dispatch(SessionAction::SetQuery(query)).await;
    }
    if args.starred {
        controller.dispatch(SessionAction::SetStarOnly(true)).await;
    }
    if let Some(page) = args.page {
        controller.go_to_page(page).await;
    }

    let view = controller.view().await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render::print_view(&view, None);
    }
    Ok(())
}
