use anyhow::Result;

use crate::app::{AppBootstrap, GlobalArgs, Pacing};
use crate::render;

pub async fn list(global: &GlobalArgs, json: bool) -> Result<()> {
    let app = AppBootstrap::start(global, Pacing::Immediate).await?;
    let view = app.controller.view().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&view.catalog)?);
    } else {
        render::print_catalog(&view);
    }
    Ok(())
}
