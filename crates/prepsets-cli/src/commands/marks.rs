use anyhow::{Result, bail};
use colored::Colorize;
use std::io::{BufRead, Write};

use super::resolve_row;
use crate::app::{AppBootstrap, GlobalArgs, Pacing};
use crate::clipboard::Osc52Clipboard;

pub async fn star(global: &GlobalArgs, number: usize) -> Result<()> {
    let app = AppBootstrap::start(global, Pacing::Immediate).await?;
    let position = resolve_row(&app.controller, number).await?;

    match app.controller.toggle_star(position).await {
        Some(true) => println!("{}", format!("★ Starred #{}", number).bright_yellow()),
        Some(false) => println!("{}", format!("☆ Unstarred #{}", number).bright_black()),
        None => bail!("No question #{} in the current list", number),
    }
    Ok(())
}

pub async fn review(global: &GlobalArgs, number: usize) -> Result<()> {
    let app = AppBootstrap::start(global, Pacing::Immediate).await?;
    let position = resolve_row(&app.controller, number).await?;

    match app.controller.toggle_reviewed(position).await {
        Some(true) => println!("{}", format!("✓ Marked #{} as reviewed", number).bright_green()),
        Some(false) => println!("{}", format!("Unmarked #{}", number).bright_black()),
        None => bail!("No question #{} in the current list", number),
    }

    let view = app.controller.view().await;
    println!(
        "{}",
        format!(
            "{}% reviewed ({}/{})",
            view.progress_percent, view.reviewed_count, view.total_items
        )
        .bright_black()
    );
    Ok(())
}

pub async fn reset_reviewed(global: &GlobalArgs, yes: bool) -> Result<()> {
    let app = AppBootstrap::start(global, Pacing::Immediate).await?;
    let controller = &app.controller;

    let Some(topic) = controller.request_reset_reviewed().await else {
        bail!("No topic selected. Run `prepsets show --topic <ID>` first.");
    };
    let name = controller
        .view()
        .await
        .topic_name
        .unwrap_or_else(|| format!("Set {}", topic));

    if yes || confirm(&format!("Reset all reviewed marks for {}? [y/N] ", name))? {
        controller.confirm_reset_reviewed().await;
        println!("{}", format!("Reviewed marks for {} cleared", name).bright_green());
    } else {
        controller.cancel_reset_reviewed().await;
        println!("{}", "Cancelled".bright_black());
    }
    Ok(())
}

pub async fn copy(global: &GlobalArgs, number: usize) -> Result<()> {
    let app = AppBootstrap::start(global, Pacing::Immediate).await?;
    let position = resolve_row(&app.controller, number).await?;

    match app.controller.copy_item(position, &Osc52Clipboard).await {
        Some(text) => println!("{}", text),
        None => bail!("No question #{} in the current list", number),
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt.bright_yellow());
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
