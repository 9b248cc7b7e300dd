//! Colored terminal rendering of a [`SessionView`].

use colored::Colorize;
use prepsets_application::{EmptyState, SessionView, ViewRow};
use prepsets_core::pagination::PageMarker;

const BAR_WIDTH: usize = 20;

pub fn print_catalog(view: &SessionView) {
    println!("{}", "Topics".bright_magenta().bold());
    for entry in &view.catalog {
        let selected = view.selected_topic == Some(entry.id);
        let line = format!("  {:>2}  {}", entry.id.get(), entry.name);
        if selected {
            println!("{}", format!("{}  (selected)", line).bright_green());
        } else {
            println!("{}", line);
        }
    }
}

/// Prints the topic banner, the visible rows and the pager.
///
/// `highlight` is an index into `view.rows`.
pub fn print_view(view: &SessionView, highlight: Option<usize>) {
    if let Some(topic) = view.selected_topic {
        let name = view
            .topic_name
            .clone()
            .unwrap_or_else(|| format!("Set {}", topic));
        println!(
            "{} {}",
            name.bright_magenta().bold(),
            format!("({} questions)", view.total_items).bright_black()
        );
        println!("{}", progress_line(view));
        println!("{}", filter_line(view).bright_black());
    }

    match view.empty_state() {
        Some(EmptyState::NoTopicSelected) => {
            println!("{}", "No topic selected. Pick one to start.".yellow());
            return;
        }
        Some(EmptyState::Loading) => {
            println!("{}", "Loading questions...".yellow());
            return;
        }
        Some(EmptyState::NoMatches) => {
            println!("{}", "No questions match the current filter.".yellow());
        }
        None => {
            println!();
            for (index, row) in view.rows.iter().enumerate() {
                print_row(row, highlight == Some(index));
            }
        }
    }

    if view.page_loading {
        println!("{}", "Turning page...".bright_black());
    }
    println!("{}", pager_line(view));
}

fn print_row(row: &ViewRow, highlighted: bool) {
    let star = if row.starred { "★".bright_yellow() } else { "☆".bright_black() };
    let reviewed = if row.reviewed { "✓".bright_green() } else { " ".normal() };
    let cursor = if highlighted { ">" } else { " " };

    let question = format!("{:>3}. {}", row.number, row.question);
    let question = if highlighted {
        question.bright_cyan().bold()
    } else {
        question.normal()
    };

    println!("{} {} {} {}", cursor, star, reviewed, question);
    for line in row.answer.lines() {
        println!("         {}", line.bright_blue());
    }
    println!();
}

fn progress_line(view: &SessionView) -> String {
    let filled = (view.progress_percent as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {}% reviewed ({}/{})",
        "#".repeat(filled).bright_green(),
        "-".repeat(BAR_WIDTH - filled).bright_black(),
        view.progress_percent,
        view.reviewed_count,
        view.total_items
    )
}

fn filter_line(view: &SessionView) -> String {
    let mut parts = Vec::new();
    if !view.query.is_empty() {
        parts.push(format!("search: \"{}\"", view.query));
    }
    if view.star_only {
        parts.push("starred only".to_string());
    }
    parts.push(format!("{} shown", view.filtered_count));
    parts.join(" | ")
}

pub fn pager_line(view: &SessionView) -> String {
    let markers: Vec<String> = view
        .page_markers
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if *page == view.current_page => format!("[{}]", page),
            PageMarker::Page(page) => page.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect();

    let previous = if view.has_previous_page() { "‹ prev" } else { "      " };
    let next = if view.has_next_page() { "next ›" } else { "" };
    format!("{}  {}  {}", previous, markers.join(" "), next)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(current_page: usize, total_pages: usize, markers: Vec<PageMarker>) -> SessionView {
        SessionView {
            catalog: Vec::new(),
            selected_topic: None,
            topic_name: None,
            loading: false,
            page_loading: false,
            query: String::new(),
            star_only: false,
            total_items: 0,
            filtered_count: 0,
            current_page,
            total_pages,
            rows: Vec::new(),
            page_markers: markers,
            reviewed_count: 0,
            progress_percent: 0,
            pending_reset: None,
        }
    }

    #[test]
    fn test_pager_marks_current_page() {
        let line = pager_line(&view(
            2,
            3,
            vec![PageMarker::Page(1), PageMarker::Page(2), PageMarker::Page(3)],
        ));
        assert_eq!(line, "‹ prev  1 [2] 3  next ›");
    }

    #[test]
    fn test_pager_on_single_page() {
        let line = pager_line(&view(1, 1, vec![PageMarker::Page(1)]));
        assert_eq!(line, "        [1]");
    }
}
