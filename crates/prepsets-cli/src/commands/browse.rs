//! Interactive browsing REPL.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use prepsets_application::SessionController;
use prepsets_core::session::SessionAction;
use prepsets_core::shortcut::{KeyInput, Shortcut, resolve_shortcut};
use prepsets_core::topic::TopicId;

use super::{ensure_known_topic, resolve_row};
use crate::app::{AppBootstrap, GlobalArgs, Pacing};
use crate::clipboard::Osc52Clipboard;
use crate::render;

const COMMANDS: &[&str] = &[
    "/clear", "/close", "/copy", "/help", "/page", "/refresh", "/reset", "/review", "/search",
    "/star", "/starred", "/topic", "/topics",
];

/// rustyline helper providing slash-command completion, highlighting and hints.
#[derive(Clone)]
struct BrowseHelper {
    commands: Vec<String>,
}

impl BrowseHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for BrowseHelper {}

impl Completer for BrowseHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for BrowseHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') && line.len() > 1 {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for BrowseHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.len() > 1 && line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for BrowseHelper {}

/// Where typed lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    /// Lines are shortcuts or slash commands.
    Commands,
    /// Lines are search text; shortcuts are suppressed.
    Search,
}

enum Flow {
    Continue,
    Quit,
}

/// Reads a typed token as a key press: a single character, or one of
/// `esc`, `left`, `right`, `up`, `down`.
fn parse_key(token: &str) -> Option<KeyInput> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyInput::Char(c));
    }
    match token.to_ascii_lowercase().as_str() {
        "esc" | "escape" => Some(KeyInput::Escape),
        "left" => Some(KeyInput::Left),
        "right" => Some(KeyInput::Right),
        "up" => Some(KeyInput::Up),
        "down" => Some(KeyInput::Down),
        _ => None,
    }
}

/// Moves a row highlight, staying within `rows` rows.
fn step_highlight(current: usize, rows: usize, down: bool) -> usize {
    if rows == 0 {
        return 0;
    }
    if down {
        (current + 1).min(rows - 1)
    } else {
        current.saturating_sub(1)
    }
}

struct BrowseSession {
    controller: SessionController,
    focus: Focus,
    /// Index into the rows of the current page.
    highlight: usize,
}

impl BrowseSession {
    async fn render(&mut self) {
        let view = self.controller.view().await;
        self.highlight = self.highlight.min(view.rows.len().saturating_sub(1));
        println!();
        render::print_view(&view, Some(self.highlight));
        if let Some(topic) = view.pending_reset {
            let name = view.topic_name.unwrap_or_else(|| format!("Set {}", topic));
            println!(
                "{}",
                format!("Reset all reviewed marks for {}? (yes/no)", name).bright_yellow()
            );
        }
    }

    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();

        if self.controller.view().await.pending_reset.is_some() {
            if matches!(trimmed.to_ascii_lowercase().as_str(), "y" | "yes") {
                self.controller.confirm_reset_reviewed().await;
                println!("{}", "Reviewed marks cleared".bright_green());
            } else {
                self.controller.cancel_reset_reviewed().await;
                println!("{}", "Cancelled".bright_black());
            }
            self.render().await;
            return Ok(Flow::Continue);
        }

        let in_text_input = self.focus == Focus::Search;

        if !in_text_input && (trimmed == "quit" || trimmed == "exit") {
            return Ok(Flow::Quit);
        }

        if let Some(key) = parse_key(trimmed)
            && let Some(shortcut) = resolve_shortcut(key, in_text_input)
        {
            self.apply_shortcut(shortcut).await;
            return Ok(Flow::Continue);
        }

        if in_text_input {
            self.focus = Focus::Commands;
            if !trimmed.is_empty() {
                self.controller
                    .dispatch(SessionAction::SetQuery(trimmed.to_string()))
                    .await;
                self.highlight = 0;
            }
            self.render().await;
            return Ok(Flow::Continue);
        }

        if trimmed.is_empty() {
            return Ok(Flow::Continue);
        }

        match trimmed.strip_prefix('/') {
            Some(command) => {
                if let Err(e) = self.run_command(command).await {
                    eprintln!("{}", format!("Error: {}", e).red());
                }
            }
            None => println!("{}", "Unknown input. Type /help for commands.".bright_black()),
        }
        Ok(Flow::Continue)
    }

    async fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::FocusSearch => {
                self.focus = Focus::Search;
                println!(
                    "{}",
                    "Type a search and press Enter (empty line keeps the current one)"
                        .bright_black()
                );
                return;
            }
            Shortcut::ClearOrClose => {
                self.controller.dispatch(SessionAction::ClearQuery).await;
                self.highlight = 0;
            }
            Shortcut::PreviousPage => {
                if self.controller.previous_page().await {
                    self.highlight = 0;
                }
            }
            Shortcut::NextPage => {
                if self.controller.next_page().await {
                    self.highlight = 0;
                }
            }
            Shortcut::CopyHighlighted => {
                self.copy_highlighted().await;
                return;
            }
            Shortcut::HighlightUp | Shortcut::HighlightDown => {
                let rows = self.controller.view().await.rows.len();
                self.highlight = step_highlight(
                    self.highlight,
                    rows,
                    shortcut == Shortcut::HighlightDown,
                );
            }
        }
        self.render().await;
    }

    async fn copy_highlighted(&self) {
        let view = self.controller.view().await;
        let Some(row) = view.rows.get(self.highlight) else {
            println!("{}", "Nothing to copy".bright_black());
            return;
        };
        if self
            .controller
            .copy_item(row.position, &Osc52Clipboard)
            .await
            .is_some()
        {
            println!("{}", format!("Copied #{}", row.number).bright_green());
        }
    }

    /// Row number of the highlighted row, used when a command omits one.
    async fn highlighted_number(&self) -> Option<usize> {
        let view = self.controller.view().await;
        view.rows.get(self.highlight).map(|row| row.number)
    }

    async fn row_argument(&self, arg: Option<&str>) -> Result<usize> {
        let number = match arg {
            Some(raw) => raw.parse::<usize>()?,
            None => self
                .highlighted_number()
                .await
                .ok_or_else(|| anyhow::anyhow!("No question highlighted"))?,
        };
        resolve_row(&self.controller, number).await
    }

    async fn run_command(&mut self, command: &str) -> Result<()> {
        let (name, arg) = match command.split_once(' ') {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|arg| !arg.is_empty())),
            None => (command, None),
        };

        match name {
            "help" => {
                print_help();
                return Ok(());
            }
            "topics" => {
                render::print_catalog(&self.controller.view().await);
                return Ok(());
            }
            "refresh" => {
                self.controller.refresh_catalog().await;
                render::print_catalog(&self.controller.view().await);
                return Ok(());
            }
            "topic" => {
                let id: TopicId = arg
                    .ok_or_else(|| anyhow::anyhow!("Usage: /topic <ID>"))?
                    .parse()?;
                ensure_known_topic(&self.controller, id).await?;
                println!("{}", "Loading questions...".yellow());
                self.controller.select_topic(id).await;
                self.highlight = 0;
            }
            "close" => {
                self.controller.clear_selection().await;
                self.highlight = 0;
            }
            "search" => {
                let query = arg.unwrap_or_default().to_string();
                self.controller.dispatch(SessionAction::SetQuery(query)).await;
                self.highlight = 0;
            }
            "clear" => {
                self.controller.dispatch(SessionAction::ClearQuery).await;
                self.highlight = 0;
            }
            "starred" => {
                self.controller.dispatch(SessionAction::ToggleStarOnly).await;
                self.highlight = 0;
            }
            "page" => {
                let page = arg
                    .ok_or_else(|| anyhow::anyhow!("Usage: /page <N>"))?
                    .parse::<usize>()?;
                self.controller.go_to_page(page).await;
                self.highlight = 0;
            }
            "star" => {
                let position = self.row_argument(arg).await?;
                self.controller.toggle_star(position).await;
            }
            "review" => {
                let position = self.row_argument(arg).await?;
                self.controller.toggle_reviewed(position).await;
            }
            "copy" => {
                let position = self.row_argument(arg).await?;
                if let Some(text) = self.controller.copy_item(position, &Osc52Clipboard).await {
                    println!("{}", "Copied".bright_green());
                    println!("{}", text.bright_black());
                }
                return Ok(());
            }
            "reset" => {
                if self.controller.request_reset_reviewed().await.is_none() {
                    anyhow::bail!("No topic selected");
                }
            }
            other => anyhow::bail!("Unknown command /{}. Type /help for commands.", other),
        }

        self.render().await;
        Ok(())
    }
}

fn print_help() {
    let lines = [
        ("s or /", "search (next line is the search text)"),
        ("c or esc", "clear the search"),
        ("h / l", "previous / next page (also: left / right)"),
        ("k / j", "move highlight up / down (also: up / down)"),
        ("y", "copy the highlighted question"),
        ("/topics", "list topics"),
        ("/topic <ID>", "open a topic"),
        ("/close", "close the topic"),
        ("/search <TEXT>", "search question and answer text"),
        ("/starred", "toggle starred-only"),
        ("/page <N>", "jump to a page"),
        ("/star [N]", "star or unstar a question"),
        ("/review [N]", "mark or unmark a question as reviewed"),
        ("/copy [N]", "copy a question"),
        ("/reset", "clear all reviewed marks of the topic"),
        ("/refresh", "rediscover topics"),
        ("quit", "exit"),
    ];
    for (keys, description) in lines {
        println!("  {:<16} {}", keys.bright_cyan(), description.bright_black());
    }
}

/// Runs the browsing REPL until the user quits.
pub async fn run(global: &GlobalArgs) -> Result<()> {
    let app = AppBootstrap::new(global, Pacing::Interactive)?;

    println!("{}", "=== prepsets ===".bright_magenta().bold());
    println!(
        "{}",
        "Type /help for commands, or 'quit' to exit.".bright_black()
    );

    let report = app.controller.start().await;
    for key in &report.discarded {
        tracing::warn!("Stored '{}' was unreadable and has been reset", key.storage_key());
    }

    let mut session = BrowseSession {
        controller: app.controller,
        focus: Focus::Commands,
        highlight: 0,
    };
    render::print_catalog(&session.controller.view().await);
    session.render().await;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(BrowseHelper::new()));

    loop {
        let prompt = match session.focus {
            Focus::Commands => ">> ",
            Focus::Search => "search> ",
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if let Flow::Quit = session.handle_line(&line).await? {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("j"), Some(KeyInput::Char('j')));
        assert_eq!(parse_key("/"), Some(KeyInput::Char('/')));
        assert_eq!(parse_key("Esc"), Some(KeyInput::Escape));
        assert_eq!(parse_key("left"), Some(KeyInput::Left));
        assert_eq!(parse_key("closure"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_step_highlight_stays_in_rows() {
        assert_eq!(step_highlight(0, 3, false), 0);
        assert_eq!(step_highlight(0, 3, true), 1);
        assert_eq!(step_highlight(2, 3, true), 2);
        assert_eq!(step_highlight(4, 0, true), 0);
    }

    #[test]
    fn test_helper_hints_commands() {
        let helper = BrowseHelper::new();
        let history = rustyline::history::DefaultHistory::new();
        let ctx = Context::new(&history);
        assert_eq!(helper.hint("/sta", 4, &ctx), Some("r".to_string()));
        assert_eq!(helper.hint("/", 1, &ctx), None);
        assert_eq!(helper.hint("closure", 7, &ctx), None);
    }
}
