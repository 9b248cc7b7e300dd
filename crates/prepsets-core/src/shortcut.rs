//! Single-key shortcuts of the browsing view.

/// A key press as seen by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Escape,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    FocusSearch,
    /// Clear the search, or close whatever is open.
    ClearOrClose,
    PreviousPage,
    NextPage,
    CopyHighlighted,
    HighlightUp,
    HighlightDown,
}

/// Maps a key to its shortcut.
///
/// Returns `None` while focus is inside a text input so typing is never
/// hijacked.
pub fn resolve_shortcut(key: KeyInput, focus_in_text_input: bool) -> Option<Shortcut> {
    if focus_in_text_input {
        return None;
    }
    match key {
        KeyInput::Escape => Some(Shortcut::ClearOrClose),
        KeyInput::Left => Some(Shortcut::PreviousPage),
        KeyInput::Right => Some(Shortcut::NextPage),
        KeyInput::Up => Some(Shortcut::HighlightUp),
        KeyInput::Down => Some(Shortcut::HighlightDown),
        KeyInput::Char(c) => match c.to_ascii_lowercase() {
            's' | '/' => Some(Shortcut::FocusSearch),
            'c' => Some(Shortcut::ClearOrClose),
            'h' => Some(Shortcut::PreviousPage),
            'l' => Some(Shortcut::NextPage),
            'y' => Some(Shortcut::CopyHighlighted),
            'k' => Some(Shortcut::HighlightUp),
            'j' => Some(Shortcut::HighlightDown),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_case_insensitively() {
        assert_eq!(resolve_shortcut(KeyInput::Char('s'), false), Some(Shortcut::FocusSearch));
        assert_eq!(resolve_shortcut(KeyInput::Char('S'), false), Some(Shortcut::FocusSearch));
        assert_eq!(resolve_shortcut(KeyInput::Char('y'), false), Some(Shortcut::CopyHighlighted));
        assert_eq!(resolve_shortcut(KeyInput::Char('q'), false), None);
    }

    #[test]
    fn test_arrows() {
        assert_eq!(resolve_shortcut(KeyInput::Left, false), Some(Shortcut::PreviousPage));
        assert_eq!(resolve_shortcut(KeyInput::Right, false), Some(Shortcut::NextPage));
        assert_eq!(resolve_shortcut(KeyInput::Up, false), Some(Shortcut::HighlightUp));
        assert_eq!(resolve_shortcut(KeyInput::Down, false), Some(Shortcut::HighlightDown));
    }

    #[test]
    fn test_suppressed_inside_text_input() {
        for key in [
            KeyInput::Char('s'),
            KeyInput::Char('j'),
            KeyInput::Escape,
            KeyInput::Left,
            KeyInput::Down,
        ] {
            assert_eq!(resolve_shortcut(key, true), None, "{key:?}");
        }
    }
}
