//! Command-word configuration for the interactive browse loop.

use serde::Deserialize;

use crate::cli::browse::Action;

/// Command words for every browse action. The first word of an input line
/// selects the action; the rest of the line is its argument.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub search: Vec<String>,
    pub show_favorites: Vec<String>,
    pub show_all: Vec<String>,
    pub reload: Vec<String>,
    pub toggle_star: Vec<String>,
    pub open_in_browser: Vec<String>,
    pub load: Vec<String>,
    pub help: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string(), "quit".to_string()],
            next_page: vec!["n".to_string(), "next".to_string()],
            prev_page: vec!["p".to_string(), "prev".to_string()],
            search: vec!["s".to_string(), "/".to_string(), "search".to_string()],
            show_favorites: vec!["f".to_string(), "favorites".to_string()],
            show_all: vec!["a".to_string(), "all".to_string()],
            reload: vec!["r".to_string(), "reload".to_string()],
            toggle_star: vec!["t".to_string(), "star".to_string()],
            open_in_browser: vec!["o".to_string(), "open".to_string()],
            load: vec!["l".to_string(), "load".to_string()],
            help: vec!["h".to_string(), "?".to_string(), "help".to_string()],
        }
    }
}

impl KeybindingConfig {
    /// Get the action for one input line.
    pub fn get_action(&self, line: &str) -> Action {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };

        if word.is_empty() {
            Action::None
        } else if self.matches(word, &self.quit) {
            Action::Quit
        } else if self.matches(word, &self.next_page) {
            Action::NextPage
        } else if self.matches(word, &self.prev_page) {
            Action::PrevPage
        } else if self.matches(word, &self.search) {
            Action::Search(arg.to_string())
        } else if self.matches(word, &self.show_favorites) {
            Action::ShowFavorites
        } else if self.matches(word, &self.show_all) {
            Action::ShowAll
        } else if self.matches(word, &self.reload) {
            Action::Reload
        } else if self.matches(word, &self.toggle_star) {
            parse_position(arg).map_or(Action::Invalid(line.to_string()), Action::ToggleStar)
        } else if self.matches(word, &self.open_in_browser) {
            parse_position(arg).map_or(Action::Invalid(line.to_string()), Action::OpenInBrowser)
        } else if self.matches(word, &self.load) {
            Action::Load(arg.to_string())
        } else if self.matches(word, &self.help) {
            Action::Help
        } else {
            Action::Invalid(line.to_string())
        }
    }

    fn matches(&self, word: &str, bindings: &[String]) -> bool {
        bindings.iter().any(|binding| binding == word)
    }
}

/// Parse a 1-based entry number as shown in listings.
fn parse_position(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|&n| n >= 1)
}
