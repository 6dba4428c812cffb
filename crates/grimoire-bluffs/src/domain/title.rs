//! In-memory settable title for a bluff group.

use grimoire_core::ports::TitleWidget;

/// A title that can be edited in place.
///
/// Remembers the text it started with and the last non-empty text that was
/// committed, so a host can offer both as suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettableTitle {
    title: String,
    start: String,
    previous: Option<String>,
    input: Option<String>,
}

impl SettableTitle {
    /// Creates a title showing `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            start: title.clone(),
            title,
            previous: None,
            input: None,
        }
    }

    /// Whether an edit is in progress.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    /// Starts an edit with an empty input.
    pub fn begin_edit(&mut self) {
        self.input = Some(String::new());
    }

    /// Applies typed input; the title follows the input as it changes.
    pub fn input(&mut self, text: &str) {
        if let Some(input) = self.input.as_mut() {
            text.clone_into(input);
            text.clone_into(&mut self.title);
        }
    }

    /// Ends the edit. A non-empty input becomes the previous value.
    pub fn commit(&mut self) {
        if let Some(input) = self.input.take().filter(|input| !input.is_empty()) {
            self.previous = Some(input);
        }
    }

    /// The text the title started with.
    #[must_use]
    pub fn start_text(&self) -> &str {
        &self.start
    }

    /// The last committed non-empty text.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

impl TitleWidget for SettableTitle {
    fn title(&self) -> String {
        self.title.clone()
    }

    /// Runs a whole edit: an empty `title` clears the text but keeps the
    /// previous value.
    fn set_title(&mut self, title: &str) {
        self.begin_edit();
        self.input(title);
        self.commit();
    }

    /// The start text, then the previous text when it differs. Empty texts
    /// are left out.
    fn suggestions(&self) -> Vec<String> {
        let start = self.start_text();
        let mut suggestions = Vec::new();
        if !start.is_empty() {
            suggestions.push(start.to_owned());
        }
        if let Some(previous) = self.previous().filter(|previous| *previous != start) {
            suggestions.push(previous.to_owned());
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_cycle_updates_title_and_previous() {
        // Arrange
        let mut title = SettableTitle::new("Bluffs");

        // Act
        title.begin_edit();
        title.input("Night 2");
        title.commit();

        // Assert
        assert_eq!(title.title(), "Night 2");
        assert_eq!(title.start_text(), "Bluffs");
        assert_eq!(title.previous(), Some("Night 2"));
        assert!(!title.is_editing());
    }

    #[test]
    fn test_empty_commit_keeps_previous() {
        let mut title = SettableTitle::new("Bluffs");
        title.begin_edit();
        title.input("First");
        title.commit();

        title.begin_edit();
        title.commit();

        assert_eq!(title.previous(), Some("First"));
    }

    #[test]
    fn test_set_title_commits_and_offers_suggestions() {
        // Arrange
        let mut title = SettableTitle::new("Bluffs");

        // Act
        title.set_title("Night 1");
        title.set_title("");

        // Assert
        assert_eq!(title.title(), "");
        assert_eq!(title.previous(), Some("Night 1"));
        assert_eq!(title.suggestions(), vec!["Bluffs", "Night 1"]);
        assert!(!title.is_editing());
    }

    #[test]
    fn test_suggestions_skip_empty_start() {
        let mut title = SettableTitle::new("");

        title.set_title("Evil");

        assert_eq!(title.suggestions(), vec!["Evil"]);
    }

    #[test]
    fn test_input_outside_edit_is_ignored() {
        let mut title = SettableTitle::new("Bluffs");

        title.input("ignored");

        assert_eq!(title.title(), "Bluffs");
    }
}
