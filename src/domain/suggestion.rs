// Location search suggestions
use super::coordinate::Coordinate;
use serde::Serialize;

/// Rows kept from one search response
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub coordinate: Coordinate,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            label: label.into(),
            coordinate,
        }
    }
}

/// Result list under the search box. Rebuilt in full on every response
/// and only visible while it has rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionList {
    items: Vec<Suggestion>,
    visible: bool,
}

impl SuggestionList {
    pub fn replace(&mut self, mut items: Vec<Suggestion>) {
        items.truncate(MAX_SUGGESTIONS);
        self.visible = !items.is_empty();
        self.items = items;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }
}
