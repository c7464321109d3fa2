//! Discrete UI inputs fed to the controller.

use crate::catalog::{CategoryName, DocumentId};

/// Keys the page reacts to; everything else is carried as `Other`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(value: &str) -> Self {
        match value {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    /// Whether the key activates a focused button-like element.
    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Everything a user can do on the page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UiEvent {
    /// The search field now holds this text.
    QueryInput(String),
    ClearSearch,
    HeaderClick(CategoryName),
    HeaderKey(CategoryName, Key),
    /// "View" on an entry; carries the entry's document path.
    View(String),
    /// "View" resolved through the catalog by id.
    ViewDocument(DocumentId),
    CloseButton,
    /// Pointer interaction on the modal backdrop.
    Backdrop,
    /// Pointer interaction inside the embedded document.
    ModalContent,
    /// Key pressed anywhere on the page.
    PageKey(Key),
}
