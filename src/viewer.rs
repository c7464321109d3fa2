//! In-page document preview.
//!
//! Two states only. Opening loads the path into the embedded surface and locks
//! background scrolling; closing clears the surface source so the document is
//! released, then restores scrolling. Retrieval failures belong to the
//! embedding surface and are not modeled here.

use crate::events::Key;
use log::debug;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        path: String,
    },
}

/// Pointer and keyboard inputs that can reach the modal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViewerTrigger {
    CloseButton,
    Backdrop,
    Content,
    Key(Key),
}

/// Whether the page behind the modal may scroll.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackgroundScroll {
    Enabled,
    Locked,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Viewer {
    state: ViewerState,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    /// Source of the embedded surface; empty while closed.
    pub fn surface_source(&self) -> &str {
        match &self.state {
            ViewerState::Open { path } => path,
            ViewerState::Closed => "",
        }
    }

    pub fn background_scroll(&self) -> BackgroundScroll {
        if self.is_open() {
            BackgroundScroll::Locked
        } else {
            BackgroundScroll::Enabled
        }
    }

    /// Show `path`. Opening while already open swaps the document.
    pub fn open(&mut self, path: impl Into<String>) {
        let path = path.into();
        debug!("viewer open {path}");
        self.state = ViewerState::Open { path };
    }

    /// Release the current document; a no-op when already closed.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!("viewer closed");
        }
        self.state = ViewerState::Closed;
    }

    /// Apply a trigger; returns true when the state changed.
    pub fn handle(&mut self, trigger: &ViewerTrigger) -> bool {
        if !self.is_open() {
            return false;
        }
        match trigger {
            ViewerTrigger::CloseButton
            | ViewerTrigger::Backdrop
            | ViewerTrigger::Key(Key::Escape) => {
                self.close();
                true
            }
            ViewerTrigger::Content | ViewerTrigger::Key(_) => false,
        }
    }
}
