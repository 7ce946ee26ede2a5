//! Panel selection state machine.
//!
//! # Responsibility
//! - Track which domain's panel is open.
//! - Own the uncommitted compose-input text and focus requests.
//!
//! # Invariants
//! - At most one panel is open at a time.
//! - Compose text never survives a domain switch or a close.

use crate::model::domain::{Domain, DomainCatalog};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "domain", rename_all = "snake_case")]
pub enum PanelState {
    Closed,
    Open(&'static str),
}

/// Why a panel was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Explicit,
    Escape,
    OutsideClick,
}

impl CloseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Escape => "escape",
            Self::OutsideClick => "outside_click",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    state: PanelState,
    compose_text: String,
    focus_requested: bool,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            state: PanelState::Closed,
            compose_text: String::new(),
            focus_requested: false,
        }
    }

    /// Opens `slug`, replacing any open panel.
    ///
    /// Unknown slugs are ignored and return `None`.
    pub fn select(&mut self, slug: &str) -> Option<&'static Domain> {
        let Ok(domain) = DomainCatalog::by_slug(slug) else {
            debug!("event=panel_select module=service status=skip reason=unknown_domain");
            return None;
        };
        let previous = self.state;
        self.state = PanelState::Open(domain.slug);
        self.compose_text.clear();
        self.focus_requested = true;
        debug!(
            "event=panel_select module=service status=ok domain={} switched={}",
            domain.slug,
            matches!(previous, PanelState::Open(_))
        );
        Some(domain)
    }

    /// Closes the open panel, discarding compose text.
    ///
    /// Returns `false` when nothing was open.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        self.compose_text.clear();
        self.focus_requested = false;
        if self.state == PanelState::Closed {
            return false;
        }
        self.state = PanelState::Closed;
        debug!(
            "event=panel_close module=service status=ok reason={}",
            reason.as_str()
        );
        true
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open(_))
    }

    pub fn active_domain(&self) -> Option<&'static str> {
        match self.state {
            PanelState::Open(slug) => Some(slug),
            PanelState::Closed => None,
        }
    }

    /// Updates compose text; ignored while closed.
    pub fn set_compose_text(&mut self, text: impl Into<String>) {
        if self.is_open() {
            self.compose_text = text.into();
        }
    }

    pub fn compose_text(&self) -> &str {
        &self.compose_text
    }

    pub fn clear_compose_text(&mut self) {
        self.compose_text.clear();
    }

    /// Returns whether the input should take focus, clearing the request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}
