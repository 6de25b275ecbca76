//! # Loading Indicator
//!
//! One indicator per document, toggled by the `hide` class on the loading
//! area. Showing appends a single status message to the wrapper; hiding
//! clears the whole wrapper. Both are no-ops when already in that state.

use crate::dom::{self, NodeId, SharedDocument};

pub const LOADING_MESSAGE: &str = "Please wait, gotta fetch 'em all ...";

const HIDE_CLASS: &str = "hide";
const MESSAGE_CLASS: &str = "loading-msg";

#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    document: SharedDocument,
    area: NodeId,
    wrapper: NodeId,
}

impl LoadingIndicator {
    pub fn new(document: SharedDocument, area: NodeId, wrapper: NodeId) -> Self {
        Self {
            document,
            area,
            wrapper,
        }
    }

    pub fn show(&self) {
        let mut doc = dom::lock(&self.document);
        if !doc.has_class(self.area, HIDE_CLASS) {
            return;
        }
        doc.remove_class(self.area, HIDE_CLASS);
        let message = doc.append_new(self.wrapper, "p", &[MESSAGE_CLASS]);
        doc.set_text(message, LOADING_MESSAGE);
        tracing::debug!("Loading indicator shown");
    }

    pub fn hide(&self) {
        let mut doc = dom::lock(&self.document);
        if doc.has_class(self.area, HIDE_CLASS) {
            return;
        }
        doc.add_class(self.area, HIDE_CLASS);
        doc.clear(self.wrapper);
        tracing::debug!("Loading indicator hidden");
    }

    pub fn is_visible(&self) -> bool {
        !dom::lock(&self.document).has_class(self.area, HIDE_CLASS)
    }

    /// Status message nodes currently in the wrapper
    pub fn message_count(&self) -> usize {
        dom::lock(&self.document).children(self.wrapper).len()
    }
}
