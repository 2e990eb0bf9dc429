//! Locating the symbol under a mapped caret position.

use crate::cancel::CancelToken;
use crate::model::{Document, SemanticModel};
use crate::query::QueryError;
use codenav_core::{BufferSnapshot, Symbol};
use log::trace;

/// Resolves a buffer snapshot to a tracked document and the symbol at an offset.
pub struct SymbolLocator<'a> {
    model: &'a dyn SemanticModel,
}

impl<'a> SymbolLocator<'a> {
    /// Create a locator over the given semantic model.
    pub fn new(model: &'a dyn SemanticModel) -> Self {
        Self { model }
    }

    /// Derive the document backing `snapshot`, re-synchronized to the snapshot's text.
    ///
    /// Returns `None` when the model cannot associate the buffer with any tracked
    /// document (e.g. the buffer is outside any open project). This is a fail-fast no-target
    /// outcome, never an error.
    pub fn document_for_snapshot(&self, snapshot: &BufferSnapshot) -> Option<Document> {
        let Some(id) = self.model.document_id_for_buffer(snapshot.buffer()) else {
            trace!("buffer {} is not tracked by the code model", snapshot.buffer().get());
            return None;
        };
        self.model.sync_document_text(id, snapshot);
        self.model.document(id)
    }

    /// The symbol occupying `offset` in `document`, blocking until the model answers.
    pub fn find_symbol_at(
        &self,
        document: &Document,
        offset: usize,
        cancel: &CancelToken,
    ) -> Result<Option<Symbol>, QueryError> {
        self.model
            .find_symbol_at_position(document, offset, cancel)
            .wait(cancel)
    }
}
