//! The semantic-model provider boundary.
//!
//! The code model (project graph, symbol table, implementation/override search) is an
//! external collaborator. This module defines the exact operations the navigation
//! pipeline consumes from it, as a trait passed in explicitly at construction; there
//! is no ambient registry.

use crate::cancel::CancelToken;
use crate::query::QueryHandle;
use codenav_core::{BufferId, BufferSnapshot, LineIndex, SourceTreeId, Symbol};

/// Opaque identifier for a document tracked by the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Create an id from a raw provider value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A document as the semantic model sees it: tracked identity plus the text it was
/// derived from, produced on demand and discarded at the end of the request.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    line_index: LineIndex,
}

impl Document {
    /// Create a document value over `text`.
    pub fn new(id: DocumentId, text: &str) -> Self {
        Self {
            id,
            line_index: LineIndex::from_text(text),
        }
    }

    /// The tracked document id.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Line index over the document's text.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// The document's full text.
    pub fn text(&self) -> String {
        self.line_index.get_text()
    }
}

/// Operations the navigation pipeline consumes from the semantic model.
///
/// Query methods return a [`QueryHandle`] because answers may be computed on background
/// compilation threads; the pipeline blocks on the handle with the request's token.
/// `&self` receivers with an interior-mutable text mirror are expected, since the same
/// provider is shared by the locator, the resolver, and the engine within one request.
pub trait SemanticModel {
    /// The symbol occupying `offset` in `document`, or `None` for whitespace,
    /// punctuation, or comments.
    fn find_symbol_at_position(
        &self,
        document: &Document,
        offset: usize,
        cancel: &CancelToken,
    ) -> QueryHandle<Option<Symbol>>;

    /// All concrete implementations of an interface member across the workspace.
    fn find_implementations(
        &self,
        symbol: &Symbol,
        cancel: &CancelToken,
    ) -> QueryHandle<Vec<Symbol>>;

    /// All overrides of an abstract/overridable class member across the workspace.
    fn find_overrides(&self, symbol: &Symbol, cancel: &CancelToken) -> QueryHandle<Vec<Symbol>>;

    /// The tracked document with the given id, if any.
    fn document(&self, id: DocumentId) -> Option<Document>;

    /// The document owning a source tree, if any.
    fn document_for_source_tree(&self, tree: SourceTreeId) -> Option<Document>;

    /// The tracked document backing `buffer` in the current context, or `None` when the
    /// buffer is outside any open project.
    fn document_id_for_buffer(&self, buffer: BufferId) -> Option<DocumentId>;

    /// Re-synchronize the model's text for `id` to `snapshot`, preserving document
    /// identity, so subsequent queries see the live buffer content.
    fn sync_document_text(&self, id: DocumentId, snapshot: &BufferSnapshot);
}
