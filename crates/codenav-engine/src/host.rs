//! The editor/navigation host boundary.
//!
//! Window management, caret access, and the actual view scroll/selection belong to the
//! host editor. The engine consumes them through [`EditorHost`], injected explicitly at
//! construction.

use crate::model::DocumentId;
use codenav_core::{BufferGraph, BufferId, SnapshotPoint};

/// A host interop call was not valid in the current editor state.
///
/// Expected under races: the active view can close between the command firing and the
/// engine asking for its caret. The engine absorbs this as a silent stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostStateError;

impl std::fmt::Display for HostStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Operation not valid in the current editor state")
    }
}

impl std::error::Error for HostStateError {}

/// The active editor view as the engine needs it.
#[derive(Debug, Clone)]
pub struct ActiveView {
    /// The view's top-level buffer (what the caret position is expressed in).
    pub view_buffer: BufferId,
    /// The buffer the semantic model is attached to.
    pub subject_buffer: BufferId,
    /// Caret point in the view's top-level buffer.
    pub caret: SnapshotPoint,
}

/// A target span in zero-based `(line, column)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumnSpan {
    /// Start line.
    pub start_line: usize,
    /// Start column (chars).
    pub start_column: usize,
    /// End line.
    pub end_line: usize,
    /// End column (chars).
    pub end_column: usize,
}

/// Operations the engine consumes from the host editor.
pub trait EditorHost {
    /// The currently active text view, or `None` when no document view has focus.
    fn active_view(&self) -> Result<Option<ActiveView>, HostStateError>;

    /// The buffer graph of the current editing session.
    fn buffer_graph(&self) -> &BufferGraph;

    /// Ensure the document is open in an editable view, so navigation can target it.
    fn open_document(&self, id: DocumentId) -> Result<(), HostStateError>;

    /// The buffer presenting `id` once opened, if any.
    fn buffer_for_document(&self, id: DocumentId) -> Option<BufferId>;

    /// Scroll and select `span` in the view presenting `buffer`. Returns whether the
    /// host performed the jump.
    fn navigate_to(&self, buffer: BufferId, span: LineColumnSpan)
    -> Result<bool, HostStateError>;
}
