//! Versioned text buffers and snapshot points.
//!
//! A [`TextBuffer`] is a *base* buffer: directly editable content plus a monotonically
//! increasing version. Reads go through [`BufferSnapshot`] values, which are cheap to
//! produce (rope node sharing) and immutable, so a caret position captured before an
//! edit stays meaningful for the request that captured it.

use ropey::Rope;
use std::ops::Range;

/// Opaque identifier for a buffer registered in a [`crate::BufferGraph`].
///
/// Identity is stable for the lifetime of the editing session; content is versioned
/// separately (see [`TextBuffer::version`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub(crate) u64);

impl BufferId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A base text buffer: directly editable, versioned content.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    id: BufferId,
    version: u64,
    text: Rope,
}

impl TextBuffer {
    pub(crate) fn new(id: BufferId, text: &str) -> Self {
        Self {
            id,
            version: 0,
            text: Rope::from_str(text),
        }
    }

    /// The buffer id.
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// The current content version. Starts at 0 and bumps on every edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Total character count of the current content.
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Capture the current content as an immutable [`BufferSnapshot`].
    pub fn current_snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            buffer: self.id,
            version: self.version,
            text: self.text.clone(),
        }
    }

    /// Replace `range` (char offsets, half-open) with `text`, bumping the version.
    pub(crate) fn replace(&mut self, range: Range<usize>, text: &str) {
        self.text.remove(range.clone());
        self.text.insert(range.start, text);
        self.version += 1;
    }
}

/// An immutable snapshot of a buffer's content at a specific version.
#[derive(Debug, Clone)]
pub struct BufferSnapshot {
    buffer: BufferId,
    version: u64,
    text: Rope,
}

impl BufferSnapshot {
    /// Id of the buffer this snapshot was taken from.
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// Content version this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Total character count.
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// The full snapshot text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Text of `range` (char offsets, half-open).
    pub fn slice(&self, range: Range<usize>) -> String {
        self.text.slice(range).to_string()
    }

    pub(crate) fn from_rope(buffer: BufferId, version: u64, text: Rope) -> Self {
        Self {
            buffer,
            version,
            text,
        }
    }
}

impl PartialEq for BufferSnapshot {
    fn eq(&self, other: &Self) -> bool {
        // Same buffer + same version implies same content; the rope is not compared.
        self.buffer == other.buffer && self.version == other.version
    }
}

impl Eq for BufferSnapshot {}

/// An immutable point: a char offset into a specific [`BufferSnapshot`].
///
/// Points are values; they are created fresh per navigation request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPoint {
    snapshot: BufferSnapshot,
    offset: usize,
}

impl SnapshotPoint {
    /// Create a point at `offset` in `snapshot`.
    ///
    /// `offset` must be `<= snapshot.len_chars()` (an offset equal to the length is the
    /// end-of-buffer insertion point).
    pub fn new(snapshot: BufferSnapshot, offset: usize) -> Self {
        debug_assert!(offset <= snapshot.len_chars());
        Self { snapshot, offset }
    }

    /// Id of the buffer the point lives in.
    pub fn buffer(&self) -> BufferId {
        self.snapshot.buffer()
    }

    /// The point's char offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The snapshot the offset indexes into.
    pub fn snapshot(&self) -> &BufferSnapshot {
        &self.snapshot
    }
}
