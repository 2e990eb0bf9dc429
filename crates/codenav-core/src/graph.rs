//! The projection Buffer Graph and point mapping across it.
//!
//! A [`ProjectionBuffer`] composes its content out of spans of other buffers; edges point
//! from projection to source, and a source may itself be a projection, so the buffers of
//! an editing session form a DAG (the **Buffer Graph**). Because a projection may only
//! reference buffers that are already registered, the graph is acyclic by construction
//! and traversals need no cycle detection.
//!
//! The central operation is [`BufferGraph::map_point`]: translate a point in one buffer
//! into the equivalent point in another buffer, across any number of projection levels.
//! A point in a projection maps *down* to the insertion point in a backing buffer; a
//! point in a backing buffer maps *up* into a projection's composed text. Buffers with
//! no projection relationship simply don't map (`None`), which callers treat as "no
//! navigation possible here" rather than an error.

use crate::buffer::{BufferId, BufferSnapshot, SnapshotPoint, TextBuffer};
use ropey::Rope;
use std::collections::BTreeMap;
use std::ops::Range;

/// One contiguous segment of a source buffer projected into a [`ProjectionBuffer`].
///
/// The span captures the source buffer's version at creation time. If the source is
/// edited afterwards the span is *stale*: its char range indexes a snapshot that no
/// longer exists, so mapping through it is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSpan {
    /// Source buffer contributing the content.
    pub source: BufferId,
    /// Char range in the source buffer (half-open).
    pub range: Range<usize>,
    /// Source buffer version this span was captured against.
    pub source_version: u64,
}

impl ProjectionSpan {
    /// Length of the span in chars.
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Returns true for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A buffer whose content is assembled from spans of one or more source buffers.
#[derive(Debug, Clone)]
pub struct ProjectionBuffer {
    id: BufferId,
    version: u64,
    spans: Vec<ProjectionSpan>,
}

impl ProjectionBuffer {
    /// The buffer id.
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// The projection's content version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The spans making up the composed content, in composed order.
    pub fn spans(&self) -> &[ProjectionSpan] {
        &self.spans
    }

    /// Total char count of the composed content.
    pub fn composed_len(&self) -> usize {
        self.spans.iter().map(ProjectionSpan::len).sum()
    }
}

/// Buffer-graph errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A buffer id is not registered in this graph.
    BufferNotFound(BufferId),
    /// The operation requires a base buffer but the id names a projection.
    NotABaseBuffer(BufferId),
    /// A projection span references a range outside its source buffer.
    InvalidSpan {
        /// Source buffer id.
        source: BufferId,
        /// Requested start offset.
        start: usize,
        /// Requested end offset.
        end: usize,
    },
    /// A projection span captured a source version that is no longer current.
    StaleSpan {
        /// Source buffer id.
        source: BufferId,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::BufferNotFound(id) => {
                write!(f, "Buffer not found: {}", id.get())
            }
            GraphError::NotABaseBuffer(id) => {
                write!(f, "Buffer {} is not a base buffer", id.get())
            }
            GraphError::InvalidSpan { source, start, end } => {
                write!(
                    f,
                    "Span {}..{} is out of bounds for buffer {}",
                    start,
                    end,
                    source.get()
                )
            }
            GraphError::StaleSpan { source } => {
                write!(f, "Span over buffer {} is stale", source.get())
            }
        }
    }
}

impl std::error::Error for GraphError {}

#[derive(Debug, Clone)]
enum GraphNode {
    Base(TextBuffer),
    Projection(ProjectionBuffer),
}

/// The DAG of projection relationships among the buffers of an editing session.
///
/// The graph owns the buffers; ids are minted at registration. A projection may only
/// reference ids that already exist, which rules out cycles without any explicit check.
#[derive(Debug, Clone, Default)]
pub struct BufferGraph {
    nodes: BTreeMap<BufferId, GraphNode>,
    next_id: u64,
}

impl BufferGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base buffer with the given initial text.
    pub fn add_buffer(&mut self, text: &str) -> BufferId {
        let id = self.mint_id();
        self.nodes.insert(id, GraphNode::Base(TextBuffer::new(id, text)));
        id
    }

    /// Register a projection buffer composed of `segments`, in composed order.
    ///
    /// Each segment is a `(source, char range)` pair; the source's current version is
    /// captured into the resulting [`ProjectionSpan`]. Errors if a source id is unknown
    /// or a range is out of bounds for the source's current content.
    pub fn add_projection(
        &mut self,
        segments: &[(BufferId, Range<usize>)],
    ) -> Result<BufferId, GraphError> {
        let mut spans = Vec::with_capacity(segments.len());
        for (source, range) in segments {
            let (len, version) = match self.nodes.get(source) {
                Some(GraphNode::Base(buf)) => (buf.len_chars(), buf.version()),
                Some(GraphNode::Projection(p)) => (p.composed_len(), p.version()),
                None => return Err(GraphError::BufferNotFound(*source)),
            };
            if range.start > range.end || range.end > len {
                return Err(GraphError::InvalidSpan {
                    source: *source,
                    start: range.start,
                    end: range.end,
                });
            }
            spans.push(ProjectionSpan {
                source: *source,
                range: range.clone(),
                source_version: version,
            });
        }

        let id = self.mint_id();
        self.nodes.insert(
            id,
            GraphNode::Projection(ProjectionBuffer {
                id,
                version: 0,
                spans,
            }),
        );
        Ok(id)
    }

    /// Replace `range` in base buffer `id` with `text`, bumping its version.
    ///
    /// Spans captured against the previous version become stale.
    pub fn edit_buffer(
        &mut self,
        id: BufferId,
        range: Range<usize>,
        text: &str,
    ) -> Result<(), GraphError> {
        match self.nodes.get_mut(&id) {
            Some(GraphNode::Base(buf)) => {
                if range.start > range.end || range.end > buf.len_chars() {
                    return Err(GraphError::InvalidSpan {
                        source: id,
                        start: range.start,
                        end: range.end,
                    });
                }
                buf.replace(range, text);
                Ok(())
            }
            Some(GraphNode::Projection(_)) => Err(GraphError::NotABaseBuffer(id)),
            None => Err(GraphError::BufferNotFound(id)),
        }
    }

    /// Number of registered buffers.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no buffers are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` names a projection buffer.
    pub fn is_projection(&self, id: BufferId) -> bool {
        matches!(self.nodes.get(&id), Some(GraphNode::Projection(_)))
    }

    /// Current content version of `id`, if registered.
    pub fn buffer_version(&self, id: BufferId) -> Option<u64> {
        match self.nodes.get(&id)? {
            GraphNode::Base(buf) => Some(buf.version()),
            GraphNode::Projection(p) => Some(p.version()),
        }
    }

    /// The spans of projection `id`, if it is one.
    pub fn projection_spans(&self, id: BufferId) -> Option<&[ProjectionSpan]> {
        match self.nodes.get(&id)? {
            GraphNode::Projection(p) => Some(p.spans()),
            GraphNode::Base(_) => None,
        }
    }

    /// Capture the current content of `id` as a snapshot.
    ///
    /// For a projection this assembles the composed text; a stale span anywhere in the
    /// composition is an error, since its range indexes a snapshot that no longer
    /// exists.
    pub fn current_snapshot(&self, id: BufferId) -> Result<BufferSnapshot, GraphError> {
        match self.nodes.get(&id) {
            Some(GraphNode::Base(buf)) => Ok(buf.current_snapshot()),
            Some(GraphNode::Projection(p)) => {
                let mut composed = Rope::new();
                for span in p.spans() {
                    let source = self.current_snapshot(span.source)?;
                    if source.version() != span.source_version {
                        return Err(GraphError::StaleSpan {
                            source: span.source,
                        });
                    }
                    let at = composed.len_chars();
                    composed.insert(at, &source.slice(span.range.clone()));
                }
                Ok(BufferSnapshot::from_rope(id, p.version(), composed))
            }
            None => Err(GraphError::BufferNotFound(id)),
        }
    }

    /// Returns true if `buffer` is a direct or transitive source of projection
    /// `projection`.
    ///
    /// Recursion depth equals the graph's depth; the graph is acyclic by construction.
    pub fn is_source_buffer(&self, projection: BufferId, buffer: BufferId) -> bool {
        let Some(GraphNode::Projection(p)) = self.nodes.get(&projection) else {
            return false;
        };
        p.spans().iter().any(|span| span.source == buffer)
            || p.spans()
                .iter()
                .any(|span| self.is_source_buffer(span.source, buffer))
    }

    /// Translate `point` into the equivalent point in `destination`.
    ///
    /// - Identity: a point already in `destination` is returned unchanged.
    /// - Downward: the point lives in a projection that (transitively) sources
    ///   `destination`; the offset is resolved through the span containing it with
    ///   *positive* affinity (an offset exactly on a span seam belongs to the span on
    ///   the right). A span captured against a stale source version does not match.
    /// - Upward: `destination` is a projection that (transitively) composes the point's
    ///   buffer; the offset is placed in the composed text with positive tracking and
    ///   *predecessor* affinity (at a gap in the projection, the position immediately
    ///   before the gap wins).
    /// - Unrelated buffers yield `None`.
    pub fn map_point(
        &self,
        point: &SnapshotPoint,
        destination: BufferId,
    ) -> Option<SnapshotPoint> {
        let start = point.buffer();
        if start == destination {
            return Some(point.clone());
        }

        if self.is_projection(start) && self.is_source_buffer(start, destination) {
            return self.map_down_to_insertion_point(start, point.offset(), destination);
        }

        if self.is_projection(destination) && self.is_source_buffer(destination, start) {
            let offset = self.map_up_to_buffer(start, point.offset(), destination)?;
            let snapshot = self.current_snapshot(destination).ok()?;
            return Some(SnapshotPoint::new(snapshot, offset));
        }

        None
    }

    /// Map an offset in `projection`'s composed text down to the insertion point in
    /// `destination`.
    fn map_down_to_insertion_point(
        &self,
        projection: BufferId,
        offset: usize,
        destination: BufferId,
    ) -> Option<SnapshotPoint> {
        let spans = self.projection_spans(projection)?;

        // Positive affinity: at a seam the offset belongs to the following span, so the
        // first span with `offset < acc + len` wins. The composed end has no following
        // span and resolves to the final span's end.
        let mut acc = 0usize;
        let mut hit = None;
        for (index, span) in spans.iter().enumerate() {
            let len = span.len();
            if offset < acc + len {
                hit = Some((index, offset - acc));
                break;
            }
            acc += len;
        }
        let (index, local) = match hit {
            Some(found) => found,
            None if offset == acc && !spans.is_empty() => {
                let last = spans.len() - 1;
                (last, spans[last].len())
            }
            None => return None,
        };

        let span = &spans[index];
        let source_offset = span.range.start + local;

        if span.source == destination {
            // Only a span tracking the destination's current snapshot matches; a stale
            // span indexes content that no longer exists.
            if self.buffer_version(destination)? != span.source_version {
                return None;
            }
            let snapshot = self.current_snapshot(destination).ok()?;
            return Some(SnapshotPoint::new(snapshot, source_offset));
        }

        if self.is_projection(span.source) && self.is_source_buffer(span.source, destination) {
            return self.map_down_to_insertion_point(span.source, source_offset, destination);
        }

        // Positive affinity landed the offset in a span not backed by the destination.
        None
    }

    /// Map an offset in `source`'s current snapshot up to `destination`'s composed text.
    fn map_up_to_buffer(
        &self,
        source: BufferId,
        offset: usize,
        destination: BufferId,
    ) -> Option<usize> {
        let spans = self.projection_spans(destination)?;

        let mut interior = None;
        let mut predecessor = None;
        let mut acc = 0usize;
        for span in spans {
            let len = span.len();

            // The offset as seen by this span's source, when the span (transitively)
            // projects the source buffer and still tracks current content.
            let position = if span.source == source {
                if self.span_is_fresh(span) {
                    Some(offset)
                } else {
                    None
                }
            } else if self.is_projection(span.source) && self.is_source_buffer(span.source, source)
            {
                self.map_up_to_buffer(source, offset, span.source)
            } else {
                None
            };

            if let Some(position) = position {
                if position >= span.range.start && position < span.range.end {
                    if interior.is_none() {
                        interior = Some(acc + (position - span.range.start));
                    }
                } else if position == span.range.end && predecessor.is_none() {
                    predecessor = Some(acc + len);
                }
            }

            acc += len;
        }

        // Predecessor affinity: an offset sitting exactly at a span's end maps to the
        // composed position immediately before the following gap.
        predecessor.or(interior)
    }

    fn span_is_fresh(&self, span: &ProjectionSpan) -> bool {
        self.buffer_version(span.source) == Some(span.source_version)
    }

    fn mint_id(&mut self) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        id
    }
}
