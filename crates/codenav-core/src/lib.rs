#![warn(missing_docs)]
//! codenav-core - Buffer-Graph and Coordinate Kernel for Code Navigation
//!
//! # Overview
//!
//! `codenav-core` is the headless kernel underneath "go to implementation"-style
//! navigation: it models the buffers of an editing session, the projection
//! relationships between them, and the coordinate conversions needed to hand a caret
//! position to a semantic code model and a resolved declaration back to an editor view.
//! It is UI-agnostic and owns no semantic knowledge; the semantic side lives in
//! `codenav-engine`.
//!
//! # Core Features
//!
//! - **Versioned Buffers**: rope-backed base buffers with cheap immutable snapshots
//! - **Buffer Graph**: projection buffers composed from spans of other buffers,
//!   forming a DAG with unbounded depth
//! - **Point Mapping**: caret translation down to backing buffers and up into
//!   composed views, with positive tracking and seam affinities
//! - **Line Index**: O(log n) char-offset ↔ (line, column) conversion
//! - **Symbol Model**: value types for members, containing types, and declared
//!   locations
//!
//! # Quick Start
//!
//! ```rust
//! use codenav_core::{BufferGraph, SnapshotPoint};
//!
//! let mut graph = BufferGraph::new();
//! let host = graph.add_buffer("<script>let x = 1;</script>");
//! let script = graph.add_projection(&[(host, 8..18)]).unwrap();
//!
//! // A caret in the projected script view maps onto the host document.
//! let caret = SnapshotPoint::new(graph.current_snapshot(script).unwrap(), 4);
//! let mapped = graph.map_point(&caret, host).unwrap();
//! assert_eq!(mapped.offset(), 12);
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - versioned buffers, snapshots, and points
//! - [`graph`] - the projection Buffer Graph and point mapping
//! - [`line_index`] - rope-backed line/column conversion
//! - [`symbols`] - semantic symbol value types

pub mod buffer;
pub mod graph;
pub mod line_index;
pub mod symbols;

pub use buffer::{BufferId, BufferSnapshot, SnapshotPoint, TextBuffer};
pub use graph::{BufferGraph, GraphError, ProjectionBuffer, ProjectionSpan};
pub use line_index::LineIndex;
pub use symbols::{
    ContainingType, MemberKind, SourceTreeId, Symbol, SymbolLocation, SymbolRange, TypeKind,
};
