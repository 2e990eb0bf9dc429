#![warn(missing_docs)]
//! codenav-engine - "Go To Unique Implementation" on top of `codenav-core`
//!
//! # Overview
//!
//! Given a caret position, decide whether the symbol under it is an abstract contract
//! member (an interface member, or an abstract/overridable class member), find its
//! concrete implementations or overrides across the workspace, and, only when exactly
//! one exists, jump to it. Anything else resolves the symbol's own declaration, or
//! nothing at all. Ambiguity is a deliberate no-op: the feature never presents a picker
//! and never guesses among candidates.
//!
//! The semantic code model and the editor surface are external collaborators, injected
//! as trait objects at construction:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  CommandSet (fixed descriptor list)          │  ← host entry point
//! ├──────────────────────────────────────────────┤
//! │  NavigationEngine (pipeline orchestration)   │
//! ├──────────────────────────────────────────────┤
//! │  SymbolLocator │ ImplementationResolver      │  ← semantic queries
//! ├──────────────────────────────────────────────┤
//! │  BufferGraph::map_point (codenav-core)       │  ← caret mapping
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Failure Semantics
//!
//! "Nothing to navigate to" is the designed, frequent outcome: caret on whitespace, a
//! metadata-only symbol, zero or several implementations, an unmappable caret, a view
//! that closed mid-command. All of these stop silently: nothing is retried, reported,
//! or surfaced to the user. Cancellation propagates end-to-end through every semantic
//! query and aborts the pipeline with no partial navigation.
//!
//! # Module Description
//!
//! - [`cancel`] - cooperative cancellation token
//! - [`query`] - blocking handles for background semantic queries
//! - [`model`] - the semantic-model provider boundary
//! - [`locator`] - symbol-at-position lookup
//! - [`resolver`] - classification and the uniqueness policy
//! - [`host`] - the editor/navigation host boundary
//! - [`engine`] - pipeline orchestration
//! - [`commands`] - command registration and dispatch

pub mod cancel;
pub mod commands;
pub mod engine;
pub mod host;
pub mod locator;
pub mod model;
pub mod query;
pub mod resolver;

pub use cancel::CancelToken;
pub use commands::{CommandDescriptor, CommandId, CommandSet, GO_TO_IMPLEMENTATION};
pub use engine::{CommandDisposition, NavigationEngine};
pub use host::{ActiveView, EditorHost, HostStateError, LineColumnSpan};
pub use locator::SymbolLocator;
pub use model::{Document, DocumentId, SemanticModel};
pub use query::{QueryError, QueryHandle};
pub use resolver::{ImplementationResolver, NavigationTarget};
