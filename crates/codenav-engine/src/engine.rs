//! The navigation pipeline: caret → mapping → symbol → target → jump.

use crate::cancel::CancelToken;
use crate::host::{EditorHost, HostStateError};
use crate::locator::SymbolLocator;
use crate::model::SemanticModel;
use crate::query::QueryError;
use crate::resolver::{ImplementationResolver, NavigationTarget};
use log::trace;

/// What the command invocation did with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandDisposition {
    /// A navigation happened; the command is consumed.
    Handled,
    /// Nothing to navigate to; other handlers may still act on the same input.
    Pass,
}

enum EngineStop {
    HostState,
    Query(QueryError),
}

impl From<HostStateError> for EngineStop {
    fn from(_: HostStateError) -> Self {
        EngineStop::HostState
    }
}

impl From<QueryError> for EngineStop {
    fn from(err: QueryError) -> Self {
        EngineStop::Query(err)
    }
}

/// Orchestrates one "go to unique implementation" request.
///
/// Collaborators are injected at construction; the engine holds no state of its own and
/// every invocation creates its documents, symbols, and targets fresh.
pub struct NavigationEngine<'a> {
    model: &'a dyn SemanticModel,
    host: &'a dyn EditorHost,
}

impl<'a> NavigationEngine<'a> {
    /// Create an engine over the given collaborators.
    pub fn new(model: &'a dyn SemanticModel, host: &'a dyn EditorHost) -> Self {
        Self { model, host }
    }

    /// Run the pipeline for one user-initiated command.
    ///
    /// Every expected condition (no active view, unmappable caret, untracked buffer,
    /// no symbol, ambiguous implementations, cancellation, a host race) resolves to
    /// [`CommandDisposition::Pass`] with no user-visible effect.
    pub fn execute(&self, cancel: &CancelToken) -> CommandDisposition {
        match self.run(cancel) {
            Ok(disposition) => disposition,
            Err(EngineStop::HostState) => {
                trace!("editor state changed mid-command; stopping silently");
                CommandDisposition::Pass
            }
            Err(EngineStop::Query(QueryError::Cancelled)) => {
                trace!("navigation request cancelled");
                CommandDisposition::Pass
            }
            Err(EngineStop::Query(QueryError::Disconnected)) => {
                trace!("semantic model went away mid-query; stopping silently");
                CommandDisposition::Pass
            }
        }
    }

    fn run(&self, cancel: &CancelToken) -> Result<CommandDisposition, EngineStop> {
        let Some(view) = self.host.active_view()? else {
            return Ok(CommandDisposition::Pass);
        };

        let graph = self.host.buffer_graph();
        let Some(point) = graph.map_point(&view.caret, view.subject_buffer) else {
            return Ok(CommandDisposition::Pass);
        };

        let locator = SymbolLocator::new(self.model);
        let Some(document) = locator.document_for_snapshot(point.snapshot()) else {
            return Ok(CommandDisposition::Pass);
        };
        let Some(symbol) = locator.find_symbol_at(&document, point.offset(), cancel)? else {
            return Ok(CommandDisposition::Pass);
        };

        let resolver = ImplementationResolver::new(self.model);
        let Some(target) = resolver.resolve(&symbol, cancel)? else {
            return Ok(CommandDisposition::Pass);
        };

        if self.navigate(&target)? {
            Ok(CommandDisposition::Handled)
        } else {
            Ok(CommandDisposition::Pass)
        }
    }

    fn navigate(&self, target: &NavigationTarget) -> Result<bool, EngineStop> {
        let id = target.document().id();
        self.host.open_document(id)?;
        let Some(buffer) = self.host.buffer_for_document(id) else {
            return Ok(false);
        };
        Ok(self.host.navigate_to(buffer, target.line_column_span())?)
    }
}
