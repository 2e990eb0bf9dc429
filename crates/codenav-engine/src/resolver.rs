//! Symbol classification and the unique-implementation decision procedure.

use crate::cancel::CancelToken;
use crate::host::LineColumnSpan;
use crate::model::{Document, SemanticModel};
use crate::query::QueryError;
use codenav_core::{Symbol, SymbolRange, TypeKind};
use log::debug;

/// A resolved navigation target: a tracked document plus the declaration span inside it.
#[derive(Debug, Clone)]
pub struct NavigationTarget {
    document: Document,
    span: SymbolRange,
}

impl NavigationTarget {
    /// The document owning the target span.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The target span (char offsets).
    pub fn span(&self) -> SymbolRange {
        self.span
    }

    /// The target span as `(line, column)` pairs, via the document's line index.
    pub fn line_column_span(&self) -> LineColumnSpan {
        let index = self.document.line_index();
        let (start_line, start_column) = index.char_offset_to_position(self.span.start);
        let (end_line, end_column) = index.char_offset_to_position(self.span.end);
        LineColumnSpan {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

/// Applies the uniqueness policy to a located symbol.
///
/// An abstract interface or class member navigates to its implementation only when the
/// workspace contains exactly one; zero or several candidates resolve to nothing; the
/// feature never presents a choice and never guesses. Every other symbol resolves to
/// its own declaration.
pub struct ImplementationResolver<'a> {
    model: &'a dyn SemanticModel,
}

impl<'a> ImplementationResolver<'a> {
    /// Create a resolver over the given semantic model.
    pub fn new(model: &'a dyn SemanticModel) -> Self {
        Self { model }
    }

    /// Resolve `symbol` to a navigation target, or `None` when there is nothing to
    /// navigate to. Cancellation propagates unchanged through every query.
    pub fn resolve(
        &self,
        symbol: &Symbol,
        cancel: &CancelToken,
    ) -> Result<Option<NavigationTarget>, QueryError> {
        if symbol.is_contract_member() {
            match symbol.containing_type.kind {
                TypeKind::Interface => {
                    let implementations =
                        self.model.find_implementations(symbol, cancel).wait(cancel)?;
                    debug!(
                        "{} implementation(s) of interface member {}",
                        implementations.len(),
                        symbol.name
                    );
                    return Ok(match implementations.as_slice() {
                        [implementation] => self.declaration_target(implementation),
                        _ => None,
                    });
                }
                TypeKind::Class => {
                    let overrides = self.model.find_overrides(symbol, cancel).wait(cancel)?;
                    debug!(
                        "{} override(s) of abstract member {}",
                        overrides.len(),
                        symbol.name
                    );
                    return Ok(match overrides.as_slice() {
                        [implementation] => self.declaration_target(implementation),
                        _ => None,
                    });
                }
                // An abstract member whose container is neither an interface nor a
                // class has no implementation search; its own declaration is the
                // target.
                _ => {}
            }
        }

        Ok(self.declaration_target(symbol))
    }

    /// The declaration of `symbol` as a navigation target: normalize to the original
    /// definition, take its first source-backed location, and resolve the owning
    /// document. Any missing piece means there is nothing to navigate to.
    fn declaration_target(&self, symbol: &Symbol) -> Option<NavigationTarget> {
        let symbol = symbol.original_definition();
        let location = symbol.first_source_location()?;
        let tree = location.source_tree?;
        let document = self.model.document_for_source_tree(tree)?;
        Some(NavigationTarget {
            document,
            span: location.span,
        })
    }
}
