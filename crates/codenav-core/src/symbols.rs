//! Semantic symbol model.
//!
//! UI-agnostic value types describing what the semantic model returns for a position:
//! the member under the caret, its containing type, and where it is declared. Symbols
//! are produced fresh per query and never cached across navigation requests.

/// A half-open char-offset range (`start..end`) in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolRange {
    /// Range start offset (inclusive).
    pub start: usize,
    /// Range end offset (exclusive).
    pub end: usize,
}

impl SymbolRange {
    /// Create a new symbol range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for a zero-length range.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Opaque identifier for a parsed source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceTreeId(u64);

impl SourceTreeId {
    /// Create an id from a raw provider value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying numeric id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A declared location of a symbol.
///
/// A symbol defined only in metadata/binary form carries no source tree; such a
/// location is never a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolLocation {
    /// The source tree owning the span, or `None` for metadata-only locations.
    pub source_tree: Option<SourceTreeId>,
    /// Declaration span (char offsets) within the source tree's document.
    pub span: SymbolRange,
}

impl SymbolLocation {
    /// A location backed by real source text.
    pub fn in_source(tree: SourceTreeId, span: SymbolRange) -> Self {
        Self {
            source_tree: Some(tree),
            span,
        }
    }

    /// A metadata-only location (no backing source text).
    pub fn in_metadata() -> Self {
        Self {
            source_tree: None,
            span: SymbolRange::new(0, 0),
        }
    }

    /// Returns true if the location has real backing source text.
    pub fn is_in_source(&self) -> bool {
        self.source_tree.is_some()
    }
}

/// Kind of a member symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A method.
    Method,
    /// A property.
    Property,
    /// A field.
    Field,
    /// A type used as a member position (e.g. a nested type name).
    Type,
    /// Anything else (locals, parameters, labels, ...).
    Other,
}

/// Kind of a symbol's containing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// An interface.
    Interface,
    /// A class.
    Class,
    /// A struct.
    Struct,
    /// An enum.
    Enum,
    /// Anything else (delegates, modules, ...).
    Other,
}

/// The type declaring a member symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainingType {
    /// Type name.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl ContainingType {
    /// Create a containing-type descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A semantic symbol resolved by the code model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Symbol name (e.g. method name).
    pub name: String,
    /// Member kind.
    pub member_kind: MemberKind,
    /// Whether the member is abstract (no mandatory concrete body at its declaration).
    pub is_abstract: bool,
    /// The declaring type.
    pub containing_type: ContainingType,
    /// Declared locations, in declaration order.
    pub locations: Vec<SymbolLocation>,
    /// For a constructed/specialized generic instantiation, the declaring symbol.
    /// `None` when the symbol already is its own original definition.
    pub original_definition: Option<Box<Symbol>>,
}

impl Symbol {
    /// Returns true for an abstract contract member: an abstract method or property,
    /// the only member kinds that participate in implementation/override lookup.
    pub fn is_contract_member(&self) -> bool {
        self.is_abstract
            && matches!(self.member_kind, MemberKind::Method | MemberKind::Property)
    }

    /// Normalize to the original definition, stripping generic instantiation.
    pub fn original_definition(&self) -> &Symbol {
        match &self.original_definition {
            Some(original) => original,
            None => self,
        }
    }

    /// The first declared location backed by real source text, if any.
    pub fn first_source_location(&self) -> Option<&SymbolLocation> {
        self.locations.iter().find(|loc| loc.is_in_source())
    }
}
