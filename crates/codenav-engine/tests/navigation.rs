use codenav_core::{
    BufferGraph, BufferId, ContainingType, MemberKind, SnapshotPoint, SourceTreeId, Symbol,
    SymbolLocation, SymbolRange, TypeKind,
};
use codenav_engine::{
    ActiveView, CancelToken, CommandDisposition, CommandId, CommandSet, Document, DocumentId,
    EditorHost, GO_TO_IMPLEMENTATION, HostStateError, LineColumnSpan, NavigationEngine,
    QueryHandle, SemanticModel,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

const IFACE_TEXT: &str = "interface IGreeter {\n    fn greet(name) -> Text;\n}\n";
const IMPL_TEXT: &str =
    "class Bar : IGreeter {\n    fn greet(name) -> Text {\n        name\n    }\n}\n";
const IMPL2_TEXT: &str =
    "class Baz : IGreeter {\n    fn greet(name) -> Text {\n        name\n    }\n}\n";

fn token_span(text: &str, token: &str) -> SymbolRange {
    let start = text.find(token).unwrap();
    SymbolRange::new(start, start + token.len())
}

struct FakeSemanticModel {
    texts: RefCell<HashMap<DocumentId, String>>,
    buffer_docs: HashMap<BufferId, DocumentId>,
    tree_docs: HashMap<SourceTreeId, DocumentId>,
    symbols_at: Vec<(DocumentId, SymbolRange, Symbol)>,
    implementations: HashMap<String, Vec<Symbol>>,
    overrides: HashMap<String, Vec<Symbol>>,
    implementation_queries: Cell<usize>,
    override_queries: Cell<usize>,
    synced: RefCell<Vec<DocumentId>>,
    slow_symbol_query: bool,
}

impl FakeSemanticModel {
    fn new() -> Self {
        Self {
            texts: RefCell::new(HashMap::new()),
            buffer_docs: HashMap::new(),
            tree_docs: HashMap::new(),
            symbols_at: Vec::new(),
            implementations: HashMap::new(),
            overrides: HashMap::new(),
            implementation_queries: Cell::new(0),
            override_queries: Cell::new(0),
            synced: RefCell::new(Vec::new()),
            slow_symbol_query: false,
        }
    }

    fn add_document(&mut self, id: DocumentId, tree: SourceTreeId, text: &str) {
        self.texts.borrow_mut().insert(id, text.to_string());
        self.tree_docs.insert(tree, id);
    }

    fn track_buffer(&mut self, buffer: BufferId, document: DocumentId) {
        self.buffer_docs.insert(buffer, document);
    }

    fn add_symbol_at(&mut self, document: DocumentId, span: SymbolRange, symbol: Symbol) {
        self.symbols_at.push((document, span, symbol));
    }

    fn symbol_at(&self, document: DocumentId, offset: usize) -> Option<Symbol> {
        self.symbols_at
            .iter()
            .find(|(doc, span, _)| *doc == document && span.start <= offset && offset < span.end)
            .map(|(_, _, symbol)| symbol.clone())
    }
}

impl SemanticModel for FakeSemanticModel {
    fn find_symbol_at_position(
        &self,
        document: &Document,
        offset: usize,
        _cancel: &CancelToken,
    ) -> QueryHandle<Option<Symbol>> {
        let result = self.symbol_at(document.id(), offset);
        if self.slow_symbol_query {
            QueryHandle::spawn(move || {
                thread::sleep(Duration::from_millis(100));
                result
            })
        } else {
            QueryHandle::ready(result)
        }
    }

    fn find_implementations(
        &self,
        symbol: &Symbol,
        _cancel: &CancelToken,
    ) -> QueryHandle<Vec<Symbol>> {
        self.implementation_queries
            .set(self.implementation_queries.get() + 1);
        QueryHandle::ready(
            self.implementations
                .get(&symbol.name)
                .cloned()
                .unwrap_or_default(),
        )
    }

    fn find_overrides(&self, symbol: &Symbol, _cancel: &CancelToken) -> QueryHandle<Vec<Symbol>> {
        self.override_queries.set(self.override_queries.get() + 1);
        QueryHandle::ready(self.overrides.get(&symbol.name).cloned().unwrap_or_default())
    }

    fn document(&self, id: DocumentId) -> Option<Document> {
        self.texts
            .borrow()
            .get(&id)
            .map(|text| Document::new(id, text))
    }

    fn document_for_source_tree(&self, tree: SourceTreeId) -> Option<Document> {
        self.document(*self.tree_docs.get(&tree)?)
    }

    fn document_id_for_buffer(&self, buffer: BufferId) -> Option<DocumentId> {
        self.buffer_docs.get(&buffer).copied()
    }

    fn sync_document_text(&self, id: DocumentId, snapshot: &codenav_core::BufferSnapshot) {
        self.texts.borrow_mut().insert(id, snapshot.text());
        self.synced.borrow_mut().push(id);
    }
}

struct FakeEditorHost {
    graph: BufferGraph,
    active: Option<ActiveView>,
    doc_buffers: HashMap<DocumentId, BufferId>,
    opened: RefCell<Vec<DocumentId>>,
    navigations: RefCell<Vec<(BufferId, LineColumnSpan)>>,
    fail_active_view: bool,
}

impl FakeEditorHost {
    fn new(graph: BufferGraph) -> Self {
        Self {
            graph,
            active: None,
            doc_buffers: HashMap::new(),
            opened: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
            fail_active_view: false,
        }
    }
}

impl EditorHost for FakeEditorHost {
    fn active_view(&self) -> Result<Option<ActiveView>, HostStateError> {
        if self.fail_active_view {
            return Err(HostStateError);
        }
        Ok(self.active.clone())
    }

    fn buffer_graph(&self) -> &BufferGraph {
        &self.graph
    }

    fn open_document(&self, id: DocumentId) -> Result<(), HostStateError> {
        self.opened.borrow_mut().push(id);
        Ok(())
    }

    fn buffer_for_document(&self, id: DocumentId) -> Option<BufferId> {
        self.doc_buffers.get(&id).copied()
    }

    fn navigate_to(
        &self,
        buffer: BufferId,
        span: LineColumnSpan,
    ) -> Result<bool, HostStateError> {
        self.navigations.borrow_mut().push((buffer, span));
        Ok(true)
    }
}

struct Fixture {
    model: FakeSemanticModel,
    host: FakeEditorHost,
}

const DOC_IFACE: DocumentId = DocumentId::new(1);
const DOC_IMPL: DocumentId = DocumentId::new(2);
const TREE_IFACE: SourceTreeId = SourceTreeId::new(1);
const TREE_IMPL: SourceTreeId = SourceTreeId::new(2);

fn greet_interface_symbol() -> Symbol {
    Symbol {
        name: "IGreeter.greet".to_string(),
        member_kind: MemberKind::Method,
        is_abstract: true,
        containing_type: ContainingType::new("IGreeter", TypeKind::Interface),
        locations: vec![SymbolLocation::in_source(
            TREE_IFACE,
            token_span(IFACE_TEXT, "greet"),
        )],
        original_definition: None,
    }
}

fn greet_implementation_symbol(text: &'static str, tree: SourceTreeId, class: &str) -> Symbol {
    Symbol {
        name: format!("{class}.greet"),
        member_kind: MemberKind::Method,
        is_abstract: false,
        containing_type: ContainingType::new(class, TypeKind::Class),
        locations: vec![SymbolLocation::in_source(tree, token_span(text, "greet"))],
        original_definition: None,
    }
}

/// Interface document open in a plain (unprojected) view, caret on the `greet` token
/// inside the interface declaration. Exactly one implementing class, `Bar`.
fn unique_implementation_fixture() -> Fixture {
    let mut model = FakeSemanticModel::new();
    model.add_document(DOC_IFACE, TREE_IFACE, IFACE_TEXT);
    model.add_document(DOC_IMPL, TREE_IMPL, IMPL_TEXT);

    let mut graph = BufferGraph::new();
    let iface_buffer = graph.add_buffer(IFACE_TEXT);
    let impl_buffer = graph.add_buffer(IMPL_TEXT);
    model.track_buffer(iface_buffer, DOC_IFACE);
    model.track_buffer(impl_buffer, DOC_IMPL);

    let iface_symbol = greet_interface_symbol();
    model.add_symbol_at(DOC_IFACE, token_span(IFACE_TEXT, "greet"), iface_symbol.clone());
    model.implementations.insert(
        iface_symbol.name.clone(),
        vec![greet_implementation_symbol(IMPL_TEXT, TREE_IMPL, "Bar")],
    );

    let caret_offset = token_span(IFACE_TEXT, "greet").start + 2;
    let caret = SnapshotPoint::new(graph.current_snapshot(iface_buffer).unwrap(), caret_offset);

    let mut host = FakeEditorHost::new(graph);
    host.doc_buffers.insert(DOC_IFACE, iface_buffer);
    host.doc_buffers.insert(DOC_IMPL, impl_buffer);
    host.active = Some(ActiveView {
        view_buffer: iface_buffer,
        subject_buffer: iface_buffer,
        caret,
    });

    Fixture { model, host }
}

fn execute(fixture: &Fixture) -> CommandDisposition {
    let engine = NavigationEngine::new(&fixture.model, &fixture.host);
    engine.execute(&CancelToken::new())
}

#[test]
fn test_unique_interface_implementation_navigates_to_it() {
    let fixture = unique_implementation_fixture();

    assert_eq!(execute(&fixture), CommandDisposition::Handled);

    // The implementing document was opened and the jump targeted Bar's `greet` token.
    assert_eq!(fixture.host.opened.borrow().as_slice(), &[DOC_IMPL]);
    let navigations = fixture.host.navigations.borrow();
    let (buffer, span) = navigations[0];
    assert_eq!(buffer, fixture.host.doc_buffers[&DOC_IMPL]);
    assert_eq!(span.start_line, 1);
    assert_eq!(span.start_column, 7);
    assert_eq!(span.end_line, 1);
    assert_eq!(span.end_column, 12);
}

#[test]
fn test_zero_implementations_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();
    fixture.model.implementations.clear();

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
}

#[test]
fn test_two_implementations_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();
    fixture.model.implementations.insert(
        "IGreeter.greet".to_string(),
        vec![
            greet_implementation_symbol(IMPL_TEXT, TREE_IMPL, "Bar"),
            greet_implementation_symbol(IMPL2_TEXT, TREE_IMPL, "Baz"),
        ],
    );

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
    assert_eq!(fixture.model.implementation_queries.get(), 1);
}

#[test]
fn test_unique_override_navigates_to_it() {
    let mut fixture = unique_implementation_fixture();

    // Rewire the caret symbol to an abstract class member with one override.
    let abstract_symbol = Symbol {
        containing_type: ContainingType::new("GreeterBase", TypeKind::Class),
        ..greet_interface_symbol()
    };
    fixture.model.symbols_at.clear();
    fixture.model.add_symbol_at(
        DOC_IFACE,
        token_span(IFACE_TEXT, "greet"),
        abstract_symbol.clone(),
    );
    fixture.model.overrides.insert(
        abstract_symbol.name.clone(),
        vec![greet_implementation_symbol(IMPL_TEXT, TREE_IMPL, "Bar")],
    );

    assert_eq!(execute(&fixture), CommandDisposition::Handled);
    assert_eq!(fixture.model.override_queries.get(), 1);
    assert_eq!(fixture.model.implementation_queries.get(), 0);
}

#[test]
fn test_multiple_overrides_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();

    let abstract_symbol = Symbol {
        containing_type: ContainingType::new("GreeterBase", TypeKind::Class),
        ..greet_interface_symbol()
    };
    fixture.model.symbols_at.clear();
    fixture.model.add_symbol_at(
        DOC_IFACE,
        token_span(IFACE_TEXT, "greet"),
        abstract_symbol.clone(),
    );
    fixture.model.overrides.insert(
        abstract_symbol.name,
        vec![
            greet_implementation_symbol(IMPL_TEXT, TREE_IMPL, "Bar"),
            greet_implementation_symbol(IMPL2_TEXT, TREE_IMPL, "Baz"),
        ],
    );

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
}

#[test]
fn test_non_abstract_symbol_navigates_to_its_declaration() {
    let mut fixture = unique_implementation_fixture();

    let concrete = Symbol {
        is_abstract: false,
        ..greet_interface_symbol()
    };
    fixture.model.symbols_at.clear();
    fixture
        .model
        .add_symbol_at(DOC_IFACE, token_span(IFACE_TEXT, "greet"), concrete);

    assert_eq!(execute(&fixture), CommandDisposition::Handled);

    // Straight to the declaration, without ever querying implementations/overrides.
    assert_eq!(fixture.model.implementation_queries.get(), 0);
    assert_eq!(fixture.model.override_queries.get(), 0);
    assert_eq!(fixture.host.opened.borrow().as_slice(), &[DOC_IFACE]);
}

#[test]
fn test_abstract_member_of_other_container_falls_back_to_declaration() {
    let mut fixture = unique_implementation_fixture();

    let in_struct = Symbol {
        containing_type: ContainingType::new("Pair", TypeKind::Struct),
        ..greet_interface_symbol()
    };
    fixture.model.symbols_at.clear();
    fixture
        .model
        .add_symbol_at(DOC_IFACE, token_span(IFACE_TEXT, "greet"), in_struct);

    assert_eq!(execute(&fixture), CommandDisposition::Handled);
    assert_eq!(fixture.model.implementation_queries.get(), 0);
    assert_eq!(fixture.model.override_queries.get(), 0);
    assert_eq!(fixture.host.opened.borrow().as_slice(), &[DOC_IFACE]);
}

#[test]
fn test_metadata_only_symbol_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();

    let metadata_only = Symbol {
        is_abstract: false,
        locations: vec![SymbolLocation::in_metadata()],
        ..greet_interface_symbol()
    };
    fixture.model.symbols_at.clear();
    fixture
        .model
        .add_symbol_at(DOC_IFACE, token_span(IFACE_TEXT, "greet"), metadata_only);

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
}

#[test]
fn test_constructed_symbol_navigates_to_original_definition() {
    let mut fixture = unique_implementation_fixture();

    let original = Symbol {
        is_abstract: false,
        ..greet_interface_symbol()
    };
    let constructed = Symbol {
        name: "IGreeter<Text>.greet".to_string(),
        is_abstract: false,
        locations: vec![SymbolLocation::in_metadata()],
        original_definition: Some(Box::new(original)),
        ..greet_interface_symbol()
    };
    fixture.model.symbols_at.clear();
    fixture
        .model
        .add_symbol_at(DOC_IFACE, token_span(IFACE_TEXT, "greet"), constructed);

    assert_eq!(execute(&fixture), CommandDisposition::Handled);
    assert_eq!(fixture.host.opened.borrow().as_slice(), &[DOC_IFACE]);
}

#[test]
fn test_caret_off_any_symbol_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();
    let view = fixture.host.active.as_mut().unwrap();
    let snapshot = view.caret.snapshot().clone();
    view.caret = SnapshotPoint::new(snapshot, 0);

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
}

#[test]
fn test_untracked_buffer_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();
    fixture.model.buffer_docs.clear();

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.model.synced.borrow().is_empty());
}

#[test]
fn test_no_active_view_is_a_no_op() {
    let mut fixture = unique_implementation_fixture();
    fixture.host.active = None;

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
}

#[test]
fn test_host_state_race_is_absorbed() {
    let mut fixture = unique_implementation_fixture();
    fixture.host.fail_active_view = true;

    assert_eq!(execute(&fixture), CommandDisposition::Pass);
}

#[test]
fn test_cancellation_aborts_without_navigation() {
    let mut fixture = unique_implementation_fixture();
    fixture.model.slow_symbol_query = true;

    let engine = NavigationEngine::new(&fixture.model, &fixture.host);
    let cancel = CancelToken::new();
    cancel.cancel();

    assert_eq!(engine.execute(&cancel), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
}

#[test]
fn test_caret_in_projected_view_maps_onto_subject_buffer() {
    let mut model = FakeSemanticModel::new();
    model.add_document(DOC_IFACE, TREE_IFACE, IFACE_TEXT);
    model.add_document(DOC_IMPL, TREE_IMPL, IMPL_TEXT);

    let mut graph = BufferGraph::new();
    let iface_buffer = graph.add_buffer(IFACE_TEXT);
    let impl_buffer = graph.add_buffer(IMPL_TEXT);
    model.track_buffer(iface_buffer, DOC_IFACE);
    model.track_buffer(impl_buffer, DOC_IMPL);

    // The view buffer projects only the member line of the interface document.
    let member_line = token_span(IFACE_TEXT, "    fn greet(name) -> Text;");
    let view_buffer = graph
        .add_projection(&[(iface_buffer, member_line.start..member_line.end)])
        .unwrap();

    let iface_symbol = greet_interface_symbol();
    model.add_symbol_at(DOC_IFACE, token_span(IFACE_TEXT, "greet"), iface_symbol.clone());
    model.implementations.insert(
        iface_symbol.name,
        vec![greet_implementation_symbol(IMPL_TEXT, TREE_IMPL, "Bar")],
    );

    // Caret inside the projected `greet` token, expressed in view-buffer offsets.
    let view_text = graph.current_snapshot(view_buffer).unwrap();
    let caret_offset = view_text.text().find("greet").unwrap() + 1;
    let caret = SnapshotPoint::new(view_text, caret_offset);

    let mut host = FakeEditorHost::new(graph);
    host.doc_buffers.insert(DOC_IFACE, iface_buffer);
    host.doc_buffers.insert(DOC_IMPL, impl_buffer);
    host.active = Some(ActiveView {
        view_buffer,
        subject_buffer: iface_buffer,
        caret,
    });

    let fixture = Fixture { model, host };
    assert_eq!(execute(&fixture), CommandDisposition::Handled);
    assert_eq!(fixture.host.opened.borrow().as_slice(), &[DOC_IMPL]);
}

#[test]
fn test_stale_projection_after_edit_is_a_no_op() {
    let mut model = FakeSemanticModel::new();
    model.add_document(DOC_IFACE, TREE_IFACE, IFACE_TEXT);

    let mut graph = BufferGraph::new();
    let iface_buffer = graph.add_buffer(IFACE_TEXT);
    model.track_buffer(iface_buffer, DOC_IFACE);

    let member_line = token_span(IFACE_TEXT, "    fn greet(name) -> Text;");
    let view_buffer = graph
        .add_projection(&[(iface_buffer, member_line.start..member_line.end)])
        .unwrap();

    let view_text = graph.current_snapshot(view_buffer).unwrap();
    let caret_offset = view_text.text().find("greet").unwrap() + 1;
    let caret = SnapshotPoint::new(view_text, caret_offset);

    // The subject buffer changes after the caret was captured; the projection span is
    // now stale and the caret no longer maps.
    graph.edit_buffer(iface_buffer, 0..0, "// banner\n").unwrap();

    let mut host = FakeEditorHost::new(graph);
    host.doc_buffers.insert(DOC_IFACE, iface_buffer);
    host.active = Some(ActiveView {
        view_buffer,
        subject_buffer: iface_buffer,
        caret,
    });

    let fixture = Fixture {
        model,
        host,
    };
    assert_eq!(execute(&fixture), CommandDisposition::Pass);
    assert!(fixture.host.navigations.borrow().is_empty());
}

#[test]
fn test_command_set_dispatches_by_id() {
    let fixture = unique_implementation_fixture();
    let commands = CommandSet::initialize(&fixture.model, &fixture.host);
    let cancel = CancelToken::new();

    assert_eq!(commands.len(), 1);
    assert!(commands.contains(GO_TO_IMPLEMENTATION));

    assert_eq!(
        commands.invoke(GO_TO_IMPLEMENTATION, &cancel),
        CommandDisposition::Handled
    );
    assert_eq!(
        commands.invoke(CommandId(0xBEEF), &cancel),
        CommandDisposition::Pass
    );
}
