//! Command registration and dispatch.
//!
//! The host exposes one registration point invoked at extension load. Commands are a
//! fixed, explicitly enumerated list of descriptors assembled at startup; there is no
//! open-ended plugin discovery.

use crate::cancel::CancelToken;
use crate::engine::{CommandDisposition, NavigationEngine};
use crate::host::EditorHost;
use crate::model::SemanticModel;

/// Identifier of a host-bound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub u32);

/// The "go to unique implementation" command.
pub const GO_TO_IMPLEMENTATION: CommandId = CommandId(0x0100);

/// A registered command: stable id, display name, and the invocation handler.
pub struct CommandDescriptor<'a> {
    /// Command id the host dispatches on.
    pub id: CommandId,
    /// Stable command name (for host menus/keybinding config).
    pub name: &'static str,
    handler: Box<dyn Fn(&CancelToken) -> CommandDisposition + 'a>,
}

/// The fixed command set exposed to the host.
pub struct CommandSet<'a> {
    commands: Vec<CommandDescriptor<'a>>,
}

impl<'a> CommandSet<'a> {
    /// Assemble the command set over the given collaborators. Called once at load.
    pub fn initialize(model: &'a dyn SemanticModel, host: &'a dyn EditorHost) -> Self {
        let engine = NavigationEngine::new(model, host);
        Self {
            commands: vec![CommandDescriptor {
                id: GO_TO_IMPLEMENTATION,
                name: "navigation.goToImplementation",
                handler: Box::new(move |cancel| engine.execute(cancel)),
            }],
        }
    }

    /// Dispatch a command by id. Unknown ids pass through unhandled.
    pub fn invoke(&self, id: CommandId, cancel: &CancelToken) -> CommandDisposition {
        match self.commands.iter().find(|command| command.id == id) {
            Some(command) => (command.handler)(cancel),
            None => CommandDisposition::Pass,
        }
    }

    /// Returns true if `id` names a registered command.
    pub fn contains(&self, id: CommandId) -> bool {
        self.commands.iter().any(|command| command.id == id)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
