//! The editor: document, selection, schema, history and the hooks around
//! every change
//!
//! All edits go through [`Editor::change`]. A change block receives the
//! [`Writer`]; when the block returns, registered post-fixers run once, the
//! selection is repaired, the batch is recorded for undo and change
//! listeners are notified.

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::EngineConfig;
use crate::editing::{Batch, BatchKind, EditHistory, PostFixer, Writer};
use crate::input::KeyEventData;
use crate::markup::MarkupError;
use crate::model::{markup, Document, Fragment, Position, Schema, Selection};
use crate::tracing::BatchSnapshot;

/// An executable editor command
pub trait Command {
    /// Whether executing would do anything
    fn is_enabled(&self, editor: &Editor) -> bool;

    /// Execute the command; returns false if it was not enabled
    fn execute(&self, editor: &mut Editor) -> bool;

    /// Boolean state exposed by toggle-like commands
    fn value(&self, _editor: &Editor) -> Option<bool> {
        None
    }
}

/// A keydown handler run before listeners, in registration order
pub type KeyHandler = fn(&mut Editor, &mut KeyEventData);

type KeyListener = Box<dyn FnMut(&mut KeyEventData)>;
type ChangeListener = Box<dyn FnMut(&Document, &Batch)>;

pub struct Editor {
    document: Document,
    selection: Selection,
    schema: Schema,
    config: EngineConfig,
    history: EditHistory,
    post_fixers: Vec<PostFixer>,
    commands: HashMap<&'static str, Rc<dyn Command>>,
    key_handlers: Vec<KeyHandler>,
    key_listeners: Vec<KeyListener>,
    change_listeners: Vec<ChangeListener>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Editor {
    /// An editor over an empty document
    pub fn new(config: EngineConfig) -> Self {
        let document = Document::new();
        let selection = Selection::at_start(document.root());
        Self {
            document,
            selection,
            schema: Schema::new(),
            history: EditHistory::with_max_size(config.history_max_size),
            config,
            post_fixers: Vec::new(),
            commands: HashMap::new(),
            key_handlers: Vec::new(),
            key_listeners: Vec::new(),
            change_listeners: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Move the selection without editing (ignored when invalid)
    pub fn set_selection(&mut self, selection: Selection) {
        if selection.is_valid(&self.document) {
            self.selection = selection;
        } else {
            tracing::debug!("editor: ignoring invalid selection {:?}", selection);
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    // === Changes ===

    /// Run an edit block as one undoable batch
    pub fn change<R>(&mut self, f: impl FnOnce(&mut Writer<'_>) -> R) -> R {
        self.commit(BatchKind::Default, f).0
    }

    /// Run an edit block that is not recorded in history
    pub fn change_transparent<R>(&mut self, f: impl FnOnce(&mut Writer<'_>) -> R) -> R {
        self.commit(BatchKind::Transparent, f).0
    }

    fn commit<R>(
        &mut self,
        kind: BatchKind,
        f: impl FnOnce(&mut Writer<'_>) -> R,
    ) -> (R, Option<Batch>) {
        let selection_before = self.selection;
        let mut writer = Writer::new(&mut self.document, selection_before);
        let result = f(&mut writer);

        if !writer.operations().is_empty() {
            for fixer in &self.post_fixers {
                fixer(&mut writer);
            }
        }

        let (operations, mut selection_after) = writer.finish();
        if !selection_after.is_valid(&self.document) {
            tracing::debug!("editor: selection invalid after batch, resetting");
            selection_after = Selection::at_start(self.document.root());
        }
        self.selection = selection_after;

        if operations.is_empty() {
            return (result, None);
        }

        let batch = Batch {
            operations,
            selection_before,
            selection_after,
            kind,
        };
        tracing::debug!(
            "editor: committed {:?} batch with {} operations",
            kind,
            batch.operations.len()
        );

        if kind == BatchKind::Default {
            self.history.push(batch.clone());
        }
        for listener in &mut self.change_listeners {
            listener(&self.document, &batch);
        }

        (result, Some(batch))
    }

    /// Register a batch-completion hook
    pub fn add_post_fixer(&mut self, fixer: PostFixer) {
        self.post_fixers.push(fixer);
    }

    /// Register a listener called with every committed batch
    pub fn on_change(&mut self, listener: impl FnMut(&Document, &Batch) + 'static) {
        self.change_listeners.push(Box::new(listener));
    }

    // === History ===

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Revert the last batch; post-fixers run on the result as usual
    pub fn undo(&mut self) -> bool {
        let Some(batch) = self.history.pop_undo() else {
            return false;
        };
        if let Some(applied) = self.replay(&batch.inverse(BatchKind::Undo)) {
            self.history.push_undone(applied);
        }
        true
    }

    /// Re-apply the last undone batch
    pub fn redo(&mut self) -> bool {
        let Some(batch) = self.history.pop_redo() else {
            return false;
        };
        if let Some(applied) = self.replay(&batch.inverse(BatchKind::Redo)) {
            self.history.push_redone(applied);
        }
        true
    }

    fn replay(&mut self, batch: &Batch) -> Option<Batch> {
        self.commit(batch.kind, |writer| {
            for operation in &batch.operations {
                writer.apply_operation(operation);
            }
            writer.set_selection(batch.selection_after);
        })
        .1
    }

    // === Commands ===

    pub fn register_command(&mut self, name: &'static str, command: Rc<dyn Command>) {
        tracing::trace!("editor: registering command {}", name);
        self.commands.insert(name, command);
    }

    pub fn command(&self, name: &str) -> Option<Rc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Registered command names, sorted
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn is_command_enabled(&self, name: &str) -> bool {
        self.command(name).is_some_and(|c| c.is_enabled(self))
    }

    pub fn command_value(&self, name: &str) -> Option<bool> {
        self.command(name).and_then(|c| c.value(self))
    }

    /// Execute a command by name. Unknown or disabled commands are no-ops
    /// returning false.
    pub fn execute(&mut self, name: &str) -> bool {
        let Some(command) = self.command(name) else {
            tracing::debug!("editor: unknown command {}", name);
            return false;
        };
        if !command.is_enabled(self) {
            tracing::debug!("editor: command {} is disabled", name);
            return false;
        }

        let before = tracing::enabled!(tracing::Level::DEBUG)
            .then(|| BatchSnapshot::from_document(&self.document));
        let executed = command.execute(self);
        if let Some(before) = before {
            let after = BatchSnapshot::from_document(&self.document);
            if let Some(diff) = before.diff(&after) {
                tracing::debug!(target: "table", command = name, %diff, "tables changed");
            }
        }
        executed
    }

    // === Keyboard ===

    /// Register a keydown handler (runs before listeners)
    pub fn add_key_handler(&mut self, handler: KeyHandler) {
        self.key_handlers.push(handler);
    }

    /// Register a keydown listener (runs after handlers)
    pub fn on_keydown(&mut self, listener: impl FnMut(&mut KeyEventData) + 'static) {
        self.key_listeners.push(Box::new(listener));
    }

    /// Dispatch a keydown event. Returns whether the default action was
    /// prevented.
    pub fn handle_keydown(&mut self, event: &mut KeyEventData) -> bool {
        tracing::trace!("editor: keydown {}", event);
        let handlers = self.key_handlers.clone();
        for handler in handlers {
            if event.is_propagation_stopped() {
                break;
            }
            handler(self, event);
        }

        let mut listeners = std::mem::take(&mut self.key_listeners);
        for listener in listeners.iter_mut() {
            if event.is_propagation_stopped() {
                break;
            }
            listener(event);
        }
        listeners.append(&mut self.key_listeners);
        self.key_listeners = listeners;

        event.is_default_prevented()
    }

    // === Data ===

    /// Replace the document content with a fragment (not undoable)
    pub fn set_content(&mut self, fragment: &Fragment) {
        self.change_transparent(|writer| {
            let root = writer.doc().root();
            writer.clear(root);
            writer.insert_fragment(fragment, root, 0);
            writer.set_selection(Selection::at_start(root));
        });
        self.history.clear();
    }

    /// Replace the document content with model markup.
    ///
    /// Selection markers in the markup become the editor selection.
    pub fn set_data(&mut self, source: &str) -> Result<(), MarkupError> {
        let parsed = markup::parse(source)?;
        self.change_transparent(|writer| {
            let root = writer.doc().root();
            writer.clear(root);
            let inserted = writer.insert_fragment(&parsed.fragment, root, 0);
            let selection = parsed
                .resolve_selection(writer.doc(), &inserted, root, 0)
                .unwrap_or_else(|| Selection::at_start(root));
            writer.set_selection(selection);
        });
        self.history.clear();
        Ok(())
    }

    /// Model markup of the whole document
    pub fn get_data(&self) -> String {
        markup::stringify(&self.document, None)
    }

    /// Model markup with `[`/`]` selection markers
    pub fn get_data_with_selection(&self) -> String {
        markup::stringify(&self.document, Some(&self.selection))
    }

    /// Caret at the very start of the document
    pub fn document_start(&self) -> Position {
        Position::new(self.document.root(), 0)
    }
}
