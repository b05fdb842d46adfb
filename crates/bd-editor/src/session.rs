//! Editing session: the authoritative scene plus interaction state.
//!
//! Every change to the scene goes through [`Session::apply_mutation`]. Tools
//! produce mutations from pointer input; toolbar actions build objects with
//! the factories and feed them in the same way. After a mutation lands the
//! session fires the per-object events the change implies and runs the
//! handlers subscribed to them.

use crate::error::EditError;
use crate::events::{Handler, ObjectEvent, Subscriptions};
use crate::factory::{build_block, build_port};
use crate::highlight::ContainmentHighlighter;
use crate::input::{Cursor, InputEvent};
use crate::props::{BlockProps, PortProps};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{LineTool, SelectTool, Selection, Tool, ToolKind};
use bd_core::id::ObjectId;
use bd_core::model::{PortDirection, SceneObject, Stroke};
use bd_core::{EditorConfig, Scene};
use bd_render::hit_test;

/// A change to the scene, produced by tools and toolbar actions.
#[derive(Debug, Clone)]
pub enum SceneMutation {
    AddObject {
        object: Box<SceneObject>,
    },
    /// Make `port` a member of `block`.
    AttachPort {
        block: ObjectId,
        port: ObjectId,
    },
    MoveObject {
        id: ObjectId,
        dx: f32,
        dy: f32,
    },
    ScaleObject {
        id: ObjectId,
        scale_x: f32,
        scale_y: f32,
    },
    /// Move the free end of a line being drawn.
    SetLineEnd {
        id: ObjectId,
        x: f32,
        y: f32,
    },
    /// Make a drawn line selectable and evented.
    FinalizeLine {
        id: ObjectId,
    },
    RemoveObject {
        id: ObjectId,
    },
    SetText {
        id: ObjectId,
        text: String,
    },
    SetEditing {
        id: ObjectId,
        editing: bool,
    },
    SetOutline {
        id: ObjectId,
        outline: Option<Stroke>,
    },
    SetMovementLock {
        id: ObjectId,
        locked: bool,
    },
    SetDashed {
        id: ObjectId,
        dashed: bool,
    },
}

pub struct Session {
    scene: Scene,
    config: EditorConfig,
    select_tool: SelectTool,
    line_tool: LineTool,
    subscriptions: Subscriptions,
    highlighter: ContainmentHighlighter,
    cursor: Cursor,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            scene: Scene::new(),
            select_tool: SelectTool::new(),
            line_tool: LineTool::new(config.line_stroke),
            subscriptions: Subscriptions::new(),
            highlighter: ContainmentHighlighter::new(config.highlight),
            cursor: Cursor::Default,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.select_tool.selection
    }

    pub fn selected_ids(&self) -> &[ObjectId] {
        &self.select_tool.selection.active
    }

    /// The block new ports attach to.
    pub fn target_block(&self) -> Option<ObjectId> {
        self.select_tool.selection.target_block
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn is_drawing_line(&self) -> bool {
        self.line_tool.is_drawing()
    }

    pub fn active_tool(&self) -> ToolKind {
        if self.line_tool.is_drawing() {
            self.line_tool.kind()
        } else {
            self.select_tool.kind()
        }
    }

    // ─── Toolbar actions ─────────────────────────────────────────────────

    /// Create a block at the configured origin and select it.
    pub fn add_block(&mut self, props: &BlockProps) -> ObjectId {
        let block = build_block(props, &self.config);
        let id = block.id;
        self.apply_mutation(SceneMutation::AddObject {
            object: Box::new(block),
        });
        self.subscriptions
            .subscribe(id, Handler::ContainmentHighlight);
        self.subscriptions.subscribe(id, Handler::EditLock);
        self.select_tool.selection.target_block = Some(id);
        self.set_active(Some(id));
        log::debug!("added block {id} ({}x{})", props.width, props.height);
        id
    }

    /// Create a port next to the target block and attach it.
    pub fn add_port(&mut self, props: &PortProps) -> Result<ObjectId, EditError> {
        let Some(target) = self.select_tool.selection.target_block else {
            log::warn!("add_port without a selected block");
            return Err(EditError::MissingSelection);
        };
        let owner = self
            .scene
            .get(target)
            .ok_or(EditError::UnknownObject(target))?;
        if !owner.is_block() {
            return Err(EditError::NotABlock(target));
        }

        let port = build_port(owner, props, &self.config);
        let id = port.id;
        self.apply_mutations(vec![
            SceneMutation::AddObject {
                object: Box::new(port),
            },
            SceneMutation::AttachPort {
                block: target,
                port: id,
            },
        ]);
        self.subscriptions.subscribe(id, Handler::EditLock);
        log::debug!("added {} port {id} to {target}", props.direction.as_str());
        Ok(id)
    }

    /// Enter line drawing mode: drop the selection and show a crosshair.
    pub fn begin_line(&mut self) {
        self.set_active(None);
        self.line_tool.arm();
        self.cursor = Cursor::Crosshair;
    }

    /// Abort line drawing, removing a partially drawn line.
    /// Returns false when not drawing.
    pub fn cancel_line(&mut self) -> bool {
        if !self.line_tool.is_drawing() {
            return false;
        }
        if let Some(id) = self.line_tool.cancel() {
            self.apply_mutation(SceneMutation::RemoveObject { id });
            log::debug!("discarded partial line {id}");
        }
        self.cursor = Cursor::Default;
        true
    }

    /// Remove the active selection. Returns the removed ids.
    pub fn delete_selected(&mut self) -> Vec<ObjectId> {
        let ids = std::mem::take(&mut self.select_tool.selection.active);
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if self.apply_mutation(SceneMutation::RemoveObject { id }) {
                removed.push(id);
            }
        }
        removed
    }

    /// Select `id` as if it were clicked, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<ObjectId>) -> Result<bool, EditError> {
        if let Some(id) = id {
            let obj = self.scene.get(id).ok_or(EditError::UnknownObject(id))?;
            if !obj.selectable {
                return Ok(false);
            }
            if obj.is_block() {
                self.select_tool.selection.target_block = Some(id);
            }
        }
        Ok(self.set_active(id))
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Returns true when anything visible changed.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        let event = InputEvent::from_pointer_down(x, y);
        if self.line_tool.is_drawing() {
            let muts = self.line_tool.handle(&event, None);
            return self.apply_mutations(muts);
        }

        let before = self.select_tool.selection.clone();
        // A member port is picked through its block's group.
        let hit = hit_test(&self.scene, x, y, self.config.hit_tolerance)
            .map(|id| self.scene.owner_of(id).unwrap_or(id));
        let hit_obj = hit.and_then(|id| self.scene.get(id));
        let muts = self.select_tool.handle(&event, hit_obj);

        let mut changed = self.apply_mutations(muts);
        changed |= self.notify_selection(&before.active);
        changed || before.target_block != self.select_tool.selection.target_block
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let event = InputEvent::from_pointer_move(x, y);
        if self.line_tool.is_drawing() {
            let muts = self.line_tool.handle(&event, None);
            return self.apply_mutations(muts);
        }

        let mut changed = false;
        for mutation in self.select_tool.handle(&event, None) {
            let moved = match &mutation {
                SceneMutation::MoveObject { id, .. } => Some(*id),
                _ => None,
            };
            if self.apply_mutation(mutation) {
                changed = true;
                if let Some(id) = moved {
                    changed |= self.dispatch(id, ObjectEvent::Moving);
                }
            }
        }
        changed
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        let event = InputEvent::from_pointer_up(x, y);
        let was_drawing = self.line_tool.is_drawing();
        let muts = if was_drawing {
            self.line_tool.handle(&event, None)
        } else {
            self.select_tool.handle(&event, None)
        };

        let mut changed = self.apply_mutations(muts);
        if was_drawing {
            self.cursor = Cursor::Default;
            changed = true;
        }

        // Any release ends a drag: drop every containment outline.
        let clears = self.highlighter.clear(&self.scene);
        changed |= self.apply_mutations(clears);
        changed
    }

    // ─── Object interaction ──────────────────────────────────────────────

    /// Start in-place editing of an object's label. Movement is locked
    /// until editing ends.
    pub fn begin_text_edit(&mut self, id: ObjectId) -> Result<(), EditError> {
        let obj = self.scene.get(id).ok_or(EditError::UnknownObject(id))?;
        if obj.label.is_none() {
            return Err(EditError::NoLabel(id));
        }
        self.apply_mutation(SceneMutation::SetEditing { id, editing: true });
        self.dispatch(id, ObjectEvent::EditingEntered);
        Ok(())
    }

    /// Commit `text` as the new label and unlock movement.
    pub fn end_text_edit(&mut self, id: ObjectId, text: &str) -> Result<(), EditError> {
        let obj = self.scene.get(id).ok_or(EditError::UnknownObject(id))?;
        if obj.label.is_none() {
            return Err(EditError::NoLabel(id));
        }
        self.apply_mutations(vec![
            SceneMutation::SetText {
                id,
                text: text.to_string(),
            },
            SceneMutation::SetEditing { id, editing: false },
        ]);
        self.dispatch(id, ObjectEvent::EditingExited);
        Ok(())
    }

    /// Set the scale of a block or port. Lines are not scaled.
    pub fn scale_object(
        &mut self,
        id: ObjectId,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<bool, EditError> {
        let obj = self.scene.get(id).ok_or(EditError::UnknownObject(id))?;
        if obj.lock_scaling_flip && (scale_x <= 0.0 || scale_y <= 0.0) {
            log::warn!("rejected scale ({scale_x}, {scale_y}) on {id}");
            return Err(EditError::FlipLocked(id));
        }
        if obj.line().is_some() {
            return Ok(false);
        }
        Ok(self.apply_mutation(SceneMutation::ScaleObject {
            id,
            scale_x,
            scale_y,
        }))
    }

    /// Scale the first selected object. No selection is a no-op.
    pub fn scale_selected(&mut self, scale_x: f32, scale_y: f32) -> Result<bool, EditError> {
        match self.select_tool.selection.active.first().copied() {
            Some(id) => self.scale_object(id, scale_x, scale_y),
            None => Ok(false),
        }
    }

    // ─── Shortcuts ───────────────────────────────────────────────────────

    /// Run a toolbar action with default properties.
    pub fn perform(&mut self, action: ShortcutAction) -> Result<bool, EditError> {
        match action {
            ShortcutAction::AddBlock => {
                let props = BlockProps::defaults(&self.config);
                self.add_block(&props);
                Ok(true)
            }
            ShortcutAction::AddInputPort => {
                let props = PortProps::defaults(PortDirection::Input, &self.config);
                self.add_port(&props).map(|_| true)
            }
            ShortcutAction::AddOutputPort => {
                let props = PortProps::defaults(PortDirection::Output, &self.config);
                self.add_port(&props).map(|_| true)
            }
            ShortcutAction::AddLine => {
                self.begin_line();
                Ok(true)
            }
            ShortcutAction::Delete => Ok(!self.delete_selected().is_empty()),
            ShortcutAction::Cancel => {
                if self.cancel_line() {
                    Ok(true)
                } else {
                    self.select(None)
                }
            }
        }
    }

    /// Resolve a key and perform its action. Unbound keys return `Ok(false)`.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Result<bool, EditError> {
        match ShortcutMap::resolve(key, ctrl, shift, alt, meta) {
            Some(action) => self.perform(action),
            None => Ok(false),
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation. Returns true when the scene changed.
    pub fn apply_mutation(&mut self, mutation: SceneMutation) -> bool {
        log::trace!("apply {mutation:?}");
        match mutation {
            SceneMutation::AddObject { object } => self.scene.add(*object).is_some(),
            SceneMutation::AttachPort { block, port } => self.scene.attach(block, port),
            SceneMutation::MoveObject { id, dx, dy } => match self.scene.get(id) {
                Some(obj) if obj.lock_movement => {
                    log::debug!("{id} is locked, ignoring move");
                    false
                }
                Some(_) => self.scene.translate(id, dx, dy),
                None => false,
            },
            SceneMutation::ScaleObject {
                id,
                scale_x,
                scale_y,
            } => self.scene.set_scale(id, scale_x, scale_y),
            SceneMutation::SetLineEnd { id, x, y } => {
                match self.scene.get_mut(id).and_then(|o| o.line_mut()) {
                    Some(geom) => {
                        geom.x2 = x;
                        geom.y2 = y;
                        true
                    }
                    None => false,
                }
            }
            SceneMutation::FinalizeLine { id } => {
                let Some(line) = self.scene.get_mut(id) else {
                    return false;
                };
                line.selectable = true;
                line.evented = true;
                self.subscriptions.subscribe(id, Handler::DashOnSelect);
                log::debug!("finished line {id}");
                true
            }
            SceneMutation::RemoveObject { id } => {
                let removed = self.scene.remove(id).is_some();
                if removed {
                    self.subscriptions.unsubscribe_all(id);
                    self.select_tool.selection.forget(id);
                    log::debug!("removed {id}");
                }
                removed
            }
            SceneMutation::SetText { id, text } => {
                match self.scene.get_mut(id).and_then(|o| o.label.as_mut()) {
                    Some(label) => {
                        label.text = text;
                        true
                    }
                    None => false,
                }
            }
            SceneMutation::SetEditing { id, editing } => {
                match self.scene.get_mut(id).and_then(|o| o.label.as_mut()) {
                    Some(label) => {
                        label.editing = editing;
                        true
                    }
                    None => false,
                }
            }
            SceneMutation::SetOutline { id, outline } => match self.scene.get_mut(id) {
                Some(obj) if obj.outline != outline => {
                    obj.outline = outline;
                    true
                }
                _ => false,
            },
            SceneMutation::SetMovementLock { id, locked } => match self.scene.get_mut(id) {
                Some(obj) => {
                    obj.lock_movement = locked;
                    true
                }
                None => false,
            },
            SceneMutation::SetDashed { id, dashed } => {
                match self.scene.get_mut(id).and_then(|o| o.line_mut()) {
                    Some(geom) => {
                        geom.dashed = dashed;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Apply a batch in order. Returns true when any of them changed the scene.
    pub fn apply_mutations(&mut self, mutations: Vec<SceneMutation>) -> bool {
        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        changed
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Run the handlers `id` subscribed to for `event`.
    fn dispatch(&mut self, id: ObjectId, event: ObjectEvent) -> bool {
        let mut changed = false;
        for handler in self.subscriptions.handlers_for(id, event) {
            let muts = match (handler, event) {
                (Handler::ContainmentHighlight, ObjectEvent::Moving) => {
                    self.highlighter.scan(&self.scene, id)
                }
                (Handler::EditLock, ObjectEvent::EditingEntered) => {
                    vec![SceneMutation::SetMovementLock { id, locked: true }]
                }
                (Handler::EditLock, ObjectEvent::EditingExited) => {
                    vec![SceneMutation::SetMovementLock { id, locked: false }]
                }
                (Handler::DashOnSelect, ObjectEvent::Selected) => {
                    vec![SceneMutation::SetDashed { id, dashed: true }]
                }
                (Handler::DashOnSelect, ObjectEvent::Deselected) => {
                    vec![SceneMutation::SetDashed { id, dashed: false }]
                }
                _ => vec![],
            };
            changed |= self.apply_mutations(muts);
        }
        changed
    }

    /// Replace the active selection, firing selection events.
    fn set_active(&mut self, id: Option<ObjectId>) -> bool {
        let before = std::mem::take(&mut self.select_tool.selection.active);
        self.select_tool.selection.active.extend(id);
        self.notify_selection(&before)
    }

    /// Fire `Deselected`/`Selected` for the difference between `before` and
    /// the current selection. Returns true when the selection changed.
    fn notify_selection(&mut self, before: &[ObjectId]) -> bool {
        let after = self.select_tool.selection.active.clone();
        let mut changed = false;
        for id in before.iter().filter(|id| !after.contains(id)) {
            self.dispatch(*id, ObjectEvent::Deselected);
            changed = true;
        }
        for id in after.iter().filter(|id| !before.contains(id)) {
            self.dispatch(*id, ObjectEvent::Selected);
            changed = true;
        }
        changed
    }
}
