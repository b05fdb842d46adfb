//! Tool system for canvas interactions.
//!
//! Each tool translates pointer events into `SceneMutation`s that the
//! `Session` applies. Tools never touch the scene directly.

use crate::factory::build_line;
use crate::input::InputEvent;
use crate::session::SceneMutation;
use bd_core::id::ObjectId;
use bd_core::model::{SceneObject, Stroke};
use smallvec::SmallVec;

/// The active tool determines how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Select,
    Line,
}

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event, returning zero or more mutations.
    /// `hit` is the topmost evented object under the pointer, if any.
    fn handle(&mut self, event: &InputEvent, hit: Option<&SceneObject>) -> Vec<SceneMutation>;
}

// ─── Selection ───────────────────────────────────────────────────────────

/// What the user has selected.
///
/// `active` is what the canvas shows as selected. `target_block` is the
/// block new ports attach to: it is only ever a block and it survives
/// clicks on empty space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub active: SmallVec<[ObjectId; 2]>,
    pub target_block: Option<ObjectId>,
}

impl Selection {
    pub fn is_active(&self, id: ObjectId) -> bool {
        self.active.contains(&id)
    }

    /// Forget `id` everywhere it appears.
    pub fn forget(&mut self, id: ObjectId) {
        self.active.retain(|a| *a != id);
        if self.target_block == Some(id) {
            self.target_block = None;
        }
    }
}

// ─── Select Tool ─────────────────────────────────────────────────────────

pub struct SelectTool {
    pub selection: Selection,
    /// Object being dragged.
    dragging: Option<ObjectId>,
    last_x: f32,
    last_y: f32,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectTool {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
            dragging: None,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    pub fn dragging(&self) -> Option<ObjectId> {
        self.dragging
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(&mut self, event: &InputEvent, hit: Option<&SceneObject>) -> Vec<SceneMutation> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = None;
                match hit {
                    Some(obj) => {
                        if obj.is_block() {
                            self.selection.target_block = Some(obj.id);
                        }
                        if obj.selectable {
                            self.selection.active.clear();
                            self.selection.active.push(obj.id);
                            self.dragging = Some(obj.id);
                            self.last_x = x;
                            self.last_y = y;
                        }
                    }
                    None => self.selection.active.clear(),
                }
                vec![]
            }
            InputEvent::PointerMove { x, y } => {
                let Some(id) = self.dragging else {
                    return vec![];
                };
                let dx = x - self.last_x;
                let dy = y - self.last_y;
                self.last_x = x;
                self.last_y = y;
                vec![SceneMutation::MoveObject { id, dx, dy }]
            }
            InputEvent::PointerUp { .. } => {
                self.dragging = None;
                vec![]
            }
        }
    }
}

// ─── Line Tool ───────────────────────────────────────────────────────────

/// Line drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    /// Armed by "Add Line". `line` is set once the pointer goes down.
    Drawing { line: Option<ObjectId> },
}

pub struct LineTool {
    state: DrawState,
    stroke: Stroke,
}

impl LineTool {
    pub fn new(stroke: Stroke) -> Self {
        Self {
            state: DrawState::Idle,
            stroke,
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Enter drawing mode. A line in progress is kept as is.
    pub fn arm(&mut self) {
        if !self.is_drawing() {
            self.state = DrawState::Drawing { line: None };
        }
    }

    /// Leave drawing mode, returning the partial line if one was started.
    pub fn cancel(&mut self) -> Option<ObjectId> {
        match std::mem::take(&mut self.state) {
            DrawState::Drawing { line } => line,
            DrawState::Idle => None,
        }
    }
}

impl Tool for LineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn handle(&mut self, event: &InputEvent, _hit: Option<&SceneObject>) -> Vec<SceneMutation> {
        match (self.state, *event) {
            (DrawState::Drawing { line: None }, InputEvent::PointerDown { x, y }) => {
                let line = build_line(x, y, self.stroke);
                self.state = DrawState::Drawing {
                    line: Some(line.id),
                };
                vec![SceneMutation::AddObject {
                    object: Box::new(line),
                }]
            }
            (DrawState::Drawing { line: Some(id) }, InputEvent::PointerMove { x, y }) => {
                vec![SceneMutation::SetLineEnd { id, x, y }]
            }
            (DrawState::Drawing { line }, InputEvent::PointerUp { x, y }) => {
                self.state = DrawState::Idle;
                match line {
                    Some(id) => vec![
                        SceneMutation::SetLineEnd { id, x, y },
                        SceneMutation::FinalizeLine { id },
                    ],
                    None => vec![],
                }
            }
            // Idle, a second press mid-line, or a move before the press.
            _ => vec![],
        }
    }
}
