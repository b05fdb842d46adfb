//! WASM bridge for BD: exposes the editing session to the browser page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the toolbar
//! and forwards button clicks, pointer events, and key presses here.

mod render2d;

use bd_core::EditorConfig;
use bd_core::id::ObjectId;
use bd_core::model::PortDirection;
use bd_editor::shortcuts::{ShortcutAction, ShortcutMap};
use bd_editor::{BlockProps, EditError, PortProps, Session};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Result of a bridge call, serialized as `{"ok":true,"id":".."}` or
/// `{"ok":false,"error":".."}`.
#[derive(Debug, Serialize)]
struct Status {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    changed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Status {
    fn created(id: ObjectId) -> Self {
        Self {
            ok: true,
            id: Some(id),
            changed: Some(true),
            error: None,
        }
    }

    fn changed(changed: bool) -> Self {
        Self {
            ok: true,
            id: None,
            changed: Some(changed),
            error: None,
        }
    }

    fn failed(err: &EditError) -> Self {
        Self {
            ok: false,
            id: None,
            changed: None,
            error: Some(err.to_string()),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"ok":false}"#.to_string())
    }
}

/// The main WASM-facing canvas controller.
///
/// Holds the editing session. All interaction from the page goes through
/// this struct.
#[wasm_bindgen]
pub struct BdCanvas {
    session: Session,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl BdCanvas {
    /// Create a canvas controller with default settings and the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        let config = EditorConfig {
            surface_width: width as f32,
            surface_height: height as f32,
            ..EditorConfig::default()
        };
        Self::from_config(config)
    }

    /// Create a canvas controller from a JSON config override.
    /// Malformed JSON falls back to the defaults.
    pub fn with_config(json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = EditorConfig::from_json(json).unwrap_or_else(|e| {
            log::warn!("invalid editor config, using defaults: {e}");
            EditorConfig::default()
        });
        Self::from_config(config)
    }

    /// Render the scene to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        render2d::render_scene(
            ctx,
            self.session.scene(),
            self.width,
            self.height,
            self.session.selected_ids(),
            self.session.config().line_dash,
        );
    }

    /// Resize the drawing surface.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Add a block from raw field values. Empty or unusable values fall back
    /// to the defaults. Returns a status JSON with the new id.
    pub fn add_block(&mut self, color: &str, width: &str, height: &str, text: &str) -> String {
        let props = BlockProps::from_input(color, width, height, text, self.session.config());
        Status::created(self.session.add_block(&props)).to_json()
    }

    /// "Add Block" button: ask for each property with `window.prompt`.
    pub fn prompt_add_block(&mut self) -> String {
        let color = prompt("Enter block color:", "blue");
        let width = prompt("Enter block width:", "100");
        let height = prompt("Enter block height:", "60");
        let text = prompt("Enter block text:", "Block");
        self.add_block(&color, &width, &height, &text)
    }

    /// Add a port (`kind` is `"input"` or `"output"`) to the selected block.
    pub fn add_port(&mut self, kind: &str, label: &str, size: &str) -> String {
        let direction = PortDirection::from_name(kind).unwrap_or(PortDirection::Input);
        let props = PortProps::from_input(direction, label, size, self.session.config());
        match self.session.add_port(&props) {
            Ok(id) => Status::created(id).to_json(),
            Err(e) => self.report(e),
        }
    }

    /// "Add Input/Output Port" button. The selection is checked before any
    /// prompt is shown.
    pub fn prompt_add_port(&mut self, kind: &str) -> String {
        if self.session.target_block().is_none() {
            return self.report(EditError::MissingSelection);
        }
        let direction = PortDirection::from_name(kind).unwrap_or(PortDirection::Input);
        let label = prompt("Enter port label:", direction.default_label());
        let size = prompt("Enter port size:", "10");
        self.add_port(direction.as_str(), &label, &size)
    }

    /// "Add Line" button: the next press-drag-release draws a line.
    pub fn begin_line(&mut self) {
        self.session.begin_line();
    }

    /// Abort line drawing. Returns true if drawing was active.
    pub fn cancel_line(&mut self) -> bool {
        self.session.cancel_line()
    }

    pub fn is_drawing_line(&self) -> bool {
        self.session.is_drawing_line()
    }

    /// "Delete Selected" button. Returns true if anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        !self.session.delete_selected().is_empty()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Handle pointer down. Returns true if the page should re-render.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_pointer_down(x, y)
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_pointer_move(x, y)
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.session.handle_pointer_up(x, y)
    }

    /// CSS cursor to show over the canvas.
    pub fn get_cursor(&self) -> String {
        self.session.cursor().as_css().to_string()
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"ok":true,"changed":bool,"action":"<name>"}` or a failed status.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return r#"{"ok":true,"changed":false,"action":"none"}"#.to_string();
        };
        match self.session.perform(action) {
            Ok(changed) => serde_json::json!({
                "ok": true,
                "changed": changed,
                "action": action_to_name(action),
            })
            .to_string(),
            Err(e) => self.report(e),
        }
    }

    // ─── Selection & inspector ───────────────────────────────────────────

    /// Get all selected ids as a JSON array.
    pub fn get_selected_ids(&self) -> String {
        serde_json::to_string(self.session.selected_ids()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Id of the block new ports attach to, or empty string.
    pub fn get_target_block(&self) -> String {
        self.session
            .target_block()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Select an object by id; an empty id clears the selection.
    /// Returns true if the selection changed.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        let target = if id.is_empty() {
            None
        } else {
            match ObjectId::lookup(id) {
                Some(id) => Some(id),
                None => return false,
            }
        };
        self.session.select(target).unwrap_or(false)
    }

    /// Properties of the first selected object as JSON, `{}` if none.
    /// Blocks include their composite `bounds`.
    pub fn get_selected_props(&self) -> String {
        let Some(id) = self.session.selected_ids().first().copied() else {
            return "{}".to_string();
        };
        let Some(obj) = self.session.scene().get(id) else {
            return "{}".to_string();
        };
        let mut props = match serde_json::to_value(obj) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return "{}".to_string(),
        };
        if let Some(bounds) = self.session.scene().composite_bounds(id) {
            props.insert("bounds".into(), serde_json::json!(bounds));
        }
        serde_json::Value::Object(props).to_string()
    }

    // ─── Object interaction ──────────────────────────────────────────────

    pub fn begin_text_edit(&mut self, id: &str) -> String {
        let result = self
            .resolve(id)
            .and_then(|id| self.session.begin_text_edit(id));
        match result {
            Ok(()) => Status::changed(true).to_json(),
            Err(e) => self.report(e),
        }
    }

    pub fn end_text_edit(&mut self, id: &str, text: &str) -> String {
        let result = self
            .resolve(id)
            .and_then(|id| self.session.end_text_edit(id, text));
        match result {
            Ok(()) => Status::changed(true).to_json(),
            Err(e) => self.report(e),
        }
    }

    /// Scale the selected object. Blocks refuse to flip.
    pub fn scale_selected(&mut self, scale_x: f32, scale_y: f32) -> String {
        match self.session.scale_selected(scale_x, scale_y) {
            Ok(changed) => Status::changed(changed).to_json(),
            Err(e) => self.report(e),
        }
    }
}

impl BdCanvas {
    fn from_config(config: EditorConfig) -> Self {
        let (width, height) = (config.surface_width as f64, config.surface_height as f64);
        Self {
            session: Session::new(config),
            width,
            height,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn resolve(&self, id: &str) -> Result<ObjectId, EditError> {
        ObjectId::lookup(id)
            .filter(|id| self.session.scene().contains(*id))
            .ok_or_else(|| EditError::UnknownId(id.to_string()))
    }

    /// Surface an error to the user when it is theirs to fix, and encode it.
    fn report(&self, err: EditError) -> String {
        match err {
            EditError::MissingSelection => alert(&err.to_string()),
            _ => log::warn!("{err}"),
        }
        Status::failed(&err).to_json()
    }
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::AddBlock => "addBlock",
        ShortcutAction::AddInputPort => "addInputPort",
        ShortcutAction::AddOutputPort => "addOutputPort",
        ShortcutAction::AddLine => "addLine",
        ShortcutAction::Delete => "delete",
        ShortcutAction::Cancel => "cancel",
    }
}

// ─── Browser dialogs ─────────────────────────────────────────────────────

/// `window.prompt`; a cancelled prompt reads as an empty answer.
#[cfg(target_arch = "wasm32")]
fn prompt(message: &str, default: &str) -> String {
    web_sys::window()
        .and_then(|w| w.prompt_with_message_and_default(message, default).ok().flatten())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn prompt(_message: &str, default: &str) -> String {
    default.to_string()
}

#[cfg(target_arch = "wasm32")]
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn alert(message: &str) {
    log::warn!("alert: {message}");
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("BD WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn add_block_reports_new_id() {
        let mut canvas = BdCanvas::new(800.0, 600.0);
        let status = parse(&canvas.add_block("red", "120", "", "Amp"));
        assert_eq!(status["ok"], true);

        let id = status["id"].as_str().unwrap();
        assert_eq!(canvas.get_target_block(), id);

        let props = parse(&canvas.get_selected_props());
        assert_eq!(props["kind"], "block");
        assert_eq!(props["width"], 120.0);
        assert_eq!(props["height"], 60.0);
        assert_eq!(props["fill"], "#FF0000");
        assert_eq!(props["label"]["text"], "Amp");
    }

    #[test]
    fn port_without_block_fails_with_message() {
        let mut canvas = BdCanvas::new(800.0, 600.0);
        let status = parse(&canvas.prompt_add_port("input"));
        assert_eq!(status["ok"], false);
        assert_eq!(status["error"], "Please select a block to add a port.");
        assert!(canvas.session().scene().is_empty());
    }

    #[test]
    fn prompted_port_uses_defaults_natively() {
        let mut canvas = BdCanvas::new(800.0, 600.0);
        canvas.prompt_add_block();
        let status = parse(&canvas.prompt_add_port("output"));
        assert_eq!(status["ok"], true);

        let id = ObjectId::lookup(status["id"].as_str().unwrap()).unwrap();
        let port = canvas.session().scene().get(id).unwrap();
        assert_eq!(port.label.as_ref().unwrap().text, "Output");
        assert_eq!(port.left, 220.0);
    }

    #[test]
    fn bad_config_falls_back_to_defaults() {
        let canvas = BdCanvas::with_config("{not json");
        assert_eq!(canvas.session().config(), &EditorConfig::default());

        let canvas = BdCanvas::with_config(r#"{"surface_width": 1024}"#);
        assert_eq!(canvas.width, 1024.0);
        assert_eq!(canvas.height, 600.0);
    }

    #[test]
    fn keys_and_cursor() {
        let mut canvas = BdCanvas::new(800.0, 600.0);
        let status = parse(&canvas.handle_key("l", false, false, false, false));
        assert_eq!(status["action"], "addLine");
        assert_eq!(canvas.get_cursor(), "crosshair");

        let status = parse(&canvas.handle_key("Escape", false, false, false, false));
        assert_eq!(status["changed"], true);
        assert_eq!(canvas.get_cursor(), "default");

        let status = parse(&canvas.handle_key("z", false, false, false, false));
        assert_eq!(status["action"], "none");
    }

    #[test]
    fn text_edit_on_unknown_id_fails() {
        let mut canvas = BdCanvas::new(800.0, 600.0);
        let status = parse(&canvas.begin_text_edit("block_does_not_exist"));
        assert_eq!(status["ok"], false);
        assert_eq!(
            status["error"],
            "Object 'block_does_not_exist' is not in the scene"
        );
        assert_eq!(ObjectId::lookup("block_does_not_exist"), None);
    }

    #[test]
    fn select_by_id_round_trip() {
        let mut canvas = BdCanvas::new(800.0, 600.0);
        let status = parse(&canvas.add_block("", "", "", ""));
        let id = status["id"].as_str().unwrap().to_string();

        assert!(canvas.select_by_id(""));
        assert_eq!(canvas.get_selected_ids(), "[]");
        assert!(canvas.select_by_id(&id));
        assert_eq!(canvas.get_selected_ids(), format!(r#"["{id}"]"#));
        assert!(!canvas.select_by_id("nope_404"));
    }
}
