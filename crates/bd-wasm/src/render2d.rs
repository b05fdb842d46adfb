//! Canvas2D renderer.
//!
//! Walks the scene back to front and draws to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`.

use bd_core::Scene;
use bd_core::id::ObjectId;
use bd_core::model::*;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const BACKGROUND: &str = "#FFFFFF";
const SELECTION: &str = "#4FC3F7";
const FONT_FAMILY: &str = "Times New Roman, serif";

/// Render the whole scene.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    canvas_width: f64,
    canvas_height: f64,
    selected: &[ObjectId],
    dash: (f32, f32),
) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    for obj in scene.iter() {
        match obj.kind() {
            ObjectKind::Block(body) => draw_block(ctx, obj, body),
            ObjectKind::Port(port) => draw_port(ctx, obj, port),
            ObjectKind::Line(geom) => draw_line(ctx, geom, dash),
        }
        if let Some(ref label) = obj.label {
            draw_label(ctx, obj, label);
        }
    }

    // Selection chrome goes on top of everything.
    for id in selected {
        let Some(obj) = scene.get(*id) else {
            continue;
        };
        if obj.has_controls && obj.line().is_none() {
            draw_selection_handles(ctx, &obj.bounds());
        }
    }
}

fn draw_block(ctx: &CanvasRenderingContext2d, obj: &SceneObject, body: &BlockBody) {
    let b = obj.bounds();
    let (x, y, w, h) = (b.x as f64, b.y as f64, b.width as f64, b.height as f64);

    ctx.save();
    ctx.set_fill_style_str(&body.fill.to_hex());
    ctx.fill_rect(x, y, w, h);

    if let Some(ref outline) = obj.outline {
        ctx.set_stroke_style_str(&outline.color.to_hex());
        ctx.set_line_width(outline.width as f64);
        ctx.stroke_rect(x, y, w, h);
    }
    ctx.restore();
}

fn draw_port(ctx: &CanvasRenderingContext2d, obj: &SceneObject, port: &PortBody) {
    let b = obj.bounds();
    ctx.save();
    ctx.set_fill_style_str(&port.direction.color().to_hex());
    ctx.fill_rect(b.x as f64, b.y as f64, b.width as f64, b.height as f64);
    ctx.restore();
}

fn draw_line(ctx: &CanvasRenderingContext2d, geom: &LineGeom, dash: (f32, f32)) {
    ctx.save();
    ctx.set_stroke_style_str(&geom.stroke.color.to_hex());
    ctx.set_line_width(geom.stroke.width as f64);
    if geom.dashed {
        let _ = ctx.set_line_dash(&js_sys::Array::of2(
            &JsValue::from_f64(dash.0 as f64),
            &JsValue::from_f64(dash.1 as f64),
        ));
    }
    ctx.begin_path();
    ctx.move_to(geom.x1 as f64, geom.y1 as f64);
    ctx.line_to(geom.x2 as f64, geom.y2 as f64);
    ctx.stroke();
    ctx.restore();
}

/// Block labels are centered on the body, port labels sit under the port.
fn draw_label(ctx: &CanvasRenderingContext2d, obj: &SceneObject, label: &Label) {
    let b = obj.bounds();
    let (cx, _) = b.center();
    let cy = match obj.tag() {
        ObjectTag::Port => b.bottom() + label.font_size * 0.75,
        _ => b.center().1,
    };
    let size = label.font_size as f64;

    ctx.save();
    ctx.set_font(&format!("{size}px {FONT_FAMILY}"));
    ctx.set_fill_style_str(&label.fill.to_hex());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(&label.text, cx as f64, cy as f64);

    if label.editing {
        let width = ctx
            .measure_text(&label.text)
            .map(|m| m.width())
            .unwrap_or(0.0);
        ctx.set_stroke_style_str(SELECTION);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(
            cx as f64 - width / 2.0 - 2.0,
            cy as f64 - size / 2.0 - 2.0,
            width + 4.0,
            size + 4.0,
        );
    }
    ctx.restore();
}

fn draw_selection_handles(ctx: &CanvasRenderingContext2d, b: &Bounds) {
    let (x, y, w, h) = (b.x as f64, b.y as f64, b.width as f64, b.height as f64);
    let handle_size = 6.0;
    let half = handle_size / 2.0;

    ctx.save();
    ctx.set_stroke_style_str(SELECTION);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, w, h);

    ctx.set_fill_style_str("#FFFFFF");
    ctx.set_line_width(1.5);
    let corners = [
        (x - half, y - half),
        (x + w - half, y - half),
        (x - half, y + h - half),
        (x + w - half, y + h - half),
    ];
    for (hx, hy) in corners {
        ctx.fill_rect(hx, hy, handle_size, handle_size);
        ctx.stroke_rect(hx, hy, handle_size, handle_size);
    }
    ctx.restore();
}
