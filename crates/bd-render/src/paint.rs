//! Scene → Vello drawing commands.
//!
//! Walks the scene back-to-front and emits Vello paint operations:
//! block and port bodies, outlines, and line strokes.

use bd_core::model::{Color as BdColor, LineGeom, ObjectKind, SceneObject, Stroke};
use bd_core::Scene;
use kurbo::{Affine, Line, Rect, Stroke as KurboStroke};
use peniko::{Color, Fill};
use vello::Scene as VelloScene;

/// Paint the whole scene to a Vello scene.
///
/// Call once per frame with a freshly-cleared `VelloScene`.
/// `dash` is the `(on, off)` pattern used for dashed lines.
pub fn paint_scene(target: &mut VelloScene, scene: &Scene, dash: (f32, f32)) {
    for obj in scene.iter() {
        paint_object(target, obj, dash);
    }
}

fn paint_object(target: &mut VelloScene, obj: &SceneObject, dash: (f32, f32)) {
    match obj.kind() {
        ObjectKind::Block(body) => {
            paint_body(target, obj, body.fill);
        }
        ObjectKind::Port(port) => {
            paint_body(target, obj, port.direction.color());
        }
        ObjectKind::Line(geom) => paint_line(target, geom, dash),
    }

    if let Some(label) = &obj.label {
        log::trace!(
            "LABEL {} {:?} at ({}, {})",
            obj.id,
            label.text,
            obj.left,
            obj.top
        );
        // Glyph shaping needs a font context; labels are drawn by the Canvas2D path.
    }
}

// ─── Shape painters ──────────────────────────────────────────────────────────

fn paint_body(target: &mut VelloScene, obj: &SceneObject, fill: BdColor) {
    let b = obj.bounds();
    let rect = Rect::new(
        b.x as f64,
        b.y as f64,
        b.right() as f64,
        b.bottom() as f64,
    );
    target.fill(Fill::NonZero, Affine::IDENTITY, to_color(fill), None, &rect);
    if let Some(outline) = &obj.outline {
        stroke_shape(target, &rect, outline, None);
    }
}

fn paint_line(target: &mut VelloScene, geom: &LineGeom, dash: (f32, f32)) {
    let line = Line::new(
        (geom.x1 as f64, geom.y1 as f64),
        (geom.x2 as f64, geom.y2 as f64),
    );
    let pattern = geom.dashed.then_some(dash);
    stroke_shape(target, &line, &geom.stroke, pattern);
}

fn stroke_shape<S: kurbo::Shape>(
    target: &mut VelloScene,
    shape: &S,
    stroke: &Stroke,
    dash: Option<(f32, f32)>,
) {
    let mut kurbo_stroke = KurboStroke::new(stroke.width as f64);
    if let Some((on, off)) = dash {
        kurbo_stroke = kurbo_stroke.with_dashes(0.0, [on as f64, off as f64]);
    }
    target.stroke(
        &kurbo_stroke,
        Affine::IDENTITY,
        to_color(stroke.color),
        None,
        shape,
    );
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn to_color(c: BdColor) -> Color {
    let [r, g, b, a] = c.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_core::id::ObjectId;
    use bd_core::model::BlockBody;

    #[test]
    fn empty_scene_paints_nothing() {
        let mut target = VelloScene::new();
        paint_scene(&mut target, &Scene::new(), (5.0, 5.0));
        assert!(target.encoding().is_empty());
    }

    #[test]
    fn block_and_dashed_line_emit_paths() {
        let mut scene = Scene::new();
        let mut block = SceneObject::new(
            ObjectId::with_prefix("block"),
            ObjectKind::Block(BlockBody {
                width: 100.0,
                height: 60.0,
                fill: BdColor::BLUE,
            }),
        );
        block.outline = Some(Stroke::new(BdColor::GREEN, 2.0));
        scene.add(block);
        scene.add(SceneObject::new(
            ObjectId::with_prefix("line"),
            ObjectKind::Line(LineGeom {
                x1: 0.0,
                y1: 0.0,
                x2: 50.0,
                y2: 50.0,
                stroke: Stroke::default(),
                dashed: true,
            }),
        ));

        let mut target = VelloScene::new();
        paint_scene(&mut target, &scene, (5.0, 5.0));
        assert!(!target.encoding().is_empty());
    }

    #[test]
    fn color_conversion_keeps_channels() {
        let c = to_color(BdColor::rgb8(255, 0, 255));
        assert_eq!(c.components, [1.0, 0.0, 1.0, 1.0]);
    }
}
