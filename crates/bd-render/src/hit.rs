//! Hit testing: point → object lookup.
//!
//! Walks the scene front-to-back and returns the first evented object
//! under the pointer. Lines are tested against their segment, not their
//! bounding box, so a diagonal line does not swallow clicks around it.

use bd_core::id::ObjectId;
use bd_core::model::{LineGeom, ObjectKind};
use bd_core::Scene;

/// Find the topmost evented object at position (px, py).
/// Returns `None` if nothing is hit (background).
pub fn hit_test(scene: &Scene, px: f32, py: f32, tolerance: f32) -> Option<ObjectId> {
    scene
        .iter()
        .rev()
        .filter(|obj| obj.evented)
        .find(|obj| match obj.kind() {
            ObjectKind::Line(geom) => {
                distance_to_segment(geom, px, py) <= geom.stroke.width / 2.0 + tolerance
            }
            ObjectKind::Block(_) | ObjectKind::Port(_) => obj.bounds().contains_point(px, py),
        })
        .map(|obj| obj.id)
}

/// Shortest distance from a point to a line segment.
/// Degenerate (zero-length) lines collapse to point distance.
pub fn distance_to_segment(geom: &LineGeom, px: f32, py: f32) -> f32 {
    let (dx, dy) = (geom.x2 - geom.x1, geom.y2 - geom.y1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return (px - geom.x1).hypot(py - geom.y1);
    }
    let t = (((px - geom.x1) * dx + (py - geom.y1) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (geom.x1 + t * dx, geom.y1 + t * dy);
    (px - cx).hypot(py - cy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_core::model::{BlockBody, Color, SceneObject, Stroke};
    use pretty_assertions::assert_eq;

    fn block(left: f32, top: f32) -> SceneObject {
        let mut obj = SceneObject::new(
            ObjectId::with_prefix("block"),
            ObjectKind::Block(BlockBody {
                width: 100.0,
                height: 60.0,
                fill: Color::BLUE,
            }),
        );
        obj.left = left;
        obj.top = top;
        obj
    }

    fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> SceneObject {
        SceneObject::new(
            ObjectId::with_prefix("line"),
            ObjectKind::Line(LineGeom {
                x1,
                y1,
                x2,
                y2,
                stroke: Stroke::new(Color::BLACK, 2.0),
                dashed: false,
            }),
        )
    }

    #[test]
    fn hit_topmost_block() {
        let mut scene = Scene::new();
        let below = scene.add(block(100.0, 100.0)).unwrap();
        let above = scene.add(block(150.0, 120.0)).unwrap();

        assert_eq!(hit_test(&scene, 160.0, 130.0, 0.0), Some(above));
        assert_eq!(hit_test(&scene, 110.0, 110.0, 0.0), Some(below));
        assert_eq!(hit_test(&scene, 700.0, 500.0, 0.0), None);
    }

    #[test]
    fn non_evented_objects_are_skipped() {
        let mut scene = Scene::new();
        let below = scene.add(block(100.0, 100.0)).unwrap();
        let mut top = block(100.0, 100.0);
        top.evented = false;
        scene.add(top);

        assert_eq!(hit_test(&scene, 110.0, 110.0, 0.0), Some(below));
    }

    #[test]
    fn line_hit_uses_segment_distance() {
        let mut scene = Scene::new();
        let id = scene.add(line(0.0, 0.0, 100.0, 100.0)).unwrap();

        assert_eq!(hit_test(&scene, 50.0, 51.0, 2.0), Some(id));
        // Inside the bounding box but far from the diagonal
        assert_eq!(hit_test(&scene, 90.0, 10.0, 2.0), None);
    }

    #[test]
    fn degenerate_line_is_a_point() {
        let geom = LineGeom {
            x1: 5.0,
            y1: 5.0,
            x2: 5.0,
            y2: 5.0,
            stroke: Stroke::default(),
            dashed: false,
        };
        assert_eq!(distance_to_segment(&geom, 8.0, 9.0), 5.0);
    }
}
