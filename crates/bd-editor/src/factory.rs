//! Constructors for blocks, ports, and lines.
//!
//! Factories only build `SceneObject` values; registering them with the
//! scene and wiring subscriptions is the session's job.

use crate::props::{BlockProps, PortProps};
use bd_core::EditorConfig;
use bd_core::id::ObjectId;
use bd_core::model::*;

/// Build a block at the configured origin: body + centered label.
pub fn build_block(props: &BlockProps, config: &EditorConfig) -> SceneObject {
    let mut block = SceneObject::new(
        ObjectId::with_prefix("block"),
        ObjectKind::Block(BlockBody {
            width: props.width,
            height: props.height,
            fill: props.fill,
        }),
    );
    (block.left, block.top) = config.block_origin;
    block.lock_scaling_flip = true;
    block.label = Some(Label::new(
        props.text.clone(),
        config.block_font_size,
        config.block_text_fill,
    ));
    block
}

/// Where a port of `size` goes next to `owner`.
///
/// Inputs sit `2 * size` left of the block's left edge, outputs `2 * size`
/// right of its scaled right edge. Vertically the port starts at the middle
/// of the scaled height.
pub fn port_position(owner: &SceneObject, direction: PortDirection, size: f32) -> (f32, f32) {
    let left = match direction {
        PortDirection::Input => owner.left - size * 2.0,
        PortDirection::Output => owner.left + owner.scaled_width() + size * 2.0,
    };
    let top = owner.top + owner.scaled_height() / 2.0;
    (left, top)
}

/// Build a port positioned against `owner`. The owner link is set when the
/// port is attached in the scene.
pub fn build_port(owner: &SceneObject, props: &PortProps, config: &EditorConfig) -> SceneObject {
    let mut port = SceneObject::new(
        ObjectId::with_prefix("port"),
        ObjectKind::Port(PortBody {
            direction: props.direction,
            size: props.size,
            owner: None,
        }),
    );
    (port.left, port.top) = port_position(owner, props.direction, props.size);
    port.label = Some(Label::new(
        props.label.clone(),
        config.port_font_size,
        config.port_text_fill,
    ));
    port
}

/// Build a line being drawn: both endpoints at the pointer, inert until
/// finalized so it does not catch the pointer events that stretch it.
pub fn build_line(x: f32, y: f32, stroke: Stroke) -> SceneObject {
    let mut line = SceneObject::new(
        ObjectId::with_prefix("line"),
        ObjectKind::Line(LineGeom {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
            stroke,
            dashed: false,
        }),
    );
    line.selectable = false;
    line.evented = false;
    line
}
