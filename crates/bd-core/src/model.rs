//! Core data model for BD diagrams.
//!
//! A diagram is a flat collection of `SceneObject`s. Every object carries
//! exactly one `ObjectKind` (block, port, or line) fixed at construction.
//! Blocks may own ports through group membership held by the `Scene`.

use crate::id::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const RED: Color = Color::rgb8(255, 0, 0);
    /// CSS `green` (#008000), not `lime`.
    pub const GREEN: Color = Color::rgb8(0, 128, 0);
    pub const BLUE: Color = Color::rgb8(0, 0, 255);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse a user-supplied color: a CSS color keyword (`blue`, `tomato`)
    /// or a hex string (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        Self::from_name(s).or_else(|| Self::from_hex(s))
    }

    /// Look up a CSS color keyword (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "navy" => (0, 0, 128),
            "yellow" => (255, 255, 0),
            "orange" => (255, 165, 0),
            "purple" => (128, 0, 128),
            "magenta" | "fuchsia" => (255, 0, 255),
            "cyan" | "aqua" => (0, 255, 255),
            "teal" => (0, 128, 128),
            "olive" => (128, 128, 0),
            "maroon" => (128, 0, 0),
            "gray" | "grey" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "pink" => (255, 192, 203),
            "brown" => (165, 42, 42),
            "tomato" => (255, 99, 71),
            "gold" => (255, 215, 0),
            "indigo" => (75, 0, 130),
            "violet" => (238, 130, 238),
            "coral" => (255, 127, 80),
            "salmon" => (250, 128, 114),
            "crimson" => (220, 20, 60),
            "steelblue" => (70, 130, 180),
            "skyblue" => (135, 206, 235),
            "darkgreen" => (0, 100, 0),
            "darkblue" => (0, 0, 139),
            "darkred" => (139, 0, 0),
            "lightgray" | "lightgrey" => (211, 211, 211),
            "darkgray" | "darkgrey" => (169, 169, 169),
            _ => return None,
        };
        Some(Self::rgb8(r, g, b))
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Components as 8-bit channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

// ─── Labels ──────────────────────────────────────────────────────────────

/// Editable text attached to a block or port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub font_size: f32,
    pub fill: Color,
    /// Set while the text is being edited in place.
    pub editing: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, font_size: f32, fill: Color) -> Self {
        Self {
            text: text.into(),
            font_size,
            fill,
            editing: false,
        }
    }
}

// ─── Object kinds ────────────────────────────────────────────────────────

/// Which side of a block a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    /// Parse `"input"` / `"output"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input" | "in" => Some(Self::Input),
            "output" | "out" => Some(Self::Output),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }

    /// Ports are color-coded by direction; not user-configurable.
    pub fn color(&self) -> Color {
        match self {
            Self::Input => Color::RED,
            Self::Output => Color::GREEN,
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Output => "Output",
        }
    }
}

/// Rectangle body of a block (unscaled dimensions).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockBody {
    pub width: f32,
    pub height: f32,
    pub fill: Color,
}

/// A port marker. `owner` is the block it was attached to, cleared when
/// that block is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortBody {
    pub direction: PortDirection,
    pub size: f32,
    pub owner: Option<ObjectId>,
}

/// A two-point connector in absolute surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineGeom {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: Stroke,
    /// Dashed rendering, shown while the line is selected.
    pub dashed: bool,
}

impl LineGeom {
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    pub fn length(&self) -> f32 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// The kind tag and per-kind geometry of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectKind {
    Block(BlockBody),
    Port(PortBody),
    Line(LineGeom),
}

/// Fieldless discriminant of `ObjectKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    Block,
    Port,
    Line,
}

impl ObjectTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Port => "port",
            Self::Line => "line",
        }
    }
}

// ─── Scene objects ───────────────────────────────────────────────────────

/// A single object on the drawing surface.
///
/// `left`/`top` is the top-left corner of the object's box. Lines keep their
/// geometry in absolute endpoints and ignore `left`/`top`/scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub id: ObjectId,

    /// Private so the kind tag cannot change after construction.
    #[serde(flatten)]
    kind: ObjectKind,

    pub left: f32,
    pub top: f32,
    pub scale_x: f32,
    pub scale_y: f32,

    /// Outline drawn around the body (used for containment highlight).
    pub outline: Option<Stroke>,

    pub label: Option<Label>,

    /// Can become the active selection.
    pub selectable: bool,
    /// Receives pointer events (participates in hit testing).
    pub evented: bool,
    /// Drag movement is suppressed (e.g. while the label is edited).
    pub lock_movement: bool,
    /// Scaling may not flip the object (negative scale).
    pub lock_scaling_flip: bool,
    /// Selection shows resize handles.
    pub has_controls: bool,
}

impl SceneObject {
    pub fn new(id: ObjectId, kind: ObjectKind) -> Self {
        Self {
            id,
            kind,
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            outline: None,
            label: None,
            selectable: true,
            evented: true,
            lock_movement: false,
            lock_scaling_flip: false,
            has_controls: true,
        }
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn tag(&self) -> ObjectTag {
        match self.kind {
            ObjectKind::Block(_) => ObjectTag::Block,
            ObjectKind::Port(_) => ObjectTag::Port,
            ObjectKind::Line(_) => ObjectTag::Line,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, ObjectKind::Block(_))
    }

    pub fn block(&self) -> Option<&BlockBody> {
        match &self.kind {
            ObjectKind::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn block_mut(&mut self) -> Option<&mut BlockBody> {
        match &mut self.kind {
            ObjectKind::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn port(&self) -> Option<&PortBody> {
        match &self.kind {
            ObjectKind::Port(p) => Some(p),
            _ => None,
        }
    }

    pub fn port_mut(&mut self) -> Option<&mut PortBody> {
        match &mut self.kind {
            ObjectKind::Port(p) => Some(p),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<&LineGeom> {
        match &self.kind {
            ObjectKind::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn line_mut(&mut self) -> Option<&mut LineGeom> {
        match &mut self.kind {
            ObjectKind::Line(l) => Some(l),
            _ => None,
        }
    }

    /// Scaled width of the object's box.
    pub fn scaled_width(&self) -> f32 {
        match &self.kind {
            ObjectKind::Block(b) => b.width * self.scale_x,
            ObjectKind::Port(p) => p.size * self.scale_x,
            ObjectKind::Line(l) => (l.x2 - l.x1).abs(),
        }
    }

    /// Scaled height of the object's box.
    pub fn scaled_height(&self) -> f32 {
        match &self.kind {
            ObjectKind::Block(b) => b.height * self.scale_y,
            ObjectKind::Port(p) => p.size * self.scale_y,
            ObjectKind::Line(l) => (l.y2 - l.y1).abs(),
        }
    }

    /// Own bounding box in surface coordinates (block bodies exclude ports).
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ObjectKind::Block(_) | ObjectKind::Port(_) => Bounds {
                x: self.left,
                y: self.top,
                width: self.scaled_width(),
                height: self.scaled_height(),
            },
            ObjectKind::Line(l) => Bounds::from_points(l.x1, l.y1, l.x2, l.y2),
        }
    }

    /// Shift the object by a delta.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match &mut self.kind {
            ObjectKind::Line(l) => l.translate(dx, dy),
            ObjectKind::Block(_) | ObjectKind::Port(_) => {
                self.left += dx;
                self.top += dy;
            }
        }
    }
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized box spanning two corner points.
    pub fn from_points(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Interiors overlap (AABB). Touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Every corner of `self` lies inside `outer` (edges inclusive).
    pub fn is_contained_within(&self, outer: &Bounds) -> bool {
        self.x >= outer.x
            && self.y >= outer.y
            && self.right() <= outer.right()
            && self.bottom() <= outer.bottom()
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(left: f32, top: f32, w: f32, h: f32) -> SceneObject {
        let mut obj = SceneObject::new(
            ObjectId::with_prefix("block"),
            ObjectKind::Block(BlockBody {
                width: w,
                height: h,
                fill: Color::BLUE,
            }),
        );
        obj.left = left;
        obj.top = top;
        obj
    }

    #[test]
    fn color_parse_names_and_hex() {
        assert_eq!(Color::parse("blue"), Some(Color::BLUE));
        assert_eq!(Color::parse("Green"), Some(Color::GREEN));
        assert_eq!(Color::parse("#00F"), Some(Color::BLUE));
        assert_eq!(Color::parse("0000FF"), Some(Color::BLUE));
        assert_eq!(Color::parse("not-a-color"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let c2 = Color::from_hex("#FF000080").unwrap();
        assert!((c2.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(c2.to_hex().len(), 9);
    }

    #[test]
    fn port_colors_follow_direction() {
        assert_eq!(PortDirection::Input.color(), Color::RED);
        assert_eq!(PortDirection::Output.color(), Color::GREEN);
        assert_eq!(PortDirection::from_name("output"), Some(PortDirection::Output));
        assert_eq!(PortDirection::from_name("sideways"), None);
    }

    #[test]
    fn block_bounds_include_scale() {
        let mut b = block(100.0, 100.0, 100.0, 60.0);
        b.scale_x = 2.0;
        b.scale_y = 0.5;
        assert_eq!(b.bounds(), Bounds::new(100.0, 100.0, 200.0, 30.0));
    }

    #[test]
    fn line_bounds_are_normalized() {
        let line = SceneObject::new(
            ObjectId::with_prefix("line"),
            ObjectKind::Line(LineGeom {
                x1: 50.0,
                y1: 80.0,
                x2: 10.0,
                y2: 20.0,
                stroke: Stroke::new(Color::BLACK, 2.0),
                dashed: false,
            }),
        );
        assert_eq!(line.bounds(), Bounds::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn translate_line_moves_both_endpoints() {
        let mut line = SceneObject::new(
            ObjectId::with_prefix("line"),
            ObjectKind::Line(LineGeom {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
                stroke: Stroke::default(),
                dashed: false,
            }),
        );
        line.translate(5.0, -5.0);
        let geom = line.line().unwrap();
        assert_eq!((geom.x1, geom.y1, geom.x2, geom.y2), (5.0, -5.0, 15.0, 5.0));
    }

    #[test]
    fn bounds_relations() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let inner = Bounds::new(10.0, 10.0, 20.0, 20.0);
        let apart = Bounds::new(200.0, 200.0, 10.0, 10.0);
        let touching = Bounds::new(100.0, 0.0, 10.0, 10.0);

        assert!(inner.is_contained_within(&outer));
        assert!(!outer.is_contained_within(&inner));
        assert!(inner.intersects(&outer));
        assert!(!apart.intersects(&outer));
        assert!(!touching.intersects(&outer));
        assert_eq!(
            inner.union(&apart),
            Bounds::new(10.0, 10.0, 200.0, 200.0)
        );
    }

    #[test]
    fn kind_tag_matches_variant() {
        let b = block(0.0, 0.0, 10.0, 10.0);
        assert_eq!(b.tag(), ObjectTag::Block);
        assert_eq!(b.tag().as_str(), "block");
        assert!(b.port().is_none());
    }
}
