use crate::{
    foundation::core::{Rect, Transform2D, Vec2},
    svg::style::Style,
};

/// Shape payload of a [`Primitive`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// SVG path data, drawn centered on the primitive's position.
    Path {
        /// Raw `d` attribute.
        data: String,
        /// Bounds of `data` in its own coordinate space.
        bounds: Rect,
    },
    /// Axis-aligned rectangle centered on the primitive's position.
    Rect {
        /// Width in user units.
        width: f64,
        /// Height in user units.
        height: f64,
    },
}

/// A drawable shape with resolved placement and style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Primitive {
    /// Source element id, when it has one. Diagnostics only.
    pub id: Option<String>,
    /// Shape payload.
    pub kind: PrimitiveKind,
    /// Resolved placement.
    pub transform: Transform2D,
    /// Style after inheritance.
    pub style: Style,
    /// Opacity in `[0, 1]`; freshly parsed primitives are fully opaque.
    pub opacity: f64,
}

impl Primitive {
    /// An opaque primitive without an id.
    pub fn new(kind: PrimitiveKind, transform: Transform2D, style: Style) -> Self {
        Self {
            id: None,
            kind,
            transform,
            style,
            opacity: 1.0,
        }
    }

    /// Attach the source element id.
    pub fn with_id(mut self, id: Option<&str>) -> Self {
        self.id = id.map(str::to_string);
        self
    }

    /// Structural equivalence used for correspondence: same variant and, for paths,
    /// identical path data. Placement, size and style are ignored.
    pub fn same_shape(&self, other: &Primitive) -> bool {
        match (&self.kind, &other.kind) {
            (PrimitiveKind::Path { data: a, .. }, PrimitiveKind::Path { data: b, .. }) => a == b,
            (PrimitiveKind::Rect { .. }, PrimitiveKind::Rect { .. }) => true,
            _ => false,
        }
    }

    /// Intrinsic (unscaled) size.
    pub fn size(&self) -> Vec2 {
        match &self.kind {
            PrimitiveKind::Path { bounds, .. } => Vec2::new(bounds.width(), bounds.height()),
            PrimitiveKind::Rect { width, height } => Vec2::new(*width, *height),
        }
    }

    /// Whether [`Primitive::set_size`] has an effect; path size follows its data.
    pub fn has_explicit_size(&self) -> bool {
        matches!(self.kind, PrimitiveKind::Rect { .. })
    }

    /// Resize a rect. No-op for paths.
    pub fn set_size(&mut self, size: Vec2) {
        if let PrimitiveKind::Rect { width, height } = &mut self.kind {
            *width = size.x;
            *height = size.y;
        }
    }

    /// Shorthand for `transform.position`.
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/primitive.rs"]
mod tests;
