use crate::foundation::error::{SvgMorphError, SvgMorphResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 is opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Replace alpha with `alpha` in `[0, 1]`.
    pub fn with_alpha_f64(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Position/rotation/scale triple a primitive is placed with.
///
/// The canonical matrix is `T(position) * R(rotation) * S(scale)`, so the primitive's own
/// origin (its visual center) lands on `position`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation; where the primitive's center lands.
    pub position: Vec2,
    /// Rotation in degrees, counter-clockwise in y-up terms.
    pub rotation_deg: f64,
    /// Per-axis scale; a negative component is a mirror.
    pub scale: Vec2, // default (1,1)
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Recompose into a single matrix.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.position)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }
}

/// Build the document box from `viewBox` components.
pub fn view_box_rect(x: f64, y: f64, width: f64, height: f64) -> SvgMorphResult<Rect> {
    if ![x, y, width, height].iter().all(|v| v.is_finite()) {
        return Err(SvgMorphError::parse("viewBox components must be finite"));
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(SvgMorphError::parse("viewBox width and height must be > 0"));
    }
    Ok(Rect::new(x, y, x + width, y + height))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
