//! svgmorph turns SVG markup into flat lists of animatable primitives and morphs
//! one version of a graphic into another.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `markup -> ParsedGraphic` (view box, rendered size, ordered [`Primitive`]s)
//! 2. **Diff**: `ParsedGraphic x ParsedGraphic -> CorrespondencePlan` (LCS over shape
//!    identity, then a salvage pass pairing leftover deletions with same-shape insertions)
//! 3. **Drive**: [`SvgGraphic::tween_to`] + [`SvgGraphic::advance`] step the live
//!    primitives through fade-out, core, and fade-in windows
//!
//! Formulas go through [`TexCache`], which memoizes an injected [`TexRenderer`] so each
//! distinct source is rendered once per process.
//!
//! Rasterization is out of scope: consumers read [`SvgGraphic::nodes`] each frame and draw
//! them with whatever backend they own.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod foundation;
mod morph;
mod svg;
mod tex;

pub use animation::ease::Ease;
pub use animation::tween::{Tween, TweenStatus};
pub use foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8, Transform2D, Vec2, view_box_rect,
};
pub use foundation::error::{ParseWarning, SvgMorphError, SvgMorphResult};
pub use foundation::math::{decompose_affine, lerp, lerp_vec2, remap_clamped};
pub use morph::config::{MorphConfig, Window};
pub use morph::diff::{CorrespondencePlan, TransformedPair, diff, diff_nodes, lcs_pairs};
pub use morph::driver::{SvgGraphic, TransitionStatus};
pub use svg::markup::{parse_length_px, parse_number_list, parse_transform, parse_view_box};
pub use svg::parse::{ParseCache, ParsedGraphic, parse_svg, path_bounds};
pub use svg::primitive::{Primitive, PrimitiveKind};
pub use svg::style::{Paint, Style, parse_paint};
pub use tex::cache::{AnimatedTex, TexCache, TexOptions, TexRenderer};
