use std::path::Path;

use anyhow::Context;

use crate::{
    animation::ease::Ease,
    foundation::{
        error::{SvgMorphError, SvgMorphResult},
        math::remap_clamped,
    },
};

/// A sub-range of normalized transition time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Window {
    /// Global progress at which the window opens.
    pub start: f64,
    /// Global progress at which the window closes.
    pub end: f64,
}

impl Window {
    /// Window over `[start, end]`; see [`MorphConfig::validate`] for the accepted range.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Local progress in `[0, 1]` for global progress `t`.
    pub fn local(self, t: f64) -> f64 {
        remap_clamped(t, self.start, self.end)
    }

    fn validate(self, name: &str) -> SvgMorphResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SvgMorphError::validation(format!(
                "{name} window bounds must be finite"
            )));
        }
        if !(0.0 <= self.start && self.start < self.end && self.end <= 1.0) {
            return Err(SvgMorphError::validation(format!(
                "{name} window must satisfy 0 <= start < end <= 1, got [{}, {}]",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Timing of a morph transition, in normalized time.
///
/// Defaults: transforms interpolate over `[0.2, 0.8]`, deletions fade out over
/// `[0, 0.35]`, insertions fade in over `[0.65, 1]`, all with sine ease-in-out.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphConfig {
    /// Window for position/rotation/scale/size interpolation of matched primitives.
    pub core: Window,
    /// Fade-out window for deleted primitives.
    pub fade_out: Window,
    /// Fade-in window for inserted primitives.
    pub fade_in: Window,
    /// Curve applied inside every window.
    pub ease: Ease,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            core: Window::new(0.2, 0.8),
            fade_out: Window::new(0.0, 0.35),
            fade_in: Window::new(0.65, 1.0),
            ease: Ease::InOutSine,
        }
    }
}

impl MorphConfig {
    /// Check every window is finite with `0 <= start < end <= 1`.
    pub fn validate(&self) -> SvgMorphResult<()> {
        self.core.validate("core")?;
        self.fade_out.validate("fade_out")?;
        self.fade_in.validate("fade_in")?;
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> SvgMorphResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| SvgMorphError::serde(format!("morph config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file; see [`MorphConfig::from_json_str`].
    pub fn from_path(path: &Path) -> SvgMorphResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read morph config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/config.rs"]
mod tests;
