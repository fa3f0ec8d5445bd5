//! Cache-backed LaTeX → SVG rendering and the graphic that morphs between formulas.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, OnceLock},
};

use crate::{
    foundation::{
        core::Vec2,
        error::{SvgMorphError, SvgMorphResult},
    },
    morph::driver::{SvgGraphic, TransitionStatus},
};

/// Rendering options forwarded to the renderer. Ordered so the serialized cache key is stable.
pub type TexOptions = BTreeMap<String, serde_json::Value>;

/// Converts TeX source to SVG markup. Must be a pure function of its inputs.
pub trait TexRenderer: Send + Sync {
    /// Render `tex` to a complete SVG document.
    fn render(&self, tex: &str, options: &TexOptions) -> anyhow::Result<String>;
}

impl<F> TexRenderer for F
where
    F: Fn(&str, &TexOptions) -> anyhow::Result<String> + Send + Sync,
{
    fn render(&self, tex: &str, options: &TexOptions) -> anyhow::Result<String> {
        self(tex, options)
    }
}

/// Unbounded memo of rendered markup keyed by `"{tex}::{options as JSON}"`.
///
/// Entries are written at most once per key and never evicted.
pub struct TexCache {
    renderer: Box<dyn TexRenderer>,
    entries: Mutex<HashMap<String, Arc<str>>>,
}

impl std::fmt::Debug for TexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TexCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<Arc<TexCache>> = OnceLock::new();

impl TexCache {
    /// An empty cache in front of `renderer`.
    pub fn new(renderer: impl TexRenderer + 'static) -> Self {
        Self {
            renderer: Box::new(renderer),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Install the process-wide cache. Only the first call's renderer is used.
    pub fn install_global(renderer: impl TexRenderer + 'static) -> Arc<TexCache> {
        GLOBAL
            .get_or_init(|| Arc::new(TexCache::new(renderer)))
            .clone()
    }

    /// The process-wide cache, if one was installed.
    pub fn global() -> Option<Arc<TexCache>> {
        GLOBAL.get().cloned()
    }

    /// Key under which `tex` rendered with `options` is stored.
    pub fn cache_key(tex: &str, options: &TexOptions) -> SvgMorphResult<String> {
        let opts = serde_json::to_string(options)
            .map_err(|e| SvgMorphError::serde(format!("tex options: {e}")))?;
        Ok(format!("{tex}::{opts}"))
    }

    /// Rendered markup for `tex`, invoking the renderer only on a cache miss.
    #[tracing::instrument(skip(self, options))]
    pub fn render(&self, tex: &str, options: &TexOptions) -> SvgMorphResult<Arc<str>> {
        let key = Self::cache_key(tex, options)?;
        if let Some(hit) = self.lock_entries().get(&key) {
            tracing::debug!("tex cache hit");
            return Ok(hit.clone());
        }

        tracing::debug!("tex cache miss");
        let svg: Arc<str> = self
            .renderer
            .render(tex, options)
            .map_err(|e| SvgMorphError::render(format!("tex '{tex}': {e:#}")))?
            .into();
        // A concurrent miss may have stored the key meanwhile; keep the first entry.
        Ok(self.lock_entries().entry(key).or_insert(svg).clone())
    }

    /// Number of cached renderings.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether nothing has been rendered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<str>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A formula graphic: TeX source rendered through a [`TexCache`] and morphed on change.
#[derive(Debug)]
pub struct AnimatedTex {
    graphic: SvgGraphic,
    tex: String,
    options: TexOptions,
    font_size: f64,
    cache: Arc<TexCache>,
}

impl AnimatedTex {
    /// Render `tex` through `cache` and build the graphic. `font_size` must be positive.
    pub fn new(
        cache: Arc<TexCache>,
        tex: impl Into<String>,
        options: TexOptions,
        font_size: f64,
    ) -> SvgMorphResult<Self> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(SvgMorphError::validation("font size must be finite and > 0"));
        }
        let tex = tex.into();
        let svg = cache.render(&tex, &options)?;
        Ok(Self {
            graphic: SvgGraphic::new(svg.as_ref())?,
            tex,
            options,
            font_size,
            cache,
        })
    }

    /// Source of the formula currently shown (or being morphed to).
    pub fn tex(&self) -> &str {
        &self.tex
    }

    /// The underlying graphic.
    pub fn graphic(&self) -> &SvgGraphic {
        &self.graphic
    }

    /// Mutable access to the underlying graphic, e.g. to change its fill.
    pub fn graphic_mut(&mut self) -> &mut SvgGraphic {
        &mut self.graphic
    }

    /// Font size the formula is laid out at.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Change the font size; affects [`AnimatedTex::scale_factor`] immediately.
    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size;
    }

    /// Uniform scale applied to the rendered graphic.
    pub fn scale_factor(&self) -> f64 {
        self.font_size / 2.0
    }

    /// Layout size after applying [`AnimatedTex::scale_factor`].
    pub fn scaled_size(&self) -> Vec2 {
        self.graphic.size() * self.scale_factor()
    }

    /// Morph to new TeX source; same transition semantics as [`SvgGraphic::tween_to`].
    pub fn tween_tex(&mut self, tex: &str, duration_secs: f64) -> SvgMorphResult<()> {
        let svg = self.cache.render(tex, &self.options)?;
        self.graphic.tween_to(&svg, duration_secs)?;
        self.tex = tex.to_string();
        Ok(())
    }

    /// Advance the running morph; see [`SvgGraphic::advance`].
    pub fn advance(&mut self, dt_secs: f64) -> TransitionStatus {
        self.graphic.advance(dt_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tex/cache.rs"]
mod tests;
