use crate::{
    animation::tween::{Tween, TweenStatus},
    foundation::{
        core::{Rect, Rgba8, Transform2D, Vec2},
        error::{SvgMorphError, SvgMorphResult},
    },
    morph::{
        config::MorphConfig,
        diff::{CorrespondencePlan, diff_nodes},
    },
    svg::{
        parse::{ParseCache, ParsedGraphic},
        primitive::Primitive,
        style::Paint,
    },
};

/// What a call to [`SvgGraphic::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionStatus {
    /// No transition is running.
    Idle,
    /// A transition is running; `progress` is normalized time in `[0, 1)`.
    InProgress {
        /// Normalized time.
        progress: f64,
    },
    /// The running transition finished during this call and the new graphic is committed.
    Done,
}

/// Placement captured from a matched primitive when the transition starts. Interpolation
/// always runs from this snapshot, never from the live (moving) primitive.
#[derive(Clone, Copy, Debug)]
struct Snapshot {
    transform: Transform2D,
    size: Vec2,
    opacity: f64,
}

#[derive(Debug)]
struct ActiveTransition {
    markup: String,
    target: ParsedGraphic,
    plan: CorrespondencePlan,
    /// One per `plan.transformed` entry.
    sources: Vec<Snapshot>,
    /// Opacity of each `plan.deleted` entry when the transition started.
    deleted_from: Vec<f64>,
    /// Live-tree index of each `plan.inserted` entry.
    inserted_live: Vec<usize>,
    tween: Tween,
    /// Whether the content size was automatic before the transition pinned it.
    size_was_auto: bool,
}

/// A live graphic built from SVG markup that can morph to new markup over time.
///
/// The displayed node list is only replaced when a transition completes. While running,
/// matched primitives are moved in place, deleted ones fade out and inserted ones (appended
/// at the start) fade in.
#[derive(Debug)]
pub struct SvgGraphic {
    markup: String,
    view_box: Rect,
    content_size: Vec2,
    explicit_size: Option<Vec2>,
    fill: Rgba8,
    nodes: Vec<Primitive>,
    config: MorphConfig,
    transition: Option<ActiveTransition>,
    parse_cache: ParseCache,
}

impl SvgGraphic {
    /// Parse `markup` and build the displayed graphic.
    pub fn new(markup: impl Into<String>) -> SvgMorphResult<Self> {
        let markup = markup.into();
        let mut parse_cache = ParseCache::new();
        let parsed = parse_cache.get_or_parse(&markup)?;
        Ok(Self {
            markup,
            view_box: parsed.view_box,
            content_size: parsed.size,
            explicit_size: None,
            fill: Rgba8::BLACK,
            nodes: parsed.nodes,
            config: MorphConfig::default(),
            transition: None,
            parse_cache,
        })
    }

    /// Replace the transition timing. Invalid windows are rejected.
    pub fn with_config(mut self, config: MorphConfig) -> SvgMorphResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Fill that `currentColor` resolves to.
    pub fn with_fill(mut self, fill: Rgba8) -> Self {
        self.fill = fill;
        self
    }

    /// Markup of the committed graphic; updated when a transition completes.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// View box of the committed graphic.
    pub fn view_box(&self) -> Rect {
        self.view_box
    }

    /// Live primitives, including fading ones while a transition runs.
    pub fn nodes(&self) -> &[Primitive] {
        &self.nodes
    }

    /// Transition timing in use.
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Current layout size: the explicit size when pinned, otherwise the content size.
    pub fn size(&self) -> Vec2 {
        self.explicit_size.unwrap_or(self.content_size)
    }

    /// Pin (`Some`) or release (`None`) the layout size.
    pub fn set_explicit_size(&mut self, size: Option<Vec2>) {
        self.explicit_size = size;
    }

    /// Current fill.
    pub fn fill(&self) -> Rgba8 {
        self.fill
    }

    /// Change the fill; `currentColor` paints follow it on their next read.
    pub fn set_fill(&mut self, fill: Rgba8) {
        self.fill = fill;
    }

    /// Resolve a primitive paint against this graphic; `currentColor` reads the current fill.
    pub fn resolve_paint(&self, paint: Option<Paint>) -> Option<Rgba8> {
        match paint? {
            Paint::None => None,
            Paint::CurrentColor => Some(self.fill),
            Paint::Color(c) => Some(c),
        }
    }

    /// Whether a transition is running.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Plan of the running transition, if any.
    pub fn active_plan(&self) -> Option<&CorrespondencePlan> {
        self.transition.as_ref().map(|t| &t.plan)
    }

    /// Start morphing toward `markup` over `duration_secs`.
    ///
    /// Parse and validation failures return before anything changes. Starting while another
    /// transition runs abandons it and diffs against the live tree as it currently stands.
    #[tracing::instrument(skip(self, markup), fields(len = markup.len()))]
    pub fn tween_to(&mut self, markup: &str, duration_secs: f64) -> SvgMorphResult<()> {
        let tween = Tween::new(duration_secs)?;
        let target = self.parse_cache.get_or_parse(markup)?;

        let size_was_auto = match self.transition.take() {
            Some(prev) => {
                tracing::warn!("transition started while another was running");
                prev.size_was_auto
            }
            None => self.explicit_size.is_none(),
        };

        let mut plan = diff_nodes(&self.nodes, &target.nodes);
        plan.from_size = self.size();
        plan.to_size = target.size;
        tracing::debug!(
            transformed = plan.transformed.len(),
            salvaged = plan.salvaged,
            inserted = plan.inserted.len(),
            deleted = plan.deleted.len(),
            "transition planned"
        );

        let sources = plan
            .transformed
            .iter()
            .map(|pair| {
                let live = &self.nodes[pair.from];
                Snapshot {
                    transform: live.transform,
                    size: live.size(),
                    opacity: live.opacity,
                }
            })
            .collect();
        let deleted_from = plan.deleted.iter().map(|&d| self.nodes[d].opacity).collect();

        let mut inserted_live = Vec::with_capacity(plan.inserted.len());
        for &i in &plan.inserted {
            let mut node = target.nodes[i].clone();
            node.opacity = 0.0;
            inserted_live.push(self.nodes.len());
            self.nodes.push(node);
        }

        self.transition = Some(ActiveTransition {
            markup: markup.to_string(),
            target,
            plan,
            sources,
            deleted_from,
            inserted_live,
            tween,
            size_was_auto,
        });
        self.apply_frame(0.0);
        Ok(())
    }

    /// Advance the running transition by `dt_secs` and apply the frame.
    pub fn advance(&mut self, dt_secs: f64) -> TransitionStatus {
        let Some(active) = self.transition.as_mut() else {
            return TransitionStatus::Idle;
        };
        let status = active.tween.advance(dt_secs);
        let progress = active.tween.progress();
        self.apply_frame(progress);

        match status {
            TweenStatus::InProgress { progress } => TransitionStatus::InProgress { progress },
            TweenStatus::Done => {
                self.finish();
                TransitionStatus::Done
            }
        }
    }

    /// Run a whole transition at a fixed frame rate, calling `on_frame` after every frame
    /// (including the committed final one). Returns the number of frames advanced.
    pub fn run_transition(
        &mut self,
        markup: &str,
        duration_secs: f64,
        fps: f64,
        mut on_frame: impl FnMut(&SvgGraphic, f64),
    ) -> SvgMorphResult<u64> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(SvgMorphError::validation("fps must be finite and > 0"));
        }
        self.tween_to(markup, duration_secs)?;

        let dt = 1.0 / fps;
        let mut frames = 0;
        loop {
            frames += 1;
            match self.advance(dt) {
                TransitionStatus::InProgress { progress } => on_frame(self, progress),
                TransitionStatus::Done | TransitionStatus::Idle => {
                    on_frame(self, 1.0);
                    return Ok(frames);
                }
            }
        }
    }

    fn apply_frame(&mut self, t: f64) {
        let Some(active) = self.transition.as_ref() else {
            return;
        };
        let cfg = self.config;
        let ease = cfg.ease;

        let r = cfg.core.local(t);
        for (pair, src) in active.plan.transformed.iter().zip(&active.sources) {
            let to = &active.target.nodes[pair.to];
            let live = &mut self.nodes[pair.from];
            live.transform.position = ease.lerp_vec2(src.transform.position, to.transform.position, r);
            live.transform.scale = ease.lerp_vec2(src.transform.scale, to.transform.scale, r);
            live.transform.rotation_deg =
                ease.lerp(src.transform.rotation_deg, to.transform.rotation_deg, r);
            if live.has_explicit_size() {
                live.set_size(ease.lerp_vec2(src.size, to.size(), r));
            }
            live.opacity = ease.lerp(src.opacity, to.opacity, r);
        }

        let fade_out = cfg.fade_out.local(t);
        for (&d, &from) in active.plan.deleted.iter().zip(&active.deleted_from) {
            self.nodes[d].opacity = ease.lerp(from, 0.0, fade_out);
        }

        let fade_in = ease.lerp(0.0, 1.0, cfg.fade_in.local(t));
        for &i in &active.inserted_live {
            self.nodes[i].opacity = fade_in;
        }

        if active.size_was_auto {
            self.explicit_size = Some(ease.lerp_vec2(active.plan.from_size, active.plan.to_size, t));
        }
    }

    fn finish(&mut self) {
        let Some(active) = self.transition.take() else {
            return;
        };
        self.nodes = active.target.nodes;
        self.markup = active.markup;
        self.view_box = active.target.view_box;
        self.content_size = active.target.size;
        if active.size_was_auto {
            self.explicit_size = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/driver.rs"]
mod tests;
