//! Presentation attributes (`fill`, `stroke`, `stroke-width`) and their inheritance.

use crate::foundation::{core::Rgba8, error::ParseWarning};

/// A resolved paint value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "color", rename_all = "snake_case")]
pub enum Paint {
    /// Explicit `none`.
    None,
    /// `currentColor`; resolved against the owning graphic's fill when read.
    CurrentColor,
    /// A literal color.
    Color(Rgba8),
}

/// Inheritable shape style. `None` fields defer to the ancestor's value.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Style {
    /// Interior paint.
    pub fill: Option<Paint>,
    /// Outline paint.
    pub stroke: Option<Paint>,
    /// Outline width in user units.
    pub stroke_width: Option<f64>,
}

impl Style {
    /// Overlay `local` on top of `self`; fields present on `local` win.
    pub fn inherit(&self, local: &Style) -> Style {
        Style {
            fill: local.fill.or(self.fill),
            stroke: local.stroke.or(self.stroke),
            stroke_width: local.stroke_width.or(self.stroke_width),
        }
    }
}

/// Read the element's own style from presentation attributes and the `style` attribute.
/// Declarations in `style` take precedence over presentation attributes.
pub(crate) fn local_style(node: roxmltree::Node<'_, '_>, warnings: &mut Vec<ParseWarning>) -> Style {
    let mut fill = node.attribute("fill");
    let mut stroke = node.attribute("stroke");
    let mut stroke_width = node.attribute("stroke-width");

    if let Some(decls) = node.attribute("style") {
        for decl in decls.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match name.trim() {
                "fill" => fill = Some(value),
                "stroke" => stroke = Some(value),
                "stroke-width" => stroke_width = Some(value),
                _ => {}
            }
        }
    }

    Style {
        fill: fill.and_then(|v| paint_or_warn(v, warnings)),
        stroke: stroke.and_then(|v| paint_or_warn(v, warnings)),
        stroke_width: stroke_width.and_then(parse_stroke_width),
    }
}

fn paint_or_warn(raw: &str, warnings: &mut Vec<ParseWarning>) -> Option<Paint> {
    let paint = parse_paint(raw);
    if paint.is_none() {
        tracing::warn!(value = raw, "unrecognized paint; inheriting instead");
        warnings.push(ParseWarning::InvalidPaint {
            value: raw.to_string(),
        });
    }
    paint
}

fn parse_stroke_width(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw.strip_suffix("px").unwrap_or(raw);
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a paint value. Returns `None` when the text is not a recognized paint.
pub fn parse_paint(raw: &str) -> Option<Paint> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "none" => return Some(Paint::None),
        "currentcolor" => return Some(Paint::CurrentColor),
        _ => {}
    }
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).map(Paint::Color);
    }
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        return parse_rgb_fn(args.strip_suffix(')')?).map(Paint::Color);
    }
    named_color(&lower).map(Paint::Color)
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }
    let b = hex.as_bytes();
    let mut out = Vec::with_capacity(4);
    match b.len() {
        3 | 4 => {
            for &c in b {
                let n = nibble(c)?;
                out.push(n * 17);
            }
        }
        6 | 8 => {
            for pair in b.chunks_exact(2) {
                out.push(nibble(pair[0])? * 16 + nibble(pair[1])?);
            }
        }
        _ => return None,
    }
    Some(Rgba8 {
        r: out[0],
        g: out[1],
        b: out[2],
        a: out.get(3).copied().unwrap_or(255),
    })
}

fn parse_rgb_fn(args: &str) -> Option<Rgba8> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    fn channel(p: &str) -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? * 2.55,
            None => p.parse::<f64>().ok()?,
        };
        v.is_finite().then(|| v.clamp(0.0, 255.0).round() as u8)
    }

    let mut color = Rgba8 {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: 255,
    };
    if let Some(alpha) = parts.get(3) {
        let a = match alpha.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().ok()? / 100.0,
            None => alpha.parse::<f64>().ok()?,
        };
        if !a.is_finite() {
            return None;
        }
        color = color.with_alpha_f64(a);
    }
    Some(color)
}

fn named_color(name: &str) -> Option<Rgba8> {
    let c = match name {
        "black" => Rgba8::BLACK,
        "white" => Rgba8::WHITE,
        "red" => Rgba8::opaque(255, 0, 0),
        "green" => Rgba8::opaque(0, 128, 0),
        "lime" => Rgba8::opaque(0, 255, 0),
        "blue" => Rgba8::opaque(0, 0, 255),
        "yellow" => Rgba8::opaque(255, 255, 0),
        "cyan" | "aqua" => Rgba8::opaque(0, 255, 255),
        "magenta" | "fuchsia" => Rgba8::opaque(255, 0, 255),
        "gray" | "grey" => Rgba8::opaque(128, 128, 128),
        "orange" => Rgba8::opaque(255, 165, 0),
        "purple" => Rgba8::opaque(128, 0, 128),
        "transparent" => Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/style.rs"]
mod tests;
