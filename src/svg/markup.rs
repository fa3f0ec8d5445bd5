//! Low-level readers for the markup subset: element kinds, numbers, lengths, transforms.

use crate::foundation::core::{Affine, Point};

/// Element kinds the parser distinguishes. Everything else is [`ElementKind::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Group,
    Reference,
    Path,
    Rect,
    Unknown,
}

impl ElementKind {
    /// Classify an element by tag name.
    pub fn of(node: roxmltree::Node<'_, '_>) -> Self {
        if !node.is_element() {
            return Self::Unknown;
        }
        match node.tag_name().name() {
            "g" => Self::Group,
            "use" => Self::Reference,
            "path" => Self::Path,
            "rect" => Self::Rect,
            _ => Self::Unknown,
        }
    }
}

/// Target id of a reference element: `href` or `xlink:href` in `#id` form.
pub fn href_id<'a>(node: roxmltree::Node<'a, '_>) -> Option<&'a str> {
    let raw = node
        .attributes()
        .find(|a| a.name() == "href")
        .map(|a| a.value())?;
    let id = raw.trim().strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Raw `href` text for diagnostics.
pub fn href_raw<'a>(node: roxmltree::Node<'a, '_>) -> &'a str {
    node.attributes()
        .find(|a| a.name() == "href")
        .map(|a| a.value())
        .unwrap_or("")
}

/// Parse a single finite number, tolerating surrounding whitespace.
pub fn parse_number(raw: &str) -> Option<f64> {
    match parse_number_list(raw)?.as_slice() {
        [v] => Some(*v),
        _ => None,
    }
}

/// Parse a length given in user units or `px`. Other units are rejected.
pub fn parse_length_px(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw.strip_suffix("px").unwrap_or(raw);
    parse_number(raw)
}

/// Parse `viewBox="x y w h"`.
pub fn parse_view_box(raw: &str) -> Option<[f64; 4]> {
    match parse_number_list(raw)?.as_slice() {
        [x, y, w, h] => Some([*x, *y, *w, *h]),
        _ => None,
    }
}

/// Parse a whitespace/comma separated number list in the compact SVG grammar
/// (`"1-2.5.5e1"` is `[1, -2.5, 0.5e1]`).
pub fn parse_number_list(raw: &str) -> Option<Vec<f64>> {
    let bytes = raw.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() || c == b',' {
            i += 1;
            continue;
        }

        let start = i;
        if bytes[i] == b'+' || bytes[i] == b'-' {
            i += 1;
        }
        let mut digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return None;
        }
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }

        let v: f64 = raw[start..i].parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        out.push(v);
    }
    Some(out)
}

/// Parse a `transform` attribute into a single matrix (functions compose left to right).
pub fn parse_transform(raw: &str) -> Option<Affine> {
    let is_sep = |c: char| c.is_whitespace() || c == ',';
    let mut out = Affine::IDENTITY;
    let mut rest = raw.trim_start_matches(is_sep);

    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = open + rest[open..].find(')')?;
        let name = rest[..open].trim();
        let args = parse_number_list(&rest[open + 1..close])?;

        let m = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Affine::new([*a, *b, *c, *d, *e, *f]),
            ("translate", [tx]) => Affine::translate((*tx, 0.0)),
            ("translate", [tx, ty]) => Affine::translate((*tx, *ty)),
            ("scale", [s]) => Affine::scale(*s),
            ("scale", [sx, sy]) => Affine::scale_non_uniform(*sx, *sy),
            ("rotate", [deg]) => Affine::rotate(deg.to_radians()),
            ("rotate", [deg, cx, cy]) => Affine::rotate_about(deg.to_radians(), Point::new(*cx, *cy)),
            ("skewX", [deg]) => Affine::skew(deg.to_radians().tan(), 0.0),
            ("skewY", [deg]) => Affine::skew(0.0, deg.to_radians().tan()),
            _ => return None,
        };
        out = out * m;
        rest = rest[close + 1..].trim_start_matches(is_sep);
    }

    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/markup.rs"]
mod tests;
