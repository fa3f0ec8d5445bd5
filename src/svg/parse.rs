use std::collections::HashMap;

use kurbo::Shape;

use crate::{
    foundation::{
        core::{Affine, BezPath, Rect, Vec2, view_box_rect},
        error::{ParseWarning, SvgMorphError, SvgMorphResult},
        math::decompose_affine,
    },
    svg::{
        markup::{
            ElementKind, href_id, href_raw, parse_length_px, parse_transform, parse_view_box,
        },
        primitive::{Primitive, PrimitiveKind},
        style::{Style, local_style},
    },
};

/// Flattened result of parsing one document.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParsedGraphic {
    /// Document view box in user units.
    pub view_box: Rect,
    /// Content size: the rendered width/height when given, otherwise the view box size.
    pub size: Vec2,
    /// Primitives in document order (pre-order, references inlined).
    pub nodes: Vec<Primitive>,
    /// Element-level problems encountered while parsing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

impl ParsedGraphic {
    /// A graphic with no primitives.
    pub fn empty(size: Vec2) -> Self {
        Self {
            view_box: Rect::new(-size.x / 2.0, -size.y / 2.0, size.x / 2.0, size.y / 2.0),
            size,
            nodes: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parse SVG markup into a [`ParsedGraphic`].
///
/// The root transform scales view-box units to the rendered size and moves the view box
/// center to the origin, so the graphic is positioned by its center.
#[tracing::instrument(skip(markup), fields(len = markup.len()))]
pub fn parse_svg(markup: &str) -> SvgMorphResult<ParsedGraphic> {
    let doc = roxmltree::Document::parse(markup)
        .map_err(|e| SvgMorphError::parse(format!("malformed markup: {e}")))?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SvgMorphError::parse(format!(
            "root element must be <svg>, got <{}>",
            root.tag_name().name()
        )));
    }

    let raw_view_box = root
        .attribute("viewBox")
        .ok_or_else(|| SvgMorphError::parse("root <svg> has no viewBox"))?;
    let [x, y, w, h] = parse_view_box(raw_view_box)
        .ok_or_else(|| SvgMorphError::parse(format!("invalid viewBox '{raw_view_box}'")))?;
    let view_box = view_box_rect(x, y, w, h)?;

    let rendered = |name: &str| {
        root.attribute(name)
            .and_then(parse_length_px)
            .filter(|v| *v > 0.0)
    };
    let (size, scale) = match (rendered("width"), rendered("height")) {
        (Some(rw), Some(rh)) => (Vec2::new(rw, rh), Vec2::new(rw / w, rh / h)),
        (Some(rw), None) => {
            let s = rw / w;
            (Vec2::new(rw, h * s), Vec2::new(s, s))
        }
        (None, Some(rh)) => {
            let s = rh / h;
            (Vec2::new(w * s, rh), Vec2::new(s, s))
        }
        (None, None) => (Vec2::new(w, h), Vec2::new(1.0, 1.0)),
    };

    let root_transform =
        Affine::scale_non_uniform(scale.x, scale.y) * Affine::translate(-view_box.center().to_vec2());

    let mut warnings = Vec::new();
    let root_style = local_style(root, &mut warnings);

    let mut extractor = Extractor {
        ids: build_id_map(&doc),
        active_refs: Vec::new(),
        nodes: Vec::new(),
        warnings,
    };
    extractor.extract_children(root, root_transform, &root_style);

    tracing::debug!(
        nodes = extractor.nodes.len(),
        warnings = extractor.warnings.len(),
        "parsed svg"
    );

    Ok(ParsedGraphic {
        view_box,
        size,
        nodes: extractor.nodes,
        warnings: extractor.warnings,
    })
}

fn build_id_map<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
) -> HashMap<&'a str, roxmltree::Node<'a, 'input>> {
    let mut out = HashMap::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        if let Some(id) = node.attribute("id") {
            // First wins.
            out.entry(id).or_insert(node);
        }
    }
    out
}

struct Extractor<'a, 'input> {
    ids: HashMap<&'a str, roxmltree::Node<'a, 'input>>,
    /// Reference targets currently being expanded.
    active_refs: Vec<roxmltree::NodeId>,
    nodes: Vec<Primitive>,
    warnings: Vec<ParseWarning>,
}

impl<'a, 'input> Extractor<'a, 'input> {
    fn extract_children(
        &mut self,
        parent: roxmltree::Node<'a, 'input>,
        transform: Affine,
        style: &Style,
    ) {
        for child in parent.children().filter(|n| n.is_element()) {
            self.extract_element(child, transform, style);
        }
    }

    fn extract_element(
        &mut self,
        node: roxmltree::Node<'a, 'input>,
        parent_transform: Affine,
        inherited: &Style,
    ) {
        let kind = ElementKind::of(node);
        if kind == ElementKind::Unknown {
            return;
        }

        let transform = self.element_transform(node, parent_transform);
        match kind {
            ElementKind::Group => {
                let style = inherited.inherit(&local_style(node, &mut self.warnings));
                self.extract_children(node, transform, &style);
            }
            // The target is styled from the reference's ancestry, not its own.
            ElementKind::Reference => self.extract_reference(node, transform, inherited),
            ElementKind::Path => {
                let style = inherited.inherit(&local_style(node, &mut self.warnings));
                self.extract_path(node, transform, style);
            }
            ElementKind::Rect => {
                let style = inherited.inherit(&local_style(node, &mut self.warnings));
                self.extract_rect(node, transform, style);
            }
            ElementKind::Unknown => {}
        }
    }

    /// `parent * transform-attribute * translate(x, y)`.
    fn element_transform(&mut self, node: roxmltree::Node<'a, 'input>, parent: Affine) -> Affine {
        let mut out = parent;
        if let Some(raw) = node.attribute("transform") {
            match parse_transform(raw) {
                Some(local) => out = out * local,
                None => {
                    tracing::warn!(value = raw, "invalid transform; using identity");
                    self.warnings.push(ParseWarning::InvalidTransform {
                        value: raw.to_string(),
                    });
                }
            }
        }
        let x = node.attribute("x").and_then(parse_length_px).unwrap_or(0.0);
        let y = node.attribute("y").and_then(parse_length_px).unwrap_or(0.0);
        if x != 0.0 || y != 0.0 {
            out = out * Affine::translate((x, y));
        }
        out
    }

    fn extract_reference(
        &mut self,
        node: roxmltree::Node<'a, 'input>,
        transform: Affine,
        inherited: &Style,
    ) {
        let href = href_raw(node);
        let Some(target) = href_id(node).and_then(|id| self.ids.get(id).copied()) else {
            tracing::warn!(href, "unresolved reference target");
            self.warnings.push(ParseWarning::UnresolvedReference {
                href: href.to_string(),
            });
            return;
        };
        if self.active_refs.contains(&target.id()) || node.ancestors().any(|a| a == target) {
            tracing::warn!(href, "reference cycle");
            self.warnings.push(ParseWarning::ReferenceCycle {
                href: href.to_string(),
            });
            return;
        }

        self.active_refs.push(target.id());
        self.extract_element(target, transform, inherited);
        self.active_refs.pop();
    }

    fn extract_path(&mut self, node: roxmltree::Node<'a, 'input>, transform: Affine, style: Style) {
        let id = node.attribute("id");
        let data = node.attribute("d").map(str::trim).unwrap_or("");
        if data.is_empty() {
            tracing::warn!(id = id.unwrap_or(""), "blank path data");
            self.warnings.push(ParseWarning::MissingPathData {
                id: id.unwrap_or("").to_string(),
            });
            return;
        }

        let bounds = match path_bounds(data) {
            Ok(b) => b,
            Err(reason) => {
                tracing::warn!(id = id.unwrap_or(""), %reason, "skipping path");
                self.warnings.push(ParseWarning::InvalidPathData {
                    id: id.unwrap_or("").to_string(),
                    reason,
                });
                return;
            }
        };

        let placed = transform * Affine::translate(bounds.center().to_vec2());
        self.nodes.push(
            Primitive::new(
                PrimitiveKind::Path {
                    data: data.to_string(),
                    bounds,
                },
                decompose_affine(placed),
                style,
            )
            .with_id(id),
        );
    }

    fn extract_rect(&mut self, node: roxmltree::Node<'a, 'input>, transform: Affine, style: Style) {
        let id = node.attribute("id");
        let dim = |name: &str| {
            node.attribute(name)
                .and_then(parse_length_px)
                .filter(|v| *v >= 0.0)
        };
        let (Some(width), Some(height)) = (dim("width"), dim("height")) else {
            tracing::warn!(id = id.unwrap_or(""), "rect without a valid width/height");
            self.warnings.push(ParseWarning::InvalidRectSize {
                id: id.unwrap_or("").to_string(),
            });
            return;
        };

        let placed = transform * Affine::translate((width / 2.0, height / 2.0));
        self.nodes.push(
            Primitive::new(
                PrimitiveKind::Rect { width, height },
                decompose_affine(placed),
                style,
            )
            .with_id(id),
        );
    }
}

/// Bounds of SVG path data in its own coordinate space.
pub fn path_bounds(data: &str) -> Result<Rect, String> {
    let path = BezPath::from_svg(data).map_err(|e| e.to_string())?;
    let bounds = path.bounding_box();
    if ![bounds.x0, bounds.y0, bounds.x1, bounds.y1]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err("path bounds are not finite".to_string());
    }
    Ok(bounds)
}

/// In-memory memo of parsed documents keyed by the exact markup string.
#[derive(Clone, Debug, Default)]
pub struct ParseCache {
    entries: HashMap<String, ParsedGraphic>,
    parse_count: usize,
}

impl ParseCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed graphic for `markup`, parsing it on first use. Failures are not cached.
    pub fn get_or_parse(&mut self, markup: &str) -> SvgMorphResult<ParsedGraphic> {
        if let Some(hit) = self.entries.get(markup) {
            return Ok(hit.clone());
        }
        let parsed = parse_svg(markup)?;
        self.parse_count += 1;
        self.entries.insert(markup.to_string(), parsed.clone());
        Ok(parsed)
    }

    /// Number of parses actually performed.
    pub fn parse_count(&self) -> usize {
        self.parse_count
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/parse.rs"]
mod tests;
