//! SVG serialization and a retained SVG [`DrawingSurface`].

use crate::scene::{Primitive, Role};
use crate::surface::DrawingSurface;
use indexmap::IndexMap;
use std::fmt::Write as _;

pub(crate) fn fmt(v: f64) -> String {
    // JS-like number strings for attributes (`Number#toString()`), without `-0` or float noise
    // from our own arithmetic. Only noise is snapped: opacities such as 0.9999995 stay as given.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-9 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

/// Path data coordinates: at most three fractional digits, rounded half-up (d3-path's
/// `Math.round(x * 1000) / 1000`).
pub(crate) fn fmt_path(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let r = (v * 1000.0 + 0.5).floor() / 1000.0;
    let s = format!("{r:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}

fn write_primitive(out: &mut String, role: Option<Role>, primitive: &Primitive) {
    let class = role
        .map(|r| format!(r#" class="{}""#, r.class_name()))
        .unwrap_or_default();

    match primitive {
        Primitive::Path(p) => {
            let _ = write!(
                out,
                r#"<path{class} d="{d}" fill="{fill}" stroke="{stroke}" stroke-dasharray="{dash}" stroke-width="{sw}" opacity="{opacity}"/>"#,
                d = escape_attr(&p.d),
                fill = escape_attr(p.fill.as_css()),
                stroke = escape_attr(&p.stroke),
                dash = fmt(p.dash),
                sw = fmt(p.stroke_width),
                opacity = fmt(p.opacity),
            );
        }
        Primitive::Circle(c) => {
            let _ = write!(
                out,
                r#"<circle{class} cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}" opacity="{opacity}"/>"#,
                cx = fmt(c.cx),
                cy = fmt(c.cy),
                r = fmt(c.r),
                fill = escape_attr(c.fill.as_css()),
                stroke = escape_attr(&c.stroke),
                sw = fmt(c.stroke_width),
                opacity = fmt(c.opacity),
            );
        }
        Primitive::Text(t) => {
            let _ = write!(out, r#"<text{class} x="{}" y="{}""#, fmt(t.x), fmt(t.y));
            if let Some(dy) = t.dy_em {
                let _ = write!(out, r#" dy="{}em""#, fmt(dy));
            }
            if let Some(anchor) = t.anchor {
                let _ = write!(out, r#" text-anchor="{}""#, anchor.as_css());
            }
            if let Some(size) = t.font_size {
                let _ = write!(out, r#" font-size="{}""#, fmt(size));
            }
            let _ = write!(out, ">{}</text>", escape_xml(&t.content));
        }
        Primitive::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect{class} x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
                x = fmt(r.x),
                y = fmt(r.y),
                w = fmt(r.width),
                h = fmt(r.height),
                fill = escape_attr(r.fill.as_css()),
            );
        }
        Primitive::Group(g) => {
            let _ = write!(
                out,
                r#"<svg{class} x="{x}" y="{y}" width="{w}" height="{h}">"#,
                x = fmt(g.translate.0),
                y = fmt(g.translate.1),
                w = fmt(g.width),
                h = fmt(g.height),
            );
            for child in &g.children {
                write_primitive(out, None, child);
            }
            out.push_str("</svg>");
        }
    }
}

/// Serializes one role's elements, each tagged with the role's class.
pub fn render_role_svg(role: Role, elements: &[Primitive]) -> String {
    let mut out = String::new();
    for primitive in elements {
        write_primitive(&mut out, Some(role), primitive);
    }
    out
}

/// Retained SVG document. Elements are kept per role in paint order (links under nodes under
/// labels under the legend).
#[derive(Debug, Clone)]
pub struct SvgSurface {
    id: Option<String>,
    extent: (f64, f64),
    roles: IndexMap<Role, Vec<Primitive>>,
    mutations: u64,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgSurface {
    pub fn new() -> Self {
        Self {
            id: None,
            extent: (0.0, 0.0),
            roles: Role::ALL.iter().map(|&r| (r, Vec::new())).collect(),
            mutations: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Number of surface writes so far (role replacements and extent changes).
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    pub fn elements(&self, role: Role) -> &[Primitive] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn element_count(&self) -> usize {
        self.roles.values().map(Vec::len).sum()
    }

    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        if let Some(id) = &self.id {
            let _ = write!(out, r#" id="{}""#, escape_attr(id));
        }
        let _ = write!(
            out,
            r#" width="{}" height="{}">"#,
            fmt(self.extent.0),
            fmt(self.extent.1)
        );
        for (role, elements) in &self.roles {
            out.push_str(&render_role_svg(*role, elements));
        }
        out.push_str("</svg>");
        out
    }
}

impl DrawingSurface for SvgSurface {
    fn replace_role(&mut self, role: Role, elements: &[Primitive]) {
        self.roles.insert(role, elements.to_vec());
        self.mutations += 1;
    }

    fn set_extent(&mut self, width: f64, height: f64) {
        self.extent = (width, height);
        self.mutations += 1;
    }
}
