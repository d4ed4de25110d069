use crate::config::{EdgeConfig, LegendConfig};
use crate::scene::{GroupPrimitive, Paint, Primitive, RectPrimitive, TextPrimitive};

pub const POSITIVE_LABEL: &str = "Positive contribution";
pub const NEGATIVE_LABEL: &str = "Negative contribution";

const LEGEND_SIZE: f64 = 100.0;
const SWATCH_X: f64 = 10.0;
const SWATCH_SIZE: f64 = 10.0;
const TEXT_X: f64 = 25.0;
const ROW_HEIGHT: f64 = 20.0;

pub fn legend_entries(edge: &EdgeConfig) -> [(&'static str, &str); 2] {
    [
        (POSITIVE_LABEL, edge.positive_color.as_str()),
        (NEGATIVE_LABEL, edge.negative_color.as_str()),
    ]
}

/// The fixed two-entry key. Depends only on configuration, never on tree data or surface size.
pub fn legend_primitives(legend: &LegendConfig, edge: &EdgeConfig) -> Vec<Primitive> {
    let entries = legend_entries(edge);
    let mut children = Vec::with_capacity(entries.len() * 2);

    for (i, (_, color)) in entries.iter().enumerate() {
        children.push(Primitive::Rect(RectPrimitive {
            x: SWATCH_X,
            y: i as f64 * ROW_HEIGHT,
            width: SWATCH_SIZE,
            height: SWATCH_SIZE,
            fill: Paint::Color((*color).to_string()),
        }));
    }
    for (i, (text, _)) in entries.iter().enumerate() {
        children.push(Primitive::Text(TextPrimitive {
            x: TEXT_X,
            y: i as f64 * ROW_HEIGHT + SWATCH_SIZE,
            dy_em: None,
            anchor: None,
            font_size: None,
            content: (*text).to_string(),
        }));
    }

    vec![Primitive::Group(GroupPrimitive {
        translate: (legend.x, legend.y),
        width: LEGEND_SIZE,
        height: LEGEND_SIZE,
        children,
    })]
}
