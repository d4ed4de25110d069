use crate::svg::fmt_path;

/// Horizontal cubic link between two `(depth, breadth)` points: both control points share the
/// horizontal midpoint, so the curve leaves and enters horizontally (d3 `linkHorizontal`).
pub fn link_horizontal(source: (f64, f64), target: (f64, f64)) -> String {
    let (x0, y0) = source;
    let (x1, y1) = target;
    let mx = (x0 + x1) / 2.0;
    format!(
        "M{},{}C{},{},{},{},{},{}",
        fmt_path(x0),
        fmt_path(y0),
        fmt_path(mx),
        fmt_path(y0),
        fmt_path(mx),
        fmt_path(y1),
        fmt_path(x1),
        fmt_path(y1),
    )
}
