//! Static export of a laid-out graph.
//!
//! Realizes the render-surface contract without a window: the SVG writer
//! draws one rect per node and one line per connector through the current
//! view transform, and the JSON writer dumps the graph model verbatim.

use std::io::Write;

use crate::error::Result;
use crate::layout::Graph;
use crate::view::Viewport;

const FONT_SIZE: f64 = 11.0;
const EDGE_STROKE: &str = "#888888";

/// Writes the graph as a standalone SVG document.
pub fn write_svg<W: Write>(out: &mut W, graph: &Graph, view: &Viewport) -> Result<()> {
    let (width, height) = extents(graph, view);
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
         viewBox=\"0 0 {width:.0} {height:.0}\">"
    )?;
    writeln!(out, "  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;

    // Connectors first so boxes draw over their endpoints.
    for edge in &graph.edges {
        let from = view.to_screen_point(edge.from);
        let to = view.to_screen_point(edge.to);
        let stroke_width = (1.0 + (edge.count as f64).ln()) * view.scale;
        writeln!(
            out,
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" \
             stroke=\"{EDGE_STROKE}\" stroke-width=\"{:.2}\"/>",
            from.x, from.y, to.x, to.y, stroke_width
        )?;
    }

    for column in &graph.columns {
        for node in &column.nodes {
            let r = view.to_screen_rect(&node.bbox);
            writeln!(
                out,
                "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
                 fill=\"{}\" stroke=\"black\"/>",
                r.x1,
                r.y1,
                r.x2 - r.x1,
                r.y2 - r.y1,
                node.color.hex()
            )?;
            write_label(out, node.bbox.mid_x(), node.bbox.mid_y(), &node.label, view)?;
        }
    }

    writeln!(out, "</svg>")?;
    Ok(())
}

/// Writes the graph model as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, graph: &Graph) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, graph)?;
    writeln!(out)?;
    Ok(())
}

/// Renders the SVG document into a string.
pub fn render_svg(graph: &Graph, view: &Viewport) -> Result<String> {
    let mut buf = Vec::new();
    write_svg(&mut buf, graph, view)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_label<W: Write>(
    out: &mut W,
    model_x: f64,
    model_y: f64,
    label: &str,
    view: &Viewport,
) -> Result<()> {
    let center = view.to_screen_point(crate::layout::Point {
        x: model_x,
        y: model_y,
    });
    let font = FONT_SIZE * view.scale;
    let lines: Vec<&str> = label.lines().collect();
    let first_dy = -(lines.len().saturating_sub(1) as f64) * font / 2.0;
    writeln!(
        out,
        "  <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{font:.2}\" font-family=\"monospace\" \
         text-anchor=\"middle\">",
        center.x, center.y
    )?;
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { first_dy } else { font };
        writeln!(
            out,
            "    <tspan x=\"{:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            center.x,
            escape_xml(line)
        )?;
    }
    writeln!(out, "  </text>")?;
    Ok(())
}

/// Escapes markup characters and substitutes `.` for control characters,
/// which are not legal XML text.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c if c.is_control() => escaped.push('.'),
            c => escaped.push(c),
        }
    }
    escaped
}

fn extents(graph: &Graph, view: &Viewport) -> (f64, f64) {
    let mut width: f64 = 1.0;
    let mut height: f64 = 1.0;
    for column in &graph.columns {
        for node in &column.nodes {
            let r = view.to_screen_rect(&node.bbox);
            width = width.max(r.x2);
            height = height.max(r.y2);
        }
    }
    for edge in &graph.edges {
        let to = view.to_screen_point(edge.to);
        width = width.max(to.x);
        height = height.max(to.y);
    }
    (width + 1.0, height + 1.0)
}
