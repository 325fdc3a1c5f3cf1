#![allow(missing_docs)]

use std::io::Cursor;

use hexdag::aggregate::Aggregator;
use hexdag::ingest::{ingest, InputFormat};
use hexdag::layout::{self, LayoutConfig, Point};
use hexdag::render;
use hexdag::store::RecordStore;
use hexdag::view::{Viewport, ZOOM_IN_STEP};
use hexdag::Result;

fn build_graph(size: usize, lines: &str) -> Result<layout::Graph> {
    let store = RecordStore::open_in_memory(size)?;
    ingest(&store, InputFormat::HexLines, Cursor::new(lines))?;
    let agg = Aggregator::new(&store);
    layout::build(&agg, &LayoutConfig::default())
}

#[test]
fn svg_has_one_rect_per_visible_node_and_one_line_per_edge() -> Result<()> {
    // Offset 1 carries one missing entry that must not be drawn.
    let graph = build_graph(2, "0041\n0042\n00\n")?;
    let visible: usize = graph.columns.iter().map(|c| c.nodes.len()).sum();
    assert_eq!(visible, 3);
    assert_eq!(graph.edges.len(), 2);

    let svg = render::render_svg(&graph, &Viewport::default())?;
    // Background rect plus one per node.
    assert_eq!(svg.matches("<rect ").count(), visible + 1);
    assert_eq!(svg.matches("<line ").count(), graph.edges.len());
    Ok(())
}

#[test]
fn svg_fill_colors_follow_the_palette() -> Result<()> {
    let graph = build_graph(1, "00\n41\nd0\n")?;
    let svg = render::render_svg(&graph, &Viewport::default())?;
    assert!(svg.contains("fill=\"#000000\""));
    assert!(svg.contains("fill=\"#e0de71\""));
    assert!(svg.contains("fill=\"#44cf6e\""));
    Ok(())
}

#[test]
fn view_transform_scales_exported_geometry() -> Result<()> {
    let graph = build_graph(1, "41\n")?;
    let mut view = Viewport::default();
    view.zoom(Point { x: 0.0, y: 0.0 }, ZOOM_IN_STEP);

    let plain = render::render_svg(&graph, &Viewport::default())?;
    let zoomed = render::render_svg(&graph, &view)?;
    assert_ne!(plain, zoomed);

    let node = &graph.columns[0].nodes[0];
    let scaled_y = format!("y=\"{:.2}\"", node.bbox.y1 * ZOOM_IN_STEP);
    assert!(zoomed.contains(&scaled_y));
    Ok(())
}

#[test]
fn json_export_round_trips_the_graph_shape() -> Result<()> {
    let graph = build_graph(3, "0041ff\n0041\n0041ff\n")?;
    let mut buf = Vec::new();
    render::write_json(&mut buf, &graph)?;
    let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");

    assert_eq!(value["columns"].as_array().map(Vec::len), Some(3));
    assert!(value["edges"].as_array().is_some());
    let first = &value["columns"][0]["nodes"][0];
    assert_eq!(first["value"], 0);
    assert_eq!(first["color"], "black");
    Ok(())
}
