#![allow(missing_docs)]

use std::io::Cursor;

use hexdag::aggregate::Aggregator;
use hexdag::ingest::{ingest, InputFormat};
use hexdag::layout::{self, LayoutConfig};
use hexdag::store::RecordStore;
use hexdag::Result;

fn build_graph(size: usize, lines: &str) -> Result<layout::Graph> {
    let store = RecordStore::open_in_memory(size)?;
    ingest(&store, InputFormat::HexLines, Cursor::new(lines))?;
    let agg = Aggregator::new(&store);
    layout::build(&agg, &LayoutConfig::default())
}

#[test]
fn one_column_per_offset_even_when_empty() -> Result<()> {
    let graph = build_graph(4, "")?;
    assert_eq!(graph.columns.len(), 4);
    assert!(graph.columns.iter().all(|c| c.nodes.is_empty()));
    assert!(graph.edges.is_empty());
    Ok(())
}

#[test]
fn edges_exist_only_for_fully_present_transitions() -> Result<()> {
    // Two records: 00 41 and a short 00 whose second slot is missing.
    let graph = build_graph(2, "0041\n00\n")?;

    assert_eq!(graph.edges.len(), 1);
    let edge = graph.edges[0];
    assert_eq!(edge.count, 1);

    let src = &graph.columns[0].nodes[0];
    let dst = &graph.columns[1].nodes[0];
    assert_eq!(src.value, Some(0x00));
    assert_eq!(dst.value, Some(0x41));
    assert!((edge.from.x - src.bbox.x2).abs() < 1e-9);
    assert!((edge.from.y - src.bbox.mid_y()).abs() < 1e-9);
    assert!((edge.to.x - dst.bbox.x1).abs() < 1e-9);
    assert!((edge.to.y - dst.bbox.mid_y()).abs() < 1e-9);
    Ok(())
}

#[test]
fn missing_nodes_are_not_drawn_but_keep_their_mass() -> Result<()> {
    let config = LayoutConfig::default();
    // Offset 1 sees 0x41 twice and missing twice.
    let graph = build_graph(2, "0041\n0041\n00\n00\n")?;

    let column = &graph.columns[1];
    assert_eq!(column.total, 4);
    assert_eq!(column.nodes.len(), 1);
    let node = &column.nodes[0];
    assert_eq!(node.value, Some(0x41));
    let height = node.bbox.y2 - node.bbox.y1;
    assert!((height - config.available_height() / 2.0).abs() < 1e-9);
    assert!((node.bbox.y1 - config.pad_y).abs() < 1e-9);
    Ok(())
}

#[test]
fn stack_order_follows_ascending_counts() -> Result<()> {
    // Offset 0: 0xAA three times, 0xBB once.
    let graph = build_graph(1, "aa\naa\naa\nbb\n")?;
    let nodes = &graph.columns[0].nodes;
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].value, Some(0xBB));
    assert_eq!(nodes[1].value, Some(0xAA));
    assert!(nodes[0].bbox.y2 < nodes[1].bbox.y1, "stacked top to bottom");
    Ok(())
}

#[test]
fn column_pitch_and_box_width_are_fixed() -> Result<()> {
    let config = LayoutConfig::default();
    let graph = build_graph(3, "0041ff\n")?;
    for (offset, column) in graph.columns.iter().enumerate() {
        let node = &column.nodes[0];
        assert!((node.bbox.x1 - offset as f64 * 2.0 * config.pad_x).abs() < 1e-9);
        assert!((node.bbox.x2 - node.bbox.x1 - config.node_width).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn node_colors_and_labels_come_from_classifier() -> Result<()> {
    let graph = build_graph(1, "41\n")?;
    let node = &graph.columns[0].nodes[0];
    assert_eq!(node.color, hexdag::classify::ColorClass::Yellow);
    assert_eq!(node.label, "65\n41\n01000001\nA");
    Ok(())
}

#[test]
fn transition_counts_aggregate_duplicate_pairs_into_one_edge() -> Result<()> {
    let graph = build_graph(2, "0041\n0041\n0042\n")?;
    assert_eq!(graph.edges.len(), 2);
    let mut counts: Vec<u64> = graph.edges.iter().map(|e| e.count).collect();
    counts.sort_unstable();
    assert_eq!(counts, vec![1, 2]);
    Ok(())
}
