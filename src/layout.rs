//! Proportional column layout.
//!
//! Turns aggregated frequency and transition tables into a positioned
//! node-and-edge graph: one column per byte offset, node heights
//! proportional to observed frequency, connectors between adjacent
//! columns at box edge midpoints.

use serde::Serialize;

use crate::aggregate::Aggregator;
use crate::classify::{self, ColorClass};
use crate::error::Result;

/// Fixed layout constants, derived from the target viewport.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Full viewport height the column stack is scaled into.
    pub viewport_height: f64,
    /// Fixed box width shared by every node.
    pub node_width: f64,
    /// Half the horizontal column pitch: column `o` sits at `o * 2 * pad_x`.
    pub pad_x: f64,
    /// Vertical gap between stacked boxes, also the top/bottom margin.
    pub pad_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_height: 1080.0,
            node_width: 200.0,
            pad_x: 150.0,
            pad_y: 20.0,
        }
    }
}

impl LayoutConfig {
    /// Height available to the proportional stack after fixed margins.
    pub fn available_height(&self) -> f64 {
        self.viewport_height - 2.0 * self.pad_y
    }
}

/// Axis-aligned model-space bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

impl Rect {
    /// Vertical midpoint.
    pub fn mid_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    /// Horizontal midpoint.
    pub fn mid_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }
}

/// Model-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A laid-out node: the immutable content record plus the bounding box
/// assigned once when its column is placed.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedNode {
    /// Byte offset this node's column represents.
    pub offset: usize,
    /// Observed slot value, `None` for the missing sentinel.
    pub value: Option<u8>,
    /// Number of records carrying this value at this offset.
    pub count: u64,
    /// Color class from the classifier.
    pub color: ColorClass,
    /// Display text, one component per line.
    pub label: String,
    /// Position, assigned exactly once.
    pub bbox: Rect,
}

/// All visible nodes laid out for one offset.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    /// Byte offset of this column.
    pub offset: usize,
    /// Sum of all value counts at the offset, missing included.
    pub total: u64,
    /// Placed nodes, top to bottom in ascending-count order.
    pub nodes: Vec<PlacedNode>,
}

/// A resolved connector between nodes in adjacent columns.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Connector {
    /// Midpoint of the source node's right edge.
    pub from: Point,
    /// Midpoint of the destination node's left edge.
    pub to: Point,
    /// Joint occurrence count for the value pair.
    pub count: u64,
}

/// The positioned graph handed to a render surface.
#[derive(Debug, Clone, Serialize)]
pub struct Graph {
    /// One column per byte offset, left to right.
    pub columns: Vec<Column>,
    /// Connectors between adjacent columns.
    pub edges: Vec<Connector>,
}

/// Builds the positioned graph for every offset of the aggregator's store.
///
/// Missing-sentinel entries keep their count in the column total (the
/// proportionality denominator) but produce no box and do not advance the
/// vertical cursor. Transition rows touching a missing value resolve to no
/// connector.
pub fn build(agg: &Aggregator<'_>, config: &LayoutConfig) -> Result<Graph> {
    let mut columns: Vec<Column> = Vec::with_capacity(agg.size());
    let mut edges = Vec::new();

    for offset in 0..agg.size() {
        let rows = agg.value_counts(offset)?;
        let total: u64 = rows.iter().map(|row| row.count).sum();
        let column = place_column(offset, total, &rows, config);

        if offset > 0 {
            let prev = &columns[offset - 1];
            for row in agg.transition_counts(offset - 1, offset)? {
                let (Some(from), Some(to)) = (row.from, row.to) else {
                    continue;
                };
                let src = prev.nodes.iter().find(|n| n.value == Some(from));
                let dst = column.nodes.iter().find(|n| n.value == Some(to));
                // Unresolvable endpoints are the steady-state case for
                // values that only ever co-occur with missing slots.
                if let (Some(src), Some(dst)) = (src, dst) {
                    edges.push(Connector {
                        from: Point {
                            x: src.bbox.x2,
                            y: src.bbox.mid_y(),
                        },
                        to: Point {
                            x: dst.bbox.x1,
                            y: dst.bbox.mid_y(),
                        },
                        count: row.count,
                    });
                }
            }
        }
        columns.push(column);
    }

    Ok(Graph { columns, edges })
}

fn place_column(
    offset: usize,
    total: u64,
    rows: &[crate::store::FreqRow],
    config: &LayoutConfig,
) -> Column {
    let x1 = offset as f64 * 2.0 * config.pad_x;
    let mut cursor = config.pad_y;
    let mut nodes = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(value) = row.value else {
            continue;
        };
        let height = row.count as f64 / total as f64 * config.available_height();
        let bbox = Rect {
            x1,
            y1: cursor,
            x2: x1 + config.node_width,
            y2: cursor + height,
        };
        nodes.push(PlacedNode {
            offset,
            value: Some(value),
            count: row.count,
            color: classify::classify(Some(value)),
            label: classify::label(Some(value)),
            bbox,
        });
        cursor += height + config.pad_y;
    }

    Column {
        offset,
        total,
        nodes,
    }
}
