//! Generation-based chart layout
//!
//! A pure function of the chart: nodes are grouped into rows by generation,
//! rows are placed along the generation axis in direction order, and each row
//! is centered on the canvas midline across the other axis.

use crate::config::Direction;
use crate::model::Chart;
use lineage_domain::{EdgeType, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Box and spacing sizes for layout
///
/// # Examples
///
/// ```
/// use lineage_chart::LayoutConfig;
///
/// let config = LayoutConfig::default();
/// assert_eq!(config.box_width, 180.0);
/// assert_eq!(config.width, 1200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Node box width
    pub box_width: f64,
    /// Node box height
    pub box_height: f64,
    /// Gap between boxes along X
    pub spacing_x: f64,
    /// Gap between boxes along Y
    pub spacing_y: f64,
    /// Offset of the first row from the canvas edge
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            box_width: 180.0,
            box_height: 100.0,
            spacing_x: 40.0,
            spacing_y: 60.0,
            margin: 50.0,
        }
    }
}

/// Side of a node box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top edge
    Top,
    /// Bottom edge
    Bottom,
    /// Left edge
    Left,
    /// Right edge
    Right,
}

/// Placed node box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeBox {
    /// Left
    pub x: f64,
    /// Top
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl NodeBox {
    /// Center point
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint of one side
    pub fn anchor(&self, side: Side) -> Anchor {
        let (cx, cy) = self.center();
        let (x, y) = match side {
            Side::Top => (cx, self.y),
            Side::Bottom => (cx, self.y + self.height),
            Side::Left => (self.x, cy),
            Side::Right => (self.x + self.width, cy),
        };
        Anchor { x, y, side }
    }
}

/// Edge endpoint on a box side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// X
    pub x: f64,
    /// Y
    pub y: f64,
    /// Box side the point sits on
    pub side: Side,
}

/// Endpoints of one chart edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    /// Source person
    pub from: PersonId,
    /// Target person
    pub to: PersonId,
    /// Link kind
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Start on the source box
    pub start: Anchor,
    /// End on the target box
    pub end: Anchor,
}

/// Extent of all placed boxes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Leftmost X
    pub min_x: f64,
    /// Topmost Y
    pub min_y: f64,
    /// Rightmost X
    pub max_x: f64,
    /// Bottommost Y
    pub max_y: f64,
}

/// Positions for a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Direction the layout was computed for
    pub direction: Direction,
    /// Box per node
    pub boxes: BTreeMap<PersonId, NodeBox>,
    /// Anchors per edge, in chart edge order
    pub edges: Vec<EdgeLayout>,
    /// Extent of the boxes
    pub bounds: Bounds,
}

/// Lay out a chart
///
/// Generations sort ascending (the focal person above or left of their
/// ancestors) and reverse for bottom-to-top and right-to-left charts.
/// Vertical directions put the generation on Y and spread a row along X;
/// horizontal directions swap the axes. Rows differ in width, so each is
/// centered on its own.
pub fn layout(chart: &Chart, config: &LayoutConfig) -> Layout {
    let direction = chart.direction;
    let mut rows: Vec<Vec<PersonId>> = chart.generations().into_values().collect();
    if direction.is_reversed() {
        rows.reverse();
    }

    let step_x = config.box_width + config.spacing_x;
    let step_y = config.box_height + config.spacing_y;

    let mut boxes = BTreeMap::new();
    for (row_index, row) in rows.iter().enumerate() {
        let count = row.len() as f64;
        for (i, id) in row.iter().enumerate() {
            let (row_pos, i) = (row_index as f64, i as f64);
            let (x, y) = if direction.is_vertical() {
                let center_x = config.width / 2.0 - (count - 1.0) * step_x / 2.0 + i * step_x;
                (center_x - config.box_width / 2.0, config.margin + row_pos * step_y)
            } else {
                let center_y = config.height / 2.0 - (count - 1.0) * step_y / 2.0 + i * step_y;
                (config.margin + row_pos * step_x, center_y - config.box_height / 2.0)
            };
            boxes.insert(
                *id,
                NodeBox {
                    x,
                    y,
                    width: config.box_width,
                    height: config.box_height,
                },
            );
        }
    }

    let edges = chart
        .edges
        .iter()
        .filter_map(|edge| {
            let from = boxes.get(&edge.from)?;
            let to = boxes.get(&edge.to)?;
            let (start, end) = anchor_sides(edge.edge_type, direction, from, to);
            Some(EdgeLayout {
                from: edge.from,
                to: edge.to,
                edge_type: edge.edge_type,
                start: from.anchor(start),
                end: to.anchor(end),
            })
        })
        .collect();

    let bounds = bounds(boxes.values());
    Layout {
        direction,
        boxes,
        edges,
        bounds,
    }
}

/// Facing sides of two boxes
///
/// Parent-child links connect across the generation axis; spouse links
/// connect along the row. `stacked` means the two boxes are compared on Y.
fn anchor_sides(edge_type: EdgeType, direction: Direction, from: &NodeBox, to: &NodeBox) -> (Side, Side) {
    let stacked = match edge_type {
        EdgeType::ParentChild => direction.is_vertical(),
        EdgeType::Spouse => !direction.is_vertical(),
    };
    let (from_x, from_y) = from.center();
    let (to_x, to_y) = to.center();

    if stacked {
        if from_y <= to_y {
            (Side::Bottom, Side::Top)
        } else {
            (Side::Top, Side::Bottom)
        }
    } else if from_x <= to_x {
        (Side::Right, Side::Left)
    } else {
        (Side::Left, Side::Right)
    }
}

fn bounds<'a>(boxes: impl Iterator<Item = &'a NodeBox>) -> Bounds {
    boxes
        .fold(None, |acc: Option<Bounds>, b| {
            let next = Bounds {
                min_x: b.x,
                min_y: b.y,
                max_x: b.x + b.width,
                max_y: b.y + b.height,
            };
            Some(match acc {
                None => next,
                Some(acc) => Bounds {
                    min_x: acc.min_x.min(next.min_x),
                    min_y: acc.min_y.min(next.min_y),
                    max_x: acc.max_x.max(next.max_x),
                    max_y: acc.max_y.max(next.max_y),
                },
            })
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> NodeBox {
        NodeBox {
            x: 100.0,
            y: 50.0,
            width: 180.0,
            height: 100.0,
        }
    }

    #[test]
    fn test_anchor_points() {
        let b = cell();
        assert_eq!(b.anchor(Side::Top), Anchor { x: 190.0, y: 50.0, side: Side::Top });
        assert_eq!(b.anchor(Side::Bottom), Anchor { x: 190.0, y: 150.0, side: Side::Bottom });
        assert_eq!(b.anchor(Side::Left), Anchor { x: 100.0, y: 100.0, side: Side::Left });
        assert_eq!(b.anchor(Side::Right), Anchor { x: 280.0, y: 100.0, side: Side::Right });
    }

    #[test]
    fn test_anchor_sides_face_each_other() {
        let upper = cell();
        let lower = NodeBox { y: 210.0, ..cell() };
        let right = NodeBox { x: 320.0, ..cell() };
        let vertical = Direction::TopToBottom;

        assert_eq!(
            anchor_sides(EdgeType::ParentChild, vertical, &upper, &lower),
            (Side::Bottom, Side::Top)
        );
        assert_eq!(
            anchor_sides(EdgeType::ParentChild, Direction::BottomToTop, &lower, &upper),
            (Side::Top, Side::Bottom)
        );
        assert_eq!(
            anchor_sides(EdgeType::Spouse, vertical, &right, &upper),
            (Side::Left, Side::Right)
        );
        assert_eq!(
            anchor_sides(EdgeType::ParentChild, Direction::LeftToRight, &upper, &right),
            (Side::Right, Side::Left)
        );
        assert_eq!(
            anchor_sides(EdgeType::Spouse, Direction::LeftToRight, &upper, &lower),
            (Side::Bottom, Side::Top)
        );
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(bounds(std::iter::empty()), Bounds::default());
    }
}
