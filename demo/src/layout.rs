//! Screen placement of the graph's nodes.

use beamroute_search::{Error, Graph, NodeId};
use beamroute_ui::Point;

/// Screen positions for the reference graph, keyed by label. The graph area
/// spans rows 4..=20 of an 80x24 screen.
pub const REFERENCE_LAYOUT: [(&str, Point); 7] = [
    ("me", Point::new(9, 12)),
    ("B", Point::new(27, 7)),
    ("C", Point::new(27, 17)),
    ("D", Point::new(44, 5)),
    ("E", Point::new(44, 14)),
    ("F", Point::new(60, 17)),
    ("you", Point::new(66, 9)),
];

/// Where each node of a graph is drawn, indexed by [`NodeId`].
#[derive(Clone, Debug)]
pub struct Layout {
    centers: Vec<Point>,
    labels: Vec<String>,
}

impl Layout {
    /// Place every node of `graph` using the `(label, center)` table.
    /// Fails with `UnknownNode` for a graph node the table does not place.
    pub fn new(graph: &Graph, table: &[(&str, Point)]) -> Result<Self, Error> {
        let mut centers = Vec::with_capacity(graph.len());
        let mut labels = Vec::with_capacity(graph.len());
        for id in graph.nodes() {
            let label = graph.label(id)?;
            let center = table
                .iter()
                .find(|(l, _)| *l == label)
                .map(|&(_, p)| p)
                .ok_or_else(|| Error::UnknownNode(label.to_owned()))?;
            centers.push(center);
            labels.push(label.to_owned());
        }
        Ok(Self { centers, labels })
    }

    pub fn center(&self, node: NodeId) -> Point {
        self.centers[node.index()]
    }

    /// The text drawn for a node, e.g. `(me)`.
    pub fn badge(&self, node: NodeId) -> String {
        format!("({})", self.labels[node.index()])
    }

    /// Left end of the node's badge.
    pub fn badge_origin(&self, node: NodeId) -> Point {
        let w = self.badge(node).chars().count() as i32;
        self.center(node).shift(-(w / 2), 0)
    }

    /// The node whose badge is under `p`, if any. A row above or below the
    /// badge also counts, so clicks need not be exact.
    pub fn hit(&self, p: Point) -> Option<NodeId> {
        (0..self.centers.len()).map(|i| NodeId(i as u32)).find(|&n| {
            let origin = self.badge_origin(n);
            let w = self.badge(n).chars().count() as i32;
            (p.y - origin.y).abs() <= 1 && p.x >= origin.x && p.x < origin.x + w
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_places_every_node() {
        let g = Graph::reference();
        let layout = Layout::new(&g, &REFERENCE_LAYOUT).unwrap();
        let me = g.node("me").unwrap();
        assert_eq!(layout.center(me), Point::new(9, 12));
        assert_eq!(layout.badge(me), "(me)");
        assert_eq!(layout.badge_origin(me), Point::new(7, 12));
    }

    #[test]
    fn missing_entry_is_reported() {
        let g = Graph::reference();
        let err = Layout::new(&g, &REFERENCE_LAYOUT[..3]).unwrap_err();
        assert_eq!(err, Error::UnknownNode("D".into()));
    }

    #[test]
    fn hit_accepts_badge_and_neighbouring_rows() {
        let g = Graph::reference();
        let layout = Layout::new(&g, &REFERENCE_LAYOUT).unwrap();
        let you = g.node("you").unwrap();
        // "(you)" spans x 64..=68 on row 9.
        assert_eq!(layout.hit(Point::new(64, 9)), Some(you));
        assert_eq!(layout.hit(Point::new(68, 10)), Some(you));
        assert_eq!(layout.hit(Point::new(69, 9)), None);
        assert_eq!(layout.hit(Point::new(66, 11)), None);
    }
}
