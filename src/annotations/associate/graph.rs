use super::{Association, LabelAssociator, sort_by_distance};
use crate::annotations::lines::ConnectorLine;
use crate::common::geometry::{BoundingBox, Point};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Undirected graph of lines joined at grid-snapped endpoints.
///
/// Endpoints closer than the snap cell collapse into one junction node.
/// Edges are identified by the index of their line.
#[derive(Debug, Clone)]
pub struct JunctionGraph {
    nodes: Vec<Point>,
    /// `(neighbour node, line index)` per node
    adjacency: Vec<SmallVec<[(usize, usize); 4]>>,
    edge_count: usize,
}

/// Result of following lines out of one label.
#[derive(Debug, Clone)]
pub struct Traversal {
    /// Lines walked, by index
    pub edges: FixedBitSet,
    /// Dangling ends reached outside the label, one per junction
    pub terminals: Vec<Point>,
}

impl JunctionGraph {
    pub fn build(lines: &[ConnectorLine], snap: i64) -> Self {
        let mut index: HashMap<Point, usize> = HashMap::new();
        let mut graph = Self {
            nodes: Vec::new(),
            adjacency: Vec::new(),
            edge_count: lines.len(),
        };
        let mut node = |graph: &mut Self, p: Point| {
            let key = p.snapped(snap);
            *index.entry(key).or_insert_with(|| {
                graph.nodes.push(key);
                graph.adjacency.push(SmallVec::new());
                graph.nodes.len() - 1
            })
        };

        for (edge, line) in lines.iter().enumerate() {
            let u = node(&mut graph, line.start_point);
            let v = node(&mut graph, line.end_point);
            graph.adjacency[u].push((v, edge));
            graph.adjacency[v].push((u, edge));
        }
        graph
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of line ends meeting at a node. A zero-length line counts twice.
    #[inline]
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Walk everything reachable from the nodes inside the padded label box.
    ///
    /// A visited node of degree 0 or 1 that is itself outside the padded box
    /// is a terminal.
    pub fn follow(&self, label: &BoundingBox, padding: i64) -> Traversal {
        let inside = |node: usize| label.contains_padded(self.nodes[node], padding);
        let mut stack: Vec<usize> = (0..self.nodes.len()).filter(|&n| inside(n)).collect();
        let mut visited = FixedBitSet::with_capacity(self.nodes.len());
        let mut edges = FixedBitSet::with_capacity(self.edge_count);
        let mut terminals = Vec::new();

        while let Some(current) = stack.pop() {
            if visited.put(current) {
                continue;
            }
            for &(next, edge) in &self.adjacency[current] {
                edges.insert(edge);
                if !visited.contains(next) {
                    stack.push(next);
                }
            }
            if self.degree(current) <= 1 && !inside(current) {
                terminals.push(self.nodes[current]);
            }
        }
        Traversal { edges, terminals }
    }
}

/// Follows white lines from each label to their dangling ends.
#[derive(Debug, Clone, Copy)]
pub struct GraphAssociator {
    padding: i64,
    snap: i64,
}

impl GraphAssociator {
    /// `snap` below 1 disables merging.
    pub fn new(padding: i64, snap: i64) -> Self {
        Self {
            padding,
            snap: snap.max(1),
        }
    }
}

impl LabelAssociator for GraphAssociator {
    fn associate(&self, labels: &[BoundingBox], lines: &[ConnectorLine]) -> Vec<Association> {
        let graph = JunctionGraph::build(lines, self.snap);
        labels
            .iter()
            .map(|label| {
                let Traversal {
                    edges,
                    mut terminals,
                } = graph.follow(label, self.padding);

                let mut pointer_lines: Vec<ConnectorLine> =
                    edges.ones().map(|edge| lines[edge].clone()).collect();
                pointer_lines.sort_by_key(|line| (line.numeric_shape_id(), line.ordinal()));
                sort_by_distance(&mut terminals, label.center());

                Association {
                    pointer_lines,
                    target_regions: terminals,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::labels::ShapeBox;
    use crate::annotations::lines::{LineKind, LineStyleSummary};
    use proptest::prelude::*;

    fn line(n: usize, shape_id: &str, start: (i64, i64), end: (i64, i64)) -> ConnectorLine {
        ConnectorLine {
            line_id: format!("line_{n}"),
            kind: LineKind::Line,
            start_point: Point::new(start.0, start.1),
            end_point: Point::new(end.0, end.1),
            style: LineStyleSummary {
                width: 9525,
                arrow_head: "none".into(),
            },
            shape_id: shape_id.into(),
            bbox: ShapeBox {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
                rotation: 0,
            },
        }
    }

    fn label() -> BoundingBox {
        BoundingBox::new(0, 0, 1000, 400)
    }

    #[test]
    fn test_three_collinear_lines_single_terminal() {
        // ends jittered around the 16000 grid; snap merges them into junctions
        let lines = vec![
            line(1, "11", (1000, 200), (16100, 200)),
            line(2, "12", (16000, 200), (32050, 200)),
            line(3, "13", (31990, 200), (48000, 200)),
        ];
        let result = GraphAssociator::new(4000, 8000).associate(&[label()], &lines);
        assert_eq!(result[0].target_regions, [Point::new(48000, 0)]);
        assert_eq!(result[0].pointer_lines.len(), 3);

        let graph = JunctionGraph::build(&lines, 8000);
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_exact_junctions_without_snapping() {
        let lines = vec![
            line(1, "11", (1000, 200), (16000, 200)),
            line(2, "12", (16000, 200), (32000, 200)),
            line(3, "13", (32000, 200), (48000, 200)),
        ];
        let result = GraphAssociator::new(4000, 0).associate(&[label()], &lines);
        assert_eq!(result[0].target_regions, [Point::new(48000, 200)]);
    }

    #[test]
    fn test_branches_sorted_by_distance() {
        let lines = vec![
            line(1, "20", (500, 400), (500, 40000)),
            line(2, "5", (500, 40000), (90000, 40000)),
            line(3, "7", (500, 40000), (500, 60000)),
        ];
        let result = GraphAssociator::new(4000, 8000).associate(&[label()], &lines);
        assert_eq!(result[0].target_regions, [Point::new(0, 64000), Point::new(88000, 40000)]);
        let ids: Vec<_> = result[0].pointer_lines.iter().map(|l| l.shape_id.as_str()).collect();
        assert_eq!(ids, ["5", "7", "20"]);
    }

    #[test]
    fn test_label_without_nodes_gets_nothing() {
        let lines = vec![line(1, "1", (100_000, 0), (200_000, 0))];
        let result = GraphAssociator::new(4000, 8000).associate(&[label()], &lines);
        assert_eq!(result[0], Association::default());
    }

    #[test]
    fn test_ends_inside_label_are_not_terminals() {
        // a line lying entirely within the padded label box
        let lines = vec![line(1, "1", (0, 0), (900, 300))];
        let result = GraphAssociator::new(4000, 1).associate(&[label()], &lines);
        assert!(result[0].target_regions.is_empty());
        assert_eq!(result[0].pointer_lines.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_chain_has_one_terminal(
            segments in 1usize..8,
            jitter in proptest::collection::vec(-2000i64..2000, 16),
        ) {
            let lines: Vec<_> = (0..segments)
                .map(|i| {
                    let from = if i == 0 { 1000 } else { 16000 * i as i64 + jitter[2 * i] };
                    let to = 16000 * (i as i64 + 1) + jitter[2 * i + 1];
                    line(i + 1, "1", (from, 200), (to, 200))
                })
                .collect();
            let result = GraphAssociator::new(4000, 8000).associate(&[label()], &lines);
            prop_assert_eq!(result[0].target_regions.len(), 1);
            prop_assert_eq!(result[0].target_regions[0], Point::new(16000 * segments as i64, 0));
            prop_assert_eq!(result[0].pointer_lines.len(), segments);
        }
    }
}
