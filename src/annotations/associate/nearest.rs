use super::{Association, LabelAssociator, sort_by_distance};
use crate::annotations::lines::ConnectorLine;
use crate::common::geometry::BoundingBox;

/// Top-K lines by closest endpoint to the label center.
#[derive(Debug, Clone, Copy)]
pub struct NearestAssociator {
    k: usize,
}

impl NearestAssociator {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    fn associate_one(&self, label: &BoundingBox, lines: &[ConnectorLine]) -> Association {
        let center = label.center();
        let near = |line: &ConnectorLine| {
            line.start_point
                .distance_squared_to(center)
                .min(line.end_point.distance_squared_to(center))
        };

        let mut ranked: Vec<&ConnectorLine> = lines.iter().collect();
        // stable: equal distances keep line order
        ranked.sort_by(|a, b| near(a).total_cmp(&near(b)));
        ranked.truncate(self.k);

        let mut target_regions: Vec<_> = ranked
            .iter()
            .map(|line| {
                if line.start_point.distance_squared_to(center) > line.end_point.distance_squared_to(center) {
                    line.start_point
                } else {
                    line.end_point
                }
            })
            .collect();
        sort_by_distance(&mut target_regions, center);
        Association {
            pointer_lines: ranked.into_iter().cloned().collect(),
            target_regions,
        }
    }
}

impl LabelAssociator for NearestAssociator {
    fn associate(&self, labels: &[BoundingBox], lines: &[ConnectorLine]) -> Vec<Association> {
        labels
            .iter()
            .map(|label| self.associate_one(label, lines))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::labels::ShapeBox;
    use crate::annotations::lines::{LineKind, LineStyleSummary};
    use crate::common::geometry::Point;

    fn line(n: usize, start: (i64, i64), end: (i64, i64)) -> ConnectorLine {
        ConnectorLine {
            line_id: format!("line_{n}"),
            kind: LineKind::Connector,
            start_point: Point::new(start.0, start.1),
            end_point: Point::new(end.0, end.1),
            style: LineStyleSummary {
                width: 0,
                arrow_head: "none".into(),
            },
            shape_id: n.to_string(),
            bbox: ShapeBox {
                x: 0,
                y: 0,
                width: 0,
                height: 0,
                rotation: 0,
            },
        }
    }

    #[test]
    fn test_top_k_with_far_endpoints() {
        // label centered at (50, 50)
        let label = BoundingBox::new(0, 0, 100, 100);
        let lines = vec![
            line(1, (5000, 5000), (6000, 6000)),
            line(2, (900, 50), (60, 50)),
            line(3, (50, 45), (50, 700)),
        ];
        let result = NearestAssociator::new(2).associate(&[label], &lines);
        let ids: Vec<_> = result[0].pointer_lines.iter().map(|l| l.line_id.as_str()).collect();
        assert_eq!(ids, ["line_3", "line_2"]);
        assert_eq!(result[0].target_regions, [Point::new(50, 700), Point::new(900, 50)]);
    }

    #[test]
    fn test_targets_ordered_by_distance_not_line_rank() {
        let label = BoundingBox::new(0, 0, 100, 100);
        let lines = vec![line(1, (60, 50), (5000, 50)), line(2, (70, 50), (300, 50))];
        let result = NearestAssociator::new(2).associate(&[label], &lines);
        let ids: Vec<_> = result[0].pointer_lines.iter().map(|l| l.line_id.as_str()).collect();
        assert_eq!(ids, ["line_1", "line_2"]);
        assert_eq!(result[0].target_regions, [Point::new(300, 50), Point::new(5000, 50)]);
    }

    #[test]
    fn test_fewer_lines_than_k() {
        let label = BoundingBox::new(0, 0, 10, 10);
        let lines = vec![line(1, (0, 0), (20, 20))];
        let result = NearestAssociator::new(5).associate(&[label, label], &lines);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].pointer_lines.len(), 1);
        assert!(NearestAssociator::new(2).associate(&[label], &[])[0].pointer_lines.is_empty());
    }
}
