use serde::{Deserialize, Serialize};

use crate::graphs::{records_by_id, Color, VertexId, VertexRecord, Weight};

/// Represents a path in a graph.
///
/// `vertices` runs from the source to the target, both included. `distance`
/// is the sum of the weights of every vertex but the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPath {
    pub vertices: Vec<VertexId>,
    pub distance: Weight,
}

impl MaxPath {
    /// The path recorded for a discovered vertex, `None` while its distance
    /// is unknown.
    pub fn of(record: &VertexRecord) -> Option<MaxPath> {
        if record.color == Color::White {
            return None;
        }
        let distance = record.distance.finite()?;

        let mut vertices = Vec::with_capacity(record.path.len() + 1);
        vertices.extend_from_slice(&record.path);
        vertices.push(record.id);

        Some(MaxPath { vertices, distance })
    }

    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
}

/// The heaviest path over all discovered vertices. Ties go to the smallest
/// target id.
pub fn heaviest_path(records: &[VertexRecord]) -> Option<MaxPath> {
    records
        .iter()
        .filter_map(|record| MaxPath::of(record).map(|path| (record.id, path)))
        .max_by(|(id_a, a), (id_b, b)| a.distance.cmp(&b.distance).then_with(|| id_b.cmp(id_a)))
        .map(|(_, path)| path)
}

/// Check if a path is consistent with the graph described by `records`.
pub fn validate_path(records: &[VertexRecord], path: &MaxPath) -> Result<(), String> {
    let index = records_by_id(records);

    if path.vertices.is_empty() {
        return Err("path is empty".to_string());
    }

    // check if there is an edge between consecutive path vertices.
    for pair in path.vertices.windows(2) {
        let (tail, head) = (pair[0], pair[1]);
        let tail_record = index
            .get(&tail)
            .ok_or_else(|| format!("vertex {} of path is unknown", tail))?;
        if !tail_record.edges.contains(&head) {
            return Err(format!("no edge between {} and {} found", tail, head));
        }
    }

    // check if total weight of path is correct.
    let mut true_distance: Weight = 0;
    for vertex in &path.vertices[..path.vertices.len() - 1] {
        let weight = index
            .get(vertex)
            .and_then(|record| record.weight.finite())
            .ok_or_else(|| format!("weight of vertex {} is unknown", vertex))?;
        true_distance = true_distance
            .checked_add(weight)
            .ok_or_else(|| "path weight overflows".to_string())?;
    }
    if true_distance != path.distance {
        return Err(format!(
            "wrong path weight: {} recorded, {} along the path",
            path.distance, true_distance
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{heaviest_path, validate_path, MaxPath};
    use crate::graphs::{Color, Measure, VertexRecord};

    fn diamond() -> Vec<VertexRecord> {
        let finalized = |id, weight, edges: Vec<u32>, distance, path: Vec<u32>| VertexRecord {
            id,
            weight: Measure::Finite(weight),
            edges,
            distance: Measure::Finite(distance),
            color: Color::Black,
            path,
        };
        vec![
            finalized(1, 5, vec![2, 3], 0, vec![]),
            finalized(2, 10, vec![4], 5, vec![1]),
            finalized(3, 12, vec![4], 5, vec![1]),
            finalized(4, 0, vec![], 17, vec![1, 3]),
        ]
    }

    #[test]
    fn heaviest_path_ends_in_the_sink() {
        let path = heaviest_path(&diamond()).unwrap();
        assert_eq!(path.vertices, vec![1, 3, 4]);
        assert_eq!(path.distance, 17);
        assert_eq!(path.target(), Some(4));
        assert_eq!(validate_path(&diamond(), &path), Ok(()));
    }

    #[test]
    fn undiscovered_vertices_have_no_path() {
        assert_eq!(MaxPath::of(&VertexRecord::undiscovered(2, 10, vec![])), None);
        assert_eq!(heaviest_path(&[VertexRecord::undiscovered(2, 10, vec![])]), None);
    }

    #[test]
    fn broken_paths_are_reported() {
        let records = diamond();
        let missing_edge = MaxPath {
            vertices: vec![1, 4],
            distance: 5,
        };
        assert!(validate_path(&records, &missing_edge).is_err());

        let wrong_weight = MaxPath {
            vertices: vec![1, 2, 4],
            distance: 17,
        };
        assert!(validate_path(&records, &wrong_weight).is_err());
    }
}
