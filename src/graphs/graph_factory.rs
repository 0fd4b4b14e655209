use std::{fs, path::Path};

use rand::Rng;

use super::{VertexId, VertexRecord, Weight};
use crate::error::SearchError;

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    /// Reads a number triangle, one row per line, row `r` holding `r` numbers.
    pub fn from_triangle_file(path: &Path) -> Result<Vec<VertexRecord>, SearchError> {
        let text = fs::read_to_string(path)?;
        let rows = Self::parse_triangle(&text)?;
        Ok(Self::from_triangle_rows(&rows))
    }

    pub fn parse_triangle(text: &str) -> Result<Vec<Vec<Weight>>, SearchError> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(row, line)| {
                let numbers = line
                    .split_whitespace()
                    .map(|number| {
                        number.parse::<Weight>().map_err(|_| {
                            SearchError::malformed(None, line, format!("{:?} is not a number", number))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if numbers.len() != row + 1 {
                    return Err(SearchError::malformed(
                        None,
                        line,
                        format!("row {} holds {} numbers", row + 1, numbers.len()),
                    ));
                }
                Ok(numbers)
            })
            .collect()
    }

    /// Builds the initial graph of a number triangle.
    ///
    /// Vertices are numbered row by row starting at 1. Every vertex points to
    /// the two vertices below it and the last row points to an extra
    /// zero-weight sink, so the sink's distance is the heaviest top to bottom
    /// sum. The apex is the gray source.
    pub fn from_triangle_rows(rows: &[Vec<Weight>]) -> Vec<VertexRecord> {
        if rows.is_empty() {
            return Vec::new();
        }

        let row_start = |row: usize| (row * (row + 1) / 2 + 1) as VertexId;
        let sink = row_start(rows.len());

        let mut records = Vec::with_capacity(sink as usize);
        for (row, weights) in rows.iter().enumerate() {
            for (position, &weight) in weights.iter().enumerate() {
                let id = row_start(row) + position as VertexId;
                let edges = if row + 1 < rows.len() {
                    let below = row_start(row + 1) + position as VertexId;
                    vec![below, below + 1]
                } else {
                    vec![sink]
                };

                if id == 1 {
                    records.push(VertexRecord::source(id, weight, edges));
                } else {
                    records.push(VertexRecord::undiscovered(id, weight, edges));
                }
            }
        }
        records.push(VertexRecord::undiscovered(sink, 0, Vec::new()));

        records
    }

    pub fn random_triangle_rows<R: Rng>(
        rows: u32,
        max_weight: Weight,
        rng: &mut R,
    ) -> Vec<Vec<Weight>> {
        (0..rows)
            .map(|row| (0..=row).map(|_| rng.gen_range(0..=max_weight)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::GraphFactory;
    use crate::graphs::{Color, Measure};

    #[test]
    fn triangle_is_wired_row_by_row() {
        let rows = GraphFactory::parse_triangle("21\n10 13\n45 21 32\n").unwrap();
        let records = GraphFactory::from_triangle_rows(&rows);

        let edges = records
            .iter()
            .map(|record| (record.id, record.edges.clone()))
            .collect::<Vec<_>>();
        assert_eq!(
            edges,
            vec![
                (1, vec![2, 3]),
                (2, vec![4, 5]),
                (3, vec![5, 6]),
                (4, vec![7]),
                (5, vec![7]),
                (6, vec![7]),
                (7, vec![]),
            ]
        );

        assert_eq!(records[0].color, Color::Gray);
        assert_eq!(records[0].distance, Measure::Finite(0));
        assert!(records[1..].iter().all(|record| record.color == Color::White));
        assert_eq!(records[6].weight, Measure::Finite(0));
    }

    #[test]
    fn ragged_triangles_are_rejected() {
        assert!(GraphFactory::parse_triangle("1\n2 3 4\n").is_err());
        assert!(GraphFactory::parse_triangle("1\n2 x\n").is_err());
    }

    #[test]
    fn random_triangles_have_growing_rows() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = GraphFactory::random_triangle_rows(5, 9, &mut rng);
        assert_eq!(rows.len(), 5);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), index + 1);
            assert!(row.iter().all(|&weight| (0..=9).contains(&weight)));
        }
    }
}
