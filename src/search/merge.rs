use super::{counters::RoundCounters, MergeFunction};
use crate::{
    error::SearchError,
    graphs::{Color, Measure, VertexId, VertexRecord},
};

/// Max-plus relaxation of all records emitted for one vertex in a round.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxPathMerge;

impl MergeFunction for MaxPathMerge {
    fn merge(
        &self,
        id: VertexId,
        group: &[VertexRecord],
        counters: &RoundCounters,
    ) -> Result<VertexRecord, SearchError> {
        let merged = merge_group(id, group)?;

        // every gray candidate beyond the one that keeps the vertex in the
        // frontier was already counted as discovered
        let gray = group
            .iter()
            .filter(|record| record.color == Color::Gray)
            .count() as u64;
        let coalesced = match merged.color {
            Color::Gray => gray.saturating_sub(1),
            Color::Black => gray,
            Color::White => 0,
        };
        if coalesced > 0 {
            counters.coalesce(coalesced);
        }

        Ok(merged)
    }
}

/// Collapses `group` into one record.
///
/// Weight and distance are the maxima of the group and the edges come from
/// the first record that has any. The color is the darkest one seen. The
/// path belongs to the first gray or black record reaching the maximum
/// distance; if the maximum is only held by white records, the first gray or
/// black record seen afterwards supplies the path instead. This makes the
/// path choice depend on the order of the group when distances tie.
pub fn merge_group(id: VertexId, group: &[VertexRecord]) -> Result<VertexRecord, SearchError> {
    if group.is_empty() {
        return Err(SearchError::GroupIntegrity {
            expected: id,
            reason: "empty group".to_string(),
        });
    }

    let mut weight = Measure::Infinite;
    let mut edges: Option<&[VertexId]> = None;
    let mut distance = Measure::Infinite;
    let mut max_distance_color = Color::White;
    let mut path: &[VertexId] = &[];
    let mut color = Color::White;

    for record in group {
        if record.id != id {
            return Err(SearchError::GroupIntegrity {
                expected: id,
                reason: format!("contains a record of vertex {}", record.id),
            });
        }

        weight = weight.max(record.weight);

        if edges.is_none() && !record.edges.is_empty() {
            edges = Some(record.edges.as_slice());
        }

        if record.distance > distance {
            distance = record.distance;
            if record.color.is_discovered() {
                path = record.path.as_slice();
            }
            max_distance_color = record.color;
        } else if max_distance_color == Color::White && record.color.is_discovered() {
            path = record.path.as_slice();
        }

        color = color.max(record.color);
    }

    Ok(VertexRecord {
        id,
        weight,
        edges: edges.map(<[VertexId]>::to_vec).unwrap_or_default(),
        distance,
        color,
        path: path.to_vec(),
    })
}
