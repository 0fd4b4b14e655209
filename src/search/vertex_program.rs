use super::{counters::RoundCounters, VertexProgram};
use crate::{
    error::SearchError,
    graphs::{Color, VertexRecord, Weight},
};

/// Distances above this are reported as close to overflowing.
pub const OVERFLOW_WARNING_THRESHOLD: Weight = Weight::MAX / 2;

/// Expands every gray vertex by one hop.
///
/// Each successor receives a gray candidate whose distance is the vertex's
/// distance plus its weight and whose path ends in the vertex. The vertex
/// itself is re-emitted black. White and black vertices pass through
/// unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxPathProgram;

impl VertexProgram for MaxPathProgram {
    fn compute(
        &self,
        record: VertexRecord,
        counters: &RoundCounters,
        emit: &mut Vec<VertexRecord>,
    ) -> Result<(), SearchError> {
        if record.color != Color::Gray {
            emit.push(record);
            return Ok(());
        }

        if !record.edges.is_empty() {
            let distance = extended_distance(&record)?;
            for &head in record.edges.iter() {
                let mut path = Vec::with_capacity(record.path.len() + 1);
                path.extend_from_slice(&record.path);
                path.push(record.id);

                emit.push(VertexRecord::tentative(head, distance, path));
                counters.discover();
            }
        }

        emit.push(record.finalized());
        counters.finalize();

        Ok(())
    }
}

fn extended_distance(record: &VertexRecord) -> Result<Weight, SearchError> {
    let distance = record
        .distance
        .checked_add(record.weight)
        .ok_or_else(|| SearchError::NumericOverflow {
            id: record.id,
            distance: record.distance.to_string(),
            weight: record.weight.to_string(),
        })?;

    if distance > OVERFLOW_WARNING_THRESHOLD {
        tracing::warn!(
            vertex = record.id,
            distance,
            "distance is approaching the numeric limit"
        );
    }

    Ok(distance)
}
