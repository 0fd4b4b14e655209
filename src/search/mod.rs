use counters::RoundCounters;

use crate::{
    error::SearchError,
    graphs::{VertexId, VertexRecord},
};

pub mod counters;
pub mod dag_longest;
pub mod driver;
pub mod merge;
pub mod path;
pub mod vertex_program;

/// Per-record step of a round. Invocations share nothing but `counters`.
pub trait VertexProgram: Send + Sync {
    fn compute(
        &self,
        record: VertexRecord,
        counters: &RoundCounters,
        emit: &mut Vec<VertexRecord>,
    ) -> Result<(), SearchError>;
}

/// Per-vertex step of a round, run once every record for `id` was emitted.
pub trait MergeFunction: Send + Sync {
    fn merge(
        &self,
        id: VertexId,
        group: &[VertexRecord],
        counters: &RoundCounters,
    ) -> Result<VertexRecord, SearchError>;
}
