//! Execution of single rounds.
//!
//! A round runs the vertex program over every input record, groups the
//! emitted records by vertex id into `partitions` partitions and merges every
//! group. Nothing of a round is visible before all of its merges finished.

use crate::{
    error::SearchError,
    graphs::VertexRecord,
    search::{counters::CounterSnapshot, MergeFunction, VertexProgram},
};

pub mod local;
pub mod round_store;

/// Fixed description of one round, computed by the driver before the round
/// starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundPlan {
    pub round: u32,
    pub partitions: usize,
    /// All merged records end up in a single partition.
    pub consolidate: bool,
}

#[derive(Clone, Debug)]
pub struct RoundOutput {
    pub partitions: Vec<Vec<VertexRecord>>,
    pub counters: CounterSnapshot,
}

impl RoundOutput {
    pub fn number_of_records(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    pub fn into_records(self) -> Vec<VertexRecord> {
        self.partitions.into_iter().flatten().collect()
    }
}

pub trait Engine: Send + Sync {
    fn submit(
        &self,
        program: &dyn VertexProgram,
        merge: &dyn MergeFunction,
        input: Vec<VertexRecord>,
        plan: &RoundPlan,
    ) -> Result<RoundOutput, SearchError>;
}
