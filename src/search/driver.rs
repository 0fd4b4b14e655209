use ahash::{HashSet, HashSetExt};
use serde::{Deserialize, Serialize};

use super::{
    counters::CounterSnapshot, merge::MaxPathMerge, path::heaviest_path, path::MaxPath,
    vertex_program::MaxPathProgram, MergeFunction, VertexProgram,
};
use crate::{
    config::SearchConfig,
    engine::{round_store::RoundSink, Engine, RoundPlan},
    error::SearchError,
    graphs::{frontier_size, Color, VertexId, VertexRecord},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No gray vertex is left.
    Converged,
    /// The round budget ran out first.
    BudgetExceeded,
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub termination: Termination,
    pub rounds: u32,
    /// Totals over all rounds, including the seeded source.
    pub counters: CounterSnapshot,
    /// The last committed snapshot, sorted by id.
    pub records: Vec<VertexRecord>,
}

impl SearchOutcome {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn record(&self, id: VertexId) -> Option<&VertexRecord> {
        self.records
            .binary_search_by_key(&id, |record| record.id)
            .ok()
            .map(|index| &self.records[index])
    }

    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            termination: self.termination,
            rounds: self.rounds,
            counters: self.counters,
            heaviest_path: heaviest_path(&self.records),
        }
    }
}

/// Serializable digest of a search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub termination: Termination,
    pub rounds: u32,
    pub counters: CounterSnapshot,
    pub heaviest_path: Option<MaxPath>,
}

/// Runs rounds until the frontier is empty or the budget is spent.
pub struct SuperstepDriver<'a> {
    engine: &'a dyn Engine,
    program: &'a dyn VertexProgram,
    merge: &'a dyn MergeFunction,
    config: &'a SearchConfig,
}

impl<'a> SuperstepDriver<'a> {
    /// Driver for the max-weight path search.
    pub fn new(engine: &'a dyn Engine, config: &'a SearchConfig) -> Self {
        Self::with_functions(engine, &MaxPathProgram, &MaxPathMerge, config)
    }

    pub fn with_functions(
        engine: &'a dyn Engine,
        program: &'a dyn VertexProgram,
        merge: &'a dyn MergeFunction,
        config: &'a SearchConfig,
    ) -> Self {
        SuperstepDriver {
            engine,
            program,
            merge,
            config,
        }
    }

    pub fn run(
        &self,
        initial: Vec<VertexRecord>,
        sink: &mut dyn RoundSink,
    ) -> Result<SearchOutcome, SearchError> {
        let frontier = validate_source(&initial)?;

        let mut counters = CounterSnapshot::seeded(frontier as u64);
        let mut records = initial;
        let mut round = 0;

        let termination = loop {
            if counters.is_converged() {
                break Termination::Converged;
            }
            if self.config.round_budget.is_some_and(|budget| round >= budget) {
                break Termination::BudgetExceeded;
            }

            let plan = self.plan(round, &records);
            let output = self
                .engine
                .submit(self.program, self.merge, records, &plan)
                .map_err(|error| error.in_round(round))?;
            sink.commit(&plan, &output.partitions)
                .map_err(|error| error.in_round(round))?;

            counters += output.counters;
            tracing::info!(
                round,
                records = output.number_of_records(),
                discovered = counters.discovered,
                finalized = counters.finalized,
                coalesced = counters.coalesced,
                pending = counters.pending(),
                "round finished"
            );

            records = output.into_records();
            round += 1;
        };

        records.sort_unstable_by_key(|record| record.id);
        tracing::info!(?termination, rounds = round, "search stopped");

        Ok(SearchOutcome {
            termination,
            rounds: round,
            counters,
            records,
        })
    }

    /// Plan of `round` given its input. The round is consolidated into one
    /// partition if it is the last one the budget allows or if the search
    /// converges with it.
    pub fn plan(&self, round: u32, records: &[VertexRecord]) -> RoundPlan {
        let last_budgeted = self
            .config
            .round_budget
            .is_some_and(|budget| round + 1 >= budget);
        let consolidate = last_budgeted || converges_after_round(records);

        if consolidate {
            tracing::debug!(round, last_budgeted, "consolidating round");
        }

        RoundPlan {
            round,
            partitions: if consolidate {
                1
            } else {
                self.config.partitions.max(1)
            },
            consolidate,
        }
    }
}

/// True if running one round on `records` leaves no gray vertex, i.e. every
/// edge of the frontier points to a vertex that is already gray or black.
pub fn converges_after_round(records: &[VertexRecord]) -> bool {
    let discovered: HashSet<VertexId> = records
        .iter()
        .filter(|record| record.color != Color::White)
        .map(|record| record.id)
        .collect();

    records
        .iter()
        .filter(|record| record.is_frontier())
        .flat_map(|record| record.edges.iter())
        .all(|head| discovered.contains(head))
}

/// Checks that the initial snapshot holds exactly one gray vertex with a
/// known distance. Returns the frontier size.
fn validate_source(records: &[VertexRecord]) -> Result<usize, SearchError> {
    let gray = frontier_size(records);
    let sources = records
        .iter()
        .filter(|record| record.is_frontier() && record.distance.is_finite())
        .count();

    if gray != 1 || sources != 1 {
        return Err(SearchError::InvalidSource { gray });
    }
    Ok(gray)
}
