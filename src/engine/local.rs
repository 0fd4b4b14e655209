use itertools::Itertools;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

use super::{Engine, RoundOutput, RoundPlan};
use crate::{
    config::SearchConfig,
    error::SearchError,
    graphs::{VertexId, VertexRecord},
    search::{counters::RoundCounters, MergeFunction, VertexProgram},
};

type Partition = Vec<(VertexId, Vec<VertexRecord>)>;

/// Runs rounds on this machine with rayon.
#[derive(Default)]
pub struct LocalEngine {
    pool: Option<ThreadPool>,
}

impl LocalEngine {
    /// Uses rayon's global pool.
    pub fn new() -> LocalEngine {
        LocalEngine { pool: None }
    }

    pub fn with_parallelism(threads: usize) -> Result<LocalEngine, SearchError> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(LocalEngine { pool: Some(pool) })
    }

    pub fn from_config(config: &SearchConfig) -> Result<LocalEngine, SearchError> {
        match config.parallelism {
            Some(threads) => Self::with_parallelism(threads),
            None => Ok(Self::new()),
        }
    }
}

impl Engine for LocalEngine {
    fn submit(
        &self,
        program: &dyn VertexProgram,
        merge: &dyn MergeFunction,
        input: Vec<VertexRecord>,
        plan: &RoundPlan,
    ) -> Result<RoundOutput, SearchError> {
        match &self.pool {
            Some(pool) => pool.install(|| run_round(program, merge, input, plan)),
            None => run_round(program, merge, input, plan),
        }
    }
}

fn run_round(
    program: &dyn VertexProgram,
    merge: &dyn MergeFunction,
    input: Vec<VertexRecord>,
    plan: &RoundPlan,
) -> Result<RoundOutput, SearchError> {
    let counters = RoundCounters::new();

    let emitted = map_phase(program, input, &counters)?;
    let partitions = shuffle(emitted, plan.partitions);
    let partitions = reduce_phase(merge, partitions, &counters)?;

    Ok(RoundOutput {
        partitions,
        counters: counters.snapshot(),
    })
}

fn map_phase(
    program: &dyn VertexProgram,
    input: Vec<VertexRecord>,
    counters: &RoundCounters,
) -> Result<Vec<VertexRecord>, SearchError> {
    let emitted = input
        .into_par_iter()
        .map(|record| {
            let mut emitted = Vec::with_capacity(record.edges.len() + 1);
            program.compute(record, counters, &mut emitted)?;
            Ok::<_, SearchError>(emitted)
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    Ok(emitted.into_iter().flatten().collect())
}

pub fn partition_of(id: VertexId, partitions: usize) -> usize {
    id as usize % partitions.max(1)
}

/// Groups records by vertex id. Within a group, records keep the order in
/// which they were emitted. Groups are sorted by id within a partition.
fn shuffle(emitted: Vec<VertexRecord>, partitions: usize) -> Vec<Partition> {
    let partitions = partitions.max(1);

    let mut buckets: Vec<Vec<VertexRecord>> = (0..partitions).map(|_| Vec::new()).collect();
    for record in emitted {
        buckets[partition_of(record.id, partitions)].push(record);
    }

    buckets
        .into_par_iter()
        .map(|bucket| {
            bucket
                .into_iter()
                .into_group_map_by(|record| record.id)
                .into_iter()
                .sorted_unstable_by_key(|(id, _)| *id)
                .collect::<Partition>()
        })
        .collect()
}

fn reduce_phase(
    merge: &dyn MergeFunction,
    partitions: Vec<Partition>,
    counters: &RoundCounters,
) -> Result<Vec<Vec<VertexRecord>>, SearchError> {
    partitions
        .into_par_iter()
        .map(|groups| {
            groups
                .into_iter()
                .map(|(id, group)| merge.merge(id, &group, counters))
                .collect::<Result<Vec<_>, SearchError>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{partition_of, shuffle, LocalEngine};
    use crate::{
        engine::{Engine, RoundPlan},
        graphs::{Color, Measure, VertexRecord},
        search::{merge::MaxPathMerge, vertex_program::MaxPathProgram},
    };

    fn diamond() -> Vec<VertexRecord> {
        vec![
            VertexRecord::source(1, 5, vec![2, 3]),
            VertexRecord::undiscovered(2, 10, vec![4]),
            VertexRecord::undiscovered(3, 12, vec![4]),
            VertexRecord::undiscovered(4, 0, vec![]),
        ]
    }

    #[test]
    fn shuffle_keeps_emission_order_within_a_vertex() {
        let emitted = vec![
            VertexRecord::tentative(4, 15, vec![1, 2]),
            VertexRecord::undiscovered(3, 12, vec![4]),
            VertexRecord::tentative(4, 17, vec![1, 3]),
            VertexRecord::undiscovered(4, 0, vec![]),
        ];

        let partitions = shuffle(emitted, 2);
        assert_eq!(partitions.len(), 2);

        let (id, group) = &partitions[partition_of(4, 2)][0];
        assert_eq!(*id, 4);
        let distances = group.iter().map(|record| record.distance).collect::<Vec<_>>();
        assert_eq!(
            distances,
            vec![Measure::Finite(15), Measure::Finite(17), Measure::Infinite]
        );
    }

    #[test]
    fn one_round_expands_the_source() {
        let engine = LocalEngine::new();
        let plan = RoundPlan {
            round: 0,
            partitions: 3,
            consolidate: false,
        };

        let output = engine
            .submit(&MaxPathProgram, &MaxPathMerge, diamond(), &plan)
            .unwrap();

        assert_eq!(output.partitions.len(), 3);
        assert_eq!(output.number_of_records(), 4);
        assert_eq!(output.counters.discovered, 2);
        assert_eq!(output.counters.finalized, 1);
        assert_eq!(output.counters.coalesced, 0);

        let mut records = output.into_records();
        records.sort_by_key(|record| record.id);
        let colors = records.iter().map(|record| record.color).collect::<Vec<_>>();
        assert_eq!(
            colors,
            vec![Color::Black, Color::Gray, Color::Gray, Color::White]
        );
        assert_eq!(records[1].path, vec![1]);
        assert_eq!(records[2].distance, Measure::Finite(5));
    }

    #[test]
    fn dedicated_pool_gives_the_same_result() {
        let plan = RoundPlan {
            round: 0,
            partitions: 1,
            consolidate: true,
        };
        let global = LocalEngine::new()
            .submit(&MaxPathProgram, &MaxPathMerge, diamond(), &plan)
            .unwrap();
        let pooled = LocalEngine::with_parallelism(2)
            .unwrap()
            .submit(&MaxPathProgram, &MaxPathMerge, diamond(), &plan)
            .unwrap();

        assert_eq!(global.partitions, pooled.partitions);
        assert_eq!(global.counters, pooled.counters);
    }
}
