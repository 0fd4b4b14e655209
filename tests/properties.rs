use ahash::HashMap;
use max_paths::{
    config::SearchConfig,
    engine::{local::LocalEngine, round_store::RoundSink, RoundPlan},
    error::SearchError,
    graphs::{
        codec::{decode_line, encode_line},
        Color, Measure, VertexId, VertexRecord,
    },
    search::{
        dag_longest::longest_distances,
        driver::{SuperstepDriver, Termination},
        merge::merge_group,
        path::{heaviest_path, validate_path},
    },
};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn measure() -> impl Strategy<Value = Measure> {
    prop_oneof![
        4 => any::<i64>().prop_map(Measure::Finite),
        1 => Just(Measure::Infinite),
    ]
}

fn color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::White), Just(Color::Gray), Just(Color::Black)]
}

fn record() -> impl Strategy<Value = VertexRecord> {
    (
        any::<VertexId>(),
        measure(),
        prop::collection::vec(any::<VertexId>(), 0..6),
        measure(),
        color(),
        prop::collection::vec(any::<VertexId>(), 0..6),
    )
        .prop_map(|(id, weight, edges, distance, color, path)| VertexRecord {
            id,
            weight,
            edges,
            distance,
            color,
            // undiscovered vertices carry no path
            path: if color.is_discovered() { path } else { Vec::new() },
        })
}

/// The vertex's own record followed by candidates proposed by predecessors.
fn group() -> impl Strategy<Value = Vec<VertexRecord>> {
    (
        0i64..1_000,
        prop::collection::vec(0u32..50, 0..4),
        color(),
        prop::collection::vec((0i64..1_000, prop::collection::vec(0u32..50, 0..4)), 0..6),
    )
        .prop_map(|(weight, edges, color, candidates)| {
            let mut own = VertexRecord::undiscovered(7, weight, edges);
            if color.is_discovered() {
                own.color = color;
                own.distance = Measure::Finite(weight / 2);
            }

            let mut group = vec![own];
            group.extend(
                candidates
                    .into_iter()
                    .map(|(distance, path)| VertexRecord::tentative(7, distance, path)),
            );
            group
        })
}

/// Layered DAG with edges only between consecutive layers. The first layer
/// holds the source alone.
fn layered_dag(layers: usize, seed: u64) -> Vec<VertexRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut sizes = vec![1];
    sizes.extend((1..layers).map(|_| rng.gen_range(1..=4)));

    let mut starts = Vec::with_capacity(layers + 1);
    let mut next_id = 1;
    for &size in &sizes {
        starts.push(next_id);
        next_id += size as VertexId;
    }
    starts.push(next_id);

    let mut records = Vec::new();
    for layer in 0..layers {
        for id in starts[layer]..starts[layer + 1] {
            let edges: Vec<VertexId> = if layer + 1 < layers {
                (starts[layer + 1]..starts[layer + 2])
                    .filter(|_| rng.gen_bool(0.6))
                    .collect()
            } else {
                Vec::new()
            };
            let weight = rng.gen_range(0..100);
            if id == 1 {
                records.push(VertexRecord::source(id, weight, edges));
            } else {
                records.push(VertexRecord::undiscovered(id, weight, edges));
            }
        }
    }
    records
}

/// Keeps every committed round.
#[derive(Default)]
struct RecordingSink {
    rounds: Vec<Vec<VertexRecord>>,
}

impl RoundSink for RecordingSink {
    fn commit(&mut self, _plan: &RoundPlan, partitions: &[Vec<VertexRecord>]) -> Result<(), SearchError> {
        let mut records = partitions.concat();
        records.sort_by_key(|record| record.id);
        self.rounds.push(records);
        Ok(())
    }
}

proptest! {
    #[test]
    fn codec_reads_back_what_it_wrote(record in record()) {
        let line = encode_line(&record);
        prop_assert_eq!(decode_line(&line).unwrap(), record);
    }

    #[test]
    fn merging_a_single_record_keeps_it(record in record()) {
        let merged = merge_group(record.id, std::slice::from_ref(&record)).unwrap();
        prop_assert_eq!(merged, record);
    }

    #[test]
    fn merge_ignores_group_order(
        (group, shuffled) in group().prop_flat_map(|group| (Just(group.clone()), Just(group).prop_shuffle()))
    ) {
        let merged = merge_group(7, &group).unwrap();
        let reordered = merge_group(7, &shuffled).unwrap();

        prop_assert_eq!(merged.weight, reordered.weight);
        prop_assert_eq!(merged.edges, reordered.edges);
        prop_assert_eq!(merged.distance, reordered.distance);
        prop_assert_eq!(merged.color, reordered.color);
    }

    #[test]
    fn layered_dags_match_the_sequential_reference(
        layers in 1usize..7,
        seed in any::<u64>(),
        partitions in 1usize..5,
    ) {
        let graph = layered_dag(layers, seed);
        let engine = LocalEngine::new();
        let config = SearchConfig::default().with_partitions(partitions);
        let mut sink = RecordingSink::default();

        let outcome = SuperstepDriver::new(&engine, &config)
            .run(graph.clone(), &mut sink)
            .unwrap();
        prop_assert_eq!(outcome.termination, Termination::Converged);
        prop_assert!(outcome.rounds as usize <= layers);

        let reference: HashMap<VertexId, i64> = longest_distances(&graph, 1).unwrap();
        for record in outcome.records.iter() {
            match reference.get(&record.id) {
                Some(&distance) => {
                    prop_assert_eq!(record.distance, Measure::Finite(distance));
                    prop_assert_eq!(record.color, Color::Black);
                }
                None => {
                    prop_assert_eq!(record.distance, Measure::Infinite);
                    prop_assert_eq!(record.color, Color::White);
                }
            }
        }

        let path = heaviest_path(&outcome.records).unwrap();
        prop_assert_eq!(validate_path(&graph, &path), Ok(()));

        // distances and colors never move backwards
        let mut previous = graph;
        for round in sink.rounds {
            prop_assert_eq!(round.len(), previous.len());
            for (before, after) in previous.iter().zip(round.iter()) {
                prop_assert_eq!(before.id, after.id);
                prop_assert!(after.distance >= before.distance);
                prop_assert!(after.color >= before.color);
            }
            previous = round;
        }
    }
}
