use std::collections::VecDeque;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use crate::graphs::{records_by_id, VertexId, VertexRecord, Weight};

/// Longest distances from `source`, computed sequentially in topological
/// order over the vertices reachable from it.
///
/// Vertices that only appear as edge targets count with weight zero and no
/// edges, unknown weights count as zero. Returns `None` if the reachable part
/// of the graph has a cycle.
pub fn longest_distances(
    records: &[VertexRecord],
    source: VertexId,
) -> Option<HashMap<VertexId, Weight>> {
    let index = records_by_id(records);

    let mut reachable = HashSet::new();
    let mut stack = vec![source];
    while let Some(vertex) = stack.pop() {
        if reachable.insert(vertex) {
            stack.extend_from_slice(successors(&index, vertex));
        }
    }

    let mut in_degree: HashMap<VertexId, usize> = HashMap::with_capacity(reachable.len());
    for &vertex in reachable.iter() {
        for &head in successors(&index, vertex) {
            *in_degree.entry(head).or_default() += 1;
        }
    }

    let mut distances = HashMap::with_capacity(reachable.len());
    distances.insert(source, 0);

    let mut queue: VecDeque<VertexId> = reachable
        .iter()
        .copied()
        .filter(|vertex| !in_degree.contains_key(vertex))
        .collect();
    let mut settled = 0;

    while let Some(tail) = queue.pop_front() {
        settled += 1;
        let Some(&distance_tail) = distances.get(&tail) else {
            continue;
        };
        let alternative_distance_head = distance_tail + weight(&index, tail);

        for &head in successors(&index, tail) {
            let current = distances.entry(head).or_insert(alternative_distance_head);
            if alternative_distance_head > *current {
                *current = alternative_distance_head;
            }

            let degree = in_degree.get_mut(&head)?;
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(head);
            }
        }
    }

    if settled != reachable.len() {
        return None;
    }

    Some(distances)
}

fn successors<'a>(index: &'a HashMap<VertexId, &VertexRecord>, vertex: VertexId) -> &'a [VertexId] {
    index
        .get(&vertex)
        .map(|record| record.edges.as_slice())
        .unwrap_or(&[])
}

fn weight(index: &HashMap<VertexId, &VertexRecord>, vertex: VertexId) -> Weight {
    index
        .get(&vertex)
        .and_then(|record| record.weight.finite())
        .unwrap_or(0)
}
