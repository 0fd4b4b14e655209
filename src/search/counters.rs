use std::{
    ops::AddAssign,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};

/// Counters shared by all workers of one round.
///
/// Vertex programs count `discovered` candidates and `finalized` vertices,
/// merges count the candidates they `coalesced` into an already counted
/// vertex. All three only grow.
#[derive(Debug, Default)]
pub struct RoundCounters {
    discovered: AtomicU64,
    finalized: AtomicU64,
    coalesced: AtomicU64,
}

impl RoundCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discover(&self) {
        self.discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn finalize(&self) {
        self.finalized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn coalesce(&self, candidates: u64) {
        self.coalesced.fetch_add(candidates, Ordering::Relaxed);
    }

    /// Only meaningful once every worker of the round has finished.
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            discovered: self.discovered.load(Ordering::Acquire),
            finalized: self.finalized.load(Ordering::Acquire),
            coalesced: self.coalesced.load(Ordering::Acquire),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub discovered: u64,
    pub finalized: u64,
    pub coalesced: u64,
}

impl CounterSnapshot {
    /// Starting point of a search whose initial frontier holds `frontier`
    /// vertices.
    pub fn seeded(frontier: u64) -> CounterSnapshot {
        CounterSnapshot {
            discovered: frontier,
            ..Default::default()
        }
    }

    /// Distinct vertices that entered the frontier so far.
    pub fn distinct_discovered(&self) -> u64 {
        self.discovered.saturating_sub(self.coalesced)
    }

    /// Vertices discovered but not yet finalized.
    pub fn pending(&self) -> u64 {
        self.distinct_discovered().saturating_sub(self.finalized)
    }

    pub fn is_converged(&self) -> bool {
        self.distinct_discovered() == self.finalized
    }
}

impl AddAssign for CounterSnapshot {
    fn add_assign(&mut self, round: Self) {
        self.discovered += round.discovered;
        self.finalized += round.finalized;
        self.coalesced += round.coalesced;
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::{CounterSnapshot, RoundCounters};

    #[test]
    fn concurrent_increments_are_not_lost() {
        let counters = RoundCounters::new();
        (0..10_000).into_par_iter().for_each(|index| {
            counters.discover();
            if index % 2 == 0 {
                counters.finalize();
            }
            if index % 10 == 0 {
                counters.coalesce(2);
            }
        });

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.discovered, 10_000);
        assert_eq!(snapshot.finalized, 5_000);
        assert_eq!(snapshot.coalesced, 2_000);
    }

    #[test]
    fn convergence_accounts_for_coalesced_candidates() {
        let mut total = CounterSnapshot::seeded(1);
        assert!(!total.is_converged());

        // source expands to two vertices
        total += CounterSnapshot {
            discovered: 2,
            finalized: 1,
            coalesced: 0,
        };
        assert_eq!(total.pending(), 2);

        // both point to the same sink
        total += CounterSnapshot {
            discovered: 2,
            finalized: 2,
            coalesced: 1,
        };
        assert_eq!(total.pending(), 1);

        total += CounterSnapshot {
            discovered: 0,
            finalized: 1,
            coalesced: 0,
        };
        assert!(total.is_converged());
    }
}
