//! Heaviest paths over vertex-weighted DAGs, found by bulk-synchronous
//! rounds of a vertex program and a per-vertex merge.

use config::SearchConfig;
use engine::{local::LocalEngine, round_store::NullSink};
use error::SearchError;
use graphs::VertexRecord;
use search::driver::{SearchOutcome, SuperstepDriver};

pub mod config;
pub mod engine;
pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

/// Runs a whole search in memory on the local engine.
pub fn search_local(
    initial: Vec<VertexRecord>,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    let engine = LocalEngine::from_config(config)?;
    SuperstepDriver::new(&engine, config).run(initial, &mut NullSink)
}
