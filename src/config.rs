use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::SearchError, graphs::RecordFormat};

/// Knobs of a single search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Stop after this many rounds even if gray vertices are left. Unset
    /// runs until convergence.
    pub round_budget: Option<u32>,
    /// Worker threads of the local engine, rayon's global pool if unset.
    pub parallelism: Option<usize>,
    /// Partitions the merged records of a round are spread over.
    pub partitions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            round_budget: None,
            parallelism: None,
            partitions: rayon::current_num_threads(),
        }
    }
}

impl SearchConfig {
    pub fn with_round_budget(self, round_budget: u32) -> Self {
        SearchConfig {
            round_budget: Some(round_budget),
            ..self
        }
    }

    pub fn with_parallelism(self, parallelism: usize) -> Self {
        SearchConfig {
            parallelism: Some(parallelism),
            ..self
        }
    }

    pub fn with_partitions(self, partitions: usize) -> Self {
        SearchConfig { partitions, ..self }
    }
}

/// Where a job reads its graph from and writes its rounds to.
///
/// ```json
/// {
///     "initial_graph": "input/input-graph",
///     "output_dir": "output/outgraph",
///     "format": "text",
///     "search": { "round_budget": 6, "partitions": 4 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub initial_graph: PathBuf,
    #[serde(default)]
    pub graph_format: RecordFormat,
    pub output_dir: PathBuf,
    /// Format of the persisted rounds.
    #[serde(default)]
    pub format: RecordFormat,
    #[serde(default)]
    pub search: SearchConfig,
}

impl JobConfig {
    pub fn from_file(path: &Path) -> Result<JobConfig, SearchError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
