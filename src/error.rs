use thiserror::Error;

use crate::graphs::VertexId;

#[derive(Debug, Error)]
pub enum SearchError {
    /// A persisted line could not be turned into a vertex record.
    #[error("malformed record for vertex {}: {reason} (line {line:?})", display_id(.id))]
    MalformedRecord {
        id: Option<VertexId>,
        line: String,
        reason: String,
    },

    /// A merge group was empty or held records of another vertex.
    #[error("merge group for vertex {expected} is corrupt: {reason}")]
    GroupIntegrity { expected: VertexId, reason: String },

    #[error("cannot extend distance {distance} of vertex {id} by weight {weight}")]
    NumericOverflow {
        id: VertexId,
        distance: String,
        weight: String,
    },

    #[error("expected exactly one gray source with a finite distance, found {gray}")]
    InvalidSource { gray: usize },

    #[error("round {round} failed: {source}")]
    InRound {
        round: u32,
        #[source]
        source: Box<SearchError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    pub fn malformed(id: Option<VertexId>, line: &str, reason: impl Into<String>) -> SearchError {
        SearchError::MalformedRecord {
            id,
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// Attaches the round number to an error raised while that round ran.
    pub fn in_round(self, round: u32) -> SearchError {
        match self {
            already @ SearchError::InRound { .. } => already,
            other => SearchError::InRound {
                round,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping round context.
    pub fn root(&self) -> &SearchError {
        match self {
            SearchError::InRound { source, .. } => source.root(),
            other => other,
        }
    }
}

fn display_id(id: &Option<VertexId>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "<unknown>".to_string(),
    }
}
