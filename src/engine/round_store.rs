use std::{
    fs,
    path::{Path, PathBuf},
};

use super::RoundPlan;
use crate::{
    error::SearchError,
    graphs::{RecordFormat, VertexRecord},
};

/// Receives the merged output of every round that finished.
pub trait RoundSink {
    fn commit(&mut self, plan: &RoundPlan, partitions: &[Vec<VertexRecord>]) -> Result<(), SearchError>;
}

/// Keeps nothing. The driver still hands back the last round.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RoundSink for NullSink {
    fn commit(&mut self, _plan: &RoundPlan, _partitions: &[Vec<VertexRecord>]) -> Result<(), SearchError> {
        Ok(())
    }
}

/// Writes round `k` (counting from one) to `<output_dir>/round-<k>/part-<nnnnn>`,
/// one file per partition.
///
/// A round is staged in `round-<k>.tmp` and renamed once every partition is
/// written, so a round directory is either complete or absent.
#[derive(Debug)]
pub struct RoundStore {
    output_dir: PathBuf,
    format: RecordFormat,
    committed: Vec<PathBuf>,
}

impl RoundStore {
    pub fn new(output_dir: &Path, format: RecordFormat) -> Result<RoundStore, SearchError> {
        fs::create_dir_all(output_dir)?;
        Ok(RoundStore {
            output_dir: output_dir.to_path_buf(),
            format,
            committed: Vec::new(),
        })
    }

    pub fn round_dir(&self, round: u32) -> PathBuf {
        self.output_dir.join(format!("round-{}", round + 1))
    }

    /// Directories of the rounds committed through this store, oldest first.
    pub fn committed(&self) -> &[PathBuf] {
        &self.committed
    }

    /// Reads a committed round back, partition by partition.
    pub fn read_round(&self, round: u32) -> Result<Vec<VertexRecord>, SearchError> {
        let mut parts = fs::read_dir(self.round_dir(round))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        parts.retain(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("part-"))
        });
        parts.sort();

        let mut records = Vec::new();
        for part in parts {
            records.extend(
                self.format
                    .read_records(&part)
                    .map_err(|error| error.in_round(round))?,
            );
        }
        Ok(records)
    }
}

impl RoundSink for RoundStore {
    fn commit(&mut self, plan: &RoundPlan, partitions: &[Vec<VertexRecord>]) -> Result<(), SearchError> {
        let round_dir = self.round_dir(plan.round);
        let staging_dir = self.output_dir.join(format!("round-{}.tmp", plan.round + 1));

        if staging_dir.exists() {
            fs::remove_dir_all(&staging_dir)?;
        }
        fs::create_dir_all(&staging_dir)?;

        for (index, partition) in partitions.iter().enumerate() {
            let part = staging_dir.join(format!("part-{:05}", index));
            self.format.write_records(&part, partition)?;
        }

        if round_dir.exists() {
            fs::remove_dir_all(&round_dir)?;
        }
        fs::rename(&staging_dir, &round_dir)?;

        tracing::debug!(
            round = plan.round,
            partitions = partitions.len(),
            dir = %round_dir.display(),
            "round committed"
        );
        self.committed.push(round_dir);

        Ok(())
    }
}
