use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{codec, VertexRecord};
use crate::error::SearchError;

/// On-disk representation of a set of vertex records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// One record per line, see [`codec`].
    #[default]
    Text,
    Bincode,
}

impl RecordFormat {
    pub fn read_records(&self, path: &Path) -> Result<Vec<VertexRecord>, SearchError> {
        let reader = BufReader::new(File::open(path)?);
        self.read_from(reader)
    }

    pub fn write_records(&self, path: &Path, records: &[VertexRecord]) -> Result<(), SearchError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Vec<VertexRecord>, SearchError> {
        match self {
            RecordFormat::Text => read_text(reader),
            RecordFormat::Bincode => read_bincode(reader),
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, records: &[VertexRecord]) -> Result<(), SearchError> {
        match self {
            RecordFormat::Text => {
                for record in records {
                    writeln!(writer, "{}", codec::encode_line(record))?;
                }
                Ok(())
            }
            RecordFormat::Bincode => Ok(bincode::serialize_into(writer, records)?),
        }
    }
}

fn read_text<R: BufRead>(reader: R) -> Result<Vec<VertexRecord>, SearchError> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        records.push(codec::decode_line(&line)?);
    }
    Ok(records)
}

fn read_bincode<R: Read>(reader: R) -> Result<Vec<VertexRecord>, SearchError> {
    Ok(bincode::deserialize_from(reader)?)
}
