use ahash::{HashMap, HashMapExt};

pub mod codec;
pub mod format;
pub mod graph_factory;
pub mod vertex;

pub use format::RecordFormat;
pub use vertex::{Color, Measure, VertexRecord};

pub type VertexId = u32;
pub type Weight = i64;

/// Index of records by vertex id.
pub fn records_by_id(records: &[VertexRecord]) -> HashMap<VertexId, &VertexRecord> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.insert(record.id, record);
    }
    index
}

/// Number of frontier vertices in a snapshot.
pub fn frontier_size(records: &[VertexRecord]) -> usize {
    records.iter().filter(|record| record.is_frontier()).count()
}
