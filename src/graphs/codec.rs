//! Text form of a vertex record:
//!
//! ```text
//! <id>\t<weight>|<edge>,<edge>,|<distance>|<COLOR>|<path>,<path>,|
//! ```
//!
//! Lists are comma terminated and may be empty. Unknown weights and
//! distances are written as `INF`.

use itertools::Itertools;

use super::{Color, Measure, VertexId, VertexRecord, Weight};
use crate::error::SearchError;

pub const INFINITE_TOKEN: &str = "INF";

pub fn encode(record: &VertexRecord) -> String {
    format!(
        "{}|{}|{}|{}|{}|",
        record.weight,
        encode_ids(&record.edges),
        record.distance,
        record.color,
        encode_ids(&record.path)
    )
}

pub fn encode_line(record: &VertexRecord) -> String {
    format!("{}\t{}", record.id, encode(record))
}

pub fn decode(id: VertexId, value: &str) -> Result<VertexRecord, SearchError> {
    decode_value(id, value, value)
}

pub fn decode_line(line: &str) -> Result<VertexRecord, SearchError> {
    let (id, value) = line
        .split_once('\t')
        .ok_or_else(|| SearchError::malformed(None, line, "missing tab after vertex id"))?;
    let id: VertexId = id
        .trim()
        .parse()
        .map_err(|_| SearchError::malformed(None, line, format!("invalid vertex id {:?}", id)))?;
    decode_value(id, value, line)
}

fn decode_value(id: VertexId, value: &str, line: &str) -> Result<VertexRecord, SearchError> {
    let malformed = |reason: String| SearchError::malformed(Some(id), line, reason);

    let mut fields = value.trim_end_matches(['\r', '\n']).split('|').collect_vec();
    if fields.last() == Some(&"") {
        fields.pop();
    }

    // initial graphs may leave out the path
    let (weight, edges, distance, color, path) = match fields.as_slice() {
        [weight, edges, distance, color] => (*weight, *edges, *distance, *color, ""),
        [weight, edges, distance, color, path] => (*weight, *edges, *distance, *color, *path),
        _ => {
            return Err(malformed(format!(
                "expected 5 fields, found {}",
                fields.len()
            )))
        }
    };

    let weight = decode_measure(weight).map_err(|reason| malformed(format!("weight: {reason}")))?;
    let edges = decode_ids(edges).map_err(|reason| malformed(format!("edges: {reason}")))?;
    let distance =
        decode_measure(distance).map_err(|reason| malformed(format!("distance: {reason}")))?;
    let color = Color::from_token(color)
        .ok_or_else(|| malformed(format!("unknown color {:?}", color)))?;
    let path = decode_ids(path).map_err(|reason| malformed(format!("path: {reason}")))?;

    Ok(VertexRecord {
        id,
        weight,
        edges,
        distance,
        color,
        path,
    })
}

fn encode_ids(ids: &[VertexId]) -> String {
    ids.iter().map(|id| format!("{},", id)).collect()
}

fn decode_measure(token: &str) -> Result<Measure, String> {
    if token == INFINITE_TOKEN {
        return Ok(Measure::Infinite);
    }
    token
        .parse::<Weight>()
        .map(Measure::Finite)
        .map_err(|_| format!("{:?} is not a number", token))
}

fn decode_ids(token: &str) -> Result<Vec<VertexId>, String> {
    if token.is_empty() {
        return Ok(Vec::new());
    }

    let body = token.strip_suffix(',').unwrap_or(token);
    body.split(',')
        .map(|id| {
            if id.is_empty() {
                return Err(format!("empty entry in {:?}", token));
            }
            id.parse::<VertexId>()
                .map_err(|_| format!("{:?} is not a vertex id", id))
        })
        .collect()
}
