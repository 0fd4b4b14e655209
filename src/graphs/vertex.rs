use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use super::{VertexId, Weight};

/// A weight or distance that may not be known yet.
///
/// `Infinite` is the "unknown" marker. When relaxing, it ranks below every
/// finite value, so the first finite candidate always replaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    Finite(Weight),
    Infinite,
}

impl Measure {
    pub fn finite(self) -> Option<Weight> {
        match self {
            Measure::Finite(value) => Some(value),
            Measure::Infinite => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Measure::Finite(_))
    }

    /// Sum of two finite measures, `None` if either is unknown or the sum
    /// does not fit.
    pub fn checked_add(self, other: Measure) -> Option<Weight> {
        self.finite()?.checked_add(other.finite()?)
    }
}

impl Ord for Measure {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Measure::Infinite, Measure::Infinite) => Ordering::Equal,
            (Measure::Infinite, Measure::Finite(_)) => Ordering::Less,
            (Measure::Finite(_), Measure::Infinite) => Ordering::Greater,
            (Measure::Finite(a), Measure::Finite(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Weight> for Measure {
    fn from(value: Weight) -> Self {
        Measure::Finite(value)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Finite(value) => write!(f, "{}", value),
            Measure::Infinite => f.write_str(super::codec::INFINITE_TOKEN),
        }
    }
}

/// Discovery state of a vertex.
///
/// White vertices have not been reached, gray vertices form the frontier of
/// the current round and black vertices have relaxed all of their edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Gray,
    Black,
}

impl Color {
    /// Total order used when several colors meet: white < gray < black.
    pub fn darkness(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Gray => 1,
            Color::Black => 2,
        }
    }

    /// Gray or black, i.e. the vertex carries a usable path.
    pub fn is_discovered(self) -> bool {
        self != Color::White
    }

    pub fn token(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Gray => "GRAY",
            Color::Black => "BLACK",
        }
    }

    pub fn from_token(token: &str) -> Option<Color> {
        match token {
            "WHITE" => Some(Color::White),
            "GRAY" => Some(Color::Gray),
            "BLACK" => Some(Color::Black),
            _ => None,
        }
    }
}

impl Ord for Color {
    fn cmp(&self, other: &Self) -> Ordering {
        self.darkness().cmp(&other.darkness())
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// State of one vertex in one round.
///
/// `path` lists the vertices from the source up to, but excluding, `id`
/// along which `distance` was reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: VertexId,
    pub weight: Measure,
    pub edges: Vec<VertexId>,
    pub distance: Measure,
    pub color: Color,
    pub path: Vec<VertexId>,
}

impl VertexRecord {
    pub fn source(id: VertexId, weight: Weight, edges: Vec<VertexId>) -> VertexRecord {
        VertexRecord {
            id,
            weight: Measure::Finite(weight),
            edges,
            distance: Measure::Finite(0),
            color: Color::Gray,
            path: Vec::new(),
        }
    }

    pub fn undiscovered(id: VertexId, weight: Weight, edges: Vec<VertexId>) -> VertexRecord {
        VertexRecord {
            id,
            weight: Measure::Finite(weight),
            edges,
            distance: Measure::Infinite,
            color: Color::White,
            path: Vec::new(),
        }
    }

    /// Candidate for `id` proposed by a predecessor. Its weight is left at
    /// zero and resolved against the vertex's own record when merging.
    pub fn tentative(id: VertexId, distance: Weight, path: Vec<VertexId>) -> VertexRecord {
        VertexRecord {
            id,
            weight: Measure::Finite(0),
            edges: Vec::new(),
            distance: Measure::Finite(distance),
            color: Color::Gray,
            path,
        }
    }

    pub fn finalized(self) -> VertexRecord {
        VertexRecord {
            color: Color::Black,
            ..self
        }
    }

    pub fn is_frontier(&self) -> bool {
        self.color == Color::Gray
    }
}
