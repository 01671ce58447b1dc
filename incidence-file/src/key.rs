//! Encoded element keys.
//!
//! Every row of the adjacency table holds two keys of the form
//! `<table_type>_<index>`. The table type equals the dimension of the
//! element the key refers to, so `2_5` names face 5 and `1_0` names edge 0.

use std::{
    fmt::Display,
    str::FromStr,
};

/// Index of an element within its kind.
pub type Index = u32;

const SEPARATOR: char = '_';

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    Vertex,
    Edge,
    Face,
    Volume,
}

impl ElementKind {
    pub fn dimension(&self) -> u32 {
        match self {
            Self::Vertex => 0,
            Self::Edge => 1,
            Self::Face => 2,
            Self::Volume => 3,
        }
    }
}

/// The incidence relations an adjacency table can hold.
///
/// A relation always points from a higher-dimensional element to one of
/// dimension one less.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    EdgeVertex,
    FaceEdge,
    VolumeFace,
}

impl Relation {
    pub fn from_table_type(table_type: u32) -> Option<Self> {
        match table_type {
            1 => Some(Self::EdgeVertex),
            2 => Some(Self::FaceEdge),
            3 => Some(Self::VolumeFace),
            _ => None,
        }
    }

    pub fn table_type(&self) -> u32 {
        self.high().dimension()
    }

    /// The kind of element that owns the incidence list.
    pub fn high(&self) -> ElementKind {
        match self {
            Self::EdgeVertex => ElementKind::Edge,
            Self::FaceEdge => ElementKind::Face,
            Self::VolumeFace => ElementKind::Volume,
        }
    }

    /// The kind of element that is referenced.
    pub fn low(&self) -> ElementKind {
        match self {
            Self::EdgeVertex => ElementKind::Vertex,
            Self::FaceEdge => ElementKind::Edge,
            Self::VolumeFace => ElementKind::Face,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub table_type: u32,
    pub index: Index,
}

impl CellKey {
    pub fn new(table_type: u32, index: Index) -> Self {
        Self { table_type, index }
    }

    pub fn from_relation(relation: Relation, index: Index) -> Self {
        Self::new(relation.table_type(), index)
    }

    /// The relation selected by this key when it's the first key of a row.
    pub fn relation(&self) -> Result<Relation, InvalidKey> {
        Relation::from_table_type(self.table_type).ok_or(InvalidKey::UnknownTableType {
            table_type: self.table_type,
        })
    }
}

impl FromStr for CellKey {
    type Err = InvalidKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            InvalidKey::Malformed {
                value: s.to_owned(),
            }
        };

        let (table_type, index) = s.trim().split_once(SEPARATOR).ok_or_else(malformed)?;
        if index.contains(SEPARATOR) {
            return Err(malformed());
        }

        Ok(Self {
            table_type: table_type.parse().map_err(|_| malformed())?,
            index: index.parse().map_err(|_| malformed())?,
        })
    }
}

impl Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.table_type, self.index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidKey {
    #[error("Expected `<table_type>_<index>`, but found {value:?}")]
    Malformed { value: String },

    #[error("Unknown table type {table_type}, expected 1, 2 or 3")]
    UnknownTableType { table_type: u32 },
}
