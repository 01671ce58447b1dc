#![warn(unused_qualifications)]

//! Incidence graph file formats
//!
//! A cell complex is stored in two comma-separated tables:
//!
//! - The *adjacency table* starts with a row of counts
//!   `num_vertices, num_edges, num_faces, num_volumes`, followed by one row
//!   per incidence `<table_type>_<high>, <table_type>_<low>`. The table type
//!   of the first key selects the relation: `1` edge-vertex, `2` face-edge,
//!   `3` volume-face. See [`key`].
//! - The *points table* has one `x, y, z` row per vertex.
//!
//! The adjacency table never stores which vertices a face touches. This is
//! derived by [`AdjacencyTable::face_vertices`] from the face-edge and
//! edge-vertex relations.

pub mod adjacency;
pub mod key;
pub mod points;
pub mod table;

pub use crate::{
    adjacency::{
        AdjacencyTable,
        CellComplex,
        Header,
    },
    key::{
        CellKey,
        ElementKind,
        Index,
        Relation,
    },
    points::PointTable,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Missing header row with element counts")]
    MissingHeader,

    #[error("Line {line}: expected {expected} fields, but found {found}: {row}")]
    WrongFieldCount {
        line: usize,
        expected: usize,
        found: usize,
        row: String,
    },

    #[error("Line {line}: invalid element count {value:?}: {row}")]
    InvalidCount {
        line: usize,
        value: String,
        row: String,
    },

    #[error("Line {line}: invalid key: {row}")]
    InvalidKey {
        line: usize,
        row: String,
        #[source]
        source: key::InvalidKey,
    },

    #[error("Line {line}: invalid coordinate {value:?}: {row}")]
    InvalidCoordinate {
        line: usize,
        value: String,
        row: String,
    },

    #[error("{kind} index {index} out of range ({count} declared)")]
    IndexOutOfRange {
        kind: ElementKind,
        index: Index,
        count: usize,
    },

    #[error("Line {line}: {kind} index {index} out of range ({count} declared): {row}")]
    RowIndexOutOfRange {
        line: usize,
        row: String,
        kind: ElementKind,
        index: Index,
        count: usize,
    },

    #[error("Too many elements: {count} {kind}s declared")]
    TooManyElements { kind: ElementKind, count: usize },
}
