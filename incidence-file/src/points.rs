//! Vertex coordinates. The row index is the vertex index.
//!
//! Blank lines between rows are rejected, since skipping them would shift
//! the index of every following vertex.

use std::io::BufRead;

use nalgebra::Point3;

use crate::{
    Error,
    key::Index,
    table::{
        Record,
        TableReader,
    },
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointTable {
    points: Vec<Point3<f64>>,
}

impl PointTable {
    pub fn from_reader(reader: impl BufRead) -> Result<Self, Error> {
        Self::from_records(TableReader::new(reader))
    }

    pub fn from_records(
        records: impl IntoIterator<Item = Result<Record, Error>>,
    ) -> Result<Self, Error> {
        let points = records
            .into_iter()
            .map(|record| {
                let record = record?;
                let coordinates = record.parse_fields::<f64, 3>(|record, value| {
                    Error::InvalidCoordinate {
                        line: record.line(),
                        value: value.to_owned(),
                        row: record.text(),
                    }
                })?;
                Ok(Point3::from(coordinates))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        tracing::debug!(num_points = points.len(), "read points table");

        Ok(Self { points })
    }

    pub fn get(&self, vertex: Index) -> Option<&Point3<f64>> {
        self.points.get(vertex as usize)
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point3<f64>>> for PointTable {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }
}
