//! Adjacency table and face-vertex derivation.

use std::{
    collections::HashSet,
    io::BufRead,
};

use crate::{
    Error,
    key::{
        CellKey,
        ElementKind,
        Index,
        Relation,
    },
    table::{
        Record,
        TableReader,
    },
};

/// Element counts from the first row of an adjacency table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub num_vertices: usize,
    pub num_edges: usize,
    pub num_faces: usize,
    pub num_volumes: usize,
}

impl Header {
    pub fn from_record(record: &Record) -> Result<Self, Error> {
        let [num_vertices, num_edges, num_faces, num_volumes] =
            record.parse_fields::<usize, 4>(|record, value| {
                Error::InvalidCount {
                    line: record.line(),
                    value: value.to_owned(),
                    row: record.text(),
                }
            })?;

        Ok(Self {
            num_vertices,
            num_edges,
            num_faces,
            num_volumes,
        })
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.num_vertices,
            ElementKind::Edge => self.num_edges,
            ElementKind::Face => self.num_faces,
            ElementKind::Volume => self.num_volumes,
        }
    }
}

/// A single incidence row: `high` references `low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyRow {
    pub high: CellKey,
    pub low: CellKey,
}

impl AdjacencyRow {
    pub fn from_record(record: &Record) -> Result<Self, Error> {
        record.expect_len(2)?;

        let parse_key = |field: &str| {
            field.parse::<CellKey>().map_err(|source| {
                Error::InvalidKey {
                    line: record.line(),
                    row: record.text(),
                    source,
                }
            })
        };

        Ok(Self {
            high: parse_key(&record.fields()[0])?,
            low: parse_key(&record.fields()[1])?,
        })
    }

    /// The relation this row belongs to. Only the first key's table type is
    /// used, the second key only contributes its index.
    pub fn relation(&self, record: &Record) -> Result<Relation, Error> {
        self.high.relation().map_err(|source| {
            Error::InvalidKey {
                line: record.line(),
                row: record.text(),
                source,
            }
        })
    }
}

/// Incidence lists as stored in an adjacency table.
///
/// Lists keep the order of the rows they were read from. Duplicates are
/// kept as well.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyTable {
    header: Header,
    edge_vertices: Vec<Vec<Index>>,
    face_edges: Vec<Vec<Index>>,
    volume_faces: Vec<Vec<Index>>,
}

impl AdjacencyTable {
    /// Creates empty incidence lists for the counts in `header`.
    ///
    /// Fails if a count can't be addressed by an [`Index`] or the lists
    /// can't be allocated.
    pub fn new(header: Header) -> Result<Self, Error> {
        Ok(Self {
            header,
            edge_vertices: empty_lists(ElementKind::Edge, header.num_edges)?,
            face_edges: empty_lists(ElementKind::Face, header.num_faces)?,
            volume_faces: empty_lists(ElementKind::Volume, header.num_volumes)?,
        })
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, Error> {
        Self::from_records(TableReader::new(reader))
    }

    pub fn from_records(
        records: impl IntoIterator<Item = Result<Record, Error>>,
    ) -> Result<Self, Error> {
        // row order doesn't matter here, so blank lines can be skipped
        let mut records = records
            .into_iter()
            .filter(|record| !matches!(record, Ok(record) if record.is_empty()));

        let header = records.next().ok_or(Error::MissingHeader)??;
        let header = Header::from_record(&header)?;
        tracing::debug!(?header, "read adjacency header");

        let mut table = Self::new(header)?;
        let mut num_rows = 0;

        for record in records {
            table.insert_record(&record?)?;
            num_rows += 1;
        }

        tracing::debug!(num_rows, "read adjacency table");

        Ok(table)
    }

    /// Appends `low` to the incidence list of `high`.
    pub fn insert(&mut self, relation: Relation, high: Index, low: Index) -> Result<(), Error> {
        let count = self.lists(relation).len();
        let list = self
            .list_mut(relation, high)
            .ok_or(Error::IndexOutOfRange {
                kind: relation.high(),
                index: high,
                count,
            })?;
        list.push(low);

        Ok(())
    }

    /// Parses an incidence row and inserts it. Errors refer to the record's
    /// line.
    pub fn insert_record(&mut self, record: &Record) -> Result<(), Error> {
        let row = AdjacencyRow::from_record(record)?;
        let relation = row.relation(record)?;
        let count = self.lists(relation).len();

        let list = self
            .list_mut(relation, row.high.index)
            .ok_or_else(|| {
                Error::RowIndexOutOfRange {
                    line: record.line(),
                    row: record.text(),
                    kind: relation.high(),
                    index: row.high.index,
                    count,
                }
            })?;
        list.push(row.low.index);

        Ok(())
    }

    fn lists(&self, relation: Relation) -> &[Vec<Index>] {
        match relation {
            Relation::EdgeVertex => &self.edge_vertices,
            Relation::FaceEdge => &self.face_edges,
            Relation::VolumeFace => &self.volume_faces,
        }
    }

    fn list_mut(&mut self, relation: Relation, high: Index) -> Option<&mut Vec<Index>> {
        let lists = match relation {
            Relation::EdgeVertex => &mut self.edge_vertices,
            Relation::FaceEdge => &mut self.face_edges,
            Relation::VolumeFace => &mut self.volume_faces,
        };
        lists.get_mut(high as usize)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn edge_vertices(&self) -> &[Vec<Index>] {
        &self.edge_vertices
    }

    pub fn face_edges(&self) -> &[Vec<Index>] {
        &self.face_edges
    }

    pub fn volume_faces(&self) -> &[Vec<Index>] {
        &self.volume_faces
    }

    /// Vertices of a face, collected through all of its edges.
    ///
    /// Every vertex is listed once, in the order it is first reached:
    /// edges in the order the face lists them, then the edge's vertices in
    /// order. This is not a winding order.
    pub fn vertices_of_face(&self, face: Index) -> Result<Vec<Index>, Error> {
        let edges = self
            .face_edges
            .get(face as usize)
            .ok_or(Error::IndexOutOfRange {
                kind: ElementKind::Face,
                index: face,
                count: self.face_edges.len(),
            })?;

        let mut seen = HashSet::new();
        let mut vertices = vec![];

        for &edge in edges {
            let edge_vertices =
                self.edge_vertices
                    .get(edge as usize)
                    .ok_or(Error::IndexOutOfRange {
                        kind: ElementKind::Edge,
                        index: edge,
                        count: self.edge_vertices.len(),
                    })?;

            for &vertex in edge_vertices {
                if seen.insert(vertex) {
                    vertices.push(vertex);
                }
            }
        }

        Ok(vertices)
    }

    /// Derives the face-vertex relation for all faces.
    pub fn face_vertices(&self) -> Result<Vec<Vec<Index>>, Error> {
        (0..self.face_edges.len())
            .map(|face| self.vertices_of_face(face as Index))
            .collect()
    }

    /// Keeps only the relations needed to draw the complex.
    pub fn into_complex(self) -> Result<CellComplex, Error> {
        let face_vertices = self.face_vertices()?;
        Ok(CellComplex {
            volume_faces: self.volume_faces,
            face_vertices,
        })
    }
}

fn empty_lists(kind: ElementKind, count: usize) -> Result<Vec<Vec<Index>>, Error> {
    let too_many = || Error::TooManyElements { kind, count };

    // every element must be addressable by an index
    if Index::try_from(count.saturating_sub(1)).is_err() {
        return Err(too_many());
    }

    let mut lists = Vec::new();
    lists.try_reserve_exact(count).map_err(|_| too_many())?;
    lists.resize_with(count, Vec::new);
    Ok(lists)
}

/// Volume-face and face-vertex relations of a cell complex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellComplex {
    pub volume_faces: Vec<Vec<Index>>,
    pub face_vertices: Vec<Vec<Index>>,
}

impl CellComplex {
    pub fn num_volumes(&self) -> usize {
        self.volume_faces.len()
    }

    pub fn num_faces(&self) -> usize {
        self.face_vertices.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::{
        SeedableRng,
        rngs::StdRng,
        seq::SliceRandom,
    };

    use crate::{
        CellKey,
        ElementKind,
        Error,
        Index,
        Relation,
        adjacency::{
            AdjacencyTable,
            Header,
        },
        key::InvalidKey,
    };

    const SINGLE_FACE: &str = "\
2,2,1,1
1_0,0_0
1_0,0_1
1_1,0_1
1_1,0_2
2_0,1_0
2_0,1_1
3_0,2_0
";

    /// A tetrahedron: 4 vertices, 6 edges, 4 faces, 1 volume.
    fn tetrahedron_rows() -> Vec<String> {
        let edges: [[Index; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
        let faces: [[Index; 3]; 4] = [[0, 1, 3], [0, 2, 4], [1, 2, 5], [3, 4, 5]];

        let mut rows = vec![];
        for (edge, vertices) in edges.iter().enumerate() {
            for vertex in vertices {
                rows.push(row(Relation::EdgeVertex, edge as Index, *vertex));
            }
        }
        for (face, edges) in faces.iter().enumerate() {
            for edge in edges {
                rows.push(row(Relation::FaceEdge, face as Index, *edge));
            }
        }
        for face in 0..4 {
            rows.push(row(Relation::VolumeFace, 0, face));
        }
        rows
    }

    fn row(relation: Relation, high: Index, low: Index) -> String {
        let low_key = CellKey::new(relation.low().dimension(), low);
        format!("{},{low_key}", CellKey::from_relation(relation, high))
    }

    fn table_from_rows(header: &str, rows: &[String]) -> AdjacencyTable {
        let input = format!("{header}\n{}\n", rows.join("\n"));
        AdjacencyTable::from_reader(input.as_bytes()).unwrap()
    }

    fn as_sets(lists: &[Vec<Index>]) -> Vec<BTreeSet<Index>> {
        lists
            .iter()
            .map(|list| list.iter().copied().collect())
            .collect()
    }

    #[test]
    fn it_builds_single_face_example() {
        let table = AdjacencyTable::from_reader(SINGLE_FACE.as_bytes()).unwrap();

        assert_eq!(
            *table.header(),
            Header {
                num_vertices: 2,
                num_edges: 2,
                num_faces: 1,
                num_volumes: 1,
            }
        );
        assert_eq!(table.edge_vertices(), [vec![0, 1], vec![1, 2]]);
        assert_eq!(table.face_edges(), [vec![0, 1]]);
        assert_eq!(table.volume_faces(), [vec![0]]);

        let complex = table.into_complex().unwrap();
        assert_eq!(complex.face_vertices, [vec![0, 1, 2]]);
        assert_eq!(complex.volume_faces, [vec![0]]);
    }

    #[test]
    fn lists_have_declared_lengths() {
        let table = AdjacencyTable::from_reader("5,7,3,2\n".as_bytes()).unwrap();
        assert_eq!(table.edge_vertices().len(), 7);
        assert_eq!(table.face_edges().len(), 3);
        assert_eq!(table.volume_faces().len(), 2);

        let complex = table.into_complex().unwrap();
        assert_eq!(complex.num_faces(), 3);
        assert_eq!(complex.num_volumes(), 2);
        assert!(complex.face_vertices.iter().all(Vec::is_empty));
    }

    #[test]
    fn face_vertices_are_unique() {
        // both edges list vertex 1, and edge 0 lists vertex 0 twice
        let input = "3,2,1,0\n1_0,0_0\n1_0,0_0\n1_0,0_1\n1_1,0_1\n1_1,0_2\n2_0,1_0\n2_0,1_1\n2_0,1_0\n";
        let table = AdjacencyTable::from_reader(input.as_bytes()).unwrap();

        assert_eq!(table.edge_vertices()[0], [0, 0, 1]);
        assert_eq!(table.face_vertices().unwrap(), [vec![0, 1, 2]]);
    }

    #[test]
    fn face_vertices_contain_all_edge_vertices() {
        let table = table_from_rows("4,6,4,1", &tetrahedron_rows());
        let face_vertices = table.face_vertices().unwrap();

        for (face, edges) in table.face_edges().iter().enumerate() {
            for edge in edges {
                for vertex in &table.edge_vertices()[*edge as usize] {
                    assert!(
                        face_vertices[face].contains(vertex),
                        "vertex {vertex} of edge {edge} missing from face {face}"
                    );
                }
            }
            assert_eq!(face_vertices[face].len(), 3);
        }
    }

    #[test]
    fn row_order_does_not_change_membership() {
        let rows = tetrahedron_rows();
        let expected = table_from_rows("4,6,4,1", &rows);

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..16 {
            let mut shuffled = rows.clone();
            shuffled.shuffle(&mut rng);
            let table = table_from_rows("4,6,4,1", &shuffled);

            assert_eq!(
                as_sets(table.edge_vertices()),
                as_sets(expected.edge_vertices())
            );
            assert_eq!(as_sets(table.face_edges()), as_sets(expected.face_edges()));
            assert_eq!(
                as_sets(table.volume_faces()),
                as_sets(expected.volume_faces())
            );
            assert_eq!(
                as_sets(&table.face_vertices().unwrap()),
                as_sets(&expected.face_vertices().unwrap())
            );
        }
    }

    #[test]
    fn it_rejects_unknown_table_type() {
        let error = AdjacencyTable::from_reader("1,1,1,1\n4_0,2_0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidKey {
                line: 2,
                source: InvalidKey::UnknownTableType { table_type: 4 },
                ..
            }
        ));
    }

    #[test]
    fn second_key_table_type_is_ignored() {
        let table = AdjacencyTable::from_reader("2,1,0,0\n1_0,7_1\n".as_bytes()).unwrap();
        assert_eq!(table.edge_vertices(), [vec![1]]);
    }

    #[test]
    fn it_rejects_malformed_rows() {
        let cases = [
            "1,1,1,1\n1_0\n",
            "1,1,1,1\n1_0,0_0,0_1\n",
            "1,1,1,1\n10,0_0\n",
            "1,1,1,1\n1_x,0_0\n",
            "1,1,1,1\n1_0,0_y\n",
        ];
        for input in cases {
            let result = AdjacencyTable::from_reader(input.as_bytes());
            assert!(
                matches!(
                    result,
                    Err(Error::WrongFieldCount { line: 2, .. } | Error::InvalidKey { line: 2, .. })
                ),
                "{input:?} was accepted: {result:?}"
            );
        }
    }

    #[test]
    fn it_rejects_bad_headers() {
        assert!(matches!(
            AdjacencyTable::from_reader("".as_bytes()),
            Err(Error::MissingHeader)
        ));
        assert!(matches!(
            AdjacencyTable::from_reader("1,2,3\n".as_bytes()),
            Err(Error::WrongFieldCount {
                expected: 4,
                found: 3,
                ..
            })
        ));
        assert!(matches!(
            AdjacencyTable::from_reader("1,2,three,4\n".as_bytes()),
            Err(Error::InvalidCount { line: 1, .. })
        ));
    }

    #[test]
    fn it_rejects_high_index_out_of_range() {
        let error =
            AdjacencyTable::from_reader("3,1,1,1\n1_0,0_0\n1_1,0_0\n".as_bytes()).unwrap_err();
        match error {
            Error::RowIndexOutOfRange {
                line,
                row,
                kind,
                index,
                count,
            } => {
                assert_eq!(line, 3);
                assert_eq!(row, "1_1, 0_0");
                assert_eq!(kind, ElementKind::Edge);
                assert_eq!(index, 1);
                assert_eq!(count, 1);
            }
            _ => panic!("unexpected error: {error:?}"),
        }
    }

    #[test]
    fn insert_checks_high_index() {
        let mut table = AdjacencyTable::new(Header {
            num_vertices: 2,
            num_edges: 1,
            num_faces: 0,
            num_volumes: 0,
        })
        .unwrap();

        table.insert(Relation::EdgeVertex, 0, 1).unwrap();
        assert!(matches!(
            table.insert(Relation::FaceEdge, 0, 0),
            Err(Error::IndexOutOfRange {
                kind: ElementKind::Face,
                index: 0,
                count: 0,
            })
        ));
        assert_eq!(table.edge_vertices(), [vec![1]]);
    }

    #[test]
    fn it_rejects_huge_counts() {
        let error =
            AdjacencyTable::from_reader("0,1000000000000000000,0,0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            error,
            Error::TooManyElements {
                kind: ElementKind::Edge,
                count: 1_000_000_000_000_000_000,
            }
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = AdjacencyTable::from_reader("\n2,1,0,0\n\n1_0,0_0\n\n1_0,0_1\n".as_bytes())
            .unwrap();
        assert_eq!(table.edge_vertices(), [vec![0, 1]]);
    }

    #[test]
    fn derivation_rejects_unknown_edges() {
        let table = AdjacencyTable::from_reader("3,1,1,0\n1_0,0_0\n2_0,1_5\n".as_bytes()).unwrap();
        assert!(matches!(
            table.face_vertices(),
            Err(Error::IndexOutOfRange {
                kind: ElementKind::Edge,
                index: 5,
                count: 1,
            })
        ));
    }
}
