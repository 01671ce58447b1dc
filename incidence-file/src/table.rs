//! Line-oriented reader for comma-separated tables.

use std::{
    io::{
        BufRead,
        Lines,
    },
    ops::Range,
    str::FromStr,
};

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::Error;

const DELIMITER: char = ',';

/// One line of a table, split into trimmed fields.
///
/// Blank lines have no fields at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    line: usize,
    fields: SmallVec<[String; 4]>,
}

impl Record {
    pub fn parse(line: usize, text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::blank(line);
        }

        let fields = text
            .split(DELIMITER)
            .map(|field| field.trim().to_owned())
            .collect();
        Self { line, fields }
    }

    pub fn blank(line: usize) -> Self {
        Self {
            line,
            fields: SmallVec::new(),
        }
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record as it would be written back, for error messages.
    pub fn text(&self) -> String {
        self.fields.join(", ")
    }

    pub fn expect_len(&self, expected: usize) -> Result<(), Error> {
        if self.len() == expected {
            Ok(())
        }
        else {
            Err(Error::WrongFieldCount {
                line: self.line,
                expected,
                found: self.len(),
                row: self.text(),
            })
        }
    }

    /// Parses every field, failing on the first one that doesn't parse.
    pub fn parse_fields<T, const N: usize>(
        &self,
        mut on_error: impl FnMut(&Self, &str) -> Error,
    ) -> Result<[T; N], Error>
    where
        T: FromStr,
    {
        self.expect_len(N)?;

        let mut values: ArrayVec<T, N> = ArrayVec::new_const();
        for field in &self.fields {
            values.push(field.parse().map_err(|_| on_error(self, field))?);
        }

        Ok(values.into_inner().unwrap_or_else(|_| unreachable!()))
    }
}

/// Iterator over the records of a table.
///
/// Blank lines at the end of the input are dropped. Blank lines followed by
/// more data are yielded as [blank records](Record::blank), so that record
/// positions stay meaningful.
#[derive(Debug)]
pub struct TableReader<R> {
    lines: Lines<R>,
    line_number: usize,
    blank_lines: Range<usize>,
    lookahead: Option<Record>,
}

impl<R: BufRead> TableReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            blank_lines: 0..0,
            lookahead: None,
        }
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.blank_lines.next() {
            return Some(Ok(Record::blank(line)));
        }
        if let Some(record) = self.lookahead.take() {
            return Some(Ok(record));
        }

        let first_line = self.line_number + 1;
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(error) => return Some(Err(error.into())),
            };
            self.line_number += 1;

            let record = Record::parse(self.line_number, &line);
            if record.is_empty() {
                continue;
            }

            if first_line < self.line_number {
                // hold the record back until the blank lines before it are out
                self.blank_lines = first_line + 1..self.line_number;
                self.lookahead = Some(record);
                return Some(Ok(Record::blank(first_line)));
            }

            return Some(Ok(record));
        }
    }
}
