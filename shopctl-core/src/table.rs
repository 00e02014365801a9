//! Tab-separated result tables printed to the console

use std::io::{self, Write};

/// Text rendering of a NULL cell
pub const NULL_CELL: &str = "null";

/// Column names plus rows of already-stringified cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Records that know how to lay themselves out as a table row
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl ResultTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_records<'a, T, I>(records: I) -> Self
    where
        T: Tabular + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut table = Self::new(T::COLUMNS.iter().copied());
        table.rows = records.into_iter().map(Tabular::cells).collect();
        table
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the header and rows, every cell followed by a tab.
    ///
    /// The header is only written when there is at least one row. Returns
    /// the number of rows written.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<usize> {
        if self.rows.is_empty() {
            return Ok(0);
        }
        for column in &self.columns {
            write!(out, "{}\t", column)?;
        }
        writeln!(out)?;
        for row in &self.rows {
            for cell in row {
                write!(out, "{}\t", cell)?;
            }
            writeln!(out)?;
        }
        Ok(self.rows.len())
    }
}
