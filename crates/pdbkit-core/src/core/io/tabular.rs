use crate::core::models::records::{Atom, CoordinateRecord, Ter};
use csv::{ReaderBuilder, StringRecord, Trim};
use nalgebra::Point3;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

const COORDINATE_FIELDS: usize = 11;
const TERMINATOR_FIELDS: usize = 5;

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error on row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Row {row} has no record type")]
    EmptyRow { row: usize },
    #[error("Unknown record type '{keyword}' on row {row}; expected ATOM, HETATM or TER")]
    UnknownRecordType { row: usize, keyword: String },
    #[error("The {field} '{value}' on row {row} is longer than {limit} character(s)")]
    FieldTooWide {
        row: usize,
        field: &'static str,
        value: String,
        limit: usize,
    },
}

const CHAIN_ID_WIDTH: usize = 1;
const RESIDUE_NAME_WIDTH: usize = 3;

/// An `ATOM`/`HETATM` row: keyword, serial, atom name, residue name, chain,
/// residue number, x, y, z, occupancy, temperature factor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoordinateRow {
    pub record_type: String,
    pub serial: usize,
    pub atom_name: String,
    pub residue_name: String,
    pub chain_id: String,
    pub residue_number: isize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy: f64,
    pub temp_factor: f64,
}

/// A `TER` row: keyword, serial, residue name, chain, residue number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TerminatorRow {
    pub record_type: String,
    pub serial: usize,
    pub residue_name: String,
    pub chain_id: String,
    pub residue_number: isize,
}

/// One row of tabular coordinate input. The keyword in the first field selects the
/// shape of the rest of the row.
#[derive(Debug, Clone, PartialEq)]
pub enum TabularRow {
    Coordinate(CoordinateRow),
    Terminator(TerminatorRow),
}

fn chain_char(chain_id: &str) -> char {
    chain_id.chars().next().unwrap_or(' ')
}

fn check_width(
    row: usize,
    field: &'static str,
    value: &str,
    limit: usize,
) -> Result<(), TabularError> {
    if value.chars().count() > limit {
        return Err(TabularError::FieldTooWide {
            row,
            field,
            value: value.to_string(),
            limit,
        });
    }
    Ok(())
}

impl TabularRow {
    /// Builds a row from one CSV record. `row` is the 1-indexed row number used in
    /// error messages.
    ///
    /// Chain identifiers longer than one character and residue names longer than
    /// three are rejected rather than cut to fit.
    pub fn from_record(record: &StringRecord, row: usize) -> Result<Self, TabularError> {
        let parsed = Self::deserialize_record(record, row)?;
        let (chain_id, residue_name) = match &parsed {
            TabularRow::Coordinate(r) => (&r.chain_id, &r.residue_name),
            TabularRow::Terminator(r) => (&r.chain_id, &r.residue_name),
        };
        check_width(row, "chain identifier", chain_id, CHAIN_ID_WIDTH)?;
        check_width(row, "residue name", residue_name, RESIDUE_NAME_WIDTH)?;
        Ok(parsed)
    }

    fn deserialize_record(record: &StringRecord, row: usize) -> Result<Self, TabularError> {
        let keyword = record.get(0).map(str::trim).unwrap_or("");
        let take = |count: usize| -> StringRecord { record.iter().take(count).collect() };

        match keyword {
            "" => Err(TabularError::EmptyRow { row }),
            "ATOM" | "HETATM" => take(COORDINATE_FIELDS)
                .deserialize(None)
                .map(TabularRow::Coordinate)
                .map_err(|source| TabularError::Csv { row, source }),
            "TER" => take(TERMINATOR_FIELDS)
                .deserialize(None)
                .map(TabularRow::Terminator)
                .map_err(|source| TabularError::Csv { row, source }),
            other => Err(TabularError::UnknownRecordType {
                row,
                keyword: other.to_string(),
            }),
        }
    }

    /// Converts the row into the record it describes. Columns the table does not
    /// carry (alternate location, insertion code, element, charge) are left blank.
    pub fn to_record(&self) -> CoordinateRecord {
        match self {
            TabularRow::Coordinate(row) => {
                let mut atom = Atom::new(
                    row.serial,
                    &row.atom_name,
                    &row.residue_name,
                    chain_char(&row.chain_id),
                    row.residue_number,
                    Point3::new(row.x, row.y, row.z),
                );
                atom.record_type = row.record_type.clone();
                atom.occupancy = row.occupancy;
                atom.temp_factor = row.temp_factor;
                CoordinateRecord::Atom(atom)
            }
            TabularRow::Terminator(row) => {
                let mut ter = Ter::new(
                    row.serial,
                    &row.residue_name,
                    chain_char(&row.chain_id),
                    row.residue_number,
                );
                ter.record_type = row.record_type.clone();
                CoordinateRecord::Ter(ter)
            }
        }
    }
}

/// Reads header-less CSV rows, pairing each with its 1-indexed row number.
///
/// Rows may have different lengths; `TER` rows only need their first five fields.
pub fn read_rows(reader: impl Read) -> Result<Vec<(usize, TabularRow)>, TabularError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = result.map_err(|source| TabularError::Csv { row, source })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push((row, TabularRow::from_record(&record, row)?));
    }
    Ok(rows)
}

pub fn read_rows_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<(usize, TabularRow)>, TabularError> {
    let file = File::open(path)?;
    read_rows(io::BufReader::new(file))
}
