use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The coordinate record types that are decoded into typed entities.
///
/// Every other record of a PDB file is treated as an opaque line. `ANISOU` lines are
/// routed to the coordinate section but have no kind here, so they are never decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `ATOM` or `HETATM`; the exact tag is kept on the [`Atom`] itself.
    Atom,
    /// `TER`, the end of a chain.
    Ter,
    /// `MODEL`, the start of one model in a multi-model file.
    Model,
    /// `ENDMDL`, the end of the current model.
    Endmdl,
}

#[derive(Debug, Error)]
#[error("Unrecognized coordinate record name '{0}'")]
pub struct ParseRecordKindError(pub String);

impl RecordKind {
    /// Determines the record kind from the whitespace-trimmed first six characters.
    pub fn from_line(line: &str) -> Option<Self> {
        record_name(line).parse().ok()
    }
}

impl FromStr for RecordKind {
    type Err = ParseRecordKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATOM" | "HETATM" => Ok(RecordKind::Atom),
            "TER" => Ok(RecordKind::Ter),
            "MODEL" => Ok(RecordKind::Model),
            "ENDMDL" => Ok(RecordKind::Endmdl),
            other => Err(ParseRecordKindError(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordKind::Atom => "ATOM/HETATM",
                RecordKind::Ter => "TER",
                RecordKind::Model => "MODEL",
                RecordKind::Endmdl => "ENDMDL",
            }
        )
    }
}

/// Returns the record name of a line: its first six characters with surrounding
/// whitespace removed.
pub fn record_name(line: &str) -> &str {
    let head = match line.char_indices().nth(6) {
        Some((end, _)) => &line[..end],
        None => line,
    };
    head.trim()
}

/// One `ATOM` or `HETATM` record.
///
/// The atom name is held in the readable convention (`HG11` rather than `1HG1`);
/// see [`crate::core::utils::identifiers`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// `ATOM` or `HETATM`, exactly as read.
    pub record_type: String,
    pub serial: usize,
    pub name: String,
    /// Alternate location indicator, a space when absent.
    pub alt_loc: char,
    pub residue_name: String,
    /// Chain identifier, `X` when the column is blank.
    pub chain_id: char,
    pub residue_number: isize,
    /// Residue insertion code, a space when absent.
    pub insertion_code: char,
    /// Orthogonal coordinates in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub temp_factor: f64,
    /// Right-justified element symbol, possibly empty.
    pub element: String,
    pub charge: String,
}

impl Atom {
    /// Creates an `ATOM` record with blank optional columns, full occupancy and a
    /// zero temperature factor.
    pub fn new(
        serial: usize,
        name: &str,
        residue_name: &str,
        chain_id: char,
        residue_number: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            record_type: "ATOM".to_string(),
            serial,
            name: name.to_string(),
            alt_loc: ' ',
            residue_name: residue_name.to_string(),
            chain_id,
            residue_number,
            insertion_code: ' ',
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: String::new(),
            charge: String::new(),
        }
    }

    pub fn is_hetero(&self) -> bool {
        self.record_type == "HETATM"
    }
}

/// A `TER` record. Carries no coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ter {
    pub record_type: String,
    pub serial: usize,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_number: isize,
    pub insertion_code: char,
}

impl Ter {
    pub fn new(serial: usize, residue_name: &str, chain_id: char, residue_number: isize) -> Self {
        Self {
            record_type: "TER".to_string(),
            serial,
            residue_name: residue_name.to_string(),
            chain_id,
            residue_number,
            insertion_code: ' ',
        }
    }
}

/// A `MODEL` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub record_type: String,
    pub serial: usize,
}

impl Model {
    pub fn new(serial: usize) -> Self {
        Self {
            record_type: "MODEL".to_string(),
            serial,
        }
    }
}

/// An `ENDMDL` record; only the tag is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endmdl {
    pub record_type: String,
}

impl Default for Endmdl {
    fn default() -> Self {
        Self {
            record_type: "ENDMDL".to_string(),
        }
    }
}

/// The decoded form of a single coordinate-section line.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateRecord {
    Model(Model),
    Atom(Atom),
    Ter(Ter),
    Endmdl(Endmdl),
}

impl CoordinateRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            CoordinateRecord::Model(_) => RecordKind::Model,
            CoordinateRecord::Atom(_) => RecordKind::Atom,
            CoordinateRecord::Ter(_) => RecordKind::Ter,
            CoordinateRecord::Endmdl(_) => RecordKind::Endmdl,
        }
    }
}

/// A borrowed view of one decoded record, used to walk a document in line order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordRef<'a> {
    Model(&'a Model),
    Atom(&'a Atom),
    Ter(&'a Ter),
    Endmdl(&'a Endmdl),
}

impl RecordRef<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRef::Model(_) => RecordKind::Model,
            RecordRef::Atom(_) => RecordKind::Atom,
            RecordRef::Ter(_) => RecordKind::Ter,
            RecordRef::Endmdl(_) => RecordKind::Endmdl,
        }
    }
}
