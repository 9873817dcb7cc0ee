use crate::core::models::document::Section;
use serde::Deserialize;

/// What to do with a line whose record name is not in the section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnrecognizedLines {
    /// Discard the line from every section.
    #[default]
    Drop,
    /// Fail the read, naming the offending line.
    Reject,
}

/// Which records make up the secondary-structure section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecondaryRecords {
    /// `HELIX` only. `SHEET` and `TURN` lines are treated as unrecognized.
    #[default]
    HelixOnly,
    /// `HELIX`, `SHEET` and `TURN`.
    Full,
}

/// How to treat a four-character atom name that is not a recognizable hydrogen name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingPolicy {
    /// Log a warning and keep the name as it was read.
    #[default]
    Warn,
    /// Fail the decode or encode call.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ReadOptions {
    pub unrecognized_lines: UnrecognizedLines,
    pub secondary_records: SecondaryRecords,
    pub naming: NamingPolicy,
}

impl ReadOptions {
    /// Rejects unrecognized lines and unexpected atom names.
    ///
    /// The secondary section keeps its `HELIX`-only table, so `SHEET` and `TURN`
    /// lines fail a strict read unless [`SecondaryRecords::Full`] is also chosen.
    pub fn strict() -> Self {
        Self {
            unrecognized_lines: UnrecognizedLines::Reject,
            secondary_records: SecondaryRecords::HelixOnly,
            naming: NamingPolicy::Reject,
        }
    }

    pub fn with_secondary_records(mut self, records: SecondaryRecords) -> Self {
        self.secondary_records = records;
        self
    }
}

/// Controls what the PDB writer emits besides `ATOM`, `HETATM` and `TER` records.
///
/// The default writes only those records, between the two-line preamble and the
/// closing `END`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct WriteOptions {
    /// Raw sections copied verbatim into the output. The coordinate section is
    /// always re-encoded and is ignored here.
    pub preserve_sections: Vec<Section>,
    /// Re-encode `MODEL` and `ENDMDL` records instead of omitting them.
    pub keep_models: bool,
    pub naming: NamingPolicy,
}

impl WriteOptions {
    pub fn preserves(&self, section: Section) -> bool {
        section != Section::Coordinate && self.preserve_sections.contains(&section)
    }
}
