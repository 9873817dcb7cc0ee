//! Sorting of raw lines into sections by record name.
//!
//! A line belongs to the section of its record name (the trimmed first six
//! characters), looked up exactly, so `HETATM` is a coordinate record and not a
//! heterogen one, and `ENDMDL` is not bookkeeping.

use super::options::{ReadOptions, SecondaryRecords, UnrecognizedLines};
use crate::core::models::document::{RawLine, RawSections, Section};
use crate::core::models::records::record_name;
use phf::{Map, Set, phf_map, phf_set};
use thiserror::Error;
use tracing::trace;

static RECORD_SECTIONS: Map<&'static str, Section> = phf_map! {
    "HEADER" => Section::Title, "OBSLTE" => Section::Title, "TITLE" => Section::Title,
    "CAVEAT" => Section::Title, "COMPND" => Section::Title, "SOURCE" => Section::Title,
    "KEYWDS" => Section::Title, "EXPDTA" => Section::Title, "AUTHOR" => Section::Title,
    "REVDAT" => Section::Title, "SPRSDE" => Section::Title, "JRNL" => Section::Title,
    "REMARK" => Section::Title,
    "DBREF" => Section::Primary, "SEQADV" => Section::Primary, "SEQRES" => Section::Primary,
    "MODRES" => Section::Primary,
    "HET" => Section::Heterogen, "HETNAM" => Section::Heterogen, "HETSYN" => Section::Heterogen,
    "FORMUL" => Section::Heterogen,
    "HELIX" => Section::Secondary,
    "SSBOND" => Section::ConnectivityAnnotation, "LINK" => Section::ConnectivityAnnotation,
    "CISPEP" => Section::ConnectivityAnnotation,
    "SITE" => Section::Miscellaneous,
    "CRYST1" => Section::Crystallographic,
    "MODEL" => Section::Coordinate, "ATOM" => Section::Coordinate, "ANISOU" => Section::Coordinate,
    "TER" => Section::Coordinate, "HETATM" => Section::Coordinate, "ENDMDL" => Section::Coordinate,
    "CONECT" => Section::Connectivity,
    "MASTER" => Section::Bookkeeping, "END" => Section::Bookkeeping,
};

/// Records written with a trailing single-digit index, e.g. `MTRIX1` or `SCALE3`.
static INDEXED_RECORD_SECTIONS: Map<&'static str, Section> = phf_map! {
    "MTRIX" => Section::Crystallographic,
    "ORIGX" => Section::Crystallographic,
    "SCALE" => Section::Crystallographic,
};

/// Secondary-structure records beyond `HELIX`, only recognized with
/// [`SecondaryRecords::Full`].
static EXTENDED_SECONDARY: Set<&'static str> = phf_set! { "SHEET", "TURN" };

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized record '{record}' on line {line}")]
pub struct UnclassifiedLine {
    pub line: usize,
    pub record: String,
}

/// Looks up the section of a record name.
pub fn section_of(record: &str, secondary: SecondaryRecords) -> Option<Section> {
    if let Some(section) = RECORD_SECTIONS.get(record) {
        return Some(*section);
    }
    if secondary == SecondaryRecords::Full && EXTENDED_SECONDARY.contains(record) {
        return Some(Section::Secondary);
    }
    match record.char_indices().last() {
        Some((index, last)) if last.is_ascii_digit() => {
            INDEXED_RECORD_SECTIONS.get(&record[..index]).copied()
        }
        _ => None,
    }
}

/// Sorts lines into [`RawSections`] under the policies of a [`ReadOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    options: ReadOptions,
}

impl Classifier {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    /// Adds one line to its section and returns that section.
    ///
    /// Blank lines are skipped. Lines with an unknown record name are dropped
    /// (`Ok(None)`) or rejected, depending on the unrecognized-line policy.
    pub fn classify_line(
        &self,
        line: RawLine,
        sections: &mut RawSections,
    ) -> Result<Option<Section>, UnclassifiedLine> {
        if line.content.trim().is_empty() {
            return Ok(None);
        }
        let record = record_name(&line.content);
        match section_of(record, self.options.secondary_records) {
            Some(section) => {
                sections.push(section, line);
                Ok(Some(section))
            }
            None => match self.options.unrecognized_lines {
                UnrecognizedLines::Drop => {
                    trace!(line = line.number, record, "Dropping unrecognized line.");
                    Ok(None)
                }
                UnrecognizedLines::Reject => Err(UnclassifiedLine {
                    line: line.number,
                    record: record.to_string(),
                }),
            },
        }
    }

    pub fn classify<I>(&self, lines: I) -> Result<RawSections, UnclassifiedLine>
    where
        I: IntoIterator<Item = RawLine>,
    {
        let mut sections = RawSections::default();
        for line in lines {
            self.classify_line(line, &mut sections)?;
        }
        Ok(sections)
    }
}
