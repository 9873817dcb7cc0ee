use super::codec::{self, RecordError};
use super::options::{NamingPolicy, ReadOptions, UnrecognizedLines, WriteOptions};
use super::sections::{Classifier, UnclassifiedLine};
use super::traits::StructureFile;
use crate::core::models::document::{Document, RawLine, Section};
use crate::core::models::records::{CoordinateRecord, RecordKind, record_name};
use chrono::Local;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, trace, warn, warn_span};

/// First line of every file written by [`PdbFile`].
pub const ATTRIBUTION: &str = concat!(
    "REMARK   Created by pdbkit v",
    env!("CARGO_PKG_VERSION")
);

/// Sections that, when preserved, are written ahead of the coordinates.
const LEADING_SECTIONS: [Section; 7] = [
    Section::Title,
    Section::Primary,
    Section::Heterogen,
    Section::Secondary,
    Section::ConnectivityAnnotation,
    Section::Miscellaneous,
    Section::Crystallographic,
];

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: RecordError },
    #[error(transparent)]
    Unclassified(#[from] UnclassifiedLine),
    #[error("Cannot encode the record from line {line}: {kind}")]
    Encode { line: usize, kind: RecordError },
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type ReadOptions = ReadOptions;
    type WriteOptions = WriteOptions;
    type Error = PdbError;

    #[instrument(skip_all, name = "pdb_read")]
    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::ReadOptions,
    ) -> Result<Document, Self::Error> {
        let classifier = Classifier::new(*options);
        let mut document = Document::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let mut content = line_res?;
            if content.ends_with('\r') {
                content.pop();
            }
            classifier.classify_line(RawLine::new(line_num + 1, content), &mut document.sections)?;
        }

        document.decode_coordinates(options)?;
        debug!(
            lines = document.sections.total_lines(),
            atoms = document.atoms.len(),
            models = document.models.len(),
            "Read PDB document."
        );
        Ok(document)
    }

    #[instrument(skip_all, name = "pdb_write")]
    fn write_to(
        document: &Document,
        options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", ATTRIBUTION)?;
        writeln!(
            writer,
            "REMARK   Created: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.6f")
        )?;

        for section in LEADING_SECTIONS {
            if options.preserves(section) {
                write_raw(writer, document.sections.lines(section))?;
            }
        }

        for line in &document.sections.coordinate {
            if let Some(encoded) = reencode(line, options)? {
                writeln!(writer, "{}", encoded)?;
            }
        }

        if options.preserves(Section::Connectivity) {
            write_raw(writer, &document.sections.connectivity)?;
        }
        if options.preserves(Section::Bookkeeping) {
            for line in &document.sections.bookkeeping {
                if record_name(&line.content) != "END" {
                    writeln!(writer, "{}", line.content)?;
                }
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

fn write_raw(writer: &mut impl Write, lines: &[RawLine]) -> io::Result<()> {
    for line in lines {
        writeln!(writer, "{}", line.content)?;
    }
    Ok(())
}

/// Decodes a raw coordinate line and encodes it again, or returns `None` for lines
/// the writer leaves out.
fn reencode(line: &RawLine, options: &WriteOptions) -> Result<Option<String>, PdbError> {
    let wanted = match RecordKind::from_line(&line.content) {
        Some(RecordKind::Atom | RecordKind::Ter) => true,
        Some(RecordKind::Model | RecordKind::Endmdl) => options.keep_models,
        None => false,
    };
    if !wanted {
        trace!(line = line.number, "Omitting coordinate line from output.");
        return Ok(None);
    }

    let record = codec::decode(&line.content, options.naming).map_err(|kind| PdbError::Parse {
        line: line.number,
        kind,
    })?;
    let encoded = codec::encode(&record, options.naming).map_err(|kind| PdbError::Encode {
        line: line.number,
        kind,
    })?;
    Ok(Some(encoded))
}

impl Document {
    /// Loads a PDB file with the default (lossy) read policies.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PdbError> {
        PdbFile::read_from_path(path, &ReadOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self, PdbError> {
        PdbFile::read_from_path(path, options)
    }

    /// Writes the preamble, the `ATOM`/`HETATM`/`TER` records and a closing `END`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), PdbError> {
        PdbFile::write_to_path(self, &WriteOptions::default(), path)
    }

    pub fn write_with<P: AsRef<Path>>(
        &self,
        path: P,
        options: &WriteOptions,
    ) -> Result<(), PdbError> {
        PdbFile::write_to_path(self, options, path)
    }

    /// Re-encodes every `ATOM`/`HETATM` line of the coordinate section from the
    /// matching entry of `atoms`, so edits to the atoms reach the writer.
    ///
    /// Atoms are paired with atom lines by position. Returns the number of lines
    /// rewritten. Lines are only replaced once all of them have encoded.
    pub fn sync_atom_lines(&mut self, naming: NamingPolicy) -> Result<usize, PdbError> {
        let mut atoms = self.atoms.iter();
        let mut updates = Vec::new();

        for (index, line) in self.sections.coordinate.iter().enumerate() {
            if RecordKind::from_line(&line.content) != Some(RecordKind::Atom) {
                continue;
            }
            let Some(atom) = atoms.next() else {
                break;
            };
            let encoded = codec::encode_atom(atom, naming).map_err(|kind| PdbError::Encode {
                line: line.number,
                kind,
            })?;
            updates.push((index, encoded));
        }

        let rewritten = updates.len();
        for (index, encoded) in updates {
            self.sections.coordinate[index].content = encoded;
        }
        Ok(rewritten)
    }

    /// Rebuilds the typed record sequences from the coordinate section.
    ///
    /// Returns the number of coordinate lines skipped because no record kind
    /// matches them. On error the existing records are left untouched.
    pub fn decode_coordinates(&mut self, options: &ReadOptions) -> Result<usize, PdbError> {
        let mut models = Vec::new();
        let mut atoms = Vec::new();
        let mut ters = Vec::new();
        let mut endmdls = Vec::new();
        let mut skipped = 0;

        for line in &self.sections.coordinate {
            let _span = warn_span!("coordinate", line = line.number).entered();
            match codec::decode(&line.content, options.naming) {
                Ok(CoordinateRecord::Model(model)) => models.push(model),
                Ok(CoordinateRecord::Atom(atom)) => atoms.push(atom),
                Ok(CoordinateRecord::Ter(ter)) => ters.push(ter),
                Ok(CoordinateRecord::Endmdl(endmdl)) => endmdls.push(endmdl),
                Err(RecordError::UnrecognizedRecord(record))
                    if options.unrecognized_lines == UnrecognizedLines::Drop =>
                {
                    warn!("Skipping coordinate record '{}' with no decoder.", record);
                    skipped += 1;
                }
                Err(kind) => {
                    return Err(PdbError::Parse {
                        line: line.number,
                        kind,
                    });
                }
            }
        }

        self.models = models;
        self.atoms = atoms;
        self.ters = ters;
        self.endmdls = endmdls;
        Ok(skipped)
    }

    /// Encodes a record into the coordinate section and appends its decoded form.
    ///
    /// The stored entity is decoded from the encoded line, so it reflects the
    /// column defaults (a blank chain becomes `X`, for instance).
    pub fn push_record(
        &mut self,
        record: &CoordinateRecord,
        naming: NamingPolicy,
    ) -> Result<(), RecordError> {
        let content = codec::encode(record, naming)?;
        let decoded = codec::decode(&content, naming)?;
        let number = self
            .sections
            .coordinate
            .last()
            .map_or(1, |line| line.number + 1);
        self.push_coordinate_line(number, content);

        match decoded {
            CoordinateRecord::Model(model) => self.models.push(model),
            CoordinateRecord::Atom(atom) => self.atoms.push(atom),
            CoordinateRecord::Ter(ter) => self.ters.push(ter),
            CoordinateRecord::Endmdl(endmdl) => self.endmdls.push(endmdl),
        }
        Ok(())
    }
}
