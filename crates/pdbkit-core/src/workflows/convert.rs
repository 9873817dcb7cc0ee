use crate::core::io::options::{ReadOptions, WriteOptions};
use crate::core::io::pdb::PdbError;
use crate::core::models::document::{Document, Section};
use crate::core::models::records::{RecordKind, record_name};
use std::path::Path;
use tracing::{info, instrument, warn};

/// What a conversion read and what it left out of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub lines_read: usize,
    pub atoms: usize,
    pub ters: usize,
    pub models: usize,
    /// Coordinate lines without a record kind, such as `ANISOU`.
    pub omitted_coordinate_lines: usize,
    /// Non-empty sections that were not written, with their line counts. `END` is
    /// not counted because the writer always closes the file with one.
    pub omitted_sections: Vec<(Section, usize)>,
}

impl ConversionSummary {
    pub fn from_document(document: &Document, options: &WriteOptions) -> Self {
        let omitted_coordinate_lines = document
            .sections
            .coordinate
            .iter()
            .filter(|line| RecordKind::from_line(&line.content).is_none())
            .count();

        let omitted_sections = document
            .sections
            .iter()
            .filter(|(section, _)| {
                *section != Section::Coordinate && !options.preserves(*section)
            })
            .map(|(section, lines)| {
                let count = lines
                    .iter()
                    .filter(|line| record_name(&line.content) != "END")
                    .count();
                (section, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        Self {
            lines_read: document.sections.total_lines(),
            atoms: document.atoms.len(),
            ters: document.ters.len(),
            models: document.models.len(),
            omitted_coordinate_lines,
            omitted_sections,
        }
    }
}

/// Reads a PDB file and writes its normalized form.
///
/// Coordinate records are re-encoded into strict columns; everything else is kept
/// only as far as `write_options` asks for it.
#[instrument(skip_all, name = "convert_workflow")]
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    read_options: &ReadOptions,
    write_options: &WriteOptions,
) -> Result<ConversionSummary, PdbError> {
    let document = Document::load_with(&input, read_options)?;
    info!(
        lines = document.sections.total_lines(),
        atoms = document.atoms.len(),
        "Loaded {}.",
        input.as_ref().display()
    );

    document.write_with(&output, write_options)?;
    let summary = ConversionSummary::from_document(&document, write_options);

    for (section, count) in &summary.omitted_sections {
        info!(section = %section, lines = count, "Section not written.");
    }
    if summary.models > 0 && !write_options.keep_models {
        warn!(
            models = summary.models,
            "MODEL/ENDMDL records were dropped; models are merged in the output."
        );
    }
    info!("Wrote {}.", output.as_ref().display());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::ATTRIBUTION;
    use std::fs;
    use tempfile::tempdir;

    const ATOM_LINE: &str =
        "ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N  ";

    fn two_model_file() -> String {
        [
            "HEADER    TEST",
            "REMARK   1 SOMETHING",
            "CRYST1   50.000   50.000   50.000  90.00  90.00  90.00 P 1           1",
            "MODEL        1",
            ATOM_LINE,
            "ANISOU    1  N   ALA A   1     2406   1997   1779    -14    -48    -23       N",
            "ENDMDL",
            "MODEL        2",
            ATOM_LINE,
            "ENDMDL",
            "CONECT    1    2",
            "END",
        ]
        .join("\n")
    }

    #[test]
    fn convert_summarizes_what_was_dropped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        fs::write(&input, two_model_file()).unwrap();

        let summary = convert(
            &input,
            &output,
            &ReadOptions::default(),
            &WriteOptions::default(),
        )
        .unwrap();

        assert_eq!(summary.lines_read, 12);
        assert_eq!(summary.atoms, 2);
        assert_eq!(summary.ters, 0);
        assert_eq!(summary.models, 2);
        assert_eq!(summary.omitted_coordinate_lines, 1);
        assert_eq!(
            summary.omitted_sections,
            vec![
                (Section::Title, 2),
                (Section::Crystallographic, 1),
                (Section::Connectivity, 1),
            ]
        );

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[0], ATTRIBUTION);
        assert_eq!(&lines[2..], &[ATOM_LINE, ATOM_LINE, "END"]);
    }

    #[test]
    fn preserved_sections_are_not_reported_as_omitted() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        fs::write(&input, two_model_file()).unwrap();

        let write_options = WriteOptions {
            preserve_sections: vec![Section::Title, Section::Crystallographic],
            keep_models: true,
            ..WriteOptions::default()
        };
        let summary = convert(&input, &output, &ReadOptions::default(), &write_options).unwrap();
        assert_eq!(
            summary.omitted_sections,
            vec![(Section::Connectivity, 1)]
        );

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[2], "HEADER    TEST");
        assert!(lines[4].starts_with("CRYST1"));
        assert_eq!(lines[5], "MODEL        1");
        assert_eq!(lines[6], ATOM_LINE);
        assert_eq!(lines[7], "ENDMDL");
        assert_eq!(lines.last(), Some(&"END"));
    }

    #[test]
    fn bookkeeping_other_than_end_is_still_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        let text = format!(
            "{}\nMASTER        0    0    0    0    0    0    0    0    1    0    0    0\nEND\n",
            ATOM_LINE
        );
        fs::write(&input, text).unwrap();

        let summary = convert(
            &input,
            &output,
            &ReadOptions::default(),
            &WriteOptions::default(),
        )
        .unwrap();
        assert_eq!(summary.omitted_sections, vec![(Section::Bookkeeping, 1)]);
    }

    #[test]
    fn missing_input_is_an_io_error_and_writes_nothing() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.pdb");
        let err = convert(
            dir.path().join("absent.pdb"),
            &output,
            &ReadOptions::default(),
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PdbError::Io(_)));
        assert!(!output.exists());
    }

    #[test]
    fn strict_reading_rejects_unknown_records() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        fs::write(&input, format!("FOOBAR  x\n{}\nEND\n", ATOM_LINE)).unwrap();

        let err = convert(
            &input,
            dir.path().join("out.pdb"),
            &ReadOptions::strict(),
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PdbError::Unclassified(ref e) if e.line == 1));
    }
}
