use crate::cli::InspectArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use pdbkit::core::models::document::{Document, Section};

/// One line per non-empty section, then the decoded record counts.
fn report(document: &Document) -> Vec<String> {
    let mut lines: Vec<String> = document
        .sections
        .iter()
        .filter(|(_, raw)| !raw.is_empty())
        .map(|(section, raw)| format!("{:<24}{:>8}", section.name(), raw.len()))
        .collect();

    if lines.is_empty() {
        lines.push("(no recognized lines)".to_string());
    }

    lines.push(format!(
        "models {}, atoms {}, terminators {}, endmdls {}",
        document.models.len(),
        document.atoms.len(),
        document.ters.len(),
        document.endmdls.len()
    ));
    let hetero = document.atoms.iter().filter(|atom| atom.is_hetero()).count();
    if hetero > 0 {
        lines.push(format!("HETATM records: {}", hetero));
    }
    let undecoded = document
        .sections
        .lines(Section::Coordinate)
        .len()
        .saturating_sub(document.record_count());
    if undecoded > 0 {
        lines.push(format!("coordinate lines without a record kind: {}", undecoded));
    }
    lines
}

pub fn run(args: InspectArgs) -> Result<()> {
    let config = PartialConfig::load(&args.read)?;
    let read_options = config.read_options(&args.read);

    let document = Document::load_with(&args.input, &read_options)?;

    println!("{}", args.input.display());
    for line in report(&document) {
        println!("  {}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdbkit::core::io::options::ReadOptions;
    use pdbkit::core::io::pdb::PdbFile;
    use pdbkit::core::io::traits::StructureFile;
    use std::io::Cursor;

    fn read(text: &str) -> Document {
        PdbFile::read_from(&mut Cursor::new(text), &ReadOptions::default()).unwrap()
    }

    #[test]
    fn report_lists_non_empty_sections_and_counts() {
        let document = read(
            "REMARK   1 TEST\n\
             HETATM  301  ZN  ZN  A 401A     -1.500   2.250   3.125  1.00 15.50          ZN2+\n\
             ANISOU  301  ZN  ZN  A 401A    2406   1997   1779    -14    -48    -23      ZN\n\
             END\n",
        );
        let lines = report(&document);

        assert_eq!(lines[0], format!("{:<24}{:>8}", "title", 1));
        assert_eq!(lines[1], format!("{:<24}{:>8}", "coordinate", 2));
        assert_eq!(lines[2], format!("{:<24}{:>8}", "bookkeeping", 1));
        assert_eq!(lines[3], "models 0, atoms 1, terminators 0, endmdls 0");
        assert_eq!(lines[4], "HETATM records: 1");
        assert_eq!(lines[5], "coordinate lines without a record kind: 1");
    }

    #[test]
    fn empty_document_reports_no_lines() {
        let lines = report(&read("\n\n"));
        assert_eq!(lines[0], "(no recognized lines)");
        assert_eq!(lines[1], "models 0, atoms 0, terminators 0, endmdls 0");
    }
}
