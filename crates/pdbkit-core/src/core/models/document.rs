use super::records::{Atom, Endmdl, Model, RecordKind, RecordRef, Ter};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The named groups into which the lines of a PDB file are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Title,
    Primary,
    Heterogen,
    Secondary,
    ConnectivityAnnotation,
    Miscellaneous,
    Crystallographic,
    Coordinate,
    Connectivity,
    Bookkeeping,
}

impl Section {
    /// All sections in the order they appear in a well-formed file.
    pub const ALL: [Section; 10] = [
        Section::Title,
        Section::Primary,
        Section::Heterogen,
        Section::Secondary,
        Section::ConnectivityAnnotation,
        Section::Miscellaneous,
        Section::Crystallographic,
        Section::Coordinate,
        Section::Connectivity,
        Section::Bookkeeping,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Title => "title",
            Section::Primary => "primary",
            Section::Heterogen => "heterogen",
            Section::Secondary => "secondary",
            Section::ConnectivityAnnotation => "connectivity-annotation",
            Section::Miscellaneous => "miscellaneous",
            Section::Crystallographic => "crystallographic",
            Section::Coordinate => "coordinate",
            Section::Connectivity => "connectivity",
            Section::Bookkeeping => "bookkeeping",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown section name '{0}'")]
pub struct ParseSectionError(pub String);

impl FromStr for Section {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Section::ALL
            .into_iter()
            .find(|section| section.name() == normalized)
            .ok_or_else(|| ParseSectionError(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A line kept verbatim, together with the line (or row) number it came from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawLine {
    pub number: usize,
    pub content: String,
}

impl RawLine {
    pub fn new(number: usize, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }
}

/// Raw lines grouped by section, each group in original file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSections {
    pub title: Vec<RawLine>,
    pub primary: Vec<RawLine>,
    pub heterogen: Vec<RawLine>,
    pub secondary: Vec<RawLine>,
    pub connectivity_annotation: Vec<RawLine>,
    pub miscellaneous: Vec<RawLine>,
    pub crystallographic: Vec<RawLine>,
    pub coordinate: Vec<RawLine>,
    pub connectivity: Vec<RawLine>,
    pub bookkeeping: Vec<RawLine>,
}

impl RawSections {
    pub fn lines(&self, section: Section) -> &[RawLine] {
        match section {
            Section::Title => &self.title,
            Section::Primary => &self.primary,
            Section::Heterogen => &self.heterogen,
            Section::Secondary => &self.secondary,
            Section::ConnectivityAnnotation => &self.connectivity_annotation,
            Section::Miscellaneous => &self.miscellaneous,
            Section::Crystallographic => &self.crystallographic,
            Section::Coordinate => &self.coordinate,
            Section::Connectivity => &self.connectivity,
            Section::Bookkeeping => &self.bookkeeping,
        }
    }

    pub fn lines_mut(&mut self, section: Section) -> &mut Vec<RawLine> {
        match section {
            Section::Title => &mut self.title,
            Section::Primary => &mut self.primary,
            Section::Heterogen => &mut self.heterogen,
            Section::Secondary => &mut self.secondary,
            Section::ConnectivityAnnotation => &mut self.connectivity_annotation,
            Section::Miscellaneous => &mut self.miscellaneous,
            Section::Crystallographic => &mut self.crystallographic,
            Section::Coordinate => &mut self.coordinate,
            Section::Connectivity => &mut self.connectivity,
            Section::Bookkeeping => &mut self.bookkeeping,
        }
    }

    pub fn push(&mut self, section: Section, line: RawLine) {
        self.lines_mut(section).push(line);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, &[RawLine])> {
        Section::ALL
            .into_iter()
            .map(move |section| (section, self.lines(section)))
    }

    pub fn total_lines(&self) -> usize {
        self.iter().map(|(_, lines)| lines.len()).sum()
    }
}

/// A PDB file split into raw sections plus the decoded coordinate records.
///
/// `models`, `atoms`, `ters` and `endmdls` are the positional decoding of
/// `sections.coordinate`: walking the coordinate lines in order and taking the next
/// entity of the matching kind reproduces the interleaving of the file (see
/// [`Document::records`]). Loading, decoding and writing live in
/// [`crate::core::io::pdb`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub sections: RawSections,
    pub models: Vec<Model>,
    pub atoms: Vec<Atom>,
    pub ters: Vec<Ter>,
    pub endmdls: Vec<Endmdl>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line to the coordinate section without decoding it.
    ///
    /// The typed sequences are out of date until the coordinate section is decoded
    /// again.
    pub fn push_coordinate_line(&mut self, number: usize, content: impl Into<String>) {
        self.sections
            .coordinate
            .push(RawLine::new(number, content));
    }

    pub fn clear_records(&mut self) {
        self.models.clear();
        self.atoms.clear();
        self.ters.clear();
        self.endmdls.clear();
    }

    pub fn record_count(&self) -> usize {
        self.models.len() + self.atoms.len() + self.ters.len() + self.endmdls.len()
    }

    /// Walks the decoded records in coordinate-line order.
    ///
    /// Lines without a record kind (such as `ANISOU`) are passed over, as are lines
    /// beyond the end of a typed sequence.
    pub fn records(&self) -> impl Iterator<Item = RecordRef<'_>> {
        let mut models = self.models.iter();
        let mut atoms = self.atoms.iter();
        let mut ters = self.ters.iter();
        let mut endmdls = self.endmdls.iter();

        self.sections.coordinate.iter().filter_map(move |line| {
            match RecordKind::from_line(&line.content)? {
                RecordKind::Model => models.next().map(RecordRef::Model),
                RecordKind::Atom => atoms.next().map(RecordRef::Atom),
                RecordKind::Ter => ters.next().map(RecordRef::Ter),
                RecordKind::Endmdl => endmdls.next().map(RecordRef::Endmdl),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn section_names_round_trip_through_from_str() {
        for section in Section::ALL {
            assert_eq!(section.name().parse::<Section>(), Ok(section));
        }
        assert_eq!(
            "connectivity_annotation".parse::<Section>(),
            Ok(Section::ConnectivityAnnotation)
        );
        assert_eq!(" TITLE ".parse::<Section>(), Ok(Section::Title));
        assert_eq!(
            "sheet".parse::<Section>(),
            Err(ParseSectionError("sheet".into()))
        );
    }

    #[test]
    fn raw_sections_route_lines_to_the_named_group() {
        let mut sections = RawSections::default();
        sections.push(Section::Title, RawLine::new(1, "HEADER    TEST"));
        sections.push(Section::Bookkeeping, RawLine::new(9, "END"));

        assert_eq!(sections.lines(Section::Title).len(), 1);
        assert_eq!(sections.bookkeeping[0].number, 9);
        assert!(sections.lines(Section::Coordinate).is_empty());
        assert_eq!(sections.total_lines(), 2);
    }

    #[test]
    fn records_follow_coordinate_line_order() {
        let mut document = Document::new();
        document.push_coordinate_line(1, "MODEL        1");
        document.push_coordinate_line(2, "ATOM      1  CA  ALA A   1");
        document.push_coordinate_line(3, "ANISOU    1  CA  ALA A   1");
        document.push_coordinate_line(4, "TER       2      ALA A   1");
        document.push_coordinate_line(5, "ENDMDL");
        document.models.push(Model::new(1));
        document
            .atoms
            .push(Atom::new(1, "CA", "ALA", 'A', 1, Point3::origin()));
        document.ters.push(Ter::new(2, "ALA", 'A', 1));
        document.endmdls.push(Endmdl::default());

        let kinds: Vec<_> = document.records().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                RecordKind::Model,
                RecordKind::Atom,
                RecordKind::Ter,
                RecordKind::Endmdl
            ]
        );
        assert_eq!(document.record_count(), 4);
    }

    #[test]
    fn clear_records_keeps_the_raw_sections() {
        let mut document = Document::new();
        document.push_coordinate_line(1, "ENDMDL");
        document.endmdls.push(Endmdl::default());

        document.clear_records();

        assert_eq!(document.record_count(), 0);
        assert_eq!(document.sections.coordinate.len(), 1);
    }
}
