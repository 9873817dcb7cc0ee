//! Decoding and encoding of the fixed-column coordinate records.
//!
//! Every field lives at a fixed byte range of the line. Decoding slices the range,
//! trims it and parses it strictly; encoding checks that each value fits its range
//! and pads it back in. Encoded lines are returned without a trailing newline.

use super::options::NamingPolicy;
use crate::core::models::records::{
    Atom, CoordinateRecord, Endmdl, Model, RecordKind, Ter, record_name,
};
use crate::core::utils::identifiers::{self, AtomNameError};
use nalgebra::Point3;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt {
        columns: &'static str,
        value: String,
    },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat {
        columns: &'static str,
        value: String,
    },
    #[error("Columns {columns} start or end inside a multi-byte character")]
    SplitCharacter { columns: &'static str },
    #[error("Value '{value}' does not fit in columns {columns}")]
    FieldOverflow {
        columns: &'static str,
        value: String,
    },
    #[error("Unrecognized coordinate record '{0}'")]
    UnrecognizedRecord(String),
    #[error(transparent)]
    AtomName(#[from] AtomNameError),
}

/// A zero-indexed, end-exclusive byte range and its 1-indexed column label.
#[derive(Debug, Clone, Copy)]
struct Field {
    start: usize,
    end: usize,
    columns: &'static str,
}

impl Field {
    const fn width(self) -> usize {
        self.end - self.start
    }
}

const RECORD_TYPE: Field = Field { start: 0, end: 6, columns: "1-6" };
const SERIAL: Field = Field { start: 6, end: 11, columns: "7-11" };
const ATOM_NAME: Field = Field { start: 12, end: 16, columns: "13-16" };
const ALT_LOC: Field = Field { start: 16, end: 17, columns: "17" };
const RESIDUE_NAME: Field = Field { start: 17, end: 20, columns: "18-20" };
const CHAIN_ID: Field = Field { start: 21, end: 22, columns: "22" };
const RESIDUE_NUMBER: Field = Field { start: 22, end: 26, columns: "23-26" };
const INSERTION_CODE: Field = Field { start: 26, end: 27, columns: "27" };
const X: Field = Field { start: 30, end: 38, columns: "31-38" };
const Y: Field = Field { start: 38, end: 46, columns: "39-46" };
const Z: Field = Field { start: 46, end: 54, columns: "47-54" };
const OCCUPANCY: Field = Field { start: 54, end: 60, columns: "55-60" };
const TEMP_FACTOR: Field = Field { start: 60, end: 66, columns: "61-66" };
const ELEMENT: Field = Field { start: 76, end: 78, columns: "77-78" };
const CHARGE: Field = Field { start: 78, end: 80, columns: "79-80" };
const MODEL_SERIAL: Field = Field { start: 10, end: 14, columns: "11-14" };

/// The trimmed contents of a field. Columns past the end of the line read as empty.
fn text(line: &str, field: Field) -> Result<&str, RecordError> {
    if field.start >= line.len() {
        return Ok("");
    }
    let end = field.end.min(line.len());
    line.get(field.start..end)
        .map(str::trim)
        .ok_or(RecordError::SplitCharacter {
            columns: field.columns,
        })
}

fn flag(line: &str, field: Field, blank: char) -> Result<char, RecordError> {
    Ok(text(line, field)?.chars().next().unwrap_or(blank))
}

fn parse_int<T: FromStr>(line: &str, field: Field) -> Result<T, RecordError> {
    let value = text(line, field)?;
    value.parse().map_err(|_| RecordError::InvalidInt {
        columns: field.columns,
        value: value.to_string(),
    })
}

fn parse_float(line: &str, field: Field) -> Result<f64, RecordError> {
    let value = text(line, field)?;
    value.parse().map_err(|_| RecordError::InvalidFloat {
        columns: field.columns,
        value: value.to_string(),
    })
}

/// Checks that a rendered value fits the width of its field.
fn fit(value: String, field: Field) -> Result<String, RecordError> {
    if value.chars().count() > field.width() {
        return Err(RecordError::FieldOverflow {
            columns: field.columns,
            value,
        });
    }
    Ok(value)
}

fn translate_name(
    name: &str,
    convert: fn(&str) -> Result<String, AtomNameError>,
    naming: NamingPolicy,
) -> Result<String, RecordError> {
    match convert(name) {
        Ok(converted) => Ok(converted),
        Err(AtomNameError::UnexpectedHydrogenPattern(_)) if naming == NamingPolicy::Warn => {
            warn!("Atom name '{}' seems incorrect; keeping it as written.", name);
            Ok(name.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn decode_atom(line: &str, naming: NamingPolicy) -> Result<Atom, RecordError> {
    let serial = parse_int(line, SERIAL)?;
    let name = translate_name(text(line, ATOM_NAME)?, identifiers::to_human, naming)?;
    let residue_number = parse_int(line, RESIDUE_NUMBER)?;
    let x = parse_float(line, X)?;
    let y = parse_float(line, Y)?;
    let z = parse_float(line, Z)?;
    let occupancy = parse_float(line, OCCUPANCY)?;
    let temp_factor = parse_float(line, TEMP_FACTOR)?;

    Ok(Atom {
        record_type: record_name(line).to_string(),
        serial,
        name,
        alt_loc: flag(line, ALT_LOC, ' ')?,
        residue_name: text(line, RESIDUE_NAME)?.to_string(),
        chain_id: flag(line, CHAIN_ID, 'X')?,
        residue_number,
        insertion_code: flag(line, INSERTION_CODE, ' ')?,
        position: Point3::new(x, y, z),
        occupancy,
        temp_factor,
        element: text(line, ELEMENT)?.to_string(),
        charge: text(line, CHARGE)?.to_string(),
    })
}

pub fn encode_atom(atom: &Atom, naming: NamingPolicy) -> Result<String, RecordError> {
    let record_type = fit(atom.record_type.clone(), RECORD_TYPE)?;
    let serial = fit(atom.serial.to_string(), SERIAL)?;
    let name = translate_name(&atom.name, identifiers::to_wire, naming)?;
    let residue_name = fit(atom.residue_name.clone(), RESIDUE_NAME)?;
    let residue_number = fit(atom.residue_number.to_string(), RESIDUE_NUMBER)?;
    let x = fit(format!("{:.3}", atom.position.x), X)?;
    let y = fit(format!("{:.3}", atom.position.y), Y)?;
    let z = fit(format!("{:.3}", atom.position.z), Z)?;
    let occupancy = fit(format!("{:.2}", atom.occupancy), OCCUPANCY)?;
    let temp_factor = fit(format!("{:.2}", atom.temp_factor), TEMP_FACTOR)?;
    let element = fit(atom.element.clone(), ELEMENT)?;
    let charge = fit(atom.charge.clone(), CHARGE)?;

    Ok(format!(
        "{:<6}{:>5} {:<4}{}{:<3} {}{:>4}{}   {:>8}{:>8}{:>8}{:>6}{:>6}          {:>2}{:>2}",
        record_type,
        serial,
        name,
        atom.alt_loc,
        residue_name,
        atom.chain_id,
        residue_number,
        atom.insertion_code,
        x,
        y,
        z,
        occupancy,
        temp_factor,
        element,
        charge
    ))
}

pub fn decode_ter(line: &str) -> Result<Ter, RecordError> {
    Ok(Ter {
        record_type: record_name(line).to_string(),
        serial: parse_int(line, SERIAL)?,
        residue_name: text(line, RESIDUE_NAME)?.to_string(),
        chain_id: flag(line, CHAIN_ID, ' ')?,
        residue_number: parse_int(line, RESIDUE_NUMBER)?,
        insertion_code: flag(line, INSERTION_CODE, ' ')?,
    })
}

pub fn encode_ter(ter: &Ter) -> Result<String, RecordError> {
    Ok(format!(
        "{:<6}{:>5}      {:<3} {}{:>4}{}",
        fit(ter.record_type.clone(), RECORD_TYPE)?,
        fit(ter.serial.to_string(), SERIAL)?,
        fit(ter.residue_name.clone(), RESIDUE_NAME)?,
        ter.chain_id,
        fit(ter.residue_number.to_string(), RESIDUE_NUMBER)?,
        ter.insertion_code
    ))
}

pub fn decode_model(line: &str) -> Result<Model, RecordError> {
    Ok(Model {
        record_type: record_name(line).to_string(),
        serial: parse_int(line, MODEL_SERIAL)?,
    })
}

pub fn encode_model(model: &Model) -> Result<String, RecordError> {
    Ok(format!(
        "{:<6}    {:>4}",
        fit(model.record_type.clone(), RECORD_TYPE)?,
        fit(model.serial.to_string(), MODEL_SERIAL)?
    ))
}

pub fn decode_endmdl(line: &str) -> Endmdl {
    Endmdl {
        record_type: record_name(line).to_string(),
    }
}

pub fn encode_endmdl(endmdl: &Endmdl) -> String {
    format!("{:<6}", endmdl.record_type)
}

/// Decodes one coordinate-section line into the record its name selects.
pub fn decode(line: &str, naming: NamingPolicy) -> Result<CoordinateRecord, RecordError> {
    match RecordKind::from_line(line) {
        Some(RecordKind::Atom) => decode_atom(line, naming).map(CoordinateRecord::Atom),
        Some(RecordKind::Ter) => decode_ter(line).map(CoordinateRecord::Ter),
        Some(RecordKind::Model) => decode_model(line).map(CoordinateRecord::Model),
        Some(RecordKind::Endmdl) => Ok(CoordinateRecord::Endmdl(decode_endmdl(line))),
        None => Err(RecordError::UnrecognizedRecord(
            record_name(line).to_string(),
        )),
    }
}

pub fn encode(record: &CoordinateRecord, naming: NamingPolicy) -> Result<String, RecordError> {
    match record {
        CoordinateRecord::Atom(atom) => encode_atom(atom, naming),
        CoordinateRecord::Ter(ter) => encode_ter(ter),
        CoordinateRecord::Model(model) => encode_model(model),
        CoordinateRecord::Endmdl(endmdl) => Ok(encode_endmdl(endmdl)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKBONE_N: &str =
        "ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N  ";
    const VALINE_H: &str =
        "ATOM     12 1HG1 VAL B  42      12.345  -6.700 100.001  0.50 23.45           H  ";
    const ZINC: &str =
        "HETATM  301  ZN  ZN  A 401A     -1.500   2.250   3.125  1.00 15.50          ZN2+";

    #[test]
    fn decode_atom_reads_every_fixed_column_field() {
        let atom = decode_atom(BACKBONE_N, NamingPolicy::Warn).unwrap();

        assert_eq!(atom.record_type, "ATOM");
        assert_eq!(atom.serial, 1);
        assert_eq!(atom.name, "N");
        assert_eq!(atom.alt_loc, ' ');
        assert_eq!(atom.residue_name, "ALA");
        assert_eq!(atom.chain_id, 'A');
        assert_eq!(atom.residue_number, 1);
        assert_eq!(atom.insertion_code, ' ');
        assert_eq!(atom.position, Point3::new(11.104, 6.134, -6.504));
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 0.0);
        assert_eq!(atom.element, "N");
        assert_eq!(atom.charge, "");
    }

    #[test]
    fn decode_atom_translates_hydrogen_names_to_readable_form() {
        let atom = decode_atom(VALINE_H, NamingPolicy::Warn).unwrap();
        assert_eq!(atom.name, "HG11");
        assert_eq!(atom.serial, 12);
        assert_eq!(atom.residue_number, 42);
    }

    #[test]
    fn decode_atom_keeps_hetatm_tag_and_flags() {
        let atom = decode_atom(ZINC, NamingPolicy::Warn).unwrap();
        assert_eq!(atom.record_type, "HETATM");
        assert!(atom.is_hetero());
        assert_eq!(atom.name, "ZN");
        assert_eq!(atom.insertion_code, 'A');
        assert_eq!(atom.element, "ZN");
        assert_eq!(atom.charge, "2+");
    }

    #[test]
    fn decode_atom_defaults_blank_chain_to_x() {
        let line = BACKBONE_N.replacen("ALA A", "ALA  ", 1);
        let atom = decode_atom(&line, NamingPolicy::Warn).unwrap();
        assert_eq!(atom.chain_id, 'X');
    }

    #[test]
    fn decode_atom_tolerates_missing_element_and_charge_columns() {
        let atom = decode_atom(&BACKBONE_N[..66], NamingPolicy::Warn).unwrap();
        assert_eq!(atom.element, "");
        assert_eq!(atom.charge, "");
    }

    #[test]
    fn decode_atom_fails_on_non_numeric_fields() {
        let bad_serial = BACKBONE_N.replacen("    1  N", "  abc  N", 1);
        assert_eq!(
            decode_atom(&bad_serial, NamingPolicy::Warn),
            Err(RecordError::InvalidInt {
                columns: "7-11",
                value: "abc".into()
            })
        );

        let bad_x = BACKBONE_N.replacen("11.104", "11.1x4", 1);
        assert_eq!(
            decode_atom(&bad_x, NamingPolicy::Warn),
            Err(RecordError::InvalidFloat {
                columns: "31-38",
                value: "11.1x4".into()
            })
        );
    }

    #[test]
    fn decode_atom_fails_when_line_is_cut_inside_the_occupancy() {
        let result = decode_atom(&BACKBONE_N[..56], NamingPolicy::Warn);
        assert!(matches!(
            result,
            Err(RecordError::InvalidFloat { columns: "55-60", .. })
        ));
    }

    #[test]
    fn unexpected_atom_name_is_kept_under_warn_policy() {
        let line = VALINE_H.replacen("1HG1", "HG11", 1);
        let atom = decode_atom(&line, NamingPolicy::Warn).unwrap();
        assert_eq!(atom.name, "HG11");
    }

    #[test]
    fn unexpected_atom_name_fails_under_reject_policy() {
        let line = VALINE_H.replacen("1HG1", "HG11", 1);
        assert_eq!(
            decode_atom(&line, NamingPolicy::Reject),
            Err(RecordError::AtomName(
                AtomNameError::UnexpectedHydrogenPattern("HG11".into())
            ))
        );
    }

    #[test]
    fn atom_lines_round_trip_byte_for_byte() {
        for line in [BACKBONE_N, VALINE_H, ZINC] {
            let atom = decode_atom(line, NamingPolicy::Reject).unwrap();
            assert_eq!(encode_atom(&atom, NamingPolicy::Reject).unwrap(), line);
        }
    }

    #[test]
    fn coordinates_keep_three_decimal_fixed_point_fields() {
        let atom = decode_atom(VALINE_H, NamingPolicy::Warn).unwrap();
        assert!((atom.position.x - 12.345).abs() < 1e-9);
        assert!((atom.position.y + 6.7).abs() < 1e-9);
        assert!((atom.position.z - 100.001).abs() < 1e-9);

        let encoded = encode_atom(&atom, NamingPolicy::Warn).unwrap();
        assert_eq!(&encoded[30..38], "  12.345");
        assert_eq!(&encoded[38..46], "  -6.700");
        assert_eq!(&encoded[46..54], " 100.001");
    }

    #[test]
    fn encode_atom_rejects_names_wider_than_the_field() {
        let mut atom = decode_atom(BACKBONE_N, NamingPolicy::Warn).unwrap();
        atom.name = "HG111".into();
        assert_eq!(
            encode_atom(&atom, NamingPolicy::Warn),
            Err(RecordError::AtomName(AtomNameError::TooLong("HG111".into())))
        );
    }

    #[test]
    fn ter_round_trips_and_reads_its_fields() {
        let line = "TER      13      VAL B  42 ";
        let ter = decode_ter(line).unwrap();
        assert_eq!(ter.record_type, "TER");
        assert_eq!(ter.serial, 13);
        assert_eq!(ter.residue_name, "VAL");
        assert_eq!(ter.chain_id, 'B');
        assert_eq!(ter.residue_number, 42);
        assert_eq!(ter.insertion_code, ' ');
        assert_eq!(encode_ter(&ter).unwrap(), line);
    }

    #[test]
    fn bare_ter_line_is_a_parse_error() {
        assert!(matches!(
            decode_ter("TER"),
            Err(RecordError::InvalidInt { columns: "7-11", .. })
        ));
    }

    #[test]
    fn model_and_endmdl_round_trip() {
        let model = decode_model("MODEL        1").unwrap();
        assert_eq!(model.serial, 1);
        assert_eq!(encode_model(&model).unwrap(), "MODEL        1");

        let endmdl = decode_endmdl("ENDMDL");
        assert_eq!(endmdl.record_type, "ENDMDL");
        assert_eq!(encode_endmdl(&endmdl), "ENDMDL");
    }

    #[test]
    fn decode_dispatches_by_record_name() {
        assert!(matches!(
            decode(BACKBONE_N, NamingPolicy::Warn),
            Ok(CoordinateRecord::Atom(_))
        ));
        assert!(matches!(
            decode("MODEL        2", NamingPolicy::Warn),
            Ok(CoordinateRecord::Model(Model { serial: 2, .. }))
        ));
        assert!(matches!(
            decode("ENDMDL", NamingPolicy::Warn),
            Ok(CoordinateRecord::Endmdl(_))
        ));
        assert_eq!(
            decode("ANISOU    1  N   ALA A   1", NamingPolicy::Warn),
            Err(RecordError::UnrecognizedRecord("ANISOU".into()))
        );
    }

    #[test]
    fn encode_matches_the_record_specific_encoders() {
        let record = decode(ZINC, NamingPolicy::Warn).unwrap();
        assert_eq!(encode(&record, NamingPolicy::Warn).unwrap(), ZINC);

        let model = CoordinateRecord::Model(Model::new(3));
        assert_eq!(encode(&model, NamingPolicy::Warn).unwrap(), "MODEL        3");
    }

    #[test]
    fn encode_atom_accepts_values_at_the_edge_of_each_field() {
        let mut atom = decode_atom(BACKBONE_N, NamingPolicy::Warn).unwrap();
        atom.serial = 99999;
        atom.residue_number = -999;
        atom.position = Point3::new(-999.999, 9999.999, 0.0);
        atom.occupancy = 999.99;
        atom.temp_factor = -99.99;

        let line = encode_atom(&atom, NamingPolicy::Warn).unwrap();
        let decoded = decode_atom(&line, NamingPolicy::Warn).unwrap();
        assert_eq!(decoded.serial, 99999);
        assert_eq!(decoded.residue_number, -999);
        assert_eq!(decoded.position, Point3::new(-999.999, 9999.999, 0.0));
        assert_eq!(decoded.occupancy, 999.99);
        assert_eq!(decoded.temp_factor, -99.99);
    }

    #[test]
    fn encode_atom_reports_the_column_a_value_overflows() {
        let base = decode_atom(BACKBONE_N, NamingPolicy::Warn).unwrap();
        let overflow = |edit: fn(&mut Atom)| {
            let mut atom = base.clone();
            edit(&mut atom);
            encode_atom(&atom, NamingPolicy::Warn).unwrap_err()
        };

        assert_eq!(
            overflow(|a| a.temp_factor = 12345.67),
            RecordError::FieldOverflow {
                columns: "61-66",
                value: "12345.67".into()
            }
        );
        assert_eq!(
            overflow(|a| a.serial = 123456),
            RecordError::FieldOverflow {
                columns: "7-11",
                value: "123456".into()
            }
        );
        assert_eq!(
            overflow(|a| a.position.x = 123456.5),
            RecordError::FieldOverflow {
                columns: "31-38",
                value: "123456.500".into()
            }
        );
        assert!(matches!(
            overflow(|a| a.occupancy = -100.0),
            RecordError::FieldOverflow { columns: "55-60", .. }
        ));
        assert!(matches!(
            overflow(|a| a.residue_number = -1000),
            RecordError::FieldOverflow { columns: "23-26", .. }
        ));
        assert!(matches!(
            overflow(|a| a.residue_name = "ALAX".into()),
            RecordError::FieldOverflow { columns: "18-20", .. }
        ));
        assert!(matches!(
            overflow(|a| a.element = "ZNX".into()),
            RecordError::FieldOverflow { columns: "77-78", .. }
        ));
    }

    #[test]
    fn encode_ter_and_model_check_their_fields() {
        let mut ter = Ter::new(100000, "VAL", 'B', 42);
        assert!(matches!(
            encode_ter(&ter),
            Err(RecordError::FieldOverflow { columns: "7-11", .. })
        ));
        ter.serial = 13;
        ter.residue_name = "VALINE".into();
        assert!(matches!(
            encode_ter(&ter),
            Err(RecordError::FieldOverflow { columns: "18-20", .. })
        ));
        assert!(matches!(
            encode_model(&Model::new(10000)),
            Err(RecordError::FieldOverflow { columns: "11-14", .. })
        ));
    }

    #[test]
    fn fields_that_split_a_multi_byte_character_are_errors() {
        // 'Å' takes two bytes.
        let line = BACKBONE_N.replacen("ALA A", "ALÅA", 1);
        assert_eq!(
            decode_atom(&line, NamingPolicy::Warn),
            Err(RecordError::SplitCharacter { columns: "18-20" })
        );

        let line = BACKBONE_N.replacen(" N  ", " N Å", 1);
        assert_eq!(
            decode_atom(&line, NamingPolicy::Warn),
            Err(RecordError::SplitCharacter { columns: "13-16" })
        );
    }

    #[test]
    fn multi_byte_characters_inside_a_field_are_kept() {
        let line = BACKBONE_N.replacen("ALA", "ÅA", 1);
        let atom = decode_atom(&line, NamingPolicy::Warn).unwrap();
        assert_eq!(atom.residue_name, "ÅA");
    }
}
