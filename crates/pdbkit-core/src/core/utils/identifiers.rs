//! Translation between the two naming conventions for four-character hydrogen names.
//!
//! PDB files store names such as `1HG1`, where the leading digit counts hydrogens
//! attached to the same heavy atom. Inside the library the count is moved to the
//! end (`HG11`), which keeps names sortable and readable.

use thiserror::Error;

/// Width of the atom name field in an ATOM/HETATM record.
pub const ATOM_NAME_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomNameError {
    #[error("Atom name '{0}' does not follow the four-character hydrogen naming pattern")]
    UnexpectedHydrogenPattern(String),
    #[error("Atom name '{0}' does not fit the four-column name field")]
    TooLong(String),
}

fn is_count_digit(c: char) -> bool {
    matches!(c, '1'..='9')
}

fn is_branch_letter(c: char) -> bool {
    matches!(c, 'A' | 'B' | 'G' | 'D' | 'E' | 'Z' | 'H')
}

fn as_four_chars(name: &str) -> Option<[char; 4]> {
    let mut chars = name.chars();
    let quad = [chars.next()?, chars.next()?, chars.next()?, chars.next()?];
    chars.next().is_none().then_some(quad)
}

/// Matches `[1-9]H[ABGDEZH][1-9]`, e.g. `1HG1`.
pub fn is_wire_hydrogen(name: &str) -> bool {
    as_four_chars(name).is_some_and(|[count, h, branch, index]| {
        is_count_digit(count) && h == 'H' && is_branch_letter(branch) && is_count_digit(index)
    })
}

/// Matches `H[ABGDEZH][1-9][1-9]`, e.g. `HG11`.
pub fn is_human_hydrogen(name: &str) -> bool {
    as_four_chars(name).is_some_and(|[h, branch, index, count]| {
        h == 'H' && is_branch_letter(branch) && is_count_digit(index) && is_count_digit(count)
    })
}

/// Converts an atom name as read from a PDB line into the readable convention.
///
/// Names that are not four characters long are returned unchanged. A four-character
/// name that is not a recognizable hydrogen name is reported as an error, leaving
/// the caller to decide whether that is fatal.
pub fn to_human(wire_id: &str) -> Result<String, AtomNameError> {
    match as_four_chars(wire_id) {
        None => Ok(wire_id.to_string()),
        Some([count, rest @ ..]) if is_wire_hydrogen(wire_id) => {
            let mut human: String = rest.iter().collect();
            human.push(count);
            Ok(human)
        }
        Some(_) => Err(AtomNameError::UnexpectedHydrogenPattern(
            wire_id.to_string(),
        )),
    }
}

/// Converts a readable atom name back into the form written in column 13-16.
///
/// Names shorter than four characters gain one leading space so that they start
/// in column 14, the position used for single-letter element symbols.
pub fn to_wire(human_id: &str) -> Result<String, AtomNameError> {
    let len = human_id.chars().count();
    if len > ATOM_NAME_WIDTH {
        return Err(AtomNameError::TooLong(human_id.to_string()));
    }
    match as_four_chars(human_id) {
        None => Ok(format!(" {}", human_id)),
        Some([first, second, third, count]) if is_human_hydrogen(human_id) => {
            Ok([count, first, second, third].iter().collect())
        }
        Some(_) => Err(AtomNameError::UnexpectedHydrogenPattern(
            human_id.to_string(),
        )),
    }
}
