use crate::core::io::options::{NamingPolicy, ReadOptions, WriteOptions};
use crate::core::io::pdb::PdbError;
use crate::core::models::document::Document;
use crate::core::models::records::Atom;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Counts of the edits made by [`clean`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub residues: usize,
    /// Residues whose name changed (HIS, ASP or GLU protonation states).
    pub renamed_residues: usize,
    /// `1OCT`/`2OCT` atoms renamed to `OC1`/`OC2`.
    pub renamed_atoms: usize,
    /// Atoms whose empty element was filled in from the atom name.
    pub filled_elements: usize,
}

/// Picks the residue name that encodes the protonation state shown by the
/// residue's hydrogens, or `None` when the name stays as it is.
fn protonated_name(residue_name: &str, atoms: &[Atom]) -> Option<&'static str> {
    let has = |name: &str| atoms.iter().any(|atom| atom.name == name);
    match residue_name {
        "HIS" => Some(match (has("HE2"), has("HD1")) {
            (true, true) => "HIP",
            (true, false) => "HIE",
            _ => "HID",
        }),
        "ASP" if has("HD2") => Some("ASH"),
        "GLU" if has("HE2") => Some("GLH"),
        _ => None,
    }
}

fn terminal_oxygen_name(name: &str) -> Option<&'static str> {
    match name {
        "1OCT" => Some("OC1"),
        "2OCT" => Some("OC2"),
        _ => None,
    }
}

/// Element symbol implied by an atom name: its first letter.
fn element_from_name(name: &str) -> Option<String> {
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_string())
}

/// Length of the run of atoms at the start of `atoms` that share a residue.
fn residue_len(atoms: &[Atom]) -> usize {
    let Some(first) = atoms.first() else {
        return 0;
    };
    atoms
        .iter()
        .take_while(|atom| {
            atom.chain_id == first.chain_id
                && atom.residue_number == first.residue_number
                && atom.insertion_code == first.insertion_code
        })
        .count()
}

/// Renames residues and atoms into the force-field conventions and writes the
/// changes back into the coordinate lines.
///
/// Residues are runs of consecutive atoms sharing chain, residue number and
/// insertion code. Within each residue:
/// - `HIS` becomes `HIP` with both `HE2` and `HD1`, `HIE` with only `HE2`, and
///   `HID` otherwise.
/// - `ASP` with `HD2` becomes `ASH`; `GLU` with `HE2` becomes `GLH`.
/// - `1OCT`/`2OCT` become `OC1`/`OC2`.
/// - An empty element is filled with the first letter of the atom name.
pub fn clean(document: &mut Document, naming: NamingPolicy) -> Result<CleanSummary, PdbError> {
    let mut summary = CleanSummary::default();

    let mut start = 0;
    while start < document.atoms.len() {
        let len = residue_len(&document.atoms[start..]);
        let residue = &mut document.atoms[start..start + len];
        summary.residues += 1;

        if let Some(name) = protonated_name(&residue[0].residue_name, residue) {
            debug!(
                residue = residue[0].residue_number,
                chain = %residue[0].chain_id,
                "Renaming {} to {}.",
                residue[0].residue_name,
                name
            );
            if residue[0].residue_name != name {
                summary.renamed_residues += 1;
            }
            for atom in residue.iter_mut() {
                atom.residue_name = name.to_string();
            }
        }

        for atom in residue.iter_mut() {
            if let Some(name) = terminal_oxygen_name(&atom.name) {
                atom.name = name.to_string();
                summary.renamed_atoms += 1;
            }
            if atom.element.trim().is_empty() {
                if let Some(element) = element_from_name(&atom.name) {
                    atom.element = element;
                    summary.filled_elements += 1;
                }
            }
        }

        start += len;
    }

    document.sync_atom_lines(naming)?;
    Ok(summary)
}

/// Loads a PDB file, cleans it and writes the result.
#[instrument(skip_all, name = "clean_workflow")]
pub fn clean_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    read_options: &ReadOptions,
    write_options: &WriteOptions,
) -> Result<CleanSummary, PdbError> {
    let mut document = Document::load_with(&input, read_options)?;
    info!(
        atoms = document.atoms.len(),
        "Loaded {}.",
        input.as_ref().display()
    );

    let summary = clean(&mut document, write_options.naming)?;
    info!(
        residues = summary.residues,
        renamed_residues = summary.renamed_residues,
        renamed_atoms = summary.renamed_atoms,
        "Cleaned residues."
    );

    document.write_with(&output, write_options)?;
    info!("Wrote {}.", output.as_ref().display());
    Ok(summary)
}
