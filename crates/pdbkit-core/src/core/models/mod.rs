//! # Core Models Module
//!
//! Data structures for the contents of a PDB file.
//!
//! ## Key Components
//!
//! - [`records`] - Typed `ATOM`/`HETATM`, `TER`, `MODEL` and `ENDMDL` records
//! - [`document`] - A whole file: raw lines grouped by section plus the decoded records
//!
//! ## Usage
//!
//! ```ignore
//! use pdbkit::core::models::document::Document;
//!
//! let document = Document::load("protein.pdb")?;
//! for atom in &document.atoms {
//!     println!("{} {} {}", atom.serial, atom.name, atom.residue_name);
//! }
//! ```

pub mod document;
pub mod records;
