//! # pdbkit
//!
//! Reading, normalizing and writing of Protein Data Bank coordinate files.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The [`Document`](core::models::document::Document)
//!   model, the keyword table that sorts lines into sections, the fixed-column codec
//!   for `ATOM`/`HETATM`/`TER`/`MODEL`/`ENDMDL` records, and the PDB and CSV readers.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on `core`:
//!   normalizing a PDB file and building a PDB file from tabular rows.

pub mod core;
pub mod workflows;
