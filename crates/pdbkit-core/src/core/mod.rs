//! # Core Module
//!
//! The building blocks of the library: the document model, the record codec and
//! the file-level reader and writer.
//!
//! - **Document Model** ([`models`]) - Sections of raw lines and the typed coordinate records decoded from them
//! - **File I/O** ([`io`]) - Section classification, fixed-column codec, PDB and CSV readers
//! - **Utilities** ([`utils`]) - Atom-name translation between wire and human conventions

pub mod io;
pub mod models;
pub mod utils;
