//! # Workflows Module
//!
//! Complete file-to-file procedures built on the [`core`](crate::core) layer.
//!
//! - **Conversion** ([`convert`]) - Load a PDB file and write its normalized form,
//!   reporting what was left out
//! - **Cleaning** ([`clean`]) - Rename protonated residues and terminal oxygens
//!   for force-field tools
//! - **Tabular Ingestion** ([`tabular`]) - Build a PDB file from CSV coordinate rows

pub mod clean;
pub mod convert;
pub mod tabular;
