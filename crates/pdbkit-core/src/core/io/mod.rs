//! Reading and writing of PDB documents.
//!
//! [`sections`] sorts raw lines into their sections, [`codec`] converts the
//! fixed-column coordinate records to and from typed values, and [`pdb`] ties the
//! two together behind the [`traits::StructureFile`] interface. [`tabular`] reads
//! coordinate rows from CSV for the tabular ingestion workflow.

pub mod codec;
pub mod options;
pub mod pdb;
pub mod sections;
pub mod tabular;
pub mod traits;
