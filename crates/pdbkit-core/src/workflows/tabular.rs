use crate::core::io::codec::{self, RecordError};
use crate::core::io::options::{ReadOptions, WriteOptions};
use crate::core::io::pdb::PdbError;
use crate::core::io::tabular::{self, TabularError, TabularRow};
use crate::core::models::document::Document;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read tabular input: {source}")]
    Tabular {
        #[from]
        source: TabularError,
    },

    #[error("Cannot encode row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: RecordError,
    },

    #[error("PDB error: {source}")]
    Pdb {
        #[from]
        source: PdbError,
    },
}

/// Builds a document from tabular rows.
///
/// Each row is encoded into a fixed-column line numbered by its row, the lines are
/// appended to the coordinate section of an empty document, and the section is then
/// decoded once, exactly as if the lines had been read from a file.
pub fn ingest_rows<I>(rows: I, options: &ReadOptions) -> Result<Document, IngestError>
where
    I: IntoIterator<Item = (usize, TabularRow)>,
{
    let mut document = Document::new();
    for (row, tabular_row) in rows {
        let line = codec::encode(&tabular_row.to_record(), options.naming)
            .map_err(|source| IngestError::Record { row, source })?;
        document.push_coordinate_line(row, line);
    }
    document.decode_coordinates(options)?;
    Ok(document)
}

/// Reads a CSV file of coordinate rows and writes it out as a PDB file.
///
/// Returns the ingested document.
#[instrument(skip_all, name = "tabular_workflow")]
pub fn csv_to_pdb<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    pdb_path: Q,
    read_options: &ReadOptions,
    write_options: &WriteOptions,
) -> Result<Document, IngestError> {
    let rows = tabular::read_rows_from_path(&csv_path)?;
    info!(
        rows = rows.len(),
        "Read tabular rows from {}.",
        csv_path.as_ref().display()
    );

    let document = ingest_rows(rows, read_options)?;
    document.write_with(&pdb_path, write_options)?;
    info!(
        atoms = document.atoms.len(),
        ters = document.ters.len(),
        "Wrote {}.",
        pdb_path.as_ref().display()
    );
    Ok(document)
}
