use crate::core::models::document::Document;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing a structure file format.
///
/// Implementors supply the stream-based `read_from` and `write_to`; the path-based
/// variants open the file, wrap it in a buffer and delegate. File handles are
/// closed when the call returns, whether or not it succeeded.
///
/// `write_to_path` renders the whole document in memory first, so a record that
/// fails to encode leaves no file behind.
pub trait StructureFile {
    /// Policies applied while reading.
    type ReadOptions: Default;

    /// Policies applied while writing.
    type WriteOptions: Default;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a document from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a line cannot be decoded.
    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::ReadOptions,
    ) -> Result<Document, Self::Error>;

    /// Writes a document to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded or writing fails.
    fn write_to(
        document: &Document,
        options: &Self::WriteOptions,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: &Self::ReadOptions,
    ) -> Result<Document, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, options)
    }

    /// Writes a document to a file path, creating or truncating the file.
    ///
    /// The file is only opened once every record has been encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded, the file cannot be created
    /// or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        document: &Document,
        options: &Self::WriteOptions,
        path: P,
    ) -> Result<(), Self::Error> {
        let mut rendered = Vec::new();
        Self::write_to(document, options, &mut rendered)?;

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&rendered)?;
        writer.flush()?;
        Ok(())
    }
}
