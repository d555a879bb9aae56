//! Structured payload formats carried inside a container.
//!
//! The codec only moves bytes; a [`PayloadFormat`] turns those bytes into a
//! document and back. [`JsonPayload`] is the format the binary uses.

use std::error::Error as StdError;
use std::io::{Read, Write};

use crate::document::entries::Entries;

/// Converts between raw payload bytes and a typed document.
pub trait PayloadFormat {
    /// The in-memory document type.
    type Document;
    /// Error raised when the payload cannot be parsed or rendered.
    type Error: StdError + Send + Sync + 'static;

    /// Parses a document from `reader`.
    fn read_from(&self, reader: &mut dyn Read) -> Result<Self::Document, Self::Error>;

    /// Renders `document` to `writer`. `pretty` asks for human-readable
    /// output and is set when the document is stored without encryption.
    fn write_to(
        &self,
        document: &Self::Document,
        writer: &mut dyn Write,
        pretty: bool,
    ) -> Result<(), Self::Error>;
}

/// JSON rendering of an [`Entries`] document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayload;

impl PayloadFormat for JsonPayload {
    type Document = Entries;
    type Error = serde_json::Error;

    fn read_from(&self, reader: &mut dyn Read) -> Result<Entries, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    fn write_to(
        &self,
        document: &Entries,
        writer: &mut dyn Write,
        pretty: bool,
    ) -> Result<(), serde_json::Error> {
        if pretty {
            serde_json::to_writer_pretty(writer, document)
        } else {
            serde_json::to_writer(writer, document)
        }
    }
}
