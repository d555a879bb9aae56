//! Documents stored in containers.
//!
//! - `entries`: the password-entry list
//! - `payload`: how a document is rendered to bytes
//! - `store`: reading and writing a document file, encrypted or plain
//! - `session`: an open document with its passphrase and unsaved-changes flag

pub mod entries;
pub mod payload;
pub mod session;
pub mod store;

pub use self::entries::{Entries, Entry};
pub use self::payload::{JsonPayload, PayloadFormat};
pub use self::session::DocumentSession;
pub use self::store::{read_document, write_document, DocumentStore};
