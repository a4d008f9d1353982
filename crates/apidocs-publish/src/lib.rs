//! apidocs publish - EDMX output for documentation-derived metadata.
//!
//! [`CsdlWriter`] builds a metadata graph from a documentation set and
//! writes it to disk as an EDMX 4.0 document.

pub mod edmx;
pub mod error;
pub mod writer;

pub use edmx::{generate_edmx, write_edmx};
pub use error::PublishError;
pub use writer::{CsdlWriter, METADATA_FILE_NAME};
