//! Files Module
//!
//! Filesystem collaborators of the request handlers: mapping request paths
//! onto the server root, reading files, guessing content types and storing
//! uploads.

pub mod loader;
pub mod mime;
pub mod upload;

pub use loader::{load, resolve, INDEX_FILE};
pub use mime::content_type_for;
pub use upload::save_body;
