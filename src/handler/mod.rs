//! Request handler module
//!
//! Validates incoming requests and maps them onto the served directory:
//! files, index documents, directory listings, or an error response.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
