//! # Catalog Crate
//!
//! Loads and indexes the university course catalog.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Course, CreditLevel, CourseCatalog)
//! - **parser**: Parse the tab-separated catalog file
//! - **error**: Error types for catalog loading
//!
//! The catalog is loaded once at startup and treated as read-only shared
//! state for the lifetime of the process. Pipeline stages borrow it; any
//! derived per-request values (similarity, predicted level) are returned as
//! new records by the callers, never written back here.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CourseCatalog;
//! use std::path::Path;
//!
//! let catalog = CourseCatalog::load_from_file(Path::new("data/courses.tsv"))?;
//! let course = catalog.get("BIO101").unwrap();
//! let biology_cluster = catalog.in_cluster(course.cluster);
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{ClusterId, Course, CourseCatalog, CreditLevel, DEFAULT_MINIMUM_CREDITS};

use std::path::Path;

impl CourseCatalog {
    /// Load the catalog from a tab-separated file.
    ///
    /// This is the main entry point: parses every row, then builds the key
    /// and cluster indices, rejecting duplicate keys.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let courses = parser::parse_catalog(path)?;
        Self::from_courses(courses)
    }
}
