//! Authored knowledge base: rule table, technician directory, solution catalog
//!
//! Everything here is fixed content owned by the support team. The engine
//! never reads it implicitly; callers construct these values at startup and
//! pass them in.

pub mod rules;
pub mod solutions;
pub mod technicians;

pub use rules::classification_rules;
pub use solutions::SolutionCatalog;
pub use technicians::{TechnicianDirectory, DEFAULT_TECHNICIAN, REMOTE_SUPPORT_TECHNICIAN};

/// Category forced by the transport-level "other cause" override.
pub const OTHER_CAUSE_CATEGORY: &str = "Otra causa";
