pub mod feedback;
pub mod query_log;
pub mod triage;

pub use feedback::FeedbackLog;
pub use query_log::QueryLog;
pub use triage::TriageService;
