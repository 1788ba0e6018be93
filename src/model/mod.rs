pub mod config;
pub mod triage;

pub use config::Config;
pub use triage::{
    ClassifyResponse, IterativeClassifyRequest, IterativeClassifyResponse, IterativeExplanation,
    RuleExplanation, TicketFacts, NO_SYMPTOM,
};
