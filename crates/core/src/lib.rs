pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;

pub use catalog::{feature_surcharge, ServiceCategory, ServiceProfile, DEFAULT_FEATURE_HOURS};
pub use engine::{estimate, Breakdown, DeterministicQuoteEngine, QuoteEngine, QuoteRequest, QuoteResult};
pub use errors::{DomainError, InterfaceError};
