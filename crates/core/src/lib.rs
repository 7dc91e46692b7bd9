pub mod config;
pub mod domain;
pub mod errors;
pub mod reconcile;

pub use domain::quote::{
    DepthBand, Language, QuoteContent, QuoteRequest, QuoteResponse, QuoteService, QuoteTotals,
    ServiceInput, TechnicalDepth, Tone,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use reconcile::{assemble_content, reconcile_services, ReconcileError};
