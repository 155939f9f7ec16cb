//! Sales module documents.

pub mod opportunity;

pub use opportunity::{Opportunity, PricingType};
