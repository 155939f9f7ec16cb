//! Customers module documents.
//!
//! Contact details own their interaction history; accounts carry the
//! interaction type that sales opportunities look at.

pub mod account;
pub mod contact_detail;
pub mod interaction;

pub use account::Account;
pub use contact_detail::{ContactDetail, Method};
pub use interaction::{Interaction, InteractionType};
