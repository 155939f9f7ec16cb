//! Admin module documents (users and their contacts).
//!
//! Only the parts other modules navigate to are modelled: a user's name,
//! contact and module-qualified roles.

pub mod contact;
pub mod roles;
pub mod user;

pub use contact::Contact;
pub use roles::Role;
pub use user::User;
