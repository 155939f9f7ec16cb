//! Staff module documents.

pub mod staff_list;

pub use staff_list::{SocialTitle, StaffList};
