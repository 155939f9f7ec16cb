//! Products module documents.
//!
//! Catalog entries and the price lists sales opportunities are quoted from.

pub mod product_info;
pub mod product_price_list;

pub use product_info::ProductInfo;
pub use product_price_list::ProductPriceList;
