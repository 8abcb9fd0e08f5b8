pub mod client;
pub mod error;
pub mod gateway;
pub mod normalize;
mod retry;
pub mod types;

pub use client::VendorClient;
pub use error::CatalogError;
pub use gateway::{FetchPolicy, ProductGateway};
pub use normalize::normalize;
pub use types::{VendorGood, VendorProductResponse, VendorSku};
