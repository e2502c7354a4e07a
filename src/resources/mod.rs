//! StockX API resources.
//!
//! Each module defines the request parameters and response models of one
//! StockX API area, and adds its operations as methods on
//! [`StockXClient`](crate::StockXClient).
//!
//! - [`orders`]: seller orders (single, active, historical)
//! - [`listings`]: listing lifecycle and listing operations
//! - [`catalog`]: product search, products, variants and market data
//!
//! Response models are lenient: every field is optional and unknown fields
//! are ignored, so additions to the API do not break decoding.

pub mod catalog;
pub mod common;
pub mod listings;
pub mod orders;

pub use catalog::{CatalogSearchPage, CatalogSearchParams, MarketData, Product, ProductVariant};
pub use common::InventoryType;
pub use listings::{
    ActivateListing, CreateListing, Listing, ListingOperation, ListingOperationsPage,
    ListingsPage, ListingsParams, UpdateListing,
};
pub use orders::{
    ActiveOrdersParams, HistoricalOrdersParams, Order, OrderSortField, OrderStatus, OrdersPage,
};
