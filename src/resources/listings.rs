//! Seller listings.
//!
//! Creating, activating, deactivating, updating and deleting a listing are
//! asynchronous on the StockX side: each call returns a [`ListingOperation`]
//! whose status can be polled with [`StockXClient::get_listing_operation`].
//!
//! # Operations
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`StockXClient::create_listing`] | `POST selling/listings` |
//! | [`StockXClient::get_listing`] | `GET selling/listings/{listingId}` |
//! | [`StockXClient::get_all_listings`] | `GET selling/listings` |
//! | [`StockXClient::activate_listing`] | `PUT selling/listings/{listingId}/activate` |
//! | [`StockXClient::deactivate_listing`] | `PUT selling/listings/{listingId}/deactivate` |
//! | [`StockXClient::update_listing`] | `PUT selling/listings/{listingId}` |
//! | [`StockXClient::delete_listing`] | `DELETE selling/listings/{listingId}` |
//! | [`StockXClient::get_listing_operations`] | `GET selling/listings/{listingId}/operations` |
//! | [`StockXClient::get_listing_operation`] | `GET selling/listings/{listingId}/operations/{operationId}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use stockx_api::resources::listings::CreateListing;
//!
//! let operation = client
//!     .create_listing(CreateListing::new("180", "variant-id").with_currency_code("USD"))
//!     .await?;
//!
//! let listing_id = operation.listing_id.unwrap_or_default();
//! let status = client
//!     .get_listing_operation(&listing_id, operation.operation_id.as_deref().unwrap_or_default())
//!     .await?;
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    comma_join, AuthenticationDetails, InitiatedShipments, InventoryType, Payout, ProductSummary,
    VariantSummary,
};
use crate::clients::{path_segment, HttpError, HttpMethod, HttpRequest};
use crate::StockXClient;

/// Default page size of listing queries.
pub const DEFAULT_LISTINGS_PAGE_SIZE: u32 = 100;

/// StockX expects a JSON content type even on body-less listing changes.
const JSON_CONTENT_TYPE: &str = "application/json";

/// A seller listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    /// Listing ID.
    pub listing_id: Option<String>,
    /// Listing status (e.g. `ACTIVE`, `INACTIVE`).
    pub status: Option<String>,
    /// Ask amount.
    pub amount: Option<String>,
    /// Currency of `amount`.
    pub currency_code: Option<String>,
    /// Fulfilment channel (`STANDARD`, `FLEX`, ...).
    pub inventory_type: Option<String>,
    /// When the listing was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the listing was last updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Batch the listing was created in.
    pub batch: Option<ListingBatch>,
    /// Ask backing the listing.
    pub ask: Option<ListingAsk>,
    /// Order created from the listing, once sold.
    pub order: Option<ListingOrder>,
    /// Listed product.
    pub product: Option<ProductSummary>,
    /// Listed variant.
    pub variant: Option<VariantSummary>,
    /// Authentication outcome.
    pub authentication_details: Option<AuthenticationDetails>,
    /// Payout breakdown.
    pub payout: Option<Payout>,
    /// Most recent operation on the listing.
    pub last_operation: Option<ListingLastOperation>,
    /// Shipments initiated for this listing.
    pub initiated_shipments: Option<InitiatedShipments>,
}

/// Batch reference of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingBatch {
    /// Batch ID.
    pub batch_id: Option<String>,
    /// Task ID within the batch.
    pub task_id: Option<String>,
}

/// Ask backing a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingAsk {
    /// Ask ID.
    pub ask_id: Option<String>,
    /// When the ask was created.
    pub ask_created_at: Option<DateTime<Utc>>,
    /// When the ask was last updated.
    pub ask_updated_at: Option<DateTime<Utc>>,
    /// When the ask expires.
    pub ask_expires_at: Option<DateTime<Utc>>,
}

/// Order reference of a sold listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingOrder {
    /// Order number.
    pub order_number: Option<String>,
    /// When the order was created.
    pub order_created_at: Option<DateTime<Utc>>,
    /// Order status.
    pub order_status: Option<String>,
}

/// Summary of the most recent operation on a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingLastOperation {
    /// Operation ID.
    pub operation_id: Option<String>,
    /// Operation type (e.g. `CREATE`, `ACTIVATE`).
    pub operation_type: Option<String>,
    /// Operation status (e.g. `PENDING`, `SUCCEEDED`).
    pub operation_status: Option<String>,
    /// When the operation started.
    pub operation_initiated_at: Option<DateTime<Utc>>,
    /// Failure details, if the operation failed.
    pub error: Option<serde_json::Value>,
}

/// An asynchronous operation on a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingOperation {
    /// Listing the operation applies to.
    pub listing_id: Option<String>,
    /// Operation ID.
    pub operation_id: Option<String>,
    /// Operation type.
    pub operation_type: Option<String>,
    /// Operation status.
    pub operation_status: Option<String>,
    /// URL to poll for the operation.
    pub operation_url: Option<String>,
    /// Who started the operation.
    pub operation_initiated_by: Option<String>,
    /// Channel the operation was started through.
    pub operation_initiated_via: Option<String>,
    /// When the operation was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the operation was last updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Changes applied by the operation.
    pub changes: Option<OperationChanges>,
    /// Failure details, if the operation failed.
    pub error: Option<serde_json::Value>,
}

/// Changes applied by a listing operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationChanges {
    /// Values added.
    pub additions: Option<OperationAdditions>,
    /// Values updated.
    pub updates: Option<OperationUpdates>,
    /// Values removed.
    pub removals: Option<serde_json::Value>,
}

/// Values added by a listing operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationAdditions {
    /// Whether the listing became active.
    pub active: Option<bool>,
    /// Ask data that was set.
    pub ask_data: Option<AskData>,
}

/// Ask values set by a listing operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AskData {
    /// Ask amount.
    pub amount: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Expiry of the ask.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Values updated by a listing operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationUpdates {
    /// When the listing was updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingsPage {
    /// Total number of matching listings.
    pub count: u64,
    /// Page size used.
    pub page_size: u32,
    /// Page number returned.
    pub page_number: u32,
    /// Whether another page exists.
    pub has_next_page: bool,
    /// Listings on this page.
    pub listings: Vec<Listing>,
}

/// Operations recorded for a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingOperationsPage {
    /// Cursor of the next page, if any.
    pub next_cursor: Option<String>,
    /// Operations on this page.
    pub operations: Vec<ListingOperation>,
}

/// Request body of [`StockXClient::create_listing`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateListing {
    /// Ask amount.
    pub amount: String,
    /// Variant to list.
    pub variant_id: String,
    /// Currency code; StockX uses the account currency when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// Expiry of the ask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the listing starts active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CreateListing {
    /// Creates a listing request for `variant_id` at `amount`.
    #[must_use]
    pub fn new(amount: impl Into<String>, variant_id: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            variant_id: variant_id.into(),
            currency_code: None,
            expires_at: None,
            active: None,
        }
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency_code(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    /// Sets the ask expiry.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Sets whether the listing starts active.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}

/// Request body of [`StockXClient::activate_listing`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivateListing {
    /// Ask amount.
    pub amount: String,
    /// Currency code.
    pub currency_code: String,
    /// Expiry of the ask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ActivateListing {
    /// Creates an activation request at `amount` in `currency_code`.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
            expires_at: None,
        }
    }

    /// Sets the ask expiry.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Request body of [`StockXClient::update_listing`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListing {
    /// New ask amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// New currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    /// New ask expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Query parameters for [`StockXClient::get_all_listings`].
///
/// Unset fields use the API defaults: page 1, 100 listings per page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingsParams {
    /// Page to return (at least 1).
    pub page_number: Option<u32>,
    /// Listings per page (at least 1).
    pub page_size: Option<u32>,
    /// Only listings for these products.
    pub product_ids: Vec<String>,
    /// Only listings for these variants.
    pub variant_ids: Vec<String>,
    /// Only listings from these batches.
    pub batch_ids: Vec<String>,
    /// Only listings created at or after this time.
    pub from_date: Option<DateTime<Utc>>,
    /// Only listings created at or before this time.
    pub to_date: Option<DateTime<Utc>>,
    /// Only listings with these statuses.
    pub listing_statuses: Vec<String>,
    /// Only listings of these inventory types.
    pub inventory_types: Vec<InventoryType>,
    /// Only listings in these initiated shipments.
    pub initiated_shipment_display_ids: Vec<String>,
}

impl ListingsParams {
    /// Builds the ordered query string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("pageNumber", self.page_number.unwrap_or(1).max(1).to_string()),
            (
                "pageSize",
                self.page_size
                    .unwrap_or(DEFAULT_LISTINGS_PAGE_SIZE)
                    .max(1)
                    .to_string(),
            ),
        ];

        let lists = [
            ("productIds", comma_join(&self.product_ids)),
            ("variantIds", comma_join(&self.variant_ids)),
            ("batchIds", comma_join(&self.batch_ids)),
        ];
        query.extend(lists.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));

        if let Some(from) = self.from_date {
            query.push(("fromDate", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = self.to_date {
            query.push(("toDate", to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }

        let lists = [
            ("listingStatuses", comma_join(&self.listing_statuses)),
            (
                "inventoryTypes",
                comma_join(self.inventory_types.iter().map(InventoryType::as_str)),
            ),
            (
                "initiatedShipmentDisplayIds",
                comma_join(&self.initiated_shipment_display_ids),
            ),
        ];
        query.extend(lists.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));

        query
    }
}

fn listing_path(listing_id: &str) -> Result<String, HttpError> {
    Ok(format!(
        "selling/listings/{}",
        path_segment("listing_id", listing_id)?
    ))
}

fn to_body<T: Serialize>(payload: &T) -> Result<serde_json::Value, HttpError> {
    Ok(serde_json::to_value(payload)?)
}

impl StockXClient {
    /// Creates a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the status is not 200.
    pub async fn create_listing(
        &self,
        listing: CreateListing,
    ) -> Result<ListingOperation, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, "selling/listings")
            .body(to_body(&listing)?)
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a single listing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_listing(&self, listing_id: &str) -> Result<Listing, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, listing_path(listing_id)?).build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a page of listings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the status is not 200.
    pub async fn get_all_listings(&self, params: ListingsParams) -> Result<ListingsPage, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "selling/listings")
            .query_pairs(params.to_query())
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Activates a listing at the given price.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn activate_listing(
        &self,
        listing_id: &str,
        activation: ActivateListing,
    ) -> Result<ListingOperation, HttpError> {
        let path = format!("{}/activate", listing_path(listing_id)?);
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(to_body(&activation)?)
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Deactivates a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn deactivate_listing(&self, listing_id: &str) -> Result<ListingOperation, HttpError> {
        let path = format!("{}/deactivate", listing_path(listing_id)?);
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .header("Content-Type", JSON_CONTENT_TYPE)
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Updates a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn update_listing(
        &self,
        listing_id: &str,
        update: UpdateListing,
    ) -> Result<ListingOperation, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, listing_path(listing_id)?)
            .body(to_body(&update)?)
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Deletes a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn delete_listing(&self, listing_id: &str) -> Result<ListingOperation, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, listing_path(listing_id)?)
            .header("Content-Type", JSON_CONTENT_TYPE)
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Lists the operations recorded for a listing.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_listing_operations(
        &self,
        listing_id: &str,
    ) -> Result<ListingOperationsPage, HttpError> {
        let path = format!("{}/operations", listing_path(listing_id)?);
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a single listing operation.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if either ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_listing_operation(
        &self,
        listing_id: &str,
        operation_id: &str,
    ) -> Result<ListingOperation, HttpError> {
        let path = format!(
            "{}/operations/{}",
            listing_path(listing_id)?,
            path_segment("operation_id", operation_id)?
        );
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.http_client().request_json(request).await
    }
}
