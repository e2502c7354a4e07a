//! Seller orders.
//!
//! # Operations
//!
//! - [`StockXClient::get_order`]: `GET selling/orders/{orderNumber}`
//! - [`StockXClient::get_active_orders`]: `GET selling/orders/active`
//! - [`StockXClient::get_historical_orders`]: `GET selling/orders/history`
//!
//! # Example
//!
//! ```rust,ignore
//! use stockx_api::resources::orders::{ActiveOrdersParams, OrderStatus};
//!
//! let page = client
//!     .get_active_orders(ActiveOrdersParams {
//!         order_status: Some(OrderStatus::Shipped),
//!         page_size: Some(50),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! for order in &page.orders {
//!     println!("{:?} {:?}", order.order_number, order.status);
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    comma_join, AuthenticationDetails, InitiatedShipments, InventoryType, Payout, ProductSummary,
    VariantSummary,
};
use crate::clients::{path_segment, HttpError, HttpMethod, HttpRequest};
use crate::StockXClient;

/// Default page size of order listings.
pub const DEFAULT_ORDERS_PAGE_SIZE: u32 = 20;

/// Largest page size accepted for active orders.
pub const MAX_ORDERS_PAGE_SIZE: u32 = 100;

/// Status of a seller order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// The order was created.
    Created,
    /// The buyer's card authorization failed.
    CcAuthorizationFailed,
    /// The seller shipped the item.
    Shipped,
    /// StockX received the item.
    Received,
    /// The item is being authenticated.
    Authenticating,
    /// The item passed authentication.
    Authenticated,
    /// The payout is pending.
    PayoutPending,
    /// The payout completed.
    PayoutCompleted,
    /// The order was fulfilled by StockX.
    SystemFulfilled,
    /// The payout failed.
    PayoutFailed,
    /// The order was suspended.
    Suspended,
}

impl OrderStatus {
    /// Returns the wire value used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::CcAuthorizationFailed => "CCAUTHORIZATIONFAILED",
            Self::Shipped => "SHIPPED",
            Self::Received => "RECEIVED",
            Self::Authenticating => "AUTHENTICATING",
            Self::Authenticated => "AUTHENTICATED",
            Self::PayoutPending => "PAYOUTPENDING",
            Self::PayoutCompleted => "PAYOUTCOMPLETED",
            Self::SystemFulfilled => "SYSTEMFULFILLED",
            Self::PayoutFailed => "PAYOUTFAILED",
            Self::Suspended => "SUSPENDED",
        }
    }
}

/// Sort field for active orders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSortField {
    /// Order creation time.
    #[default]
    CreatedAt,
    /// Ship-by deadline.
    ShipByDate,
}

impl OrderSortField {
    /// Returns the wire value used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "CREATEDAT",
            Self::ShipByDate => "SHIPBYDATE",
        }
    }
}

/// A seller order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Ask that was matched.
    pub ask_id: Option<String>,
    /// Order number, e.g. `12345678-12345678`.
    pub order_number: Option<String>,
    /// Listing the order was created from.
    pub listing_id: Option<String>,
    /// Sale amount.
    pub amount: Option<String>,
    /// Currency of `amount`.
    pub currency_code: Option<String>,
    /// When the order was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the order was last updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Sold variant.
    pub variant: Option<VariantSummary>,
    /// Sold product.
    pub product: Option<ProductSummary>,
    /// Current order status as sent by StockX (see [`OrderStatus`] for the
    /// known values).
    pub status: Option<String>,
    /// Outbound shipment details.
    pub shipment: Option<Shipment>,
    /// Shipments initiated for this order.
    pub initiated_shipments: Option<InitiatedShipments>,
    /// Fulfilment channel (`STANDARD`, `FLEX`, ...).
    pub inventory_type: Option<String>,
    /// Authentication outcome.
    pub authentication_details: Option<AuthenticationDetails>,
    /// Payout breakdown.
    pub payout: Option<Payout>,
}

/// Shipping details of an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Shipment {
    /// Deadline for shipping the item.
    pub ship_by_date: Option<DateTime<Utc>>,
    /// Carrier tracking number.
    pub tracking_number: Option<String>,
    /// Carrier tracking URL.
    pub tracking_url: Option<String>,
    /// Carrier code.
    pub carrier_code: Option<String>,
    /// URL of the shipping label.
    pub shipping_label_url: Option<String>,
    /// URL of the shipping documents.
    pub shipping_document_url: Option<String>,
}

/// One page of orders.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrdersPage {
    /// Total number of matching orders.
    pub count: u64,
    /// Page size used.
    pub page_size: u32,
    /// Page number returned.
    pub page_number: u32,
    /// Whether another page exists.
    pub has_next_page: bool,
    /// Orders on this page.
    pub orders: Vec<Order>,
}

/// Query parameters for [`StockXClient::get_active_orders`].
///
/// Unset fields use the API defaults: page 1, 20 orders per page, sorted by
/// creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOrdersParams {
    /// Page to return (clamped to at least 1).
    pub page_number: Option<u32>,
    /// Orders per page (clamped to 1..=100).
    pub page_size: Option<u32>,
    /// Only orders with this status.
    pub order_status: Option<OrderStatus>,
    /// Only orders for this product.
    pub product_id: Option<String>,
    /// Only orders for this variant.
    pub variant_id: Option<String>,
    /// Sort field.
    pub sort_order: Option<OrderSortField>,
    /// Only orders of these inventory types.
    pub inventory_types: Vec<InventoryType>,
    /// Only orders in these initiated shipments.
    pub initiated_shipment_display_ids: Vec<String>,
}

impl ActiveOrdersParams {
    /// Builds the ordered query string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let page_number = self.page_number.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_ORDERS_PAGE_SIZE)
            .clamp(1, MAX_ORDERS_PAGE_SIZE);
        let sort_order = self.sort_order.unwrap_or_default();

        let mut query = vec![
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        push_filters(
            &mut query,
            self.order_status,
            self.product_id.as_deref(),
            self.variant_id.as_deref(),
        );
        query.push(("sortOrder", sort_order.as_str().to_string()));
        push_list_filters(
            &mut query,
            &self.inventory_types,
            &self.initiated_shipment_display_ids,
        );
        query
    }
}

/// Query parameters for [`StockXClient::get_historical_orders`].
///
/// Unset fields use the API defaults: page 1, 20 orders per page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalOrdersParams {
    /// Page to return (at least 1).
    pub page_number: Option<u32>,
    /// Orders per page (at least 1).
    pub page_size: Option<u32>,
    /// Only orders created on or after this date.
    pub from_date: Option<NaiveDate>,
    /// Only orders created on or before this date.
    pub to_date: Option<NaiveDate>,
    /// Only orders with this status.
    pub order_status: Option<OrderStatus>,
    /// Only orders for this product.
    pub product_id: Option<String>,
    /// Only orders for this variant.
    pub variant_id: Option<String>,
    /// Only orders of these inventory types.
    pub inventory_types: Vec<InventoryType>,
    /// Only orders in these initiated shipments.
    pub initiated_shipment_display_ids: Vec<String>,
}

impl HistoricalOrdersParams {
    /// Builds the ordered query string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("pageNumber", self.page_number.unwrap_or(1).max(1).to_string()),
            (
                "pageSize",
                self.page_size
                    .unwrap_or(DEFAULT_ORDERS_PAGE_SIZE)
                    .max(1)
                    .to_string(),
            ),
        ];
        if let Some(from) = self.from_date {
            query.push(("fromDate", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to_date {
            query.push(("toDate", to.format("%Y-%m-%d").to_string()));
        }
        push_filters(
            &mut query,
            self.order_status,
            self.product_id.as_deref(),
            self.variant_id.as_deref(),
        );
        push_list_filters(
            &mut query,
            &self.inventory_types,
            &self.initiated_shipment_display_ids,
        );
        query
    }
}

fn push_filters(
    query: &mut Vec<(&'static str, String)>,
    order_status: Option<OrderStatus>,
    product_id: Option<&str>,
    variant_id: Option<&str>,
) {
    if let Some(status) = order_status {
        query.push(("orderStatus", status.as_str().to_string()));
    }
    if let Some(product_id) = product_id.filter(|id| !id.is_empty()) {
        query.push(("productId", product_id.to_string()));
    }
    if let Some(variant_id) = variant_id.filter(|id| !id.is_empty()) {
        query.push(("variantId", variant_id.to_string()));
    }
}

fn push_list_filters(
    query: &mut Vec<(&'static str, String)>,
    inventory_types: &[InventoryType],
    shipment_ids: &[String],
) {
    if let Some(types) = comma_join(inventory_types.iter().map(InventoryType::as_str)) {
        query.push(("inventoryTypes", types));
    }
    if let Some(ids) = comma_join(shipment_ids) {
        query.push(("initiatedShipmentDisplayIds", ids));
    }
}

impl StockXClient {
    /// Retrieves a single order by its order number.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the order number is empty, the request fails,
    /// or the status is not 200.
    pub async fn get_order(&self, order_number: &str) -> Result<Order, HttpError> {
        let path = format!(
            "selling/orders/{}",
            path_segment("order_number", order_number)?
        );
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a page of active orders.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the status is not 200.
    pub async fn get_active_orders(
        &self,
        params: ActiveOrdersParams,
    ) -> Result<OrdersPage, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "selling/orders/active")
            .query_pairs(params.to_query())
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a page of historical orders.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the status is not 200.
    pub async fn get_historical_orders(
        &self,
        params: HistoricalOrdersParams,
    ) -> Result<OrdersPage, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "selling/orders/history")
            .query_pairs(params.to_query())
            .build()?;
        self.http_client().request_json(request).await
    }
}
