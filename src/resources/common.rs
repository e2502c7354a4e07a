//! Types shared by the order, listing and catalog resources.

use serde::{Deserialize, Serialize};

/// The fulfilment channel of an order or listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum InventoryType {
    /// Seller ships each order to StockX.
    Standard,
    /// Inventory is pre-stocked at a StockX Flex warehouse.
    Flex,
}

impl InventoryType {
    /// Returns the wire value used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Flex => "FLEX",
        }
    }
}

/// Product reference embedded in orders and listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSummary {
    /// StockX product ID.
    pub product_id: Option<String>,
    /// Display name of the product.
    pub product_name: Option<String>,
    /// Manufacturer style code.
    pub style_id: Option<String>,
}

/// Variant reference embedded in orders and listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantSummary {
    /// StockX variant ID.
    pub variant_id: Option<String>,
    /// Display name of the variant.
    pub variant_name: Option<String>,
    /// Variant value, usually the size.
    pub variant_value: Option<String>,
}

/// Authentication outcome of an item.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticationDetails {
    /// Authentication status.
    pub status: Option<String>,
    /// Notes explaining a failed authentication.
    pub failure_notes: Option<String>,
}

/// Seller payout breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Payout {
    /// Amount paid to the seller.
    pub total_payout: Option<f64>,
    /// Sale price before adjustments.
    pub sale_price: Option<f64>,
    /// Sum of all adjustments.
    pub total_adjustments: Option<f64>,
    /// Currency of the amounts.
    pub currency_code: Option<String>,
    /// Individual fees and credits.
    pub adjustments: Vec<PayoutAdjustment>,
}

/// A single payout fee or credit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PayoutAdjustment {
    /// Kind of adjustment (e.g. transaction fee).
    pub adjustment_type: Option<String>,
    /// Absolute amount.
    pub amount: Option<f64>,
    /// Percentage of the sale price.
    pub percentage: Option<f64>,
}

/// Shipments initiated for an order or listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InitiatedShipments {
    /// Inbound shipment to StockX.
    pub inbound: Option<InboundShipment>,
}

/// Inbound shipment reference.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundShipment {
    /// Shipment display ID.
    pub display_id: Option<String>,
}

/// Joins values into the comma-separated form used by list filters.
///
/// Returns `None` when there are no values, so the filter is omitted.
pub(crate) fn comma_join<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = values
        .into_iter()
        .map(|value| value.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(",");
    (!joined.is_empty()).then_some(joined)
}
