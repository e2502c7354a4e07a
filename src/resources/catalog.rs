//! Catalog products, variants and market data.

use serde::{Deserialize, Serialize};

use crate::clients::{path_segment, HttpError, HttpMethod, HttpRequest};
use crate::StockXClient;

/// Default page size of catalog searches.
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 10;

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Product ID.
    pub product_id: Option<String>,
    /// URL slug on stockx.com.
    pub url_key: Option<String>,
    /// Manufacturer style code.
    pub style_id: Option<String>,
    /// Product type (e.g. `sneakers`).
    pub product_type: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// Descriptive attributes.
    pub product_attributes: Option<ProductAttributes>,
    /// Size conversions available for the product.
    pub size_chart: Option<ProductSizeChart>,
}

/// Descriptive attributes of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductAttributes {
    /// Target gender.
    pub gender: Option<String>,
    /// Release season.
    pub season: Option<String>,
    /// Release date as published by StockX.
    pub release_date: Option<String>,
    /// Retail price.
    pub retail_price: Option<f64>,
    /// Colorway name.
    pub colorway: Option<String>,
    /// Primary color.
    pub color: Option<String>,
}

/// Size chart of a product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSizeChart {
    /// Available size conversions.
    pub available_conversions: Vec<SizeConversionType>,
    /// Default conversion type.
    pub default_conversion: Option<SizeConversionType>,
}

/// A size conversion system (e.g. US Men's).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SizeConversionType {
    /// Display name.
    pub name: Option<String>,
    /// Conversion system identifier.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A product variant, usually one size.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductVariant {
    /// Parent product ID.
    pub product_id: Option<String>,
    /// Variant ID.
    pub variant_id: Option<String>,
    /// Variant display name.
    pub variant_name: Option<String>,
    /// Variant value, usually the size.
    pub variant_value: Option<String>,
    /// Size of this variant in each conversion system.
    pub size_chart: Option<VariantSizeChart>,
}

/// Size chart of a variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantSizeChart {
    /// Size in each available conversion system.
    pub available_conversions: Vec<VariantSize>,
    /// Size in the default conversion system.
    pub default_conversion: Option<VariantSize>,
}

/// The size of a variant in one conversion system.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct VariantSize {
    /// Size label.
    pub size: Option<String>,
    /// Conversion system identifier.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Market prices of a variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketData {
    /// Product ID.
    pub product_id: Option<String>,
    /// Variant ID.
    pub variant_id: Option<String>,
    /// Currency of the amounts.
    pub currency_code: Option<String>,
    /// Lowest ask.
    pub lowest_ask_amount: Option<String>,
    /// Highest bid.
    pub highest_bid_amount: Option<String>,
    /// Suggested price to sell faster.
    pub sell_faster_amount: Option<String>,
    /// Suggested price to earn more.
    pub earn_more_amount: Option<String>,
    /// Lowest Flex ask.
    pub flex_lowest_ask_amount: Option<String>,
}

/// One page of catalog search results.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSearchPage {
    /// Total number of matching products.
    pub count: u64,
    /// Page size used.
    pub page_size: u32,
    /// Page number returned.
    pub page_number: u32,
    /// Whether another page exists.
    pub has_next_page: bool,
    /// Products on this page.
    pub products: Vec<Product>,
}

/// Query parameters for [`StockXClient::search_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSearchParams {
    /// Free-text query (name, style code, ...).
    pub query: String,
    /// Page to return (at least 1, default 1).
    pub page_number: Option<u32>,
    /// Products per page (at least 1, default 10).
    pub page_size: Option<u32>,
}

impl CatalogSearchParams {
    /// Creates search parameters for `query` with default paging.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Builds the ordered query string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("pageNumber", self.page_number.unwrap_or(1).max(1).to_string()),
            (
                "pageSize",
                self.page_size
                    .unwrap_or(DEFAULT_SEARCH_PAGE_SIZE)
                    .max(1)
                    .to_string(),
            ),
        ]
    }
}

fn product_path(product_id: &str) -> Result<String, HttpError> {
    Ok(format!(
        "catalog/products/{}",
        path_segment("product_id", product_id)?
    ))
}

fn variant_path(product_id: &str, variant_id: &str) -> Result<String, HttpError> {
    Ok(format!(
        "{}/variants/{}",
        product_path(product_id)?,
        path_segment("variant_id", variant_id)?
    ))
}

impl StockXClient {
    /// Searches the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the status is not 200.
    pub async fn search_catalog(
        &self,
        params: CatalogSearchParams,
    ) -> Result<CatalogSearchPage, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "catalog/products/search")
            .query_pairs(params.to_query())
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a single product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_product(&self, product_id: &str) -> Result<Product, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, product_path(product_id)?).build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves all variants of a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_product_variants(
        &self,
        product_id: &str,
    ) -> Result<Vec<ProductVariant>, HttpError> {
        let path = format!("{}/variants", product_path(product_id)?);
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves a single variant of a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if either ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_product_variant(
        &self,
        product_id: &str,
        variant_id: &str,
    ) -> Result<ProductVariant, HttpError> {
        let request =
            HttpRequest::builder(HttpMethod::Get, variant_path(product_id, variant_id)?).build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves market data for every variant of a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_product_market_data(
        &self,
        product_id: &str,
        currency_code: &str,
    ) -> Result<Vec<MarketData>, HttpError> {
        let path = format!("{}/market-data", product_path(product_id)?);
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("currencyCode", currency_code)
            .build()?;
        self.http_client().request_json(request).await
    }

    /// Retrieves market data for a single variant.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if either ID is empty, the request fails, or the
    /// status is not 200.
    pub async fn get_variant_market_data(
        &self,
        product_id: &str,
        variant_id: &str,
        currency_code: &str,
    ) -> Result<MarketData, HttpError> {
        let path = format!("{}/market-data", variant_path(product_id, variant_id)?);
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query_param("currencyCode", currency_code)
            .build()?;
        self.http_client().request_json(request).await
    }
}
