//! List-view query parameter codec
//!
//! Product and order list pages keep their state (page, filters, sort) in
//! the URL. Parsing is lenient: every field has a default, a malformed
//! value falls back to that field's default instead of rejecting the whole
//! query string, and unknown keys are ignored. Serialization is minimal:
//! fields equal to their default are omitted so shared URLs stay short.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SORT_FIELD: &str = "created_at";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Canonical request parameters for a list view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListQueryParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: Option<bool>,
    pub rating: Option<u8>,
    pub tags: Vec<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ListQueryParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            status: None,
            category_id: None,
            min_price: None,
            max_price: None,
            in_stock: None,
            rating: None,
            tags: vec![],
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ListQueryParams {
    /// Parse a query string (leading `?` allowed). Never fails: bad values
    /// become field defaults, unknown keys are skipped.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).unwrap_or_default();

        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    params.page = value.parse().map(|p: u32| p.max(1)).unwrap_or(DEFAULT_PAGE);
                }
                "limit" => {
                    params.limit = value
                        .parse()
                        .map(|l: u32| l.clamp(1, MAX_PAGE_SIZE))
                        .unwrap_or(DEFAULT_PAGE_SIZE);
                }
                "search" => params.search = non_empty(value),
                "status" => params.status = non_empty(value),
                "category_id" => params.category_id = non_empty(value),
                "min_price" => params.min_price = Decimal::from_str(&value).ok(),
                "max_price" => params.max_price = Decimal::from_str(&value).ok(),
                "in_stock" => {
                    params.in_stock = match value.as_str() {
                        "true" => Some(true),
                        "false" => Some(false),
                        _ => None,
                    }
                }
                "rating" => params.rating = value.parse().ok(),
                "tags" => {
                    params.tags = value
                        .split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(String::from)
                        .collect();
                }
                "sort_by" => {
                    if let Some(field) = non_empty(value) {
                        params.sort_by = field;
                    }
                }
                "sort_order" => {
                    if value == "asc" {
                        params.sort_order = SortOrder::Asc;
                    }
                }
                _ => {} // Unknown keys are ignored.
            }
        }
        params
    }

    /// Serialize to a query string, omitting fields equal to their default.
    pub fn serialize(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if self.page != DEFAULT_PAGE {
            pairs.push(("page", self.page.to_string()));
        }
        if self.limit != DEFAULT_PAGE_SIZE {
            pairs.push(("limit", self.limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        if let Some(category) = self.category_id.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("category_id", category.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push(("in_stock", in_stock.to_string()));
        }
        if let Some(rating) = self.rating {
            pairs.push(("rating", rating.to_string()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if self.sort_by != DEFAULT_SORT_FIELD {
            pairs.push(("sort_by", self.sort_by.clone()));
        }
        if self.sort_order != SortOrder::default() {
            pairs.push(("sort_order", self.sort_order.as_str().to_string()));
        }
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }

    /// Apply the same defaulting/clamping rules as [`ListQueryParams::parse`]
    /// to an in-memory value, so `parse(serialize(p)) == normalize(p)`.
    pub fn normalize(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        self.search = self.search.filter(|s| !s.is_empty());
        self.status = self.status.filter(|s| !s.is_empty());
        self.category_id = self.category_id.filter(|s| !s.is_empty());
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if self.sort_by.is_empty() {
            self.sort_by = DEFAULT_SORT_FIELD.to_string();
        }
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
