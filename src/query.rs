//! Listing queries: category filter, name search, pagination, and stats.

use crate::domain::Product;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// Raw query-string parameters. Numbers stay strings so that garbage input
/// falls back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub data: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub in_stock: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl ListQuery {
    /// Builds the query from decoded key/value pairs. Repeated keys keep their
    /// first value; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut query.category,
                "q" => &mut query.q,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub fn page(&self) -> usize {
        parse_leading_int(self.page.as_deref())
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> usize {
        parse_leading_int(self.limit.as_deref())
            .map(|n| n.clamp(1, MAX_LIMIT as i64) as usize)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// Reads an optional sign and the leading digits, ignoring whatever follows
/// (`"2abc"` is 2, `"1.9"` is 1). No digits at all yields `None`.
fn parse_leading_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Saturate instead of failing on absurdly long inputs; both ends get clamped anyway.
    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn wanted(param: &Option<String>) -> Option<String> {
    param
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

pub fn query(products: Vec<Product>, params: &ListQuery) -> Page {
    let category = wanted(&params.category);
    let needle = wanted(&params.q);

    let filtered: Vec<Product> = products
        .into_iter()
        .filter(|p| category.as_ref().map_or(true, |c| p.category.to_lowercase() == *c))
        .filter(|p| needle.as_ref().map_or(true, |q| p.name.to_lowercase().contains(q.as_str())))
        .collect();

    let total = filtered.len();
    let page = params.page();
    let limit = params.limit();
    let data = filtered
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    Page { page, limit, total, data }
}

pub fn stats(products: &[Product]) -> Stats {
    let mut by_category = BTreeMap::new();
    for product in products {
        *by_category.entry(product.category.clone()).or_insert(0) += 1;
    }
    Stats {
        total: products.len(),
        in_stock: products.iter().filter(|p| p.in_stock).count(),
        by_category,
    }
}
