//! Normalization of caller query strings into GraphQL variables.

use serde::Serialize;
use url::form_urlencoded;

use crate::catalog::filter::FilterKind;
use crate::error::ProxyError;

/// Raw query string accepted by the search routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub filter_by: Option<String>,
}

impl SearchQuery {
    /// Parse a raw query string. Never fails: unknown keys are ignored and a
    /// repeated key joins its values with `,` (`page=1&page=2` reads as `"1,2"`).
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "q" => &mut query.q,
                "page" => &mut query.page,
                "filterBy" => &mut query.filter_by,
                _ => continue,
            };
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value.into_owned()),
            }
        }
        query
    }
}

/// Whitespace as browsers' `trim()` sees it: Unicode White_Space plus the BOM.
pub fn is_query_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// GraphQL variables for `search_crossreference_no`.
///
/// Field order is the wire order of the `variables` JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search: String,
    pub current_page: i32,
    pub page_size: u32,
    pub filter_by: FilterKind,
}

impl SearchParams {
    pub fn from_query(query: &SearchQuery, page_size: u32) -> Result<Self, ProxyError> {
        Ok(Self {
            search: normalize_search(query.q.as_deref().unwrap_or_default())?,
            current_page: parse_page(query.page.as_deref()),
            page_size,
            filter_by: FilterKind::normalize(query.filter_by.as_deref()),
        })
    }
}

/// Trim, collapse whitespace runs to `+`, lowercase.
pub fn normalize_search(raw: &str) -> Result<String, ProxyError> {
    let trimmed = raw.trim_matches(is_query_whitespace);
    if trimmed.is_empty() {
        return Err(ProxyError::MissingQuery);
    }
    Ok(trimmed
        .split(is_query_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("+")
        .to_lowercase())
}

/// Lenient page parse. Anything that is not a positive integer prefix is page 1.
pub fn parse_page(raw: Option<&str>) -> i32 {
    raw.and_then(parse_int_prefix)
        .filter(|page| *page > 0)
        .unwrap_or(1)
}

// Leading whitespace, optional sign, then as many digits as present.
fn parse_int_prefix(raw: &str) -> Option<i32> {
    let s = raw.trim_start_matches(is_query_whitespace);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i32 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
