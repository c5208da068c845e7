//! Catalog vendors and their fixed GraphQL documents.

use url::Url;

use crate::catalog::params::SearchParams;
use crate::error::ProxyError;

const MANN_QUERY: &str = "query($search:String!$currentPage:Int!$pageSize:Int!$filterBy:TYPE_OF_FILTER){catalogSearch:search_crossreference_no(search:$search currentPage:$currentPage pageSize:$pageSize filterBy:$filterBy){availableFilters:available_filters{label totalProducts:total_products code __typename}items{product{name sku urlKey:url_key attributes:attributes_value{key value adminValue:admin_value __typename}__typename}externalNumber:external_number intProductIdentifier:int_product_identifier externalProductName:ext_product_name manufacturer:ext_brand_name filterBy:aa_product_family __typename}pageInfo:page_info{currentPage:current_page pageSize:page_size totalPages:total_pages __typename}totalCount:total_count __typename}}";

const WIX_QUERY: &str = "query($search:String!$currentPage:Int!$pageSize:Int!$filterBy:TYPE_OF_FILTER){catalogSearch:search_crossreference_no(search:$search currentPage:$currentPage pageSize:$pageSize filterBy:$filterBy){availableFilters:available_filters{label totalProducts:total_products code __typename}items{product{name sku urlKey:url_key attributes:attributes_value{key value adminValue:admin_value __typename}references{referenceTypeId:reference_type_id referenceTypeName:reference_type_name referenceTypeDescription:reference_type_description referenceProducts:reference_products{salesDesignation:sales_designation urlKey:url_key __typename}__typename}__typename}externalNumber:external_number intProductIdentifier:int_product_identifier externalProductName:ext_product_name manufacturer:ext_brand_name filterBy:aa_product_family textLinkages:linkages{module_name module_unit module_value __typename}__typename}pageInfo:page_info{currentPage:current_page pageSize:page_size totalPages:total_pages __typename}totalCount:total_count __typename}}";

/// A GraphQL catalog backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Mann,
    Wix,
}

impl Vendor {
    pub const ALL: [Vendor; 2] = [Vendor::Mann, Vendor::Wix];

    /// Config key and metric label.
    pub fn key(&self) -> &'static str {
        match self {
            Vendor::Mann => "mann",
            Vendor::Wix => "wix",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Mann => "MANN",
            Vendor::Wix => "WIX",
        }
    }

    /// Route this vendor is served on.
    pub fn route(&self) -> &'static str {
        match self {
            Vendor::Mann => "/api/mann",
            Vendor::Wix => "/api/wix",
        }
    }

    /// Value of the `X-Proxy-Upstream` response header.
    pub fn upstream_label(&self) -> &'static str {
        match self {
            Vendor::Mann => "mann-filter.com",
            Vendor::Wix => "wixfilters.com",
        }
    }

    pub fn query(&self) -> &'static str {
        match self {
            Vendor::Mann => MANN_QUERY,
            // WIX also selects cross references and text linkages.
            Vendor::Wix => WIX_QUERY,
        }
    }

    /// `endpoint?query=<document>&variables=<json>`, form-urlencoded.
    pub fn graphql_url(&self, endpoint: &str, params: &SearchParams) -> Result<Url, ProxyError> {
        let variables = serde_json::to_string(params)?;
        let mut url = Url::parse(endpoint)?;
        url.query_pairs_mut()
            .append_pair("query", self.query())
            .append_pair("variables", &variables);
        Ok(url)
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
