//! Sequential `Link`-header pagination.
//!
//! Each page must complete before the next is requested: the next target is
//! only known from the previous response's `Link` header.

use std::future::Future;

use url::Url;

use super::link::LinkHeader;
use super::{ShopifyError, ShopifyProduct};

/// One page of a product listing.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub products: Vec<ShopifyProduct>,
    /// Raw `Link` header value, if the response carried one.
    pub link: Option<String>,
}

/// Something that can fetch a listing page by relative request target.
pub trait PageSource {
    /// Fetch the page at `target` (path and query relative to the API base).
    fn fetch_page(&self, target: &str) -> impl Future<Output = Result<Page, ShopifyError>> + Send;
}

/// Fetch every page starting at `first_target` and concatenate the products
/// in page order.
///
/// Stops at the first page whose `Link` header has no `next` relation.
///
/// # Errors
///
/// Returns the first page error, discarding products already fetched.
/// Returns `ShopifyError::InvalidLink` if a `Link` header is malformed.
pub async fn fetch_all<S>(
    source: &S,
    first_target: &str,
    api_prefix: &str,
) -> Result<Vec<ShopifyProduct>, ShopifyError>
where
    S: PageSource + Sync,
{
    let mut products = Vec::new();
    let mut target = first_target.to_string();
    let mut pages = 0_usize;

    loop {
        let page = source.fetch_page(&target).await?;
        pages += 1;
        tracing::debug!(page = pages, count = page.products.len(), "Fetched product page");
        products.extend(page.products);

        match next_target(page.link.as_deref(), api_prefix)? {
            Some(next) => target = next,
            None => break,
        }
    }

    tracing::info!(pages, total = products.len(), "Fetched all Shopify products");
    Ok(products)
}

/// Request target of the `next` relation in a `Link` header, if any.
///
/// # Errors
///
/// Returns `ShopifyError::InvalidLink` if the header is malformed.
pub fn next_target(link: Option<&str>, api_prefix: &str) -> Result<Option<String>, ShopifyError> {
    let Some(link) = link else {
        return Ok(None);
    };
    let links = LinkHeader::parse(link)?;
    Ok(links.next().map(|url| request_target(url, api_prefix)))
}

/// Reduce an absolute link to a target relative to the versioned API base.
///
/// Keeps path and query, drops everything up to and including `api_prefix`,
/// then drops a leading API version segment (`2024-01/`, `unstable/`) so
/// links work regardless of the version the server used.
///
/// The result never starts with `/`: joined onto the base, a `//host` target
/// would switch hosts and carry the shop credentials with it.
///
/// ```text
/// https://x/admin/api/2023-01/products.json?page_info=abc  ->  products.json?page_info=abc
/// ```
#[must_use]
pub fn request_target(link: &str, api_prefix: &str) -> String {
    let path_and_query = match Url::parse(link) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        },
        Err(_) => link.to_string(),
    };

    let rest = match path_and_query.find(api_prefix) {
        Some(index) if !api_prefix.is_empty() => path_and_query
            .get(index + api_prefix.len()..)
            .unwrap_or_default(),
        _ => path_and_query.as_str(),
    };

    strip_version_segment(rest.trim_start_matches('/'))
        .trim_start_matches('/')
        .to_string()
}

fn strip_version_segment(path: &str) -> &str {
    match path.split_once('/') {
        Some((segment, rest)) if is_api_version(segment) => rest,
        _ => path,
    }
}

/// `YYYY-MM` or `unstable`.
fn is_api_version(segment: &str) -> bool {
    if segment == "unstable" {
        return true;
    }
    match segment.split_once('-') {
        Some((year, month)) => {
            year.len() == 4
                && month.len() == 2
                && year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
