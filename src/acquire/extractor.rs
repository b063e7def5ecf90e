//! HTML link extraction for site crawls
//!
//! Finds anchors that look like document downloads on a listing page and
//! resolves them to absolute URLs.

use crate::model::{CandidateLink, SCRAPER_SOURCE_LABEL};
use crate::url::{filename_for_url, has_document_extension, resolve_against_origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts candidate document links from a page
///
/// # Link Selection Rules
///
/// An anchor is considered when its `href` is non-empty and either ends with
/// `.pdf` or contains `download`. Relative hrefs are resolved against the
/// origin of `page_url`. The resolved URL is kept when it contains `keyword`
/// (case-insensitive) or ends with `.pdf`.
///
/// Duplicates are collapsed by exact URL, first occurrence wins, so the output
/// follows document order. The result depends only on the inputs; no cap is
/// applied here.
///
/// # Example
///
/// ```
/// use pdf_harvester::acquire::extract_candidate_links;
/// use url::Url;
///
/// let html = r#"<a href="/files/atlas.pdf">Atlas</a><a href="/about">About</a>"#;
/// let page = Url::parse("https://example.com/list").unwrap();
/// let links = extract_candidate_links(html, &page, "maps");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url, "https://example.com/files/atlas.pdf");
/// ```
pub fn extract_candidate_links(html: &str, page_url: &Url, keyword: &str) -> Vec<CandidateLink> {
    let document = Html::parse_document(html);
    let keyword = keyword.to_lowercase();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !looks_like_document(href) {
            continue;
        }

        let Some(resolved) = resolve_against_origin(href, page_url) else {
            tracing::trace!("Skipping unresolvable href {}", href);
            continue;
        };

        let url = resolved.to_string();
        let lowered = url.to_lowercase();
        if !(lowered.contains(&keyword) || has_document_extension(&url)) {
            continue;
        }

        if seen.insert(url.clone()) {
            links.push(CandidateLink {
                suggested_filename: filename_for_url(&url),
                url,
                source_label: SCRAPER_SOURCE_LABEL.to_string(),
            });
        }
    }

    links
}

/// Anchor prefilter: non-empty and `.pdf` or a download link
fn looks_like_document(href: &str) -> bool {
    !href.is_empty() && (has_document_extension(href) || href.contains("download"))
}
