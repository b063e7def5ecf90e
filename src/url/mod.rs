//! URL and path handling for PDF Harvester
//!
//! This module turns topics and document URLs into filesystem-safe names, and
//! provides the small URL helpers shared by the search and crawl paths.

mod sanitize;

pub use sanitize::{ensure_pdf_suffix, sanitize_segment, topic_folder_name, TOPIC_FOLDER_MAX_LEN};

use tracing::debug;
use url::Url;

/// Extension that marks a link as a candidate document
pub const DOCUMENT_EXTENSION: &str = ".pdf";

/// Returns true if the link ends with the document extension (case-insensitive)
pub fn has_document_extension(link: &str) -> bool {
    link.to_ascii_lowercase().ends_with(DOCUMENT_EXTENSION)
}

/// Resolves an href found on `page_url`
///
/// Hrefs that already start with `http` are parsed as-is. Anything else is
/// resolved against the page's origin (scheme, host and port), not its full path.
///
/// # Returns
///
/// * `Some(Url)` - The absolute HTTP(S) URL
/// * `None` - The href could not be resolved, or resolved to another scheme
pub fn resolve_against_origin(href: &str, page_url: &Url) -> Option<Url> {
    let resolved = if href.starts_with("http") {
        Url::parse(href).ok()?
    } else {
        let origin = Url::parse(&page_url.origin().ascii_serialization()).ok()?;
        origin.join(href).ok()?
    };

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}

/// Extracts the last path segment of a URL, without query or fragment
///
/// The segment is percent-decoded, so `my%20paper.pdf` and a raw
/// `my paper.pdf` both come back as `my paper.pdf`. Returns `None` when the
/// path ends in `/` or the URL has no path.
pub fn last_path_segment(link: &str) -> Option<String> {
    let segment = match Url::parse(link) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        Err(_) => link
            .rsplit('/')
            .next()
            .and_then(|s| s.split(['?', '#']).next())
            .map(str::to_string),
    };

    segment.filter(|s| !s.is_empty()).map(|raw| {
        match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                debug!(segment = %raw, error = %e, "URL decoding failed, using raw segment");
                raw
            }
        }
    })
}

/// Derives the stored filename for a document URL
///
/// Uses the sanitized last path segment with a `.pdf` suffix. When that leaves
/// nothing usable, falls back to a timestamp-based name.
pub fn filename_for_url(link: &str) -> String {
    let name = last_path_segment(link)
        .map(|segment| sanitize_segment(&segment, None))
        .unwrap_or_default();

    if name.is_empty() {
        fallback_filename()
    } else {
        ensure_pdf_suffix(&name)
    }
}

/// Timestamp-based filename used when a URL yields no name
pub fn fallback_filename() -> String {
    format!("file-{}.pdf", chrono::Utc::now().timestamp_millis())
}
