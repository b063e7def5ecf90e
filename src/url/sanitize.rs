/// Maximum length of a folder name derived from a topic
pub const TOPIC_FOLDER_MAX_LEN: usize = 50;

/// Replaces every character outside `[A-Za-z0-9.\-_]` with `_`, then truncates
///
/// The result is safe to use as a single path component. Empty input yields an
/// empty string, so callers that need a name must supply their own fallback.
///
/// # Arguments
///
/// * `raw` - Arbitrary input text
/// * `max_length` - Maximum number of characters kept, or `None` for no cap
///
/// # Examples
///
/// ```
/// use pdf_harvester::url::sanitize_segment;
///
/// assert_eq!(sanitize_segment("climate change", Some(50)), "climate_change");
/// assert_eq!(sanitize_segment("a/b?c", None), "a_b_c");
/// assert_eq!(sanitize_segment("abcdef", Some(3)), "abc");
/// ```
pub fn sanitize_segment(raw: &str, max_length: Option<usize>) -> String {
    let mapped = raw.chars().map(|c| {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            c
        } else {
            '_'
        }
    });

    match max_length {
        Some(max) => mapped.take(max).collect(),
        None => mapped.collect(),
    }
}

/// Folder name for a topic
pub fn topic_folder_name(topic: &str) -> String {
    sanitize_segment(topic, Some(TOPIC_FOLDER_MAX_LEN))
}

/// Appends `.pdf` unless the name already ends with it (case-insensitive)
///
/// ```
/// use pdf_harvester::url::ensure_pdf_suffix;
///
/// assert_eq!(ensure_pdf_suffix("report"), "report.pdf");
/// assert_eq!(ensure_pdf_suffix("REPORT.PDF"), "REPORT.PDF");
/// ```
pub fn ensure_pdf_suffix(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{}.pdf", name)
    }
}
