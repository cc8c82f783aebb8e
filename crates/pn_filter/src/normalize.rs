/// Canonicalize a link for identity comparison: drop the query string and
/// fragment, lowercase what remains, strip trailing slashes.
///
/// Total on any input. Malformed links are not an error here; whatever string
/// the feed gave us is lowercased and stripped as-is, and equal outputs mean
/// "same article".
pub fn normalize_url(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].to_lowercase().trim_end_matches('/').to_string()
}
