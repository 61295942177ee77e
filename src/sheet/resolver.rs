//! Share-link resolution.

use regex::Regex;

/// Convert a Google Sheets share link into its direct XLSX export link.
///
/// URLs that are not Google Sheets links, or that already point at an
/// export, are returned unchanged. When no sheet id can be extracted the
/// input also passes through unchanged and the subsequent download fails
/// with an ordinary fetch error.
pub fn export_url(url: &str) -> String {
    if !url.contains("docs.google.com/spreadsheets") || url.contains("/export") {
        return url.to_string();
    }

    let Ok(pattern) = Regex::new(r"/d/([a-zA-Z0-9_-]+)/") else {
        return url.to_string();
    };

    match pattern.captures(url).and_then(|caps| caps.get(1)) {
        Some(id) => format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=xlsx",
            id.as_str()
        ),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_resolves_to_export() {
        let url = "https://docs.google.com/spreadsheets/d/1JJFy0SjFGoJu_-9v1De/edit?usp=sharing";
        assert_eq!(
            export_url(url),
            "https://docs.google.com/spreadsheets/d/1JJFy0SjFGoJu_-9v1De/export?format=xlsx"
        );
    }

    #[test]
    fn test_export_link_passes_through() {
        let url = "https://docs.google.com/spreadsheets/d/abc123/export?format=xlsx";
        assert_eq!(export_url(url), url);
    }

    #[test]
    fn test_non_google_url_passes_through() {
        let url = "https://example.com/report.xlsx";
        assert_eq!(export_url(url), url);
    }

    #[test]
    fn test_unextractable_id_passes_through() {
        let url = "https://docs.google.com/spreadsheets/u/0/";
        assert_eq!(export_url(url), url);
    }
}
