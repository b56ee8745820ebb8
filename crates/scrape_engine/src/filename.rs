use crate::ExtractionMode;

/// Derive the output filename for a scraped page from its URL: protocol and
/// a leading `www.` are stripped, every run of non-alphanumeric characters
/// collapses to a single hyphen, outer hyphens are trimmed, and the extension
/// follows the rendering mode.
///
/// Existing stored files were named with exactly this scheme, so the
/// derivation must stay byte-for-byte stable.
pub fn output_filename(url: &str, mode: ExtractionMode) -> String {
    let stripped = strip_scheme(url);

    let mut slug = String::with_capacity(stripped.len());
    let mut prev_hyphen = false;
    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    let slug = slug.trim_matches('-');

    let extension = match mode {
        ExtractionMode::PlainText => ".txt",
        ExtractionMode::Markdown => ".md",
        ExtractionMode::ImageList => ".img-only.html",
    };
    format!("{slug}{extension}")
}

fn strip_scheme(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_prefix("www.").unwrap_or(rest)
}

/// Turn a search query into a filesystem-safe stem: anything outside
/// `[A-Za-z0-9_-]` becomes `_`, truncated to `max_length` characters.
pub fn sanitize_query(query: &str, max_length: usize) -> String {
    query
        .chars()
        .take(max_length)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{output_filename, sanitize_query};
    use crate::ExtractionMode;

    #[test]
    fn strips_scheme_and_www_and_collapses_runs() {
        assert_eq!(
            output_filename("https://www.example.com/a/b?q=1", ExtractionMode::Markdown),
            "example-com-a-b-q-1.md"
        );
        assert_eq!(
            output_filename("http://example.com/", ExtractionMode::PlainText),
            "example-com.txt"
        );
    }

    #[test]
    fn image_list_gets_marker_extension() {
        assert_eq!(
            output_filename("https://example.com/pics", ExtractionMode::ImageList),
            "example-com-pics.img-only.html"
        );
    }

    #[test]
    fn bare_host_without_scheme_still_works() {
        assert_eq!(
            output_filename("example.com", ExtractionMode::Markdown),
            "example-com.md"
        );
    }

    #[test]
    fn query_sanitization_replaces_and_truncates() {
        assert_eq!(sanitize_query("why did it rain?", 50), "why_did_it_rain_");
        assert_eq!(sanitize_query("abcdef", 3), "abc");
    }
}
