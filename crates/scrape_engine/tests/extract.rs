use pretty_assertions::assert_eq;
use scrape_engine::{decode_html, ContentExtractor, ExtractionMode, Extractor};

#[test]
fn script_and_style_text_never_leaks_into_output() {
    let html = r#"
    <html><head><style>body { color: red; }</style></head>
    <body>
        <p>visible paragraph</p>
        <script>var secret = 1;</script>
        <style>.x { display: none; }</style>
    </body></html>
    "#;
    for mode in [ExtractionMode::PlainText, ExtractionMode::Markdown] {
        let content = ContentExtractor.extract(html, mode);
        let value = content.value.expect("content present");
        assert!(value.contains("visible paragraph"), "{mode:?}: {value}");
        assert!(!value.contains("secret"), "{mode:?}: {value}");
        assert!(!value.contains("color: red"), "{mode:?}: {value}");
        assert!(!value.contains("display: none"), "{mode:?}: {value}");
    }
}

#[test]
fn template_and_svg_subtrees_are_dropped() {
    let html = "<body><p>keep</p><template><p>spare</p></template>\
                <svg><text>vector label</text></svg></body>";
    let content = ContentExtractor.extract(html, ExtractionMode::PlainText);
    let value = content.value.expect("content present");
    assert!(value.contains("keep"));
    assert!(!value.contains("spare"));
    assert!(!value.contains("vector label"));
}

#[test]
fn extraction_is_idempotent() {
    let html = "<body><h1>Title</h1><p>Some <a href='http://x.test'>link</a> text.</p></body>";
    for mode in [
        ExtractionMode::PlainText,
        ExtractionMode::Markdown,
        ExtractionMode::ImageList,
    ] {
        let first = ContentExtractor.extract(html, mode);
        let second = ContentExtractor.extract(html, mode);
        assert_eq!(first, second);
    }
}

#[test]
fn missing_body_yields_no_content() {
    let html = "<html><head><title>head only</title></head><p>loose text</p></html>";
    for mode in [ExtractionMode::PlainText, ExtractionMode::Markdown] {
        let content = ContentExtractor.extract(html, mode);
        assert!(!content.is_present(), "{mode:?}");
        assert_eq!(content.value, None);
    }
}

#[test]
fn commented_out_body_does_not_count() {
    let html = "<html><head><!-- <body>draft</body> --><title>t</title></head><p>x</p></html>";
    for mode in [ExtractionMode::PlainText, ExtractionMode::Markdown] {
        let content = ContentExtractor.extract(html, mode);
        assert_eq!(content.value, None, "{mode:?}");
    }
}

#[test]
fn body_after_a_comment_still_counts() {
    let html = "<html><!-- header --><body><p>real content</p></body></html>";
    let content = ContentExtractor.extract(html, ExtractionMode::PlainText);
    assert_eq!(content.value.as_deref(), Some("real content"));
}

#[test]
fn body_with_only_whitespace_yields_no_content() {
    let html = "<body>   \n\t  </body>";
    let content = ContentExtractor.extract(html, ExtractionMode::PlainText);
    assert_eq!(content.value, None);
}

#[test]
fn body_with_only_script_yields_no_content() {
    let html = "<body><script>var app = boot();</script></body>";
    for mode in [ExtractionMode::PlainText, ExtractionMode::Markdown] {
        let content = ContentExtractor.extract(html, mode);
        assert_eq!(content.value, None, "{mode:?}");
    }
}

#[test]
fn plain_text_collapses_blank_runs_and_trims() {
    let html = "<body>\n\n\n\ntext\n\n\n\n</body>";
    let content = ContentExtractor.extract(html, ExtractionMode::PlainText);
    assert_eq!(content.value.as_deref(), Some("text"));
}

#[test]
fn plain_text_separates_block_elements() {
    let html = "<body><p>first</p><p>second</p></body>";
    let content = ContentExtractor.extract(html, ExtractionMode::PlainText);
    let value = content.value.expect("content present");
    assert!(value.contains("first"));
    assert!(value.contains("second"));
    // Block structure must not collapse into one run-on string.
    assert!(!value.contains("firstsecond"), "{value}");
}

#[test]
fn markdown_preserves_link_text_and_target() {
    let html = r#"<body><a href="http://x.test">link</a></body>"#;
    let content = ContentExtractor.extract(html, ExtractionMode::Markdown);
    let value = content.value.expect("content present");
    assert!(value.contains("link"), "{value}");
    assert!(value.contains("http://x.test"), "{value}");
}

#[test]
fn image_list_keeps_only_images_with_src() {
    let html = r#"<html><body><img src="a.png" alt="A"><img alt="no-src"></body></html>"#;
    let content = ContentExtractor.extract(html, ExtractionMode::ImageList);
    assert_eq!(
        content.value.as_deref(),
        Some("<ul><li><img src='a.png' alt='A'></li></ul>")
    );
}

#[test]
fn image_list_defaults_missing_alt_to_empty() {
    let html = r#"<body><img src="b.jpg"></body>"#;
    let content = ContentExtractor.extract(html, ExtractionMode::ImageList);
    assert_eq!(
        content.value.as_deref(),
        Some("<ul><li><img src='b.jpg' alt=''></li></ul>")
    );
}

#[test]
fn image_list_scans_beyond_body_and_has_no_empty_failure_case() {
    // Head-level images are still listed; no images at all is still present.
    let with_head_img = r#"<html><head><img src="logo.svg" alt="logo"></head><body></body></html>"#;
    let content = ContentExtractor.extract(with_head_img, ExtractionMode::ImageList);
    assert!(content.value.unwrap().contains("logo.svg"));

    let empty = ContentExtractor.extract("<body><p>no pictures</p></body>", ExtractionMode::ImageList);
    assert_eq!(empty.value.as_deref(), Some("<ul></ul>"));
}

#[test]
fn image_list_runs_on_the_unfiltered_document() {
    // The strip pass applies to the text-bearing modes only; an image that
    // appears inside svg markup is still listed.
    let html = r#"<body><svg><img src="inline.png" alt="i"></svg><p>text</p></body>"#;
    let listed = ContentExtractor.extract(html, ExtractionMode::ImageList);
    assert!(listed.value.unwrap().contains("inline.png"));

    let text = ContentExtractor.extract(html, ExtractionMode::PlainText);
    assert_eq!(text.value.as_deref(), Some("text"));
}

#[test]
fn malformed_markup_is_tolerated() {
    let html = "<body><p>unclosed <b>bold <p>next</body>";
    let content = ContentExtractor.extract(html, ExtractionMode::PlainText);
    let value = content.value.expect("content present");
    assert!(value.contains("unclosed"));
    assert!(value.contains("next"));
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "caf\u{e9}");
    assert!(!decoded.had_errors);
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_html(bytes, Some("text/html"));
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_never_fails_on_broken_bytes() {
    let bytes = b"ok \xc3\x28 rest";
    let decoded = decode_html(bytes, Some("text/html; charset=utf-8"));
    assert!(decoded.had_errors);
    assert!(decoded.html.contains("ok"));
    assert!(decoded.html.contains("rest"));
}

#[test]
fn pipeline_decode_then_extract_is_deterministic() {
    let bytes =
        br#"<html><head><title>X</title></head><body><p>A</p><p>B</p></body></html>"#;
    let decoded = decode_html(bytes, Some("text/html; charset=utf-8"));
    let first = ContentExtractor.extract(&decoded.html, ExtractionMode::Markdown);
    let second = ContentExtractor.extract(&decoded.html, ExtractionMode::Markdown);
    assert_eq!(first, second);
    let value = first.value.expect("content present");
    assert!(value.contains('A'));
    assert!(value.contains('B'));
}
