use std::collections::BTreeSet;

use email_extract::EmailExtractor;
use mailto_engine::{decode_html, parse_page, scrape_html};
use pretty_assertions::assert_eq;

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "café");
    assert!(!decoded.had_errors);
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_html(bytes, Some("text/html"));
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_is_lossy_on_malformed_bytes() {
    let bytes = b"info@shop.com \xff";
    let decoded = decode_html(bytes, Some("text/html; charset=\"utf-8\""));
    assert!(decoded.had_errors);
    assert!(decoded.html.starts_with("info@shop.com "));
    assert!(decoded.html.ends_with('\u{FFFD}'));
}

#[test]
fn page_collects_text_and_mailto_hrefs() {
    let html = r#"
    <html><head><title>Tienda</title></head>
    <body>
        <p>Escríbenos a <b>hola</b>@tienda.es</p>
        <a href="mailto:ventas@tienda.es">Ventas</a>
        <a href=" MAILTO:Info@Tienda.es?subject=Hola ">Info</a>
        <a href="/contacto">Contacto</a>
    </body></html>
    "#;
    let page = parse_page(html);

    assert!(page.visible_text.contains("hola@tienda.es"));
    assert!(page.visible_text.contains("Tienda"));
    assert_eq!(
        page.mailto_hrefs,
        vec![
            "mailto:ventas@tienda.es".to_string(),
            "MAILTO:Info@Tienda.es?subject=Hola".to_string(),
        ]
    );
}

#[test]
fn block_elements_do_not_glue_text_together() {
    let html = "<div>Call us</div><div>info@shop.com</div><p>about</p>";
    let page = parse_page(html);
    assert_eq!(page.visible_text, "Call us\ninfo@shop.com\nabout");
}

#[test]
fn page_keeps_inline_script_data() {
    let html = r#"<body><script>var shop = {"email":"support@brand.store\n"};</script></body>"#;
    let page = parse_page(html);
    assert!(page.visible_text.contains(r#""support@brand.store\n""#));
}

#[test]
fn scrape_html_merges_text_and_mailto_sources() {
    let html = r#"
    <body>
        <footer>
            <p>Contact: infocontact@example.com</p>
            <a href="mailto:contact@example.com">contact</a>
            <a href="mailto:not-an-email">broken</a>
            <p>Wholesale: wholesale@example.comabout</p>
        </footer>
    </body>
    "#;
    let emails = scrape_html(html, &EmailExtractor::default());
    let expected: BTreeSet<String> = ["contact@example.com", "wholesale@example.com"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(emails, expected);
}

#[test]
fn page_without_addresses_is_empty() {
    let html = "<html><body><h1>Welcome</h1><p>No contact here.</p></body></html>";
    assert!(scrape_html(html, &EmailExtractor::default()).is_empty());
}
