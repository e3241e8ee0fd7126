/// Normalizes a raw candidate scraped from page text or an href.
///
/// Percent-escapes are decoded (malformed escapes are kept verbatim, invalid
/// UTF-8 becomes U+FFFD), surrounding whitespace is trimmed, and the literal
/// two-character sequences `\n`, `\r` and `\t` left behind by escaped
/// script data are removed. Real control characters are untouched.
pub fn clean(raw: &str) -> String {
    let decoded = urlencoding::decode_binary(raw.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);
    decoded
        .trim()
        .replace("\\n", "")
        .replace("\\r", "")
        .replace("\\t", "")
}
