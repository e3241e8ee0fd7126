use std::collections::BTreeSet;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};

use email_extract::{
    extract_all, extract_emails, extract_emails_from_mailto, grammar_validate, is_valid_email, strict_validate,
    EmailExtractor, NoopSink, TldAllowList,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn noise_prefixed_address_is_dropped_for_the_shorter_one() {
    init_logging();
    let emails =
        extract_emails("Contact us at infocontact@example.com or contact@example.com for details");
    assert_eq!(emails, vec!["contact@example.com".to_string()]);
}

#[test]
fn percent_encoded_surroundings_are_decoded_away() {
    init_logging();
    let emails = extract_emails("Please reach%20us%20at%20sales@shop.io%20today.");
    assert_eq!(emails, vec!["sales@shop.io".to_string()]);
}

#[test]
fn glued_trailing_word_is_trimmed_from_domain() {
    init_logging();
    let emails = extract_emails("email: hello@example.comabout");
    assert_eq!(emails, vec!["hello@example.com".to_string()]);
}

#[test]
fn mailto_list_keeps_only_valid_entries() {
    init_logging();
    let emails = extract_emails_from_mailto(["mailto:info@store.biz", "mailto:not-an-email"]);
    assert_eq!(emails, vec!["info@store.biz".to_string()]);
}

#[test]
fn text_without_at_sign_yields_nothing() {
    init_logging();
    assert!(extract_emails("Free shipping on all orders over 50 EUR.").is_empty());
    assert!(extract_all("Free shipping on all orders.", Vec::<String>::new()).is_empty());
}

#[test]
fn domain_without_dot_is_rejected() {
    init_logging();
    assert!(extract_emails("foo@bar").is_empty());
    assert!(!is_valid_email("foo@bar"));
}

#[test]
fn lone_prefixed_address_is_kept() {
    init_logging();
    let emails = extract_emails("write to xinfo@example.com today");
    assert_eq!(emails, vec!["xinfo@example.com".to_string()]);
}

#[test]
fn containment_is_case_insensitive_and_keeps_casing() {
    init_logging();
    let emails = extract_emails("Sales: Team.Sales@Example.com and SALES@EXAMPLE.COM");
    assert_eq!(emails, vec!["SALES@EXAMPLE.COM".to_string()]);
}

#[test]
fn case_only_duplicates_keep_the_first_seen() {
    init_logging();
    let emails = extract_emails("Info@shop.com / info@shop.com");
    assert_eq!(emails, vec!["Info@shop.com".to_string()]);
}

#[test]
fn output_is_longest_first() {
    init_logging();
    let emails = extract_emails("a@shop.com, orders@boutique.es, hola@tienda.es");
    assert_eq!(
        emails,
        vec![
            "orders@boutique.es".to_string(),
            "hola@tienda.es".to_string(),
            "a@shop.com".to_string(),
        ]
    );
}

#[test]
fn overlong_local_part_fails_grammar_check() {
    init_logging();
    let address = format!("{}@example.com", "a".repeat(65));
    assert!(extract_emails(&address).is_empty());
    assert!(!is_valid_email(&address));
}

#[test]
fn extensions_outside_allow_list_are_rejected() {
    init_logging();
    assert!(extract_emails("ping ops@example.ru now").is_empty());

    let extractor =
        EmailExtractor::new(TldAllowList::default().extended(["ru"]), Arc::new(NoopSink));
    assert_eq!(
        extractor.extract_emails("ping ops@example.ru now"),
        vec!["ops@example.ru".to_string()]
    );
}

#[test]
fn mailto_strips_headers_and_splits_recipients() {
    init_logging();
    let emails = extract_emails_from_mailto([
        "MAILTO:Hello@Store.shop?subject=Hi%20there",
        "mailto:a@store.com,b@store.com",
        "mailto:%20info@store.biz",
        "https://store.com/contact",
        "mailto:a@store.com",
    ]);
    assert_eq!(
        emails,
        vec![
            "Hello@Store.shop".to_string(),
            "a@store.com".to_string(),
            "b@store.com".to_string(),
            "info@store.biz".to_string(),
        ]
    );
}

#[test]
fn extract_all_filters_containment_across_sources() {
    init_logging();
    let emails = extract_all("write to xinfo@shop.com", ["mailto:info@shop.com"]);
    assert_eq!(emails, set(&["info@shop.com"]));

    let emails = extract_all(
        "orders: orders@shop.com",
        ["mailto:help@shop.com", "mailto:orders@shop.com"],
    );
    assert_eq!(emails, set(&["help@shop.com", "orders@shop.com"]));
}

#[test]
fn extraction_is_idempotent_on_its_own_output() {
    init_logging();
    let page = "Mail hello@example.comabout or reach%20us%20at%20sales@shop.io%20today, \
                or Support@Brand.store.";
    let emails = extract_emails(page);
    assert_eq!(emails.len(), 3);
    for email in emails {
        assert_eq!(extract_emails(&email), vec![email.clone()]);
    }
}

#[test]
fn results_satisfy_format_allow_list_and_containment_rules() {
    init_logging();
    let page = r#"
        <footer>contact@shop.es | infocontact@shop.es | ventas@tienda.comprar
        | foo@bar | mail.me@site.xyz.html | bad@@host.com | ops@example.ru
        | "support@brand.store\n" | x@y.c</footer>
    "#;
    let tlds = TldAllowList::default();
    let emails = extract_emails(page);
    assert!(!emails.is_empty());

    for email in &emails {
        assert!(strict_validate(email.clone()).is_accepted(), "{email}");
        assert!(grammar_validate(email.clone()).is_accepted(), "{email}");
        assert!(tlds.allows_domain(email.rsplit('@').next().unwrap()), "{email}");
    }
    for a in &emails {
        for b in &emails {
            if a != b {
                assert!(!a.to_lowercase().contains(&b.to_lowercase()), "{a} contains {b}");
            }
        }
    }
}

#[test]
fn long_glued_tail_is_trimmed_in_bounded_time() {
    init_logging();
    let extractor = EmailExtractor::new(TldAllowList::default(), Arc::new(NoopSink));
    let glued = format!("write info@shop.com{} now", "about".repeat(20_000));
    let unknown = format!("write info@shop.x{}", "y".repeat(100_000));

    let started = Instant::now();
    assert_eq!(extractor.extract_emails(&glued), vec!["info@shop.com".to_string()]);
    assert!(extractor.extract_emails(&unknown).is_empty());
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}
