use linkify_engine::{DomExtractor, Extractor, STRIPPED_TAGS};
use pretty_assertions::assert_eq;

#[test]
fn stripped_tag_content_never_reaches_the_output() {
    let html = r#"
    <html><head><title>Sample</title><style>.s-sentinel{color:red}</style></head>
    <body>
        <header>h-sentinel</header>
        <nav>n-sentinel</nav>
        <p>visible text</p>
        <aside>a-sentinel</aside>
        <script>var jsSentinel = 1;</script>
        <footer>f-sentinel</footer>
    </body></html>
    "#;

    let page = DomExtractor.extract(html).expect("extract ok");
    assert!(page.body.contains("visible text"));
    for sentinel in [
        "h-sentinel",
        "n-sentinel",
        "a-sentinel",
        "f-sentinel",
        "jsSentinel",
        "s-sentinel",
    ] {
        assert!(
            !page.body.contains(sentinel),
            "stripped content {sentinel:?} leaked into {:?}",
            page.body
        );
    }
}

#[test]
fn nested_children_of_stripped_tags_are_dropped_too() {
    let html = "<body><nav><ul><li>deep-sentinel</li></ul></nav><p>kept</p></body>";
    let page = DomExtractor.extract(html).expect("extract ok");
    assert_eq!(page.body, "kept");
}

#[test]
fn title_is_trimmed_and_empty_when_absent() {
    let page = DomExtractor
        .extract("<html><head><title>  Spaced Out  </title></head><body>x</body></html>")
        .expect("extract ok");
    assert_eq!(page.title, "Spaced Out");

    let page = DomExtractor
        .extract("<html><body>no title here</body></html>")
        .expect("extract ok");
    assert_eq!(page.title, "");
}

#[test]
fn body_text_is_whitespace_collapsed() {
    let html = "<body><p>Hi \n\t there</p>\n<p>again</p></body>";
    let page = DomExtractor.extract(html).expect("extract ok");
    assert_eq!(page.body, "Hi there again");
}

#[test]
fn malformed_html_is_recovered_not_rejected() {
    // Unclosed tags, no doctype, stray close tag.
    let html = "<title>Broken</title><body><p>one<p>two</div>";
    let page = DomExtractor.extract(html).expect("lenient parse");
    assert_eq!(page.title, "Broken");
    assert!(page.body.contains("one"));
    assert!(page.body.contains("two"));
}

#[test]
fn extraction_is_idempotent() {
    let html = r#"<html><head><title>T</title></head>
        <body><p>alpha</p><script>beta()</script><p>gamma</p></body></html>"#;
    let first = DomExtractor.extract(html).expect("extract ok");
    let second = DomExtractor.extract(html).expect("extract ok");
    assert_eq!(first, second);
}

#[test]
fn stripped_tag_list_matches_contract() {
    assert_eq!(
        STRIPPED_TAGS,
        ["script", "style", "nav", "footer", "header", "aside"]
    );
}
