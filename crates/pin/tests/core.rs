//! Core surface: the query dispatch, fragments and the functional
//! collection helpers. Everything here works without default features.

use pin::{uniq, Page};

const PAGE: &str = r#"<html><body>
    <nav id="menu">
        <a class="link" href="/">Home</a>
        <a class="link ext" href="https://example.com">Out</a>
    </nav>
    <main>
        <p class="intro">Hello</p>
        <p>World</p>
    </main>
</body></html>"#;

#[test]
fn test_query_dispatch() {
    let page = Page::from_html(PAGE);
    assert_eq!(page.query("a.link").len(), 2);
    assert_eq!(page.query("#menu .ext").len(), 1);
    assert_eq!(page.query("main > p").len(), 2);
    assert!(page.query("").is_empty());
    assert!(page.query(".nope").is_empty());
}

#[test]
fn test_query_in_context() {
    let page = Page::from_html(PAGE);
    let menu = page.query("#menu");
    assert_eq!(page.query_in("a", &menu).len(), 2);
    assert_eq!(page.query_in("p", &menu).len(), 0);
}

#[test]
fn test_fragment_roots_are_detached() {
    let page = Page::from_html(PAGE);
    let frag = page.query("<li>a</li><li>b</li>");
    assert_eq!(frag.len(), 2);
    let state_check = page.query("li");
    assert!(state_check.is_empty(), "fragments must not join the document");
}

#[test]
fn test_fragment_table_parts() {
    let page = Page::new();
    assert_eq!(page.query("<tr><td>x</td></tr>").len(), 1);
    assert_eq!(page.query("<td>x</td>").len(), 1);
    assert_eq!(page.query("<tbody></tbody>").len(), 1);
}

#[test]
fn test_each_visits_in_order() {
    let page = Page::from_html(PAGE);
    let mut seen = Vec::new();
    page.query("p").each(|i, _| seen.push(i));
    assert_eq!(seen, vec![0, 1]);
}

#[test]
fn test_map_filters_and_projects() {
    let page = Page::from_html(PAGE);
    let links = page.query("a");
    let first_only = links.map(|i, node| if i == 0 { Some(node) } else { None });
    assert_eq!(first_only.len(), 1);
    let none = links.map(|_, _| None);
    assert!(none.is_empty());
}

#[test]
fn test_find_dedupes() {
    let page = Page::from_html(PAGE);
    // body and main both contain the paragraphs.
    let roots = page.query("body, main");
    let found = roots.find("p");
    assert_eq!(found.len(), 2);
}

#[test]
fn test_uniq_preserves_first_occurrence() {
    let page = Page::from_html(PAGE);
    let a = page.query("a").nodes().to_vec();
    let mut doubled = a.clone();
    doubled.extend(a.iter().copied());
    assert_eq!(uniq(doubled), a);
}
