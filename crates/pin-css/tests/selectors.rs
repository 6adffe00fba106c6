//! End-to-end selector tests over a hand-built tree.

use pin_css::{matches, parse, query};
use pin_dom::{DomTree, NodeId};

/// <body>
///   <div id="top" class="box outer" data-role="main">
///     <p class="note">one</p>
///     <p class="note important" lang="en-US">two</p>
///     <span></span>
///   </div>
///   <div class="box">
///     <p>three</p>
///   </div>
/// </body>
struct Fixture {
    tree: DomTree,
    body: NodeId,
    top: NodeId,
    note1: NodeId,
    note2: NodeId,
    span: NodeId,
    second_box: NodeId,
    p3: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = DomTree::new();
    let body = tree.create_element("body");
    tree.append_child(tree.root(), body).unwrap();

    let top = tree.create_element("div");
    tree.element_mut(top)
        .unwrap()
        .set_attr("class", "box outer");
    tree.element_mut(top).unwrap().set_attr("id", "top");
    tree.element_mut(top).unwrap().set_attr("data-role", "main");
    tree.append_child(body, top).unwrap();

    let note1 = tree.create_element("p");
    tree.element_mut(note1).unwrap().set_attr("class", "note");
    tree.append_child(top, note1).unwrap();
    let text1 = tree.create_text("one");
    tree.append_child(note1, text1).unwrap();

    let note2 = tree.create_element("p");
    tree.element_mut(note2)
        .unwrap()
        .set_attr("class", "note important");
    tree.element_mut(note2).unwrap().set_attr("lang", "en-US");
    tree.append_child(top, note2).unwrap();
    let text2 = tree.create_text("two");
    tree.append_child(note2, text2).unwrap();

    let span = tree.create_element("span");
    tree.append_child(top, span).unwrap();

    let second_box = tree.create_element("div");
    tree.element_mut(second_box).unwrap().set_attr("class", "box");
    tree.append_child(body, second_box).unwrap();

    let p3 = tree.create_element("p");
    tree.append_child(second_box, p3).unwrap();
    let text3 = tree.create_text("three");
    tree.append_child(p3, text3).unwrap();

    Fixture {
        tree,
        body,
        top,
        note1,
        note2,
        span,
        second_box,
        p3,
    }
}

fn run(f: &Fixture, selector: &str) -> Vec<NodeId> {
    let list = parse(selector).unwrap();
    query(&f.tree, f.tree.root(), &list)
}

#[test]
fn test_tag_class_id() {
    let f = fixture();
    assert_eq!(run(&f, "div"), vec![f.top, f.second_box]);
    assert_eq!(run(&f, ".note"), vec![f.note1, f.note2]);
    assert_eq!(run(&f, "#top"), vec![f.top]);
    assert_eq!(run(&f, "p.note.important"), vec![f.note2]);
    assert_eq!(run(&f, "*").len(), 7);
}

#[test]
fn test_combinators() {
    let f = fixture();
    assert_eq!(run(&f, "div p"), vec![f.note1, f.note2, f.p3]);
    assert_eq!(run(&f, "#top > p"), vec![f.note1, f.note2]);
    assert_eq!(run(&f, ".note + p"), vec![f.note2]);
    assert_eq!(run(&f, "p + span"), vec![f.span]);
    assert_eq!(run(&f, ".note ~ span"), vec![f.span]);
    assert_eq!(run(&f, "body > div > p"), vec![f.note1, f.note2, f.p3]);
}

#[test]
fn test_attribute_selectors() {
    let f = fixture();
    assert_eq!(run(&f, "[data-role]"), vec![f.top]);
    assert_eq!(run(&f, "[data-role='main']"), vec![f.top]);
    assert_eq!(run(&f, "[class~='important']"), vec![f.note2]);
    assert_eq!(run(&f, "[lang|='en']"), vec![f.note2]);
    assert_eq!(run(&f, "[data-role^='ma'][data-role$='in']"), vec![f.top]);
    assert_eq!(run(&f, "[class*='out']"), vec![f.top]);
    assert_eq!(run(&f, "[data-role='MAIN' i]"), vec![f.top]);
}

#[test]
fn test_structural_pseudos() {
    let f = fixture();
    assert_eq!(run(&f, "p:first-child"), vec![f.note1, f.p3]);
    assert_eq!(run(&f, "#top :last-child"), vec![f.span]);
    assert_eq!(run(&f, "div p:only-child"), vec![f.p3]);
    assert_eq!(run(&f, "#top :nth-child(2)"), vec![f.note2]);
    assert_eq!(run(&f, "#top :nth-child(odd)"), vec![f.note1, f.span]);
    assert_eq!(run(&f, "#top :nth-last-child(1)"), vec![f.span]);
    assert_eq!(run(&f, "span:empty"), vec![f.span]);
}

#[test]
fn test_not_and_lists() {
    let f = fixture();
    assert_eq!(run(&f, "p:not(.note)"), vec![f.p3]);
    assert_eq!(run(&f, "div :not(p)"), vec![f.span]);
    assert_eq!(run(&f, "span, #top"), vec![f.top, f.span]);
}

#[test]
fn test_matches_entry_point() {
    let f = fixture();
    let list = parse("div.box > p.note").unwrap();
    assert!(matches(&f.tree, f.note1, &list));
    assert!(!matches(&f.tree, f.p3, &list));
    assert!(!matches(&f.tree, f.body, &list));
}

#[test]
fn test_parse_errors() {
    assert!(parse("").is_err());
    assert!(parse("div >").is_err());
    assert!(parse("[unclosed").is_err());
    assert!(parse(":hover").is_err());
    assert!(parse(":nth-child(x)").is_err());
}
