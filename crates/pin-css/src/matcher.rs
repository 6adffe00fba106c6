//! Selector matching against the DOM tree.
//!
//! Complex selectors are matched right to left: the rightmost compound is
//! tested against the candidate element, then the chain walks ancestors or
//! siblings according to the combinator between the parts.

use pin_dom::{DomTree, Node, NodeId};

use crate::selector::{
    Combinator, Compound, PseudoClass, SelectorList, SelectorPart,
};

/// Check whether a node matches any selector in the list
pub fn matches(tree: &DomTree, node: NodeId, list: &SelectorList) -> bool {
    list.selectors
        .iter()
        .any(|complex| match_complex(tree, node, &complex.parts))
}

/// Collect the descendant elements of `root` matching the list, in
/// document order. `root` itself is never included.
pub fn query(tree: &DomTree, root: NodeId, list: &SelectorList) -> Vec<NodeId> {
    tree.descendant_elements(root)
        .filter(|&n| matches(tree, n, list))
        .collect()
}

fn match_complex(tree: &DomTree, node: NodeId, parts: &[SelectorPart]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !match_compound(tree, node, &last.compound) {
        return false;
    }
    match last.combinator {
        None => true,
        Some(Combinator::Child) => tree
            .parent(node)
            .is_some_and(|p| match_complex(tree, p, rest)),
        Some(Combinator::Descendant) => tree
            .ancestors(node)
            .any(|a| match_complex(tree, a, rest)),
        Some(Combinator::AdjacentSibling) => prev_element(tree, node)
            .is_some_and(|p| match_complex(tree, p, rest)),
        Some(Combinator::GeneralSibling) => {
            let mut current = node;
            while let Some(prev) = prev_element(tree, current) {
                if match_complex(tree, prev, rest) {
                    return true;
                }
                current = prev;
            }
            false
        }
    }
}

fn prev_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let mut current = node;
    while let Some(prev) = tree.prev_sibling(current) {
        if tree.get(prev).is_some_and(Node::is_element) {
            return Some(prev);
        }
        current = prev;
    }
    None
}

fn match_compound(tree: &DomTree, node: NodeId, compound: &Compound) -> bool {
    let Some(elem) = tree.element(node) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !elem.tag.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if elem.id.as_deref() != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| elem.has_class(c)) {
        return false;
    }
    if !compound
        .attrs
        .iter()
        .all(|a| a.matches(elem.attr(&a.name)))
    {
        return false;
    }
    compound
        .pseudos
        .iter()
        .all(|p| match_pseudo(tree, node, p))
}

fn match_pseudo(tree: &DomTree, node: NodeId, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::FirstChild => tree.element_index(node) == Some(0),
        PseudoClass::LastChild => match (tree.element_index(node), sibling_count(tree, node)) {
            (Some(idx), Some(count)) => idx + 1 == count,
            _ => false,
        },
        PseudoClass::OnlyChild => sibling_count(tree, node) == Some(1),
        PseudoClass::NthChild(nth) => tree
            .element_index(node)
            .is_some_and(|idx| nth.matches(idx as i32 + 1)),
        PseudoClass::NthLastChild(nth) => {
            match (tree.element_index(node), sibling_count(tree, node)) {
                (Some(idx), Some(count)) => nth.matches((count - idx) as i32),
                _ => false,
            }
        }
        PseudoClass::Empty => tree.children(node).next().is_none(),
        PseudoClass::Root => tree.parent(node) == Some(tree.root()),
        PseudoClass::Not(list) => !matches(tree, node, list),
    }
}

fn sibling_count(tree: &DomTree, node: NodeId) -> Option<usize> {
    let parent = tree.parent(node)?;
    Some(tree.child_elements(parent).count())
}
