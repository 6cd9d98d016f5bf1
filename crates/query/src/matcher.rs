use crate::syntax::{AttrOp, Combinator, CompoundSelector, Selector};
use dom::{Document, NodeId};
use memchr::memmem;

/// Whether the element matches the full selector chain. Non-elements and
/// dead ids never match.
pub fn matches(doc: &Document, id: NodeId, selector: &Selector) -> bool {
    doc.is_element(id) && match_chain(doc, &selector.parts, &selector.combinators, id)
}

/// First match in document order, or `None` — selector mismatch is an
/// ordinary answer here, not a failure.
pub fn query_first(doc: &Document, selector: &Selector) -> Option<NodeId> {
    let mut elements = Vec::new();
    doc.collect_elements(doc.root(), &mut elements);
    elements.into_iter().find(|&id| matches(doc, id, selector))
}

/// All matches in document order.
pub fn query_all(doc: &Document, selector: &Selector) -> Vec<NodeId> {
    let mut elements = Vec::new();
    doc.collect_elements(doc.root(), &mut elements);
    elements.retain(|&id| matches(doc, id, selector));
    elements
}

// Right-to-left: the rightmost compound must match `id`, then the rest of
// the chain is matched against the ancestor line, backtracking across
// descendant combinators.
fn match_chain(
    doc: &Document,
    parts: &[CompoundSelector],
    combinators: &[Combinator],
    id: NodeId,
) -> bool {
    let Some((last, head_parts)) = parts.split_last() else {
        return true;
    };
    if !match_compound(doc, id, last) {
        return false;
    }
    let Some((combinator, head_combinators)) = combinators.split_last() else {
        return head_parts.is_empty();
    };
    match combinator {
        Combinator::Child => doc
            .parent(id)
            .is_some_and(|p| match_chain(doc, head_parts, head_combinators, p)),
        Combinator::Descendant => {
            let mut cur = doc.parent(id);
            while let Some(p) = cur {
                if match_chain(doc, head_parts, head_combinators, p) {
                    return true;
                }
                cur = doc.parent(p);
            }
            false
        }
    }
}

fn match_compound(doc: &Document, id: NodeId, compound: &CompoundSelector) -> bool {
    if let Some(element) = &compound.element
        && !doc
            .element_name(id)
            .is_some_and(|n| n.eq_ignore_ascii_case(element))
    {
        return false;
    }
    if let Some(want) = &compound.id
        && doc.attr(id, "id") != Some(want.as_str())
    {
        return false;
    }
    for class in &compound.classes {
        if !doc.has_class(id, class) {
            return false;
        }
    }
    for attr in &compound.attrs {
        let ok = match &attr.op {
            AttrOp::Exists => doc.has_attr(id, &attr.name),
            AttrOp::Equals(want) => doc.attr(id, &attr.name) == Some(want.as_str()),
            AttrOp::Contains(want) => {
                // An empty needle never matches, per the CSS attribute
                // substring rule.
                !want.is_empty()
                    && doc
                        .attr(id, &attr.name)
                        .is_some_and(|v| memmem::find(v.as_bytes(), want.as_bytes()).is_some())
            }
        };
        if !ok {
            return false;
        }
    }
    if compound.first_child {
        let Some(parent) = doc.parent(id) else {
            return false;
        };
        if doc.first_element_child(parent) != Some(id) {
            return false;
        }
    }
    true
}
