//! Fluent call-chain decomposition.
//!
//! `obj.a().b().c()` parses as calls nested right-to-left; this module
//! flattens them back into source order so every invocation link becomes
//! one call record, and exposes the root object expression the whole chain
//! hangs off.

use archscope_core::util::node_text;
use tree_sitter::Node;

/// Flattens a (possibly chained) `call_expression` into its root qualifier
/// and the call links in strict left-to-right order.
///
/// The root qualifier is the non-call expression the first invocation is
/// applied to (`p` in `p.setName(..).setAge(..)`), or `None` for a bare
/// call like `print(x)`.
pub(crate) fn flatten_chain<'t>(call: Node<'t>) -> (Option<Node<'t>>, Vec<Node<'t>>) {
    let mut links = Vec::new();
    let mut root = None;
    let mut current = call;
    loop {
        links.push(current);
        let Some(callee) = current.child_by_field_name("function") else {
            break;
        };
        if callee.kind() != "member_expression" {
            // Bare call: the callee is the invoked identifier itself.
            break;
        }
        match callee.child_by_field_name("object") {
            Some(object) if object.kind() == "call_expression" => current = object,
            Some(object) => {
                root = Some(object);
                break;
            }
            None => break,
        }
    }
    links.reverse();
    (root, links)
}

/// The identifier immediately to the left of a link's argument list,
/// stripped of any dotted-path prefix.
pub(crate) fn link_name(call: &Node, source: &str) -> String {
    match call.child_by_field_name("function") {
        Some(callee) if callee.kind() == "member_expression" => callee
            .child_by_field_name("property")
            .map(|p| node_text(&p, source).to_string())
            .unwrap_or_default(),
        Some(callee) => {
            let text = node_text(&callee, source);
            text.rsplit('.').next().unwrap_or(text).to_string()
        }
        None => String::new(),
    }
}

/// Low-fidelity argument capture: the first argument's source text, or
/// `None` for empty argument lists and template-string invocations.
pub(crate) fn first_argument(call: &Node, source: &str) -> Option<String> {
    let args = call.child_by_field_name("arguments")?;
    if args.kind() != "arguments" {
        return None;
    }
    let mut cursor = args.walk();
    let first = args
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    Some(node_text(&first, source).to_string())
}
