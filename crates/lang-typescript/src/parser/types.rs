//! Type annotation canonicalization.
//!
//! Every type-syntax node resolves to exactly one opaque string. Composite
//! shapes are rebuilt with fixed separators so that two semantically
//! identical spellings (`Array< string >` vs `Array<string>`) compare equal
//! downstream; the fallback strips whitespace for the same reason.

use archscope_core::util::node_text;
use tree_sitter::Node;

pub fn resolve_type(node: Node, source: &str) -> String {
    match node.kind() {
        "type_annotation" | "parenthesized_type" => node
            .named_child(0)
            .map(|inner| resolve_type(inner, source))
            .unwrap_or_default(),
        "array_type" => {
            let element = node
                .named_child(0)
                .map(|e| resolve_type(e, source))
                .unwrap_or_default();
            format!("{}[]", element)
        }
        "generic_type" => {
            let base = node
                .child_by_field_name("name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_default();
            let args = node
                .child_by_field_name("type_arguments")
                .map(|args_node| {
                    let mut cursor = args_node.walk();
                    args_node
                        .named_children(&mut cursor)
                        .map(|a| resolve_type(a, source))
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .unwrap_or_default();
            format!("{}<{}>", base, args)
        }
        "union_type" => join_operands(node, source, "|"),
        "intersection_type" => join_operands(node, source, "&"),
        "tuple_type" => {
            let mut cursor = node.walk();
            let elements = node
                .named_children(&mut cursor)
                .map(|e| resolve_type(e, source))
                .collect::<Vec<_>>()
                .join(",");
            format!("[{}]", elements)
        }
        "function_type" => {
            let mut params = Vec::new();
            let mut return_type = String::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "formal_parameters" => {
                        let mut inner = child.walk();
                        for param in child.named_children(&mut inner) {
                            params.push(parameter_type(param, source));
                        }
                    }
                    "type_parameters" => {}
                    _ => return_type = resolve_type(child, source),
                }
            }
            format!("({})=>{}", params.join(","), return_type)
        }
        "predefined_type" | "type_identifier" | "nested_type_identifier" | "this_type"
        | "literal_type" => node_text(&node, source).to_string(),
        _ => compact(node_text(&node, source)),
    }
}

/// Resolve the declared type of one formal parameter, falling back to the
/// pattern text when no annotation exists.
fn parameter_type(param: Node, source: &str) -> String {
    if let Some(ty) = param.child_by_field_name("type") {
        return resolve_type(ty, source);
    }
    compact(node_text(&param, source))
}

fn join_operands(node: Node, source: &str, separator: &str) -> String {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .map(|operand| resolve_type(operand, source))
        .collect::<Vec<_>>()
        .join(separator)
}

fn compact(text: &str) -> String {
    text.split_whitespace().collect()
}
