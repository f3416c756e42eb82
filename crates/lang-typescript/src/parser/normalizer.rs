//! The TypeScript normalizer: a depth-first listener over the concrete
//! syntax tree that builds the unified code model.

use super::chain::{first_argument, flatten_chain, link_name};
use super::kind::NodeKind;
use super::types::resolve_type;
use archscope_api::{Call, Container, DataStruct, DataStructKind, Field, Function, Import, Property};
use archscope_core::error::Result;
use archscope_core::normalize::{FileContext, FunctionHome, TreeVisitor};
use archscope_core::util::{node_text, range_from_ts};
use tree_sitter::Node;

/// Modifier keywords captured in declaration order on members.
const MODIFIER_KINDS: &[&str] = &[
    "accessibility_modifier",
    "override_modifier",
    "static",
    "abstract",
    "async",
    "readonly",
    "declare",
    "get",
    "set",
];

pub struct TypeScriptNormalizer<'s> {
    source: &'s str,
    ctx: FileContext,
}

impl<'s> TypeScriptNormalizer<'s> {
    pub fn new(source: &'s str, file_path: &str) -> Self {
        Self {
            source,
            ctx: FileContext::new(file_path),
        }
    }

    /// Assemble the container. Fails when the traversal left containers
    /// open (mismatched enter/exit pairs from the grammar front end).
    pub fn finish(&self) -> Result<Container> {
        self.ctx.finish()
    }

    fn text(&self, node: &Node) -> &'s str {
        node_text(node, self.source)
    }

    fn field_text(&self, node: &Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|n| self.text(&n).to_string())
    }

    // --- declarations -----------------------------------------------------

    fn enter_namespace(&mut self, node: &Node) {
        if let Some(name) = self.field_text(node, "name") {
            self.ctx.set_namespace(name);
        }
    }

    fn enter_class(&mut self, node: &Node) {
        let name = self.field_text(node, "name").unwrap_or_default();
        let mut data_struct =
            DataStruct::new(name, DataStructKind::Class, self.ctx.namespace());

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "class_heritage" {
                continue;
            }
            let mut clauses = child.walk();
            for clause in child.named_children(&mut clauses) {
                match clause.kind() {
                    "extends_clause" => data_struct.extends = self.extends_reference(&clause),
                    "implements_clause" => {
                        data_struct.implements = self.implemented_references(&clause)
                    }
                    _ => {}
                }
            }
        }

        self.ctx.open_struct(data_struct);
    }

    fn enter_interface(&mut self, node: &Node) {
        let name = self.field_text(node, "name").unwrap_or_default();
        let mut data_struct =
            DataStruct::new(name, DataStructKind::Interface, self.ctx.namespace());

        // An interface extends-list fills the single inheritance slot with
        // its first reference only.
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if matches!(child.kind(), "extends_type_clause" | "extends_clause") {
                data_struct.extends = self.implemented_references(&child).into_iter().next();
            }
        }

        self.ctx.open_struct(data_struct);
    }

    /// First extends-reference of a class heritage clause; an unreadable
    /// reference leaves the slot empty.
    fn extends_reference(&self, clause: &Node) -> Option<String> {
        let value = clause
            .child_by_field_name("value")
            .or_else(|| clause.named_child(0))?;
        let text = self.text(&value);
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Every interface reference of an implements/extends clause, in source
    /// order. Generic references keep only the base name.
    fn implemented_references(&self, clause: &Node) -> Vec<String> {
        let mut references = Vec::new();
        let mut cursor = clause.walk();
        for child in clause.named_children(&mut cursor) {
            let name = match child.kind() {
                "generic_type" => self
                    .field_text(&child, "name")
                    .unwrap_or_else(|| self.text(&child).to_string()),
                "type_identifier" | "nested_type_identifier" | "identifier" => {
                    self.text(&child).to_string()
                }
                _ => continue,
            };
            references.push(name);
        }
        references
    }

    // --- members ----------------------------------------------------------

    fn enter_method(&mut self, node: &Node) {
        // method_definition also shows up in object literals; only class
        // bodies produce members, the rest is walked and dropped.
        let in_class_body = node.parent().is_some_and(|p| p.kind() == "class_body");
        if !in_class_body {
            self.ctx.open_discard_function();
            return;
        }

        let name = self.field_text(node, "name").unwrap_or_default();
        let mut function = self.build_function(node, &name);
        if name == "constructor" {
            function.is_constructor = true;
        }
        self.ctx.open_function(function, FunctionHome::Member);
    }

    /// Body-less signature members: interface method signatures and
    /// abstract method signatures. Signatures that appear in other
    /// object-type positions (type aliases, inline annotations) are not
    /// members of anything and are skipped.
    fn enter_method_signature(&mut self, node: &Node) {
        let in_member_position = in_interface_body(node)
            || node.parent().is_some_and(|p| p.kind() == "class_body");
        if !in_member_position {
            return;
        }
        let name = self.field_text(node, "name").unwrap_or_default();
        let function = self.build_function(node, &name);
        self.ctx.add_member_function(function);
    }

    fn enter_field(&mut self, node: &Node) {
        let Some(name) = self.field_text(node, "name") else {
            tracing::debug!(file = %self.ctx.file_path(), "field member without a name, skipped");
            return;
        };
        let field = Field {
            name,
            type_name: node
                .child_by_field_name("type")
                .map(|t| resolve_type(t, self.source)),
            modifiers: self.collect_modifiers(node),
        };
        self.ctx.add_field(field);
    }

    /// Interface property: a call-signature annotation makes it a function,
    /// a plain annotation a field, anything else is skipped.
    fn enter_property_signature(&mut self, node: &Node) {
        if !in_interface_body(node) {
            return;
        }
        let Some(name) = self.field_text(node, "name") else {
            tracing::debug!(file = %self.ctx.file_path(), "property signature without a name, skipped");
            return;
        };

        let annotation = node.child_by_field_name("type");
        let signature_type = annotation.and_then(|a| a.named_child(0));

        if let Some(call_signature) = signature_type.filter(|t| t.kind() == "function_type") {
            let function = self.function_from_call_signature(&name, &call_signature);
            self.ctx.add_member_function(function);
        } else if let Some(annotation) = annotation {
            let field = Field {
                name,
                type_name: Some(resolve_type(annotation, self.source)),
                modifiers: self.collect_modifiers(node),
            };
            self.ctx.add_field(field);
        } else {
            tracing::debug!(
                file = %self.ctx.file_path(),
                member = %name,
                "interface member without annotation, skipped"
            );
        }
    }

    /// Build a function from a method-typed property: parameters from the
    /// signature's declared argument list, one return entry from its
    /// declared return type.
    fn function_from_call_signature(&self, name: &str, signature: &Node) -> Function {
        let mut function = Function::named(name);
        let mut cursor = signature.walk();
        for child in signature.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameters" => function.parameters = self.build_parameters(&child),
                "type_parameters" => {}
                _ => function
                    .returns
                    .push(Property::new("", resolve_type(child, self.source))),
            }
        }
        function
    }

    // --- functions --------------------------------------------------------

    fn enter_function_declaration(&mut self, node: &Node) {
        let Some(name) = self.field_text(node, "name") else {
            self.ctx.open_discard_function();
            return;
        };
        let function = self.build_function(node, &name);
        self.ctx.open_function(function, FunctionHome::Module);
    }

    /// Function and arrow expressions: named, in priority order, by an
    /// explicit function identifier, then by the identifier on the left of
    /// the enclosing declarator/assignment. Nameless ones are dropped.
    fn enter_function_expression(&mut self, node: &Node) {
        let Some(name) = self.expression_name(node) else {
            tracing::debug!(file = %self.ctx.file_path(), "unnamed function expression dropped");
            self.ctx.open_discard_function();
            return;
        };

        let mut function = self.build_function(node, &name);
        if function.parameters.is_empty() {
            // Single-identifier arrow parameter: `x => ..`
            if let Some(param) = node.child_by_field_name("parameter") {
                function
                    .parameters
                    .push(Property::new(self.text(&param), "any"));
            }
        }
        self.ctx.open_function(function, FunctionHome::Module);
    }

    fn expression_name(&self, node: &Node) -> Option<String> {
        if let Some(own) = self.field_text(node, "name") {
            return Some(own);
        }
        let parent = node.parent()?;
        let assigned = match parent.kind() {
            "variable_declarator" => parent.child_by_field_name("name"),
            "assignment_expression" => parent.child_by_field_name("left"),
            _ => None,
        }?;
        if assigned.kind() == "identifier" {
            Some(self.text(&assigned).to_string())
        } else {
            None
        }
    }

    fn build_function(&self, node: &Node, name: &str) -> Function {
        let mut function = Function::named(name);
        function.modifiers = self.collect_modifiers(node);
        if let Some(params) = node.child_by_field_name("parameters") {
            function.parameters = self.build_parameters(&params);
        }
        if let Some(return_type) = node.child_by_field_name("return_type") {
            function
                .returns
                .push(Property::new("", resolve_type(return_type, self.source)));
        }
        function.range = Some(range_from_ts(node.range()));
        function
    }

    fn build_parameters(&self, params: &Node) -> Vec<Property> {
        let mut result = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            match child.kind() {
                "required_parameter" | "optional_parameter" => {
                    let name = child
                        .child_by_field_name("pattern")
                        .map(|p| self.text(&p).to_string())
                        .unwrap_or_default();
                    let type_name = child
                        .child_by_field_name("type")
                        .map(|t| resolve_type(t, self.source))
                        .unwrap_or_default();
                    result.push(Property::new(name, type_name));
                }
                // Plain identifier parameters (untyped grammar fallback).
                "identifier" => result.push(Property::new(self.text(&child), "")),
                _ => {}
            }
        }
        result
    }

    fn collect_modifiers(&self, node: &Node) -> Vec<String> {
        let mut modifiers = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if MODIFIER_KINDS.contains(&child.kind()) {
                modifiers.push(self.text(&child).to_string());
            }
        }
        modifiers
    }

    // --- statements -------------------------------------------------------

    /// Bind `name = new T(..)` declarators for receiver resolution; every
    /// other named declarator is recorded with an unknown type.
    fn enter_declarator(&mut self, node: &Node) {
        if !self.ctx.in_function() {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        if name_node.kind() != "identifier" {
            // Destructuring patterns stay unbound.
            return;
        }
        let name = self.text(&name_node).to_string();
        let constructed = node
            .child_by_field_name("value")
            .filter(|value| value.kind() == "new_expression")
            .and_then(|value| value.child_by_field_name("constructor"))
            .filter(|ctor| ctor.kind() == "identifier")
            .map(|ctor| self.text(&ctor).to_string());
        self.ctx.declare_local(&name, constructed.as_deref());
    }

    fn enter_statement(&mut self, node: &Node) {
        if let Some(expression) = node.named_child(0) {
            self.handle_expression(expression);
        }
    }

    fn handle_expression(&mut self, expression: Node) {
        match expression.kind() {
            "sequence_expression" => {
                let mut cursor = expression.walk();
                let children: Vec<Node> = expression.named_children(&mut cursor).collect();
                for child in children {
                    self.handle_expression(child);
                }
            }
            "await_expression" | "parenthesized_expression" => {
                if let Some(inner) = expression.named_child(0) {
                    self.handle_expression(inner);
                }
            }
            "call_expression" => self.handle_call_chain(expression),
            other => {
                tracing::debug!(
                    file = %self.ctx.file_path(),
                    kind = other,
                    "unrecognized expression statement, skipped"
                );
            }
        }
    }

    /// Emit one call record per invocation link, leftmost first. Every link
    /// shares the receiver resolved from the chain's root qualifier.
    fn handle_call_chain(&mut self, call: Node) {
        let (root, links) = flatten_chain(call);
        let qualifier = root.map(|r| self.text(&r)).unwrap_or_default();
        let node_name = self.ctx.resolve_receiver(qualifier);

        for link in links {
            let mut record = Call {
                function_name: link_name(&link, self.source),
                node_name: node_name.clone(),
                arguments: Vec::new(),
            };
            if let Some(argument) = first_argument(&link, self.source) {
                record.arguments.push(Property::new(argument, ""));
            }
            self.ctx.record_call(record);
        }
    }

    // --- imports ----------------------------------------------------------

    fn enter_import(&mut self, node: &Node) {
        let mut import = Import::default();
        if let Some(source) = node.child_by_field_name("source") {
            import.source = strip_quotes(self.text(&source));
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_clause" => self.collect_clause_names(&child, &mut import.usage_names),
                "import_require_clause" => {
                    // `import fs = require("fs")`
                    let mut inner = child.walk();
                    for grandchild in child.named_children(&mut inner) {
                        match grandchild.kind() {
                            "identifier" => {
                                import.usage_names.push(self.text(&grandchild).to_string())
                            }
                            "string" if import.source.is_empty() => {
                                import.source = strip_quotes(self.text(&grandchild));
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        self.ctx.add_import(import);
    }

    fn collect_clause_names(&self, clause: &Node, usage_names: &mut Vec<String>) {
        let mut cursor = clause.walk();
        for child in clause.named_children(&mut cursor) {
            match child.kind() {
                // Default import.
                "identifier" => usage_names.push(self.text(&child).to_string()),
                // `* as ns`
                "namespace_import" => {
                    let mut inner = child.walk();
                    for grandchild in child.named_children(&mut inner) {
                        if grandchild.kind() == "identifier" {
                            usage_names.push(self.text(&grandchild).to_string());
                        }
                    }
                }
                // `{ a, b as c }` — the bound name is the alias when present.
                "named_imports" => {
                    let mut inner = child.walk();
                    for specifier in child.named_children(&mut inner) {
                        if specifier.kind() != "import_specifier" {
                            continue;
                        }
                        let bound = specifier
                            .child_by_field_name("alias")
                            .or_else(|| specifier.child_by_field_name("name"));
                        if let Some(bound) = bound {
                            usage_names.push(self.text(&bound).to_string());
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl TreeVisitor for TypeScriptNormalizer<'_> {
    fn enter_node(&mut self, node: &Node) -> Result<()> {
        match NodeKind::of(node.kind()) {
            NodeKind::InternalModule => self.enter_namespace(node),
            NodeKind::ClassDeclaration => self.enter_class(node),
            NodeKind::InterfaceDeclaration => self.enter_interface(node),
            NodeKind::MethodDefinition => self.enter_method(node),
            NodeKind::MethodSignature | NodeKind::AbstractMethodSignature => {
                self.enter_method_signature(node)
            }
            NodeKind::PublicFieldDefinition => self.enter_field(node),
            NodeKind::PropertySignature => self.enter_property_signature(node),
            NodeKind::FunctionDeclaration => self.enter_function_declaration(node),
            NodeKind::FunctionExpression | NodeKind::ArrowFunction => {
                self.enter_function_expression(node)
            }
            NodeKind::VariableDeclarator => self.enter_declarator(node),
            NodeKind::ExpressionStatement => self.enter_statement(node),
            NodeKind::ImportStatement => self.enter_import(node),
            NodeKind::Unrecognized => {}
        }
        Ok(())
    }

    fn exit_node(&mut self, node: &Node) -> Result<()> {
        match NodeKind::of(node.kind()) {
            NodeKind::InternalModule => self.ctx.clear_namespace(),
            NodeKind::ClassDeclaration | NodeKind::InterfaceDeclaration => {
                self.ctx.close_struct()?
            }
            NodeKind::MethodDefinition
            | NodeKind::FunctionDeclaration
            | NodeKind::FunctionExpression
            | NodeKind::ArrowFunction => self.ctx.close_function(),
            _ => {}
        }
        Ok(())
    }
}

fn in_interface_body(node: &Node) -> bool {
    node.parent()
        .is_some_and(|p| matches!(p.kind(), "interface_body" | "object_type"))
        && node
            .parent()
            .and_then(|p| p.parent())
            .is_some_and(|gp| gp.kind() == "interface_declaration")
}

fn strip_quotes(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}
