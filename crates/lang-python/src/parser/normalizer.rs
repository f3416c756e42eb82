//! The Python normalizer: same normalization contract as the TypeScript
//! front end, re-implemented against the Python grammar.

use super::chain::{first_argument, flatten_chain, link_name};
use super::kind::NodeKind;
use archscope_api::{
    Call, Container, DataStruct, DataStructKind, Field, Function, Import, Property,
};
use archscope_core::error::Result;
use archscope_core::normalize::{FileContext, FunctionHome, TreeVisitor};
use archscope_core::util::{node_text, range_from_ts};
use tree_sitter::Node;

pub struct PythonNormalizer<'s> {
    source: &'s str,
    ctx: FileContext,
}

impl<'s> PythonNormalizer<'s> {
    pub fn new(source: &'s str, file_path: &str) -> Self {
        Self {
            source,
            ctx: FileContext::new(file_path),
        }
    }

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

    fn enter_class(&mut self, node: &Node) {
        let name = self.field_text(node, "name").unwrap_or_default();
        let mut data_struct = DataStruct::new(name, DataStructKind::Class, "");

        // First base class fills the single inheritance slot; Python has no
        // implements clause and further bases are not modeled.
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            let mut cursor = superclasses.walk();
            data_struct.extends = superclasses
                .named_children(&mut cursor)
                .find(|base| matches!(base.kind(), "identifier" | "attribute"))
                .map(|base| self.text(&base).to_string());
        }

        self.ctx.open_struct(data_struct);
    }

    fn enter_function(&mut self, node: &Node) {
        let name = self.field_text(node, "name").unwrap_or_default();
        let mut function = Function::named(&name);

        // `async def`
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "async" {
                function.modifiers.push("async".to_string());
            }
        }

        if let Some(params) = node.child_by_field_name("parameters") {
            function.parameters = self.build_parameters(&params);
        }
        if let Some(return_type) = node.child_by_field_name("return_type") {
            function
                .returns
                .push(Property::new("", self.resolve_type(&return_type)));
        }
        function.range = Some(range_from_ts(node.range()));

        let home = if is_method(node) {
            if name == "__init__" {
                function.is_constructor = true;
            }
            FunctionHome::Member
        } else {
            FunctionHome::Module
        };
        self.ctx.open_function(function, home);
    }

    fn build_parameters(&self, params: &Node) -> Vec<Property> {
        let mut result = Vec::new();
        let mut cursor = params.walk();
        for child in params.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => result.push(Property::new(self.text(&child), "")),
                "typed_parameter" => {
                    let name = child
                        .named_child(0)
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_default();
                    let type_name = child
                        .child_by_field_name("type")
                        .map(|t| self.resolve_type(&t))
                        .unwrap_or_default();
                    result.push(Property::new(name, type_name));
                }
                "default_parameter" => {
                    let name = self.field_text(&child, "name").unwrap_or_default();
                    result.push(Property::new(name, ""));
                }
                "typed_default_parameter" => {
                    let name = self.field_text(&child, "name").unwrap_or_default();
                    let type_name = child
                        .child_by_field_name("type")
                        .map(|t| self.resolve_type(&t))
                        .unwrap_or_default();
                    result.push(Property::new(name, type_name));
                }
                "list_splat_pattern" | "dictionary_splat_pattern" => {
                    result.push(Property::new(self.text(&child), ""));
                }
                _ => {}
            }
        }
        result
    }

    /// Canonical type string: annotation source text with whitespace
    /// removed, so `List[ int ]` and `List[int]` compare equal downstream.
    fn resolve_type(&self, node: &Node) -> String {
        let inner = if node.kind() == "type" {
            node.named_child(0).unwrap_or(*node)
        } else {
            *node
        };
        self.text(&inner).split_whitespace().collect()
    }

    // --- statements -------------------------------------------------------

    fn enter_statement(&mut self, node: &Node) {
        if let Some(expression) = node.named_child(0) {
            self.handle_expression(expression);
        }
    }

    fn handle_expression(&mut self, expression: Node) {
        match expression.kind() {
            "assignment" => self.handle_assignment(&expression),
            "await" | "parenthesized_expression" => {
                if let Some(inner) = expression.named_child(0) {
                    self.handle_expression(inner);
                }
            }
            "call" => self.handle_call_chain(expression),
            "string" | "comment" => {} // docstrings
            other => {
                tracing::debug!(
                    file = %self.ctx.file_path(),
                    kind = other,
                    "unrecognized expression statement, skipped"
                );
            }
        }
    }

    /// Inside a function, `x = T()` binds `x` to `T` when the callee is a
    /// plain capitalized identifier — the Python spelling of "construct a
    /// new instance" — and every other simple assignment records the
    /// variable unbound. Directly inside a class body, a simple assignment
    /// is a class attribute and classifies as a field.
    fn handle_assignment(&mut self, assignment: &Node) {
        let Some(left) = assignment.child_by_field_name("left") else {
            return;
        };
        if left.kind() != "identifier" {
            // Attribute/subscript/tuple targets stay out of the model.
            return;
        }
        let name = self.text(&left).to_string();

        if self.ctx.in_function() {
            let constructed = assignment
                .child_by_field_name("right")
                .filter(|right| right.kind() == "call")
                .and_then(|call| call.child_by_field_name("function"))
                .filter(|callee| callee.kind() == "identifier")
                .map(|callee| self.text(&callee).to_string())
                .filter(|callee| callee.chars().next().is_some_and(char::is_uppercase));
            self.ctx.declare_local(&name, constructed.as_deref());
        } else if self.ctx.has_open_struct() {
            let field = Field {
                name,
                type_name: assignment
                    .child_by_field_name("type")
                    .map(|t| self.resolve_type(&t)),
                modifiers: Vec::new(),
            };
            self.ctx.add_field(field);
        }
    }

    /// Emit one call record per invocation link, leftmost first.
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

    /// `import a, b as c` — one record per statement: the first module is
    /// the source, every statement-bound name a usage.
    fn enter_import(&mut self, node: &Node) {
        let mut import = Import::default();
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            match name.kind() {
                "dotted_name" => {
                    let text = self.text(&name);
                    if import.source.is_empty() {
                        import.source = text.to_string();
                    }
                    // `import a.b` binds `a`.
                    let bound = text.split('.').next().unwrap_or(text);
                    import.usage_names.push(bound.to_string());
                }
                "aliased_import" => {
                    if import.source.is_empty() {
                        if let Some(module) = self.field_text(&name, "name") {
                            import.source = module;
                        }
                    }
                    if let Some(alias) = self.field_text(&name, "alias") {
                        import.usage_names.push(alias);
                    }
                }
                _ => {}
            }
        }
        self.ctx.add_import(import);
    }

    /// `from m import a, b as c` / `from m import *`.
    fn enter_import_from(&mut self, node: &Node) {
        let mut import = Import::default();
        if let Some(module) = self.field_text(node, "module_name") {
            import.source = module;
        }
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            match name.kind() {
                "dotted_name" => import.usage_names.push(self.text(&name).to_string()),
                "aliased_import" => {
                    if let Some(alias) = self.field_text(&name, "alias") {
                        import.usage_names.push(alias);
                    }
                }
                _ => {}
            }
        }
        let mut cursor = node.walk();
        if node
            .named_children(&mut cursor)
            .any(|c| c.kind() == "wildcard_import")
        {
            import.usage_names.push("*".to_string());
        }
        self.ctx.add_import(import);
    }
}

impl TreeVisitor for PythonNormalizer<'_> {
    fn enter_node(&mut self, node: &Node) -> Result<()> {
        match NodeKind::of(node.kind()) {
            NodeKind::ClassDefinition => self.enter_class(node),
            NodeKind::FunctionDefinition => self.enter_function(node),
            NodeKind::ExpressionStatement => self.enter_statement(node),
            NodeKind::ImportStatement => self.enter_import(node),
            NodeKind::ImportFromStatement => self.enter_import_from(node),
            NodeKind::Unrecognized => {}
        }
        Ok(())
    }

    fn exit_node(&mut self, node: &Node) -> Result<()> {
        match NodeKind::of(node.kind()) {
            NodeKind::ClassDefinition => self.ctx.close_struct()?,
            NodeKind::FunctionDefinition => self.ctx.close_function(),
            _ => {}
        }
        Ok(())
    }
}

/// A `def` directly inside a class body is a method; decorators are looked
/// through.
fn is_method(node: &Node) -> bool {
    let mut parent = node.parent();
    if parent.is_some_and(|p| p.kind() == "decorated_definition") {
        parent = parent.and_then(|p| p.parent());
    }
    match parent {
        Some(block) if block.kind() == "block" => block
            .parent()
            .is_some_and(|gp| gp.kind() == "class_definition"),
        _ => false,
    }
}
