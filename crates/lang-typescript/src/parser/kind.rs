//! Closed classification of the grammar productions the normalizer
//! understands.

/// Every tree-sitter node kind the TypeScript normalizer reacts to.
/// Everything else maps to [`NodeKind::Unrecognized`], which both hooks
/// treat as a no-op — the walk never fails on unfamiliar shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `namespace N { .. }` / `module N { .. }`
    InternalModule,
    ClassDeclaration,
    InterfaceDeclaration,
    /// A class member with parameters and a body, including constructors,
    /// getters and setters.
    MethodDefinition,
    /// An interface member declared with a method signature.
    MethodSignature,
    /// `abstract f(..): T;` inside an abstract class.
    AbstractMethodSignature,
    /// A class property, with or without a type annotation.
    PublicFieldDefinition,
    /// An interface property; classified into field vs. call-signature
    /// function by its annotation shape.
    PropertySignature,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    VariableDeclarator,
    ExpressionStatement,
    ImportStatement,
    Unrecognized,
}

impl NodeKind {
    /// Maps a tree-sitter kind string, covering the renames the typescript
    /// grammar has gone through (`function` → `function_expression`,
    /// `field_definition` → `public_field_definition`).
    pub fn of(kind: &str) -> NodeKind {
        match kind {
            "internal_module" | "module" => NodeKind::InternalModule,
            "class_declaration" | "abstract_class_declaration" => NodeKind::ClassDeclaration,
            "interface_declaration" => NodeKind::InterfaceDeclaration,
            "method_definition" => NodeKind::MethodDefinition,
            "method_signature" => NodeKind::MethodSignature,
            "abstract_method_signature" => NodeKind::AbstractMethodSignature,
            "public_field_definition" | "field_definition" => NodeKind::PublicFieldDefinition,
            "property_signature" => NodeKind::PropertySignature,
            "function_declaration" | "generator_function_declaration" => {
                NodeKind::FunctionDeclaration
            }
            "function_expression" | "function" => NodeKind::FunctionExpression,
            "arrow_function" => NodeKind::ArrowFunction,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "expression_statement" => NodeKind::ExpressionStatement,
            "import_statement" => NodeKind::ImportStatement,
            _ => NodeKind::Unrecognized,
        }
    }
}
