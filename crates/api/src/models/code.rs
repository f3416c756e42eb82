//! The unified code model.
//!
//! One `Container` per source file, holding imports and data structures in
//! declaration order. The shape is identical across all language front ends
//! so that downstream consumers (graph builders, exporters) stay
//! language-agnostic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Source range, 0-based rows/columns straight from the grammar front end.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct Range {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// What a `DataStruct` represents in the source language.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub enum DataStructKind {
    Class,
    Interface,
    /// The synthetic grouping for functions declared outside any class or
    /// interface. At most one per container.
    Default,
}

/// A (name, type) pair. Shared shape for parameters, return-type entries and
/// local-variable bindings; either side may be empty depending on role (a
/// return-type entry has an empty name, an unbound local an empty type).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct Property {
    pub name: String,
    pub type_name: String,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// One invocation link of a (possibly fluent) call chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct Call {
    /// The identifier immediately to the left of the argument list.
    pub function_name: String,
    /// Resolved receiver: a bound local-variable type, the literal qualifier
    /// text, or empty for a bare call.
    pub node_name: String,
    /// Low-fidelity argument capture (first argument's source text only).
    pub arguments: Vec<Property>,
}

/// An import-shaped statement: its source module plus every name it binds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct Import {
    pub source: String,
    pub usage_names: Vec<String>,
}

/// A named member holding data rather than behavior.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct Field {
    pub name: String,
    /// Canonical type string, absent when the source omits the annotation.
    pub type_name: Option<String>,
    pub modifiers: Vec<String>,
}

/// A function, method or constructor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, JsonSchema)]
pub struct Function {
    pub name: String,
    pub is_constructor: bool,
    pub modifiers: Vec<String>,
    pub parameters: Vec<Property>,
    /// Declared return types, in order. More than one entry models
    /// multiple/tuple-style returns.
    pub returns: Vec<Property>,
    /// Local-variable bindings seen in the body; the type side may be empty
    /// when the initializer form does not reveal one.
    pub local_variables: Vec<Property>,
    pub calls: Vec<Call>,
    pub range: Option<Range>,
}

impl Function {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A class, interface, or the synthetic module-scope grouping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct DataStruct {
    pub name: String,
    pub kind: DataStructKind,
    /// Enclosing namespace/package, possibly empty.
    pub package: String,
    /// Single inheritance slot, even where the source language permits more.
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub fields: Vec<Field>,
    pub functions: Vec<Function>,
}

impl DataStruct {
    pub fn new(name: impl Into<String>, kind: DataStructKind, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            package: package.into(),
            extends: None,
            implements: Vec::new(),
            fields: Vec::new(),
            functions: Vec::new(),
        }
    }
}

/// The file-level result: everything the normalizer recovered from one
/// concrete syntax tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Container {
    pub file_path: String,
    pub imports: Vec<Import>,
    pub data_structs: Vec<DataStruct>,
}

impl Container {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            imports: Vec::new(),
            data_structs: Vec::new(),
        }
    }

    /// Look up a data structure by name.
    pub fn data_struct(&self, name: &str) -> Option<&DataStruct> {
        self.data_structs.iter().find(|ds| ds.name == name)
    }
}
