//! Traversal state for normalizing one file.
//!
//! A `FileContext` is owned by exactly one normalizer instance; concurrent
//! per-file normalizations share nothing. It consolidates what the
//! traversal needs to remember between enter/exit hooks: the namespace
//! marker, the stack of currently open data structures, the registry of
//! finished ones, and the stack of in-progress function frames (each with
//! its own [`ScopeTracker`]).

use super::assemble::assemble;
use super::scope::ScopeTracker;
use crate::error::{ArchscopeError, Result};
use archscope_api::{Call, Container, DataStruct, Field, Function, Import, Property};
use indexmap::IndexMap;

/// Where a finished function is appended on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionHome {
    /// Member of the innermost open data structure.
    Member,
    /// Free function, collected into the synthetic default structure.
    Module,
}

#[derive(Debug)]
struct FunctionFrame {
    function: Function,
    scope: ScopeTracker,
    home: FunctionHome,
    /// Set for unnamed function expressions: the frame still scopes its body
    /// (calls attach here, not to the enclosing function) but is dropped on
    /// exit instead of being appended anywhere.
    discard: bool,
}

#[derive(Debug)]
pub struct FileContext {
    file_path: String,
    namespace: String,
    imports: Vec<Import>,
    struct_stack: Vec<DataStruct>,
    registry: IndexMap<String, DataStruct>,
    function_stack: Vec<FunctionFrame>,
    free_functions: Vec<Function>,
}

impl FileContext {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            namespace: String::new(),
            imports: Vec::new(),
            struct_stack: Vec::new(),
            registry: IndexMap::new(),
            function_stack: Vec::new(),
            free_functions: Vec::new(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Current enclosing namespace marker, empty outside any namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, name: impl Into<String>) {
        self.namespace = name.into();
    }

    pub fn clear_namespace(&mut self) {
        self.namespace.clear();
    }

    pub fn add_import(&mut self, import: Import) {
        self.imports.push(import);
    }

    /// Push a freshly entered data structure onto the container stack. The
    /// registry slot is reserved immediately so nested declarations keep
    /// encounter order rather than exit order.
    pub fn open_struct(&mut self, data_struct: DataStruct) {
        self.registry
            .insert(data_struct.name.clone(), data_struct.clone());
        self.struct_stack.push(data_struct);
    }

    /// Pop the innermost open data structure and register it by name.
    /// Registration keeps the first-encounter position; a redeclared name
    /// replaces the earlier value (last writer wins).
    pub fn close_struct(&mut self) -> Result<()> {
        let finished = self.struct_stack.pop().ok_or_else(|| {
            ArchscopeError::Internal(format!(
                "container exit without matching enter in '{}'",
                self.file_path
            ))
        })?;
        self.registry.insert(finished.name.clone(), finished);
        Ok(())
    }

    pub fn current_struct_mut(&mut self) -> Option<&mut DataStruct> {
        self.struct_stack.last_mut()
    }

    pub fn has_open_struct(&self) -> bool {
        !self.struct_stack.is_empty()
    }

    /// Append a field to the innermost open data structure.
    pub fn add_field(&mut self, field: Field) {
        match self.struct_stack.last_mut() {
            Some(ds) => ds.fields.push(field),
            None => tracing::debug!(file = %self.file_path, "field outside any container, skipped"),
        }
    }

    /// Append an already-complete function (a body-less signature member) to
    /// the innermost open data structure.
    pub fn add_member_function(&mut self, function: Function) {
        match self.struct_stack.last_mut() {
            Some(ds) => ds.functions.push(function),
            None => self.free_functions.push(function),
        }
    }

    /// Open a frame for a function-shaped declaration. The function is only
    /// appended to its home on [`close_function`].
    pub fn open_function(&mut self, function: Function, home: FunctionHome) {
        self.function_stack.push(FunctionFrame {
            function,
            scope: ScopeTracker::new(),
            home,
            discard: false,
        });
    }

    /// Open a frame for an unnamed function expression: its body is walked
    /// normally but the result is dropped on exit.
    pub fn open_discard_function(&mut self) {
        self.function_stack.push(FunctionFrame {
            function: Function::default(),
            scope: ScopeTracker::new(),
            home: FunctionHome::Module,
            discard: true,
        });
    }

    /// Close the innermost function frame, appending the finished function
    /// to its home. Discard frames vanish silently.
    pub fn close_function(&mut self) {
        let Some(frame) = self.function_stack.pop() else {
            tracing::warn!(file = %self.file_path, "function exit without matching enter");
            return;
        };
        if frame.discard {
            return;
        }
        match frame.home {
            FunctionHome::Member => match self.struct_stack.last_mut() {
                Some(ds) => ds.functions.push(frame.function),
                None => self.free_functions.push(frame.function),
            },
            FunctionHome::Module => self.free_functions.push(frame.function),
        }
    }

    pub fn in_function(&self) -> bool {
        !self.function_stack.is_empty()
    }

    pub fn current_function_mut(&mut self) -> Option<&mut Function> {
        self.function_stack.last_mut().map(|f| &mut f.function)
    }

    /// Record a local-variable declaration in the innermost open function.
    /// A known type additionally binds the name for receiver resolution;
    /// an unknown one records the variable with an empty type.
    pub fn declare_local(&mut self, name: &str, type_name: Option<&str>) {
        let Some(frame) = self.function_stack.last_mut() else {
            tracing::debug!(file = %self.file_path, name, "declaration outside any function, not bound");
            return;
        };
        frame
            .function
            .local_variables
            .push(Property::new(name, type_name.unwrap_or_default()));
        if let Some(ty) = type_name {
            frame.scope.bind(name, ty);
        }
    }

    /// Resolve a call-chain receiver against the innermost function's scope:
    /// empty qualifier stays empty (bare call), a bound local resolves to its
    /// type, anything else stays the literal qualifier text.
    pub fn resolve_receiver(&self, qualifier: &str) -> String {
        if qualifier.is_empty() {
            return String::new();
        }
        self.function_stack
            .last()
            .and_then(|f| f.scope.resolve(qualifier))
            .unwrap_or(qualifier)
            .to_string()
    }

    /// Attach a call record to the innermost open function. Calls with no
    /// enclosing function have no owner in the model and are skipped.
    pub fn record_call(&mut self, call: Call) {
        match self.function_stack.last_mut() {
            Some(frame) => frame.function.calls.push(call),
            None => {
                tracing::debug!(file = %self.file_path, call = %call.function_name, "call outside any function, skipped")
            }
        }
    }

    /// Assemble the file-level container. Fails with
    /// [`ArchscopeError::UnbalancedTraversal`] when the grammar front end
    /// delivered mismatched enter/exit pairs and containers are still open.
    /// Borrowing, so a second call yields a structurally equal result.
    pub fn finish(&self) -> Result<Container> {
        if !self.struct_stack.is_empty() {
            return Err(ArchscopeError::UnbalancedTraversal {
                file: self.file_path.clone(),
                depth: self.struct_stack.len(),
            });
        }
        if !self.function_stack.is_empty() {
            tracing::warn!(
                file = %self.file_path,
                open = self.function_stack.len(),
                "function frame(s) left open at end of traversal"
            );
        }
        Ok(assemble(
            &self.file_path,
            &self.imports,
            &self.registry,
            &self.free_functions,
        ))
    }
}
