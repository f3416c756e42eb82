use archscope_api::Container;
use archscope_core::error::{ArchscopeError, Result};
use archscope_core::normalize::walk_tree;
use tree_sitter::Tree;

mod chain;
mod kind;
mod normalizer;
mod types;

pub use kind::NodeKind;
pub use normalizer::TypeScriptNormalizer;

/// TypeScript front end: parses with the tree-sitter grammar and normalizes
/// the resulting concrete syntax tree into one `Container` per file.
pub struct TypeScriptParser {
    language: tree_sitter::Language,
}

impl TypeScriptParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    /// Parse source text into a concrete syntax tree.
    pub fn parse(&self, source: &str) -> Result<Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ArchscopeError::Parsing(format!("TypeScript grammar rejected: {e}")))?;
        parser
            .parse(source, None)
            .ok_or_else(|| ArchscopeError::Parsing("tree-sitter produced no tree".to_string()))
    }

    /// Normalize an already-parsed tree. The core contract: tree in,
    /// unified code model out, no I/O.
    pub fn normalize(&self, tree: &Tree, source: &str, file_path: &str) -> Result<Container> {
        let mut normalizer = TypeScriptNormalizer::new(source, file_path);
        walk_tree(tree.root_node(), &mut normalizer)?;
        normalizer.finish()
    }

    /// Convenience entry point for orchestrators and tests.
    pub fn normalize_source(&self, source: &str, file_path: &str) -> Result<Container> {
        let tree = self.parse(source)?;
        self.normalize(&tree, source, file_path)
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}
