//! File-level container assembly.

use archscope_api::{Container, DataStruct, DataStructKind, Function, Import};
use indexmap::IndexMap;

/// Name of the synthetic structure holding free functions.
pub const DEFAULT_STRUCT_NAME: &str = "default";

/// Aggregates the finished registry and the free-function list into one
/// `Container`: registry entries in encounter order, then — only when at
/// least one free function exists — a single synthetic `default` structure
/// holding them in declaration order.
///
/// Pure aggregation over borrowed inputs; calling it twice over the same
/// inputs yields structurally equal output.
pub fn assemble(
    file_path: &str,
    imports: &[Import],
    registry: &IndexMap<String, DataStruct>,
    free_functions: &[Function],
) -> Container {
    let mut container = Container::new(file_path);
    container.imports = imports.to_vec();
    container.data_structs = registry.values().cloned().collect();

    if !free_functions.is_empty() {
        let mut default_struct =
            DataStruct::new(DEFAULT_STRUCT_NAME, DataStructKind::Default, "");
        default_struct.functions = free_functions.to_vec();
        container.data_structs.push(default_struct);
    }

    container
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_free_functions_means_no_default_struct() {
        let registry = IndexMap::new();
        let container = assemble("empty.ts", &[], &registry, &[]);
        assert!(container.data_structs.is_empty());
    }

    #[test]
    fn free_functions_land_in_one_default_struct_in_order() {
        let registry = IndexMap::new();
        let free = vec![Function::named("first"), Function::named("second")];
        let container = assemble("free.ts", &[], &registry, &free);

        assert_eq!(container.data_structs.len(), 1);
        let default_struct = &container.data_structs[0];
        assert_eq!(default_struct.name, DEFAULT_STRUCT_NAME);
        assert_eq!(default_struct.kind, DataStructKind::Default);
        let names: Vec<_> = default_struct.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn assembly_is_idempotent() {
        let mut registry = IndexMap::new();
        registry.insert(
            "A".to_string(),
            DataStruct::new("A", DataStructKind::Class, "ns"),
        );
        let free = vec![Function::named("f")];

        let first = assemble("a.ts", &[], &registry, &free);
        let second = assemble("a.ts", &[], &registry, &free);
        assert_eq!(first, second);
    }
}
