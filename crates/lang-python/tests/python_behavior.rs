use archscope_api::DataStructKind;
use archscope_python::PythonParser;

fn normalize(source: &str) -> archscope_api::Container {
    PythonParser::new()
        .normalize_source(source, "test.py")
        .expect("normalization failed")
}

#[test]
fn builder_chain_decomposes_into_ordered_calls() {
    let container = normalize(
        r#"
def build():
    p = Person()
    p.setName("Hunter").setAge(24).setSSN("111-22-3333")
"#,
    );

    let build = &container.data_structs[0].functions[0];
    assert_eq!(build.calls.len(), 3);
    assert_eq!(build.calls[0].function_name, "setName");
    assert_eq!(build.calls[1].function_name, "setAge");
    assert_eq!(build.calls[2].function_name, "setSSN");
    for call in &build.calls {
        assert_eq!(call.node_name, "Person");
    }
}

#[test]
fn constructed_local_variable_is_recorded() {
    let container = normalize(
        r#"
def build():
    p = Person()
    p.setName("Hunter").setAge(24).setSSN("111-22-3333")
"#,
    );

    let build = &container.data_structs[0].functions[0];
    assert_eq!(build.local_variables.len(), 1);
    assert_eq!(build.local_variables[0].name, "p");
    assert_eq!(build.local_variables[0].type_name, "Person");
}

#[test]
fn bare_print_call_has_empty_receiver() {
    let container = normalize(
        r#"
async def show(str):
    print(str)
"#,
    );

    let show = &container.data_structs[0].functions[0];
    assert_eq!(show.calls.len(), 1);
    assert_eq!(show.calls[0].function_name, "print");
    assert_eq!(show.calls[0].node_name, "");
    assert!(show.modifiers.iter().any(|m| m == "async"));
    assert_eq!(show.parameters[0].name, "str");
}

#[test]
fn class_methods_and_constructor_classify() {
    let container = normalize(
        r#"
class Dog(Animal):
    def __init__(self, name):
        self.name = name

    def speak(self):
        print("woof")
"#,
    );

    let dog = container.data_struct("Dog").expect("Dog missing");
    assert_eq!(dog.kind, DataStructKind::Class);
    assert_eq!(dog.extends.as_deref(), Some("Animal"));

    let names: Vec<_> = dog.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["__init__", "speak"]);

    let init = &dog.functions[0];
    assert!(init.is_constructor);
    assert_eq!(init.parameters.len(), 2);
    assert_eq!(init.parameters[0].name, "self");
    assert_eq!(init.parameters[1].name, "name");

    let speak = &dog.functions[1];
    assert!(!speak.is_constructor);
    assert_eq!(speak.calls[0].function_name, "print");
    assert_eq!(speak.calls[0].node_name, "");
    assert_eq!(speak.calls[0].arguments[0].name, "\"woof\"");
}

#[test]
fn lowercase_call_initializer_stays_unbound() {
    let container = normalize(
        r#"
def use():
    h = handler()
    h.run()
"#,
    );

    let use_fn = &container.data_structs[0].functions[0];
    assert_eq!(use_fn.calls[0].function_name, "run");
    assert_eq!(use_fn.calls[0].node_name, "h");
    assert_eq!(use_fn.local_variables[0].name, "h");
    assert_eq!(use_fn.local_variables[0].type_name, "");
}

#[test]
fn typed_parameters_and_return_annotation_resolve() {
    let container = normalize(
        r#"
def scale(factor: float, values: List[ int ]) -> List[int]:
    pass
"#,
    );

    let scale = &container.data_structs[0].functions[0];
    assert_eq!(scale.parameters[0].name, "factor");
    assert_eq!(scale.parameters[0].type_name, "float");
    assert_eq!(scale.parameters[1].name, "values");
    assert_eq!(scale.parameters[1].type_name, "List[int]");
    assert_eq!(scale.returns.len(), 1);
    assert_eq!(scale.returns[0].type_name, "List[int]");
}

#[test]
fn module_functions_land_in_one_default_struct() {
    let container = normalize(
        r#"
def first():
    pass

def second():
    pass
"#,
    );

    assert_eq!(container.data_structs.len(), 1);
    let default_struct = &container.data_structs[0];
    assert_eq!(default_struct.kind, DataStructKind::Default);
    let names: Vec<_> = default_struct.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
}

#[test]
fn class_only_file_has_no_default_struct() {
    let container = normalize(
        r#"
class Quiet:
    def noop(self):
        pass
"#,
    );

    assert_eq!(container.data_structs.len(), 1);
    assert_eq!(container.data_structs[0].kind, DataStructKind::Class);
}

#[test]
fn import_forms_record_sources_and_bound_names() {
    let container = normalize(
        r#"
import os
import numpy as np
import xml.etree
from typing import List, Optional as Opt
from os import *
"#,
    );

    assert_eq!(container.imports.len(), 5);
    assert_eq!(container.imports[0].source, "os");
    assert_eq!(container.imports[0].usage_names, ["os"]);
    assert_eq!(container.imports[1].source, "numpy");
    assert_eq!(container.imports[1].usage_names, ["np"]);
    assert_eq!(container.imports[2].source, "xml.etree");
    assert_eq!(container.imports[2].usage_names, ["xml"]);
    assert_eq!(container.imports[3].source, "typing");
    assert_eq!(container.imports[3].usage_names, ["List", "Opt"]);
    assert_eq!(container.imports[4].source, "os");
    assert_eq!(container.imports[4].usage_names, ["*"]);
}

#[test]
fn class_attributes_classify_as_fields() {
    let container = normalize(
        r#"
class Config:
    retries: int = 3
    name = "cfg"

    def reset(self):
        retries = 0
"#,
    );

    let config = container.data_struct("Config").unwrap();
    let field_names: Vec<_> = config.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(field_names, ["retries", "name"]);
    assert_eq!(config.fields[0].type_name.as_deref(), Some("int"));
    assert_eq!(config.fields[1].type_name, None);

    // The assignment inside the method is a local, not a field.
    let reset = &config.functions[0];
    assert_eq!(reset.local_variables.len(), 1);
    assert_eq!(reset.local_variables[0].name, "retries");
}

#[test]
fn module_level_statements_have_no_function_owner() {
    let container = normalize(
        r#"
p = Person()
p.setName("Hunter")
"#,
    );

    // No function means nowhere to attach bindings or calls.
    assert!(container.data_structs.is_empty());
}

#[test]
fn decorated_method_still_counts_as_member() {
    let container = normalize(
        r#"
class Api:
    @staticmethod
    def ping():
        pass
"#,
    );

    let api = container.data_struct("Api").unwrap();
    assert_eq!(api.functions.len(), 1);
    assert_eq!(api.functions[0].name, "ping");
}
