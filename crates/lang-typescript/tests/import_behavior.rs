use archscope_typescript::TypeScriptParser;

fn normalize(source: &str) -> archscope_api::Container {
    TypeScriptParser::new()
        .normalize_source(source, "imports.ts")
        .expect("normalization failed")
}

#[test]
fn named_imports_bind_alias_when_present() {
    let container = normalize(r#"import { Component, useState as useNamed } from "react";"#);

    assert_eq!(container.imports.len(), 1);
    let import = &container.imports[0];
    assert_eq!(import.source, "react");
    assert_eq!(import.usage_names, ["Component", "useNamed"]);
}

#[test]
fn namespace_import_binds_its_alias() {
    let container = normalize(r#"import * as path from "path";"#);

    let import = &container.imports[0];
    assert_eq!(import.source, "path");
    assert_eq!(import.usage_names, ["path"]);
}

#[test]
fn default_import_binds_one_name() {
    let container = normalize(r#"import fs from "fs";"#);

    let import = &container.imports[0];
    assert_eq!(import.source, "fs");
    assert_eq!(import.usage_names, ["fs"]);
}

#[test]
fn default_and_named_imports_combine_in_order() {
    let container = normalize(r#"import React, { useEffect } from "react";"#);

    let import = &container.imports[0];
    assert_eq!(import.usage_names, ["React", "useEffect"]);
}

#[test]
fn side_effect_import_has_source_but_no_usages() {
    let container = normalize(r#"import "./styles.css";"#);

    let import = &container.imports[0];
    assert_eq!(import.source, "./styles.css");
    assert!(import.usage_names.is_empty());
}

#[test]
fn require_style_import_binds_its_identifier() {
    let container = normalize(r#"import config = require("./config");"#);

    let import = &container.imports[0];
    assert_eq!(import.source, "./config");
    assert_eq!(import.usage_names, ["config"]);
}

#[test]
fn single_quotes_are_stripped_too() {
    let container = normalize("import { a } from 'mod';");

    assert_eq!(container.imports[0].source, "mod");
}

#[test]
fn imports_keep_statement_order() {
    let container = normalize(
        r#"
import { z } from "zebra";
import { a } from "alpha";
"#,
    );

    let sources: Vec<_> = container.imports.iter().map(|i| i.source.as_str()).collect();
    assert_eq!(sources, ["zebra", "alpha"]);
}
