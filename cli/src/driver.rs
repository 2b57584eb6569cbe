/*
Copyright 2020 Google LLC

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    https://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Drives the pipeline end to end (§4.7): gather sources, parse them in
//! parallel, merge with any upstream module artifacts, then produce
//! whichever of the four outputs the caller asked for.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use safedi_core::{annotation, codegen, dot, graph, validate};
use safedi_model::{codec, ImportStatement, ModuleInfo};
use tokio::task::JoinSet;

use crate::Args;

const INSTANTIABLE_MARKER: &str = "safedi::instantiable";

pub async fn run(args: &Args) -> Result<()> {
    let source_paths = gather_source_paths(args)?;
    tracing::info!(count = source_paths.len(), "gathered source files");

    let parsed_modules = parse_sources(source_paths).await?;

    let dependent_modules = load_dependent_modules(args).await?;

    let mut merged = ModuleInfo::default();
    for module in parsed_modules.into_iter().chain(dependent_modules) {
        merged = merged.merge(module);
    }
    tracing::debug!(
        instantiables = merged.instantiables.len(),
        imports = merged.imports.len(),
        "merged module info"
    );

    for module_name in &args.additional_imported_modules {
        if !merged.imports.iter().any(|import| import.module_name == *module_name) {
            merged.imports.push(ImportStatement::new(module_name.clone()));
        }
    }

    if let Some(output_path) = &args.module_info_output {
        tracing::info!(path = %output_path.display(), "writing module artifact");
        codec::write(output_path, &merged).with_context(|| {
            format!("failed to write module artifact to {}", output_path.display())
        })?;
    }

    let map = graph::FulfillmentMap::build(merged.instantiables)
        .context("failed to build fulfillment map")?;

    if args.dependency_tree_output.is_some() || args.dot_file_output.is_some() {
        let roots = map.roots();
        tracing::info!(count = roots.len(), "solving scopes for root instantiables");

        let mut generated = String::new();
        let mut dot_output = String::new();
        let context = codegen::GenerationContext::new();

        for root in roots {
            let scope = graph::build_scope(&map, root)
                .with_context(|| format!("failed to build scope for {}", scope_label(root)))?;
            validate::validate(&map, &scope)
                .with_context(|| format!("failed to validate scope for {}", scope_label(root)))?;

            if args.dependency_tree_output.is_some() {
                let code = codegen::generate(&context, &scope)
                    .await
                    .with_context(|| format!("failed to generate code for {}", scope_label(root)))?;
                generated.push_str(&code);
                generated.push('\n');
            }
            if args.dot_file_output.is_some() {
                dot_output.push_str(&dot::render(&scope));
            }
        }

        if let Some(output_path) = &args.dependency_tree_output {
            tracing::info!(path = %output_path.display(), "writing generated source");
            std::fs::write(output_path, generated)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
        }
        if let Some(output_path) = &args.dot_file_output {
            tracing::info!(path = %output_path.display(), "writing DOT output");
            std::fs::write(output_path, dot_output)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
        }
    }

    Ok(())
}

fn scope_label(instantiable: &safedi_model::Instantiable) -> String {
    instantiable.concrete_type.to_string()
}

fn gather_source_paths(args: &Args) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if let Some(sources_file) = &args.sources_file_path {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(sources_file)
            .with_context(|| format!("failed to open {}", sources_file.display()))?;
        for record in reader.records() {
            let record = record.with_context(|| format!("failed to read {}", sources_file.display()))?;
            if let Some(field) = record.get(0) {
                paths.push(PathBuf::from(field));
            }
        }
    }

    for include_dir in &args.include {
        for entry in walkdir::WalkDir::new(include_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "rs") {
                paths.push(entry.path().to_path_buf());
            }
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

async fn parse_sources(paths: Vec<PathBuf>) -> Result<Vec<ModuleInfo>> {
    let mut join_set: JoinSet<Result<Option<ModuleInfo>>> = JoinSet::new();
    for path in paths {
        join_set.spawn(async move { read_and_parse(&path).await });
    }

    let mut modules = Vec::new();
    while let Some(result) = join_set.join_next().await {
        if let Some(module) = result.context("file parsing task panicked")?? {
            modules.push(module);
        }
    }
    Ok(modules)
}

async fn read_and_parse(path: &Path) -> Result<Option<ModuleInfo>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    if !text.contains(INSTANTIABLE_MARKER) {
        tracing::debug!(path = %path.display(), "skipping file with no instantiables");
        return Ok(None);
    }

    tracing::debug!(path = %path.display(), "parsing file");
    let parsed = annotation::parse_source(Some(path), &text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    for diagnostic in &parsed.diagnostics {
        tracing::warn!(path = %path.display(), "{diagnostic}");
    }

    Ok(Some(ModuleInfo {
        imports: parsed.imports,
        instantiables: parsed.instantiables,
    }))
}

async fn load_dependent_modules(args: &Args) -> Result<Vec<ModuleInfo>> {
    let Some(list_path) = &args.dependent_module_info_file_path else {
        return Ok(Vec::new());
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(list_path)
        .with_context(|| format!("failed to open {}", list_path.display()))?;
    let mut artifact_paths = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("failed to read {}", list_path.display()))?;
        if let Some(field) = record.get(0) {
            artifact_paths.push(PathBuf::from(field));
        }
    }

    let mut join_set: JoinSet<Result<ModuleInfo>> = JoinSet::new();
    for path in artifact_paths {
        join_set.spawn(async move {
            tokio::task::spawn_blocking(move || {
                codec::read(&path).with_context(|| format!("failed to read module artifact {}", path.display()))
            })
            .await
            .context("module artifact read task panicked")?
        });
    }

    let mut modules = Vec::new();
    while let Some(result) = join_set.join_next().await {
        modules.push(result.context("module artifact task panicked")??);
    }
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn skips_files_without_the_instantiable_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("plain.rs");
        std::fs::write(&path, "struct Plain;\n").expect("write");
        let result = read_and_parse(&path).await.expect("should not error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn parses_files_with_the_instantiable_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("boiler.rs");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(
            file,
            "#[safedi::instantiable]\nstruct Boiler;\n"
        )
        .expect("write");
        let result = read_and_parse(&path).await.expect("should not error");
        assert!(result.is_some());
        assert_eq!(result.unwrap().instantiables.len(), 1);
    }

    #[test]
    fn gather_source_paths_sorts_and_dedupes() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b.rs"), "").expect("write");
        std::fs::write(dir.path().join("a.rs"), "").expect("write");
        let args = Args {
            sources_file_path: None,
            include: vec![dir.path().to_path_buf()],
            additional_imported_modules: Vec::new(),
            module_info_output: None,
            dependent_module_info_file_path: None,
            dependency_tree_output: None,
            dot_file_output: None,
            config: None,
        };
        let paths = gather_source_paths(&args).expect("gathers");
        assert_eq!(paths.len(), 2);
        assert!(paths[0] < paths[1]);
    }
}
