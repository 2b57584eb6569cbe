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

//! `safedi`: parses annotated Rust source, solves the dependency graph it
//! describes, and writes whichever of the module artifact, generated
//! source, and DOT graph the caller asked for (§4.7, §6).

mod config;
mod driver;

use std::path::PathBuf;

use clap::Parser;

/// Parse, solve and generate code for a SafeDI dependency graph.
#[derive(Parser, Debug)]
#[command(name = "safedi", version, about)]
pub struct Args {
    /// CSV file listing absolute paths of source files to parse.
    #[arg(long)]
    pub sources_file_path: Option<PathBuf>,

    /// Directories enumerated recursively for `.rs` files.
    #[arg(long)]
    pub include: Vec<PathBuf>,

    /// Module names to add to the generated imports.
    #[arg(long)]
    pub additional_imported_modules: Vec<String>,

    /// Write the module artifact here (must end in `.safedi`).
    #[arg(long)]
    pub module_info_output: Option<PathBuf>,

    /// CSV of paths to `.safedi` artifacts to ingest.
    #[arg(long)]
    pub dependent_module_info_file_path: Option<PathBuf>,

    /// Write generated source here.
    #[arg(long)]
    pub dependency_tree_output: Option<PathBuf>,

    /// Write the Graphviz DOT file here.
    #[arg(long)]
    pub dot_file_output: Option<PathBuf>,

    /// Optional TOML file layering in defaults for `include` and
    /// `additional-imported-modules`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = Args::parse();
    if let Some(config_path) = &args.config {
        let toml_config = config::TomlConfig::load(config_path)?;
        config::apply(&mut args, toml_config);
    }

    if let Err(error) = driver::run(&args).await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }

    Ok(())
}
