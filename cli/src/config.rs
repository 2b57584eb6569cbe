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

//! Optional TOML layer for flags that are tedious to repeat on every
//! invocation. Flags passed on the command line always win; a config value
//! only fills in a flag the caller left at its default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlConfig {
    pub include: Option<Vec<PathBuf>>,
    pub additional_imported_modules: Option<Vec<String>>,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Applies `config` on top of `args`, only where `args` left a field empty.
pub fn apply(args: &mut crate::Args, config: TomlConfig) {
    if args.include.is_empty() {
        if let Some(include) = config.include {
            args.include = include;
        }
    }
    if args.additional_imported_modules.is_empty() {
        if let Some(modules) = config.additional_imported_modules {
            args.additional_imported_modules = modules;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_only_fills_in_fields_the_caller_left_empty() {
        let config = TomlConfig {
            include: Some(vec![PathBuf::from("src")]),
            additional_imported_modules: Some(vec!["anyhow".to_owned()]),
        };
        let mut args = crate::Args {
            sources_file_path: None,
            include: vec![PathBuf::from("explicit")],
            additional_imported_modules: Vec::new(),
            module_info_output: None,
            dependent_module_info_file_path: None,
            dependency_tree_output: None,
            dot_file_output: None,
            config: None,
        };
        apply(&mut args, config);
        assert_eq!(args.include, vec![PathBuf::from("explicit")]);
        assert_eq!(args.additional_imported_modules, vec!["anyhow".to_owned()]);
    }
}
