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

//! Reads and writes the `.safedi` module artifact format: a plain UTF-8 JSON
//! document with two ordered top-level arrays, `imports` and
//! `instantiables`. `serde_json` gives forward compatibility for free —
//! unknown object keys are ignored on read, since none of the model's types
//! opt into `deny_unknown_fields` — and JSON arrays are ordered, so no extra
//! work is needed to keep `ModuleInfo`'s declaration order intact.

use std::path::Path;

use crate::module_info::ModuleInfo;

/// Failure reading or writing a `.safedi` artifact.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to read module artifact at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write module artifact at {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed module artifact at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Serializes `module_info` as the `.safedi` JSON document.
pub fn encode(module_info: &ModuleInfo) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(module_info)
}

/// Parses a `.safedi` JSON document.
pub fn decode(text: &str) -> Result<ModuleInfo, serde_json::Error> {
    serde_json::from_str(text)
}

/// Reads a `.safedi` artifact from disk.
pub fn read(path: impl AsRef<Path>) -> Result<ModuleInfo, CodecError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CodecError::Read {
        path: path.display().to_string(),
        source,
    })?;
    decode(&text).map_err(|source| CodecError::Malformed {
        path: path.display().to_string(),
        source,
    })
}

/// Writes `module_info` as a `.safedi` artifact to disk.
pub fn write(path: impl AsRef<Path>, module_info: &ModuleInfo) -> Result<(), CodecError> {
    let path = path.as_ref();
    let text = encode(module_info).map_err(|source| CodecError::Malformed {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| CodecError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportStatement;
    use crate::instantiable::{DeclarationType, Instantiable};
    use crate::type_description::TypeDescription;

    fn sample_module_info() -> ModuleInfo {
        let mut module_info = ModuleInfo::new();
        module_info.imports.push(ImportStatement::new("std"));
        module_info.instantiables.push(Instantiable::new(
            TypeDescription::simple("Boiler"),
            DeclarationType::Struct,
        ));
        module_info
    }

    #[test]
    fn roundtrips_through_json() {
        let module_info = sample_module_info();
        let encoded = encode(&module_info).expect("encode");
        let decoded = decode(&encoded).expect("decode");
        assert_eq!(module_info, decoded);
    }

    #[test]
    fn ignores_unknown_fields_for_forward_compatibility() {
        let text = r#"{
            "imports": [],
            "instantiables": [],
            "future_field_from_a_newer_tool": 42
        }"#;
        let decoded = decode(text).expect("decode should ignore unknown fields");
        assert!(decoded.instantiables.is_empty());
    }

    #[test]
    fn round_trips_through_a_real_file() {
        let module_info = sample_module_info();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sample.safedi");
        write(&path, &module_info).expect("write");
        let read_back = read(&path).expect("read");
        assert_eq!(module_info, read_back);
    }
}
