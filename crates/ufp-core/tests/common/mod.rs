// Sample-data access shared by integration tests.
//
// Fixtures live in `tests/sample_data/` unless `UFP_SAMPLE_DIR` points at a
// freshly recorded set. `sample_constants.json` is parsed once on first use.
#![allow(dead_code, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::OnceLock;

use serde_json::Value;

pub fn sample_dir() -> PathBuf {
    std::env::var_os("UFP_SAMPLE_DIR").map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/sample_data"),
        PathBuf::from,
    )
}

/// Load `sample_<name>.json`.
pub fn sample(name: &str) -> Value {
    let path = sample_dir().join(format!("sample_{name}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap()
}

/// Lazily loaded `sample_constants.json`.
pub fn constants() -> &'static Value {
    static CONSTANTS: OnceLock<Value> = OnceLock::new();
    CONSTANTS.get_or_init(|| sample("constants"))
}

/// `counts.<model>` from the constants file.
pub fn expected_count(model: &str) -> usize {
    constants()["counts"][model]
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_else(|| panic!("no count for {model}"))
}

pub fn record(value: Value) -> ufp_core::RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {other}"),
    }
}
