//! Hashing - SHA-256 fingerprints for exported emails
//!
//! Hashes are reproducible: the same inputs and engine version always
//! give the same digest.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// SHA-256 of bytes as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    to_hex(&hasher.finalize())
}

/// Canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k.clone(), sort_value(v))).collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Fingerprint of everything that determines an export's markup.
/// content_hash = sha256(doc : brand_kit : options : engine_version)
pub fn compute_content_hash(
    doc: &impl Serialize,
    brand_kit: &impl Serialize,
    options: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let combined = format!(
        "{}:{}:{}:{}",
        canonical_json(doc)?,
        canonical_json(brand_kit)?,
        canonical_json(options)?,
        engine_version
    );
    Ok(sha256_hex(combined.as_bytes()))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
