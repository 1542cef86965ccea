//! Per-source lookups.
//!
//! Each module adds one lookup method to [`crate::ProviderClient`] and defines
//! the record it extracts from the upstream response.

pub mod chembl;
pub mod drugbank;
pub mod hgnc;
pub mod pdb;
pub mod pubchem;
pub mod uniprot;

pub use chembl::ChemblCompound;
pub use drugbank::DrugbankDrug;
pub use hgnc::GeneRecord;
pub use pdb::PdbEntry;
pub use pubchem::PubchemCompound;
pub use uniprot::{BindingSite, UniprotEntry};

use serde::Serializer;
use serde_json::Value;

/// Placeholder for absent text fields.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for absent measurements.
pub const NOT_AVAILABLE: &str = "N/A";

fn text_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn non_null_at(value: &Value, pointer: &str) -> Option<Value> {
    value.pointer(pointer).filter(|found| !found.is_null()).cloned()
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNKNOWN.to_string())
}

#[allow(clippy::ref_option)]
fn number_or_na<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(number) => serializer.serialize_f64(*number),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}
