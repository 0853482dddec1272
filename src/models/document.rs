// 3rd party crates
use serde::Deserialize;

/// A business document submitted through the documents API.
///
/// Read from JSON with snake_case keys; optional fields may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub doc_status: String,
    pub doc_type: String,
    pub owner_inn: String,
    pub producer_inn: String,
    pub participant_inn: String,
    pub production_date: String,
    pub production_type: String,
    pub reg_date: String,
    pub reg_number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub import_request: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product line of a [`Document`].
///
/// Exactly one of `uit_code` / `uitu_code` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub certificate_document: Option<String>,
    #[serde(default)]
    pub certificate_document_date: Option<String>,
    #[serde(default)]
    pub certificate_document_number: Option<String>,
    #[serde(default)]
    pub owner_inn: Option<String>,
    #[serde(default)]
    pub producer_inn: Option<String>,
    #[serde(default)]
    pub production_date: Option<String>,
    pub tnved_code: String,
    #[serde(default)]
    pub uit_code: Option<String>,
    #[serde(default)]
    pub uitu_code: Option<String>,
}
