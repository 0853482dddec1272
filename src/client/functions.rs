// Standard library
use std::time::Duration;

// 3rd party crates
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

// Project imports
use crate::models::{Document, Product};

// Current module imports
use super::errors::{ClientError, TransportError};
use super::types::ClientConfig;

/// Certificate fields in the order they win when several are set.
const CERTIFICATE_FIELDS: [&str; 3] = [
    "certificate_document",
    "certificate_document_date",
    "certificate_document_number",
];

/// Creates a reqwest client for the documents API.
pub(super) fn create_reqwest_client(config: &ClientConfig) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| {
            error!(endpoint = %config.endpoint, "Failed to build HTTP client: {}", e);
            TransportError::ClientBuild(e)
        })
}

/// Checks every product before anything is sent.
pub fn validate_document(document: &Document) -> Result<(), ClientError> {
    for (index, product) in document.products.iter().enumerate() {
        if product.tnved_code.trim().is_empty() {
            return Err(ClientError::MissingRequiredField {
                product: index,
                field: "tnved_code",
            });
        }

        match (&product.uit_code, &product.uitu_code) {
            (None, None) => {
                return Err(ClientError::MissingRequiredField {
                    product: index,
                    field: "uit_code/uitu_code",
                });
            }
            (Some(_), Some(_)) => {
                return Err(ClientError::ConflictingFields {
                    product: index,
                    first: "uit_code",
                    second: "uitu_code",
                });
            }
            _ => {}
        }

        let certificates = certificate_values(product)
            .iter()
            .filter(|value| value.is_some())
            .count();
        if certificates > 1 {
            warn!(
                doc_id = %document.doc_id,
                product = index,
                "Several certificate fields set, only the first by priority is sent"
            );
        }

        let parties = [
            ("owner_inn", &product.owner_inn, &document.owner_inn),
            ("producer_inn", &product.producer_inn, &document.producer_inn),
        ];
        for (field, own, inherited) in parties {
            if own.as_ref().is_some_and(|own| own != inherited) {
                warn!(
                    doc_id = %document.doc_id,
                    product = index,
                    field,
                    "Product value differs from the document, the document value is sent"
                );
            }
        }
    }

    Ok(())
}

/// Validates `document` and renders the request body.
pub fn serialize_document(document: &Document) -> Result<String, ClientError> {
    validate_document(document)?;
    Ok(serde_json::to_string(&document_to_json(document))?)
}

/// Maps a document onto the wire schema.
///
/// Expects a document that passed [`validate_document`].
pub fn document_to_json(document: &Document) -> Value {
    let mut doc: Map<String, Value> = Map::new();

    if document.description.is_some() {
        doc.insert(
            "description".into(),
            json!({ "participantInn": document.participant_inn }),
        );
    }
    doc.insert("doc_id".into(), json!(document.doc_id));
    doc.insert("doc_status".into(), json!(document.doc_status));
    doc.insert("doc_type".into(), json!(document.doc_type));
    if let Some(import_request) = &document.import_request {
        doc.insert("importRequest".into(), json!(import_request));
    }
    doc.insert("owner_inn".into(), json!(document.owner_inn));
    doc.insert("participant_inn".into(), json!(document.participant_inn));
    doc.insert("producer_inn".into(), json!(document.producer_inn));
    doc.insert("production_date".into(), json!(document.production_date));
    doc.insert("production_type".into(), json!(document.production_type));

    let products: Vec<Value> = document
        .products
        .iter()
        .map(|product| product_to_json(document, product))
        .collect();
    doc.insert("products".into(), Value::Array(products));

    doc.insert("reg_date".into(), json!(document.reg_date));
    doc.insert("reg_number".into(), json!(document.reg_number));

    Value::Object(doc)
}

fn certificate_values(product: &Product) -> [&Option<String>; 3] {
    [
        &product.certificate_document,
        &product.certificate_document_date,
        &product.certificate_document_number,
    ]
}

fn product_to_json(document: &Document, product: &Product) -> Value {
    let mut item: Map<String, Value> = Map::new();

    let certificate = CERTIFICATE_FIELDS
        .iter()
        .zip(certificate_values(product))
        .find_map(|(key, value)| value.as_ref().map(|value| (*key, value)));
    if let Some((key, value)) = certificate {
        item.insert(key.into(), json!(value));
    }

    item.insert("owner_inn".into(), json!(document.owner_inn));
    item.insert("producer_inn".into(), json!(document.producer_inn));

    let production_date = product
        .production_date
        .as_ref()
        .unwrap_or(&document.production_date);
    item.insert("production_date".into(), json!(production_date));

    item.insert("tnved_code".into(), json!(product.tnved_code));

    if let Some(uit_code) = &product.uit_code {
        item.insert("uit_code".into(), json!(uit_code));
    } else if let Some(uitu_code) = &product.uitu_code {
        item.insert("uitu_code".into(), json!(uitu_code));
    }

    Value::Object(item)
}
