//! # Request Parameters
//!
//! Flattens a [`PropertyMap`] into the flat text → text form a REST endpoint
//! accepts as form fields or a query string.
//!
//! Conventions:
//! - text is sent verbatim, numbers as their JSON text, booleans as `true`/`false`;
//! - `null` is omitted;
//! - nested mappings become bracketed paths: `address[city]=Riga`;
//! - sequences use indexed brackets: `tags[0]=a&tags[1]=b`;
//! - empty mappings and sequences contribute nothing.

use crate::framework::transport::Parameters;
use crate::framework::value::PropertyMap;
use serde_json::Value;

/// Flattens properties into request parameters.
pub fn build_request_parameters(properties: &PropertyMap) -> Parameters {
    let mut parameters = Parameters::new();
    for (name, value) in properties {
        flatten(name.clone(), value, &mut parameters);
    }
    parameters
}

fn flatten(key: String, value: &Value, out: &mut Parameters) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => {
            out.insert(key, flag.to_string());
        }
        Value::Number(number) => {
            out.insert(key, number.to_string());
        }
        Value::String(text) => {
            out.insert(key, text.clone());
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{key}[{index}]"), item, out);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                flatten(format!("{key}[{name}]"), item, out);
            }
        }
    }
}

/// Renders parameters as `application/x-www-form-urlencoded` text.
pub fn encode_form(parameters: &Parameters) -> String {
    parameters
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
