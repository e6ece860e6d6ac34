//! Positional rdata → named [`RData`] conversion.
//!
//! Backends hand rdata over as an ordered list of strings (`["10", "mx.example.com."]`).
//! Each record type has a fixed field layout; numeric fields are parsed so the
//! resulting maps compare equal regardless of which backend produced them.

use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::types::RData;

#[derive(Clone, Copy)]
enum Field {
    Text(&'static str),
    Number(&'static str),
}

impl Field {
    const fn key(self) -> &'static str {
        match self {
            Self::Text(k) | Self::Number(k) => k,
        }
    }
}

fn layout(record_type: &str) -> Option<&'static [Field]> {
    use Field::{Number, Text};

    let fields: &'static [Field] = match record_type {
        "A" | "AAAA" => &[Text("address")],
        "CNAME" => &[Text("cname")],
        "MX" => &[Number("preference"), Text("exchange")],
        "NAPTR" => &[
            Number("order"),
            Number("preference"),
            Text("flags"),
            Text("services"),
            Text("regexp"),
            Text("replacement"),
        ],
        "NS" => &[Text("nsdname")],
        "PTR" => &[Text("ptrdname")],
        "SPF" | "TXT" => &[Text("txtdata")],
        "SRV" => &[
            Number("priority"),
            Number("weight"),
            Number("port"),
            Text("target"),
        ],
        _ => return None,
    };
    Some(fields)
}

/// Whether [`for_type_and_rdata`] knows the layout of `record_type`.
pub fn is_supported(record_type: &str) -> bool {
    layout(record_type).is_some()
}

/// Convert positional rdata of `record_type` into a named map.
///
/// `provider` only labels the error.
///
/// # Errors
///
/// - [`ProviderError::UnsupportedRecordType`] when the type has no known layout.
/// - [`ProviderError::InvalidArgument`] when the arity is wrong or a numeric field
///   does not parse.
pub fn for_type_and_rdata(provider: &str, record_type: &str, rdata: &[String]) -> Result<RData> {
    let Some(fields) = layout(record_type) else {
        return Err(ProviderError::UnsupportedRecordType {
            provider: provider.to_string(),
            record_type: record_type.to_string(),
        });
    };

    // TXT/SPF values may legitimately contain the separator the backend split on.
    if fields.len() == 1 && matches!(fields[0], Field::Text("txtdata")) && !rdata.is_empty() {
        return Ok(RData::from([(
            "txtdata".to_string(),
            Value::String(rdata.join(" ")),
        )]));
    }

    if rdata.len() != fields.len() {
        return Err(ProviderError::invalid_argument(
            provider,
            "rdata",
            format!(
                "{record_type} expects {} values ({}), got {}",
                fields.len(),
                fields
                    .iter()
                    .map(|f| f.key())
                    .collect::<Vec<_>>()
                    .join(", "),
                rdata.len()
            ),
        ));
    }

    fields
        .iter()
        .zip(rdata)
        .map(|(field, raw)| -> Result<(String, Value)> {
            let value = match field {
                Field::Text(_) => Value::String(raw.clone()),
                Field::Number(key) => raw.trim().parse::<u32>().map(Value::from).map_err(|_| {
                    ProviderError::invalid_argument(
                        provider,
                        "rdata",
                        format!("{record_type} {key} is not a number: {raw}"),
                    )
                })?,
            };
            Ok((field.key().to_string(), value))
        })
        .collect()
}
