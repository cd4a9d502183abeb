//! Request encoding.
//!
//! Operations describe *what* they send as a [`Payload`]; this module alone
//! decides *how* it goes on the wire for the configured [`WireFormat`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value, json};

use crate::config::WireFormat;
use crate::error::{WaapiError, WaapiResult};
use crate::http::{FilePart, HttpMethod, OutboundRequest, RequestBody};
use crate::models::{Contact, Credentials};

/// One logical value in a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Text(String),
    Number(f64),
    Contact(Contact),
    /// Template substitutions in order; keys are 1-based positions.
    Variables(Vec<String>),
}

/// Convention-neutral description of a request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Vec<(&'static str, PayloadValue)>,
    attachment: Option<FilePart>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, PayloadValue::Text(value.into())));
        self
    }

    #[must_use]
    pub fn optional_text(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.text(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn number(mut self, key: &'static str, value: f64) -> Self {
        self.fields.push((key, PayloadValue::Number(value)));
        self
    }

    #[must_use]
    pub fn contact(mut self, contact: Contact) -> Self {
        self.fields.push(("contact", PayloadValue::Contact(contact)));
        self
    }

    #[must_use]
    pub fn variables(mut self, params: Vec<String>) -> Self {
        self.fields.push(("variables", PayloadValue::Variables(params)));
        self
    }

    #[must_use]
    pub fn attachment(mut self, file: FilePart) -> Self {
        self.attachment = Some(file);
        self
    }
}

/// Field name for the template substitution at 1-based `position`.
pub fn variable_key(position: usize) -> String {
    format!("variables[{{{position}}}]")
}

/// Build the outbound request for one operation.
pub fn encode_request(
    credentials: &Credentials,
    wire_format: WireFormat,
    method: HttpMethod,
    path: &str,
    payload: Payload,
) -> WaapiResult<OutboundRequest> {
    let mut url = credentials.base_url.join(path).map_err(|e| {
        WaapiError::InvalidConfiguration(format!("cannot build URL for '{path}': {e}"))
    })?;

    let mut headers = Vec::new();
    let mut fields = Vec::new();
    if wire_format == WireFormat::FormBodyAuth {
        fields.push(("appkey".to_string(), credentials.app_key.clone()));
        fields.push(("authkey".to_string(), credentials.auth_key.clone()));
    } else {
        headers.push(("x-app-key".to_string(), credentials.app_key.clone()));
        headers.push(("x-auth-key".to_string(), credentials.auth_key.clone()));
    }

    let body = match (method, wire_format) {
        (HttpMethod::Get, _) => {
            fields.extend(flatten_fields(payload.fields));
            if !fields.is_empty() {
                url.query_pairs_mut().extend_pairs(&fields);
            }
            RequestBody::Empty
        }
        (HttpMethod::Post, WireFormat::FormBodyAuth) => {
            fields.extend(flatten_fields(payload.fields));
            match payload.attachment {
                Some(file) => RequestBody::Multipart { fields, file },
                None => RequestBody::Form(fields),
            }
        }
        (HttpMethod::Post, WireFormat::JsonHeaderAuth) => {
            headers.push(("content-type".to_string(), "application/json".to_string()));
            RequestBody::Json(json_document(payload))
        }
    };

    Ok(OutboundRequest {
        method,
        url,
        headers,
        body,
    })
}

/// Flatten payload values into ordered form fields.
fn flatten_fields(values: Vec<(&'static str, PayloadValue)>) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(values.len());
    for (key, value) in values {
        match value {
            PayloadValue::Text(text) => fields.push((key.to_string(), text)),
            PayloadValue::Number(number) => fields.push((key.to_string(), number.to_string())),
            PayloadValue::Contact(contact) => fields.extend(contact.to_form_fields()),
            PayloadValue::Variables(params) => fields.extend(
                params
                    .into_iter()
                    .enumerate()
                    .map(|(index, param)| (variable_key(index + 1), param)),
            ),
        }
    }
    fields
}

fn json_document(payload: Payload) -> Value {
    let mut doc = Map::new();
    for (key, value) in payload.fields {
        match value {
            PayloadValue::Text(text) => {
                doc.insert(key.to_string(), Value::String(text));
            }
            PayloadValue::Number(number) => {
                doc.insert(key.to_string(), json!(number));
            }
            PayloadValue::Contact(contact) => {
                doc.insert("vcard".to_string(), Value::String(contact.to_vcard()));
            }
            PayloadValue::Variables(params) => {
                for (index, param) in params.into_iter().enumerate() {
                    doc.insert(variable_key(index + 1), Value::String(param));
                }
            }
        }
    }

    if let Some(file) = payload.attachment {
        doc.insert(
            file.field.clone(),
            json!({
                "name": file.file_name,
                "mimetype": file.mime_type,
                "data": BASE64.encode(&file.content),
            }),
        );
    }

    Value::Object(doc)
}
