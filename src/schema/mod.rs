//! Declarative entity schemas.
//!
//! Every collection is described by one [`EntitySchema`]: the field table the
//! validator walks, the id policy, the display field used for sorting and the
//! messages returned to clients. The schemas also serialize as the metadata
//! served on `/schemas`.

mod entities;

pub use entities::*;

use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::Record;

/// UTC offset of America/Sao_Paulo (no DST since 2019).
const SAO_PAULO_UTC_OFFSET_SECS: i64 = -3 * 3600;

/// pt-BR locale date-time layout, e.g. `19/10/2026, 14:03:22`.
pub const PT_BR_DATETIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// How a record's `id` is assigned on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// A UUID v4 is generated; any `id` in the payload is ignored.
    ServerGenerated,
    /// The payload must carry a non-empty string `id` not used by another record.
    #[cfg_attr(not(test), allow(dead_code))]
    ClientSupplied,
}

/// JSON type a field value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    DateTime,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text | FieldKind::DateTime => value.is_string(),
        }
    }
}

/// Presence rule for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Requirement {
    /// Present, truthy and of the declared kind.
    NonEmpty,
    /// Present and of the declared kind; empty values allowed.
    Present,
    /// May be absent or null; otherwise of the declared kind.
    Optional,
}

/// Server-side value for a field the client left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultValue {
    /// Current wall-clock time in Sao Paulo, pt-BR formatted.
    LocalTimestamp,
}

impl DefaultValue {
    /// Compute the value at the moment of the request.
    pub fn resolve(self) -> Value {
        match self {
            DefaultValue::LocalTimestamp => Value::String(local_timestamp()),
        }
    }
}

/// Current time in America/Sao_Paulo formatted like a pt-BR locale string.
pub fn local_timestamp() -> String {
    let local = Utc::now().naive_utc() + Duration::seconds(SAO_PAULO_UTC_OFFSET_SECS);
    local.format(PT_BR_DATETIME_FORMAT).to_string()
}

/// One row of a schema's field table.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Returned as `erro` when the field fails validation.
    #[serde(skip)]
    pub message: &'static str,
}

impl FieldSpec {
    /// A non-empty text field.
    pub const fn required(name: &'static str, message: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            requirement: Requirement::NonEmpty,
            default: None,
            message,
        }
    }

    /// A field that must be present with the given kind, empty allowed.
    pub const fn present(name: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Present,
            default: None,
            message,
        }
    }

    /// An optional field.
    pub const fn optional(name: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Optional,
            default: None,
            message,
        }
    }

    pub const fn of_kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    pub const fn defaulting_to(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    fn is_satisfied_by(&self, payload: &Record) -> bool {
        let value = payload.get(self.name);
        match self.requirement {
            Requirement::NonEmpty => value.is_some_and(|v| is_truthy(v) && self.kind.accepts(v)),
            Requirement::Present => value.is_some_and(|v| self.kind.accepts(v)),
            Requirement::Optional => value.map_or(true, |v| v.is_null() || self.kind.accepts(v)),
        }
    }
}

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Client-facing messages of one entity.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub not_found: &'static str,
    pub created: &'static str,
    pub deleted: &'static str,
}

/// Declarative description of one entity collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    /// Route segment and file stem, e.g. `users`.
    pub entity: &'static str,
    /// Singular display name used in messages.
    pub label: &'static str,
    pub id_policy: IdPolicy,
    /// Field `List` sorts by, case-insensitively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    #[serde(skip)]
    pub messages: Messages,
}

impl EntitySchema {
    /// Route prefix, e.g. `/users`.
    pub fn path(&self) -> String {
        format!("/{}", self.entity)
    }

    /// Name of the backing JSON file, e.g. `users.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.entity)
    }

    pub fn not_found(&self) -> AppError {
        AppError::NotFound(self.messages.not_found.to_string())
    }

    /// Turn a request body into a validated payload with defaults applied.
    ///
    /// Defaults only fill fields that are absent (or `null`), then fields are
    /// checked in table order and the first failure is returned.
    pub fn prepare(&self, body: Value) -> Result<Record, AppError> {
        let Value::Object(mut payload) = body else {
            return Err(AppError::Validation(format!(
                "{} precisa ser um objeto JSON",
                self.label
            )));
        };

        self.apply_defaults(&mut payload);
        self.validate(&payload)?;
        Ok(payload)
    }

    fn apply_defaults(&self, payload: &mut Record) {
        for field in self.fields {
            let Some(default) = field.default else {
                continue;
            };
            if payload.get(field.name).map_or(true, Value::is_null) {
                payload.insert(field.name.to_string(), default.resolve());
            }
        }
    }

    /// Check every field rule, short-circuiting on the first failure.
    pub fn validate(&self, payload: &Record) -> Result<(), AppError> {
        match self.fields.iter().find(|f| !f.is_satisfied_by(payload)) {
            Some(field) => Err(AppError::Validation(field.message.to_string())),
            None => Ok(()),
        }
    }

    /// Values of the defaultable fields of a stored record.
    pub fn defaulted_values(&self, record: &Record) -> Record {
        self.fields
            .iter()
            .filter(|f| f.default.is_some())
            .filter_map(|f| {
                record
                    .get(f.name)
                    .map(|value| (f.name.to_string(), value.clone()))
            })
            .collect()
    }

    /// Sort records by the display field; a no-op for schemas without one.
    pub fn sort(&self, records: &mut [Record]) {
        let Some(field) = self.sort_by else {
            return;
        };
        records.sort_by_cached_key(|record| {
            record
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase()
        });
    }
}
