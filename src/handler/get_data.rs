// Get-by-id request handler
// validate -> process -> respond, with the phases enforced by the type system

use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

use super::response::ApiResponse;
use crate::data::{DataError, GetParams, Model, Record, RecordId};
use crate::error::ApiGetError;
use crate::registry::EntityResolver;

/// Message key returned when no record matches
pub const NOT_FOUND_MESSAGE: &str = "common.message.notFound";

/// Caller-supplied projection applied to a found record
pub type Formatter = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// Unvalidated request
pub struct GetData {
    entity: String,
    path_parameters: Vec<Value>,
    format: Option<Formatter>,
}

/// Request whose identifier and entity have been checked
pub struct ValidatedGetData {
    entity: String,
    id: RecordId,
    model: Arc<dyn Model>,
    format: Option<Formatter>,
}

impl GetData {
    pub fn new(entity: impl Into<String>, path_parameters: Vec<Value>) -> Self {
        Self {
            entity: entity.into(),
            path_parameters,
            format: None,
        }
    }

    /// Build from raw path segments, e.g. the tail of a URL path
    pub fn from_segments<I, S>(entity: impl Into<String>, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path_parameters = segments
            .into_iter()
            .map(|segment| Value::String(segment.into()))
            .collect();
        Self::new(entity, path_parameters)
    }

    #[must_use]
    pub fn with_format(mut self, format: Formatter) -> Self {
        self.format = Some(format);
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Check the identifier and resolve the entity's model.
    pub fn validate(self, resolver: &dyn EntityResolver) -> Result<ValidatedGetData, ApiGetError> {
        let id = extract_id(&self.path_parameters)?;

        let model = resolver
            .resolve(&self.entity)
            .map_err(|e| ApiGetError::invalid_entity(e.to_string()))?;

        tracing::debug!(entity = %self.entity, id = %id, "request validated");

        Ok(ValidatedGetData {
            entity: self.entity,
            id,
            model,
            format: self.format,
        })
    }
}

impl ValidatedGetData {
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Run the lookup and shape the response. Lookup errors are returned as-is.
    pub async fn process(self) -> Result<ApiResponse, DataError> {
        let params = GetParams::by_id(self.id);
        let mut records = self.model.get(&params).await?;

        let mut response = ApiResponse::default();

        if records.is_empty() {
            tracing::debug!(entity = %self.entity, id = %params.filters.id, "record not found");
            response
                .set_code(404)
                .set_body(json!({ "message": NOT_FOUND_MESSAGE }));
            return Ok(response);
        }

        let record = records.swap_remove(0);
        let record = match &self.format {
            Some(format) => format(record),
            None => record,
        };

        response.set_body(Value::Object(record));
        Ok(response)
    }
}

fn extract_id(path_parameters: &[Value]) -> Result<RecordId, ApiGetError> {
    let Some(first) = path_parameters.first() else {
        return Err(ApiGetError::invalid_request_data("No ID found in API path"));
    };

    if is_blank(first) {
        return Err(ApiGetError::invalid_request_data("No ID found in API path"));
    }

    RecordId::from_value(first)
        .ok_or_else(|| ApiGetError::invalid_request_data(format!("Invalid ID {first}")))
}

/// Falsy identifiers (`null`, `false`, `0`, `""`) count as absent
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        _ => false,
    }
}

impl fmt::Debug for GetData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetData")
            .field("entity", &self.entity)
            .field("path_parameters", &self.path_parameters)
            .field("format", &self.format.is_some())
            .finish()
    }
}

impl fmt::Debug for ValidatedGetData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedGetData")
            .field("entity", &self.entity)
            .field("id", &self.id)
            .field("format", &self.format.is_some())
            .finish_non_exhaustive()
    }
}
