// Handler response
// Status code and JSON body filled in by the handler before HTTP conversion

use serde_json::Value;

/// Status code plus JSON body. Defaults to 200 with an empty body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    code: u16,
    body: Value,
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self {
            code: 200,
            body: Value::Null,
        }
    }
}

impl ApiResponse {
    pub fn set_code(&mut self, code: u16) -> &mut Self {
        self.code = code;
        self
    }

    pub fn set_body(&mut self, body: Value) -> &mut Self {
        self.body = body;
        self
    }

    pub const fn code(&self) -> u16 {
        self.code
    }

    pub const fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_parts(self) -> (u16, Value) {
        (self.code, self.body)
    }
}
