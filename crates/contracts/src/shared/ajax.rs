//! Конверт ответов WordPress `admin-ajax.php`
//!
//! `wp_send_json_success($data)` -> `{"success": true, "data": ...}`
//! `wp_send_json_error($data)` -> `{"success": false, "data": ...}`

use super::error::{ApiError, FALLBACK_ERROR_MESSAGE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Действия backend (параметр `action`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AjaxAction {
    GetProducts,
    ImportProducts,
    BulkUpdate,
    BulkDelete,
}

impl AjaxAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AjaxAction::GetProducts => "stockpilot_get_products",
            AjaxAction::ImportProducts => "stockpilot_import_products",
            AjaxAction::BulkUpdate => "stockpilot_bulk_update",
            AjaxAction::BulkDelete => "stockpilot_bulk_delete",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AjaxEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
}

impl AjaxEnvelope {
    /// Разворачивает конверт: `data` при успехе, иначе сообщение сервера
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Server(server_message(&self.data)));
        }
        serde_json::from_value(self.data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Данные ответа массовых действий
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub message: String,
}

/// Извлекает текст ошибки из `data`: строка или `{message}`
pub fn server_message(data: &Value) -> String {
    let message = match data {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("message").and_then(Value::as_str),
        _ => None,
    };
    match message.map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => FALLBACK_ERROR_MESSAGE.to_string(),
    }
}

/// Разбор тела ответа целиком
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: AjaxEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    envelope.into_result()
}

/// Ошибка по телу ответа с HTTP статусом не 2xx
///
/// WordPress отдаёт `wp_send_json_error` и с кодом 400/403, поэтому сначала
/// пробуем достать сообщение из конверта.
pub fn decode_error_body(body: &str) -> ApiError {
    let message = serde_json::from_str::<AjaxEnvelope>(body)
        .map(|envelope| server_message(&envelope.data))
        .unwrap_or_else(|_| FALLBACK_ERROR_MESSAGE.to_string());
    ApiError::Server(message)
}
