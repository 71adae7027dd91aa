//! API utilities for frontend-backend communication
//!
//! Every call goes to `admin-ajax.php` as a form-encoded POST with the
//! `action` and `nonce` fields, the payload is encoded with `serde_qs`
//! so that PHP receives arrays as `ids[0]=..&ids[1]=..`.

use super::config::AjaxConfig;
use contracts::shared::ajax::{decode_error_body, decode_response, AjaxAction};
use contracts::shared::error::ApiError;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Build the `action=..&nonce=..` prefix shared by every request
pub fn base_fields(action: AjaxAction, nonce: &str) -> String {
    format!(
        "action={}&nonce={}",
        urlencoding::encode(action.as_str()),
        urlencoding::encode(nonce)
    )
}

/// Build the full form body for an action with a payload
pub fn encode_form<P: Serialize>(
    action: AjaxAction,
    nonce: &str,
    payload: &P,
) -> Result<String, ApiError> {
    let fields = serde_qs::to_string(payload)
        .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?;
    let mut body = base_fields(action, nonce);
    if !fields.is_empty() {
        body.push('&');
        body.push_str(&fields);
    }
    Ok(body)
}

/// Клиент `admin-ajax.php`
#[derive(Debug, Clone)]
pub struct AjaxClient {
    config: AjaxConfig,
}

impl AjaxClient {
    pub fn new(config: AjaxConfig) -> Self {
        Self { config }
    }

    /// POST with a payload, returns `data` of the success envelope
    pub async fn post<P, T>(&self, action: AjaxAction, payload: &P) -> Result<T, ApiError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let body = encode_form(action, &self.config.nonce, payload)?;
        self.send(action, body).await
    }

    /// POST without a payload
    pub async fn post_empty<T: DeserializeOwned>(&self, action: AjaxAction) -> Result<T, ApiError> {
        let body = base_fields(action, &self.config.nonce);
        self.send(action, body).await
    }

    async fn send<T: DeserializeOwned>(&self, action: AjaxAction, body: String) -> Result<T, ApiError> {
        let controller = web_sys::AbortController::new()
            .map_err(|e| ApiError::Network(format!("{e:?}")))?;
        let signal = controller.signal();

        // Таймер живёт до конца чтения тела; drop отменяет его
        let timed_out = Rc::new(Cell::new(false));
        let _timer = {
            let timed_out = timed_out.clone();
            Timeout::new(self.config.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        log::debug!("POST {} action={}", self.config.ajax_url, action.as_str());

        let transport_error = |e: gloo_net::Error| {
            if timed_out.get() {
                ApiError::Timeout
            } else {
                ApiError::Network(e.to_string())
            }
        };

        let response = Request::post(&self.config.ajax_url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .credentials(web_sys::RequestCredentials::SameOrigin)
            .abort_signal(Some(&signal))
            .body(body)
            .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        let result = if response.ok() {
            decode_response(&text)
        } else {
            Err(decode_error_body(&text))
        };

        if let Err(e) = &result {
            log::error!("{} failed (HTTP {}): {}", action.as_str(), status, e);
        }
        result
    }
}
