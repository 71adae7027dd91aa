use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Имя глобального объекта, который страница WordPress отдаёт через `wp_localize_script`
pub const CONFIG_GLOBAL: &str = "stockpilotAjax";

pub const DEFAULT_AJAX_URL: &str = "/wp-admin/admin-ajax.php";

/// Бюджет ожидания ответа, мс
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

/// Параметры обращения к `admin-ajax.php`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AjaxConfig {
    #[serde(default = "default_ajax_url", alias = "ajaxUrl")]
    pub ajax_url: String,
    /// Anti-CSRF токен (`wp_create_nonce('stockpilot_nonce')`)
    #[serde(default)]
    pub nonce: String,
    #[serde(default = "default_timeout_ms", alias = "timeoutMs")]
    pub timeout_ms: u32,
}

fn default_ajax_url() -> String {
    DEFAULT_AJAX_URL.to_string()
}

fn default_timeout_ms() -> u32 {
    DEFAULT_TIMEOUT_MS
}

impl Default for AjaxConfig {
    fn default() -> Self {
        Self {
            ajax_url: default_ajax_url(),
            nonce: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AjaxConfig {
    /// Load configuration from the page
    ///
    /// Search order:
    /// 1. `window.stockpilotAjax` localized by the plugin
    /// 2. Falls back to the default config (nonce is empty, every request will be rejected)
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            log::warn!("No window, using default AJAX config");
            return Self::default();
        };

        let value = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => {
                log::warn!("{} not found on window, using default AJAX config", CONFIG_GLOBAL);
                return Self::default();
            }
        };

        match serde_wasm_bindgen::from_value::<AjaxConfig>(value) {
            Ok(config) => {
                log::info!("AJAX config loaded: {}", config.ajax_url);
                config
            }
            Err(e) => {
                log::error!("Invalid {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: AjaxConfig = serde_json::from_str(r#"{"nonce": "a1b2c3"}"#).unwrap();
        assert_eq!(config.ajax_url, DEFAULT_AJAX_URL);
        assert_eq!(config.nonce, "a1b2c3");
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_camel_case_aliases() {
        let config: AjaxConfig = serde_json::from_str(
            r#"{"ajaxUrl": "https://shop.example/wp-admin/admin-ajax.php", "nonce": "n", "timeoutMs": 5000}"#,
        )
        .unwrap();
        assert_eq!(config.ajax_url, "https://shop.example/wp-admin/admin-ajax.php");
        assert_eq!(config.timeout_ms, 5000);
    }
}
