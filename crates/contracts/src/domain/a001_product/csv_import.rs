use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Строка CSV файла: заголовок колонки -> значение (обрезанное)
pub type ParsedRow = HashMap<String, String>;

/// Пропущенная строка файла (число полей не совпало с заголовком)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSkip {
    /// Номер строки в файле, начиная с 1
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

/// Результат импорта, который возвращает backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub success_count: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ImportResult {
    /// Нужно ли перезагрузить список товаров
    pub fn requires_reload(&self) -> bool {
        self.success_count > 0
    }
}

/// Тело запроса `stockpilot_import_products`: строки передаются одной JSON строкой
#[derive(Debug, Clone, Serialize)]
pub struct ImportProductsPayload {
    pub products: String,
}

impl ImportProductsPayload {
    pub fn new(rows: &[ParsedRow]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            products: serde_json::to_string(rows)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_encodes_rows_as_json_string() {
        let mut row = ParsedRow::new();
        row.insert("sku".to_string(), "A-1".to_string());
        let payload = ImportProductsPayload::new(&[row]).unwrap();
        assert_eq!(payload.products, r#"[{"sku":"A-1"}]"#);
    }

    #[test]
    fn test_import_result_defaults() {
        let result: ImportResult = serde_json::from_str(r#"{"success_count": 4}"#).unwrap();
        assert_eq!(result.success_count, 4);
        assert!(result.errors.is_empty());
        assert!(result.requires_reload());

        let nothing: ImportResult =
            serde_json::from_str(r#"{"success_count": 0, "errors": ["Ligne 2 : SKU manquant"]}"#)
                .unwrap();
        assert!(!nothing.requires_reload());
        assert_eq!(nothing.errors.len(), 1);
    }
}
