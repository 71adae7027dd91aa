use crate::shared::api_utils::AjaxClient;
use async_trait::async_trait;
use contracts::domain::a001_product::{
    BulkActionRequest, BulkDeleteRequest, ImportProductsPayload, ImportResult, ParsedRow, Product,
};
use contracts::shared::ajax::{AjaxAction, MessageData};
use contracts::shared::error::ApiError;

/// Операции backend StockPilot, которые нужны экрану товаров
///
/// Браузер однопоточный, поэтому futures без `Send`.
#[async_trait(?Send)]
pub trait StockPilotApi {
    /// Список товаров
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Импорт разобранных строк CSV одним запросом
    async fn import_products(&self, rows: &[ParsedRow]) -> Result<ImportResult, ApiError>;

    /// Изменение одного поля у всех выбранных товаров
    async fn bulk_update(&self, request: &BulkActionRequest) -> Result<MessageData, ApiError>;

    /// Удаление выбранных товаров
    async fn bulk_delete(&self, request: &BulkDeleteRequest) -> Result<MessageData, ApiError>;
}

#[async_trait(?Send)]
impl StockPilotApi for AjaxClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.post_empty(AjaxAction::GetProducts).await
    }

    async fn import_products(&self, rows: &[ParsedRow]) -> Result<ImportResult, ApiError> {
        let payload = ImportProductsPayload::new(rows)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?;
        self.post(AjaxAction::ImportProducts, &payload).await
    }

    async fn bulk_update(&self, request: &BulkActionRequest) -> Result<MessageData, ApiError> {
        self.post(AjaxAction::BulkUpdate, &request.payload()).await
    }

    async fn bulk_delete(&self, request: &BulkDeleteRequest) -> Result<MessageData, ApiError> {
        self.post(AjaxAction::BulkDelete, request).await
    }
}
