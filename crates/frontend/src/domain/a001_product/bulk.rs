//! Массовые действия над выбранными товарами
//!
//! Значение проверяется локально до запроса. Успех очищает выбор,
//! ошибка оставляет выбор как есть, чтобы пользователь мог повторить.

use super::api::StockPilotApi;
use crate::shared::selection::SelectionStore;
use contracts::domain::a001_product::{BulkActionRequest, BulkDeleteRequest, BulkField, BulkInput};
use contracts::shared::error::{ApiError, ValidationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl BulkError {
    pub fn user_message(&self) -> String {
        match self {
            BulkError::Validation(e) => e.to_string(),
            BulkError::Api(e) => e.user_message(),
        }
    }
}

/// Подтверждение необратимого действия
pub trait ConfirmGate {
    fn confirm(&self, message: &str) -> bool;
}

/// `window.confirm()` браузера
pub struct BrowserConfirm;

impl ConfirmGate for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

pub fn delete_confirmation(count: usize) -> String {
    format!(
        "Supprimer définitivement {} produit(s) ? Cette action est irréversible.",
        count
    )
}

/// Подтверждение всегда содержит число товаров; текст backend дописывается спереди
fn confirmation_text(server_message: &str, count: usize, fallback: String) -> String {
    let server_message = server_message.trim();
    if server_message.is_empty() {
        fallback
    } else {
        format!("{} ({} produit(s))", server_message, count)
    }
}

/// Применяет изменение поля ко всем выбранным товарам одним запросом
pub async fn apply_bulk_action<A, S>(
    api: &A,
    selection: &S,
    field: BulkField,
    input: BulkInput,
) -> Result<String, BulkError>
where
    A: StockPilotApi + ?Sized,
    S: SelectionStore + ?Sized,
{
    let ids = selection.selected_ids();
    let count = ids.len();
    let request = BulkActionRequest::new(ids, field, input)?;

    log::info!(
        "Bulk update {} on {} product(s)",
        field.code(),
        request.ids.len()
    );
    let response = api.bulk_update(&request).await?;
    selection.clear();

    Ok(confirmation_text(
        &response.message,
        count,
        format!("{} produit(s) mis à jour.", count),
    ))
}

/// Удаляет выбранные товары после подтверждения
///
/// `Ok(None)`, если пользователь отказался: запрос не отправляется.
pub async fn apply_bulk_delete<A, S, G>(
    api: &A,
    selection: &S,
    gate: &G,
) -> Result<Option<String>, BulkError>
where
    A: StockPilotApi + ?Sized,
    S: SelectionStore + ?Sized,
    G: ConfirmGate + ?Sized,
{
    let ids = selection.selected_ids();
    if ids.is_empty() {
        return Err(ValidationError::EmptySelection.into());
    }
    let count = ids.len();

    if !gate.confirm(&delete_confirmation(count)) {
        log::debug!("Bulk delete of {} product(s) declined", count);
        return Ok(None);
    }

    log::info!("Bulk delete of {} product(s)", count);
    let response = api.bulk_delete(&BulkDeleteRequest { ids }).await?;
    selection.clear();

    Ok(Some(confirmation_text(
        &response.message,
        count,
        format!("{} produit(s) supprimé(s).", count),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::selection::SelectionState;
    use async_trait::async_trait;
    use contracts::domain::a001_product::{ImportResult, ParsedRow, Product};
    use contracts::shared::ajax::MessageData;
    use std::cell::{Cell, RefCell};

    /// Подмена backend: записывает запросы и отвечает заданным результатом
    #[derive(Default)]
    struct RecordingApi {
        updates: RefCell<Vec<BulkActionRequest>>,
        deletes: RefCell<Vec<BulkDeleteRequest>>,
        fail_with: Option<ApiError>,
    }

    impl RecordingApi {
        fn failing(error: ApiError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        fn request_count(&self) -> usize {
            self.updates.borrow().len() + self.deletes.borrow().len()
        }

        fn reply(&self) -> Result<MessageData, ApiError> {
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(MessageData {
                    message: String::new(),
                }),
            }
        }
    }

    #[async_trait(?Send)]
    impl StockPilotApi for RecordingApi {
        async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
            Ok(vec![])
        }

        async fn import_products(&self, rows: &[ParsedRow]) -> Result<ImportResult, ApiError> {
            Ok(ImportResult {
                success_count: rows.len(),
                errors: vec![],
            })
        }

        async fn bulk_update(&self, request: &BulkActionRequest) -> Result<MessageData, ApiError> {
            self.updates.borrow_mut().push(request.clone());
            self.reply()
        }

        async fn bulk_delete(&self, request: &BulkDeleteRequest) -> Result<MessageData, ApiError> {
            self.deletes.borrow_mut().push(request.clone());
            self.reply()
        }
    }

    impl SelectionStore for RefCell<SelectionState> {
        fn selected_ids(&self) -> Vec<i64> {
            self.borrow().sorted_ids()
        }

        fn clear(&self) {
            self.borrow_mut().deselect_all();
        }
    }

    struct Answer {
        accept: bool,
        asked: Cell<usize>,
    }

    impl Answer {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                asked: Cell::new(0),
            }
        }
    }

    impl ConfirmGate for Answer {
        fn confirm(&self, _message: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.accept
        }
    }

    fn selection(ids: &[i64]) -> RefCell<SelectionState> {
        let mut state = SelectionState::new();
        state.toggle_mode();
        state.select_all_visible(ids);
        RefCell::new(state)
    }

    #[tokio::test]
    async fn test_delete_without_confirmation_sends_nothing() {
        let api = RecordingApi::default();
        let selected = selection(&[3, 1, 2]);
        let gate = Answer::new(false);

        let result = apply_bulk_delete(&api, &selected, &gate).await;

        assert_eq!(result, Ok(None));
        assert_eq!(gate.asked.get(), 1);
        assert_eq!(api.request_count(), 0);
        assert_eq!(selected.borrow().count(), 3);
    }

    #[tokio::test]
    async fn test_delete_with_confirmation_sends_one_request() {
        let api = RecordingApi::default();
        let selected = selection(&[3, 1, 2]);

        let result = apply_bulk_delete(&api, &selected, &Answer::new(true)).await;

        assert_eq!(
            result,
            Ok(Some("3 produit(s) supprimé(s).".to_string()))
        );
        assert_eq!(
            *api.deletes.borrow(),
            vec![BulkDeleteRequest { ids: vec![1, 2, 3] }]
        );
        assert!(api.updates.borrow().is_empty());
        assert!(selected.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_delete_of_empty_selection_is_refused() {
        let api = RecordingApi::default();
        let gate = Answer::new(true);
        let result = apply_bulk_delete(&api, &selection(&[]), &gate).await;
        assert_eq!(result, Err(BulkError::Validation(ValidationError::EmptySelection)));
        assert_eq!(gate.asked.get(), 0);
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_signed_stock_adjustment_is_sent() {
        let api = RecordingApi::default();
        let selected = selection(&[7, 9]);

        let message = apply_bulk_action(
            &api,
            &selected,
            BulkField::Stock,
            BulkInput::Text("+10".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(message, "2 produit(s) mis à jour.");
        let updates = api.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].ids, vec![7, 9]);
        assert_eq!(updates[0].payload().value, "+10");
        assert!(selected.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_unsigned_stock_value_is_rejected_locally() {
        let api = RecordingApi::default();
        let selected = selection(&[7, 9]);

        let result = apply_bulk_action(
            &api,
            &selected,
            BulkField::Stock,
            BulkInput::Text("10".to_string()),
        )
        .await;

        assert_eq!(
            result,
            Err(BulkError::Validation(ValidationError::StockAdjustment))
        );
        assert_eq!(api.request_count(), 0);
        assert_eq!(selected.borrow().count(), 2);
    }

    #[tokio::test]
    async fn test_server_failure_keeps_selection() {
        let api = RecordingApi::failing(ApiError::Server("Permission refusée".to_string()));
        let selected = selection(&[4, 5, 6]);

        let result = apply_bulk_action(
            &api,
            &selected,
            BulkField::State,
            BulkInput::Text("inactive".to_string()),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.user_message(), "Permission refusée");
        assert_eq!(api.request_count(), 1);
        assert_eq!(selected.borrow().count(), 3);
    }

    #[tokio::test]
    async fn test_timeout_keeps_selection_for_delete() {
        let api = RecordingApi::failing(ApiError::Timeout);
        let selected = selection(&[1]);

        let result = apply_bulk_delete(&api, &selected, &Answer::new(true)).await;

        assert_eq!(result, Err(BulkError::Api(ApiError::Timeout)));
        assert_eq!(selected.borrow().count(), 1);
    }

    #[tokio::test]
    async fn test_server_message_keeps_confirmation_count() {
        struct Chatty;

        #[async_trait(?Send)]
        impl StockPilotApi for Chatty {
            async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
                Ok(vec![])
            }
            async fn import_products(&self, _: &[ParsedRow]) -> Result<ImportResult, ApiError> {
                Err(ApiError::Timeout)
            }
            async fn bulk_update(&self, _: &BulkActionRequest) -> Result<MessageData, ApiError> {
                Ok(MessageData {
                    message: "2 produits déplacés vers Quincaillerie".to_string(),
                })
            }
            async fn bulk_delete(&self, _: &BulkDeleteRequest) -> Result<MessageData, ApiError> {
                Err(ApiError::Timeout)
            }
        }

        let message = apply_bulk_action(
            &Chatty,
            &selection(&[1, 2]),
            BulkField::Category,
            BulkInput::Text("14".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(message, "2 produits déplacés vers Quincaillerie (2 produit(s))");
    }
}
