//! Плавающая панель массовых действий
//!
//! Видна, пока выбран хотя бы один товар. Пока запрос в работе, все кнопки
//! заблокированы: второй клик не отправит второй запрос.

use crate::domain::a001_product::bulk::{apply_bulk_action, apply_bulk_delete, BrowserConfirm};
use crate::shared::api_utils::AjaxClient;
use crate::shared::icons::icon;
use crate::shared::notification::NotificationService;
use crate::shared::selection::SelectionController;
use contracts::domain::a001_product::{BulkField, BulkInput, ProductState, ReferenceMode};
use leptos::prelude::*;
use thaw::*;

/// Подсказка в поле значения
fn value_placeholder(field: BulkField) -> &'static str {
    match field {
        BulkField::Category => "ID de la catégorie",
        BulkField::Supplier => "ID du fournisseur",
        BulkField::Stock => "+10, -5, =20",
        BulkField::PricePurchase | BulkField::PriceSale => "0,00",
        BulkField::StockMin | BulkField::StockMax => "0",
        BulkField::Location => "Allée A, étagère 3",
        BulkField::Reference => "Texte",
        BulkField::State => "",
    }
}

/// Значение по умолчанию при смене поля
fn initial_value(field: BulkField) -> String {
    match field {
        BulkField::State => ProductState::default().code().to_string(),
        _ => String::new(),
    }
}

#[component]
pub fn BulkActionBar(
    /// Успешное действие: список нужно перезагрузить
    on_done: Callback<()>,
) -> impl IntoView {
    let client = use_context::<AjaxClient>().expect("AjaxClient not provided in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");
    let selection =
        use_context::<SelectionController>().expect("SelectionController not provided in context");

    let client = StoredValue::new(client);
    let field = RwSignal::new(BulkField::ALL[0]);
    let value = RwSignal::new(String::new());
    let reference_mode = RwSignal::new(ReferenceMode::default());
    let is_busy = RwSignal::new(false);

    let count = Signal::derive(move || selection.count());
    let busy = Signal::derive(move || is_busy.get());

    let handle_field_change = move |ev| {
        if let Some(f) = BulkField::from_code(&event_target_value(&ev)) {
            field.set(f);
            value.set(initial_value(f));
        }
    };

    let handle_apply = move |_| {
        if is_busy.get_untracked() {
            return;
        }
        let current = field.get_untracked();
        let input = match current {
            BulkField::Reference => BulkInput::Reference {
                mode: reference_mode.get_untracked(),
                text: value.get_untracked(),
            },
            _ => BulkInput::Text(value.get_untracked()),
        };

        is_busy.set(true);
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            match apply_bulk_action(&client, &selection, current, input).await {
                Ok(message) => {
                    notifications.success(message);
                    value.set(initial_value(current));
                    on_done.run(());
                }
                Err(e) => notifications.error(e.user_message()),
            }
            is_busy.set(false);
        });
    };

    let handle_delete = move |_| {
        if is_busy.get_untracked() {
            return;
        }
        is_busy.set(true);
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            match apply_bulk_delete(&client, &selection, &BrowserConfirm).await {
                Ok(Some(message)) => {
                    notifications.success(message);
                    on_done.run(());
                }
                Ok(None) => {}
                Err(e) => notifications.error(e.user_message()),
            }
            is_busy.set(false);
        });
    };

    let value_input = move || match field.get() {
        BulkField::State => view! {
            <select
                class="bulk-bar__value"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {ProductState::ALL
                    .into_iter()
                    .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        BulkField::Reference => view! {
            <select
                class="bulk-bar__mode"
                prop:value=move || reference_mode.get().code()
                on:change=move |ev| {
                    if let Some(mode) = ReferenceMode::from_code(&event_target_value(&ev)) {
                        reference_mode.set(mode);
                    }
                }
            >
                {ReferenceMode::ALL
                    .into_iter()
                    .map(|m| view! { <option value=m.code()>{m.label()}</option> })
                    .collect_view()}
            </select>
            <input
                type="text"
                class="bulk-bar__value"
                placeholder=value_placeholder(BulkField::Reference)
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any(),
        other => view! {
            <input
                type="text"
                class="bulk-bar__value"
                placeholder=value_placeholder(other)
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <Show when=move || { count.get() > 0 }>
            <div class="bulk-bar">
                <span class="bulk-bar__count">
                    {move || format!("{} sélectionné(s)", count.get())}
                </span>

                <select
                    class="bulk-bar__field"
                    prop:value=move || field.get().code()
                    on:change=handle_field_change
                    disabled=move || is_busy.get()
                >
                    {BulkField::ALL
                        .into_iter()
                        .map(|f| view! { <option value=f.code()>{f.label()}</option> })
                        .collect_view()}
                </select>

                {value_input}

                <Button appearance=ButtonAppearance::Primary on_click=handle_apply disabled=busy>
                    {icon("check-square")}
                    " Appliquer"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=handle_delete disabled=busy>
                    {icon("trash")}
                    " Supprimer"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| selection.deselect_all()
                    disabled=busy
                >
                    {icon("x")}
                    " Désélectionner"
                </Button>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::BulkValue;

    #[test]
    fn test_state_field_starts_with_valid_value() {
        let value = initial_value(BulkField::State);
        assert!(BulkValue::validate(BulkField::State, BulkInput::Text(value)).is_ok());
        assert_eq!(initial_value(BulkField::Stock), "");
    }

    #[test]
    fn test_stock_placeholder_shows_signed_syntax() {
        assert_eq!(value_placeholder(BulkField::Stock), "+10, -5, =20");
    }
}
