//! Чекбокс "выбрать все на странице" в заголовке таблицы
//!
//! Три состояния: ничего не выбрано, выбрано всё видимое, выбрано частично.

use crate::shared::selection::HeaderCheckboxState;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
pub fn TableHeaderCheckbox(
    /// Состояние относительно видимых товаров
    #[prop(into)]
    state: Signal<HeaderCheckboxState>,

    /// true = выбрать видимые, false = снять выделение с видимых
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate нельзя задать атрибутом, только через DOM
    Effect::new(move |_| {
        let indeterminate = state.get() == HeaderCheckboxState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                title="Tout sélectionner sur la page"
                prop:checked=move || state.get() == HeaderCheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}
