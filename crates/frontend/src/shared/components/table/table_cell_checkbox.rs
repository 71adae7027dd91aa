//! Чекбокс выбора товара в строке таблицы
//!
//! # Примеры
//!
//! ```ignore
//! <TableCellCheckbox
//!     item_id=product.id
//!     checked=Signal::derive(move || selection.is_selected(id))
//!     on_change=Callback::new(move |(id, checked)| selection.select(id, checked))
//! />
//! ```

use contracts::domain::a001_product::ProductId;
use leptos::prelude::*;
use thaw::*;

/// Чекбокс в ячейке таблицы
///
/// Клик не всплывает до строки.
#[component]
pub fn TableCellCheckbox(
    /// ID товара в строке
    item_id: ProductId,

    /// Выбран ли товар
    #[prop(into)]
    checked: Signal<bool>,

    /// Callback при изменении (item_id, checked)
    on_change: Callback<(ProductId, bool)>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run((item_id, event_target_checked(&ev)))
            />
        </TableCell>
    }
}
