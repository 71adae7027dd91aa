use crate::shared::icons::icon;
use leptos::prelude::*;

const DEFAULT_PAGE_SIZES: [usize; 4] = [12, 24, 48, 96];

/// Навигация по страницам списка и выбор размера страницы
#[component]
pub fn PaginationControls(
    /// Текущая страница (с 0)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    /// Сколько товаров после фильтра
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)]
    page_size: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,

    /// По умолчанию [12, 24, 48, 96]
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| DEFAULT_PAGE_SIZES.to_vec());
    let is_first = move || current_page.get() == 0;
    let is_last = move || current_page.get() + 1 >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=is_first
                title="Première page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=is_first
                title="Page précédente"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "{} / {} ({} produit(s))",
                        current_page.get() + 1,
                        total_pages.get().max(1),
                        total_count.get(),
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page + 1 < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=is_last
                title="Page suivante"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total - 1);
                    }
                }
                disabled=is_last
                title="Dernière page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {format!("{} par page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
