use super::state::{create_state, save_view_mode, ViewMode};
use crate::domain::a001_product::api::StockPilotApi;
use crate::domain::a001_product::ui::bulk_bar::BulkActionBar;
use crate::domain::a001_product::ui::import::CsvImporter;
use crate::shared::api_utils::AjaxClient;
use crate::shared::components::table::{
    format_price, format_stock, TableCellCheckbox, TableHeaderCheckbox,
};
use crate::shared::components::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notification::NotificationService;
use crate::shared::selection::SelectionController;
use contracts::domain::a001_product::{Product, ProductId};
use leptos::prelude::*;
use thaw::*;

fn state_badge(product: &Product) -> impl IntoView {
    view! {
        <span class=format!("badge badge--{}", product.state.code())>
            {product.state.label()}
        </span>
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    let client = use_context::<AjaxClient>().expect("AjaxClient not provided in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");
    let selection =
        use_context::<SelectionController>().expect("SelectionController not provided in context");

    let client = StoredValue::new(client);
    let state = create_state();
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let show_import = RwSignal::new(false);

    // Счётчик перезагрузок: любое изменение данных увеличивает его
    let reload = RwSignal::new(0u32);
    let request_reload = Callback::new(move |_: ()| reload.update(|n| *n += 1));

    Effect::new(move |_| {
        reload.track();
        let client = client.get_value();
        set_is_loading.set(true);
        set_error.set(None);
        leptos::task::spawn_local(async move {
            match client.fetch_products().await {
                Ok(items) => {
                    log::debug!("Loaded {} product(s)", items.len());
                    state.update(|s| s.set_items(items));
                }
                Err(e) => {
                    log::error!("Failed to load products: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_is_loading.set(false);
        });
    });

    let visible = Memo::new(move |_| state.with(|s| s.visible()));
    let is_selection_mode = Signal::derive(move || selection.is_mode());
    let header_state = Signal::derive(move || state.with(|s| selection.header_state(s)));
    let all_visible_selected =
        Signal::derive(move || state.with(|s| selection.is_all_visible_selected(s)));

    let toggle_all_visible = move |check_all: bool| {
        state.with_untracked(|s| {
            if check_all {
                selection.select_all_visible(s);
            } else {
                selection.deselect_visible(s);
            }
        });
    };

    let set_view_mode = move |mode: ViewMode| {
        state.update(|s| s.view_mode = mode);
        save_view_mode(mode);
    };

    let on_item_check = Callback::new(move |(id, checked): (ProductId, bool)| {
        selection.select(id, checked);
    });

    let close_import = Callback::new(move |_: ()| show_import.set(false));

    let grid_view = move || {
        view! {
            <div class="product-grid">
                <For
                    each=move || visible.get()
                    key=|p: &Product| p.id
                    children=move |product: Product| {
                        let id = product.id;
                        let is_checked = move || selection.is_selected(id);
                        view! {
                            <div
                                class=move || if is_checked() {
                                    "product-card product-card--selected"
                                } else {
                                    "product-card"
                                }
                            >
                                <Show when=move || is_selection_mode.get()>
                                    <input
                                        type="checkbox"
                                        class="product-card__checkbox"
                                        prop:checked=is_checked
                                        on:change=move |ev| selection.select(id, event_target_checked(&ev))
                                    />
                                </Show>
                                <div class="product-card__header">
                                    {icon("products")}
                                    <span class="product-card__name">{product.name.clone()}</span>
                                </div>
                                <div class="product-card__reference">{product.reference.clone()}</div>
                                <div class="product-card__meta">
                                    <span>{product.category.clone()}</span>
                                    <span>{product.supplier.clone()}</span>
                                </div>
                                <div class="product-card__footer">
                                    <span class="product-card__stock">
                                        {format!("Stock : {}", format_stock(product.stock))}
                                    </span>
                                    <span class="product-card__price">{format_price(product.price_sale)}</span>
                                    {state_badge(&product)}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        }
    };

    let table_view = move || {
        view! {
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <Show when=move || is_selection_mode.get()>
                            <TableHeaderCheckbox
                                state=header_state
                                on_change=Callback::new(toggle_all_visible)
                            />
                        </Show>
                        <TableHeaderCell resizable=false min_width=200.0>"Nom"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=120.0>"Référence"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=140.0>"Catégorie"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=140.0>"Fournisseur"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=80.0>"Stock"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=100.0>"Prix de vente"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=100.0>"État"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || visible.get()
                        key=|p: &Product| p.id
                        children=move |product: Product| {
                            let id = product.id;
                            let badge_product = product.clone();
                            view! {
                                <TableRow>
                                    <Show when=move || is_selection_mode.get()>
                                        <TableCellCheckbox
                                            item_id=id
                                            checked=Signal::derive(move || selection.is_selected(id))
                                            on_change=on_item_check
                                        />
                                    </Show>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{product.name.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{product.reference.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{product.category.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{product.supplier.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell class="table__cell--number">
                                        {format_stock(product.stock)}
                                    </TableCell>
                                    <TableCell class="table__cell--number">
                                        {format_price(product.price_sale)}
                                    </TableCell>
                                    <TableCell>{state_badge(&badge_product)}</TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        }
    };

    view! {
        <div class="product-list">
            <div class="product-list__toolbar">
                <div class="product-list__search">
                    {icon("search")}
                    <input
                        type="text"
                        placeholder="Rechercher par nom, référence, catégorie, fournisseur..."
                        prop:value=move || state.with(|s| s.q.clone())
                        on:input=move |ev| state.update(|s| s.set_filter(event_target_value(&ev)))
                    />
                </div>

                <Space>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| set_view_mode(ViewMode::Grid)
                        disabled=Signal::derive(move || state.with(|s| s.view_mode == ViewMode::Grid))
                    >
                        {icon("grid")}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| set_view_mode(ViewMode::Table)
                        disabled=Signal::derive(move || state.with(|s| s.view_mode == ViewMode::Table))
                    >
                        {icon("list")}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| selection.toggle_mode()
                    >
                        {icon("check-square")}
                        {move || if is_selection_mode.get() { " Terminer la sélection" } else { " Sélectionner" }}
                    </Button>
                    <Show when=move || is_selection_mode.get()>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| toggle_all_visible(!all_visible_selected.get_untracked())
                        >
                            {move || if all_visible_selected.get() {
                                "Désélectionner la page"
                            } else {
                                "Tout sélectionner sur la page"
                            }}
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| request_reload.run(())
                        disabled=Signal::derive(move || is_loading.get())
                    >
                        {icon("refresh")}
                        " Actualiser"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| show_import.set(true)
                    >
                        {icon("upload")}
                        " Importer un CSV"
                    </Button>
                </Space>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || {
                if is_loading.get() && !state.with(|s| s.is_loaded) {
                    view! { <div class="loading">"Chargement..."</div> }.into_any()
                } else if visible.with(|v| v.is_empty()) {
                    let text = if state.with(|s| s.items.is_empty()) {
                        "Aucun produit. Importez un fichier CSV pour commencer."
                    } else {
                        "Aucun produit ne correspond à la recherche."
                    };
                    view! { <div class="product-list__empty">{text}</div> }.into_any()
                } else {
                    match state.with(|s| s.view_mode) {
                        ViewMode::Grid => grid_view().into_any(),
                        ViewMode::Table => table_view().into_any(),
                    }
                }
            }}

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                total_count=Signal::derive(move || state.with(|s| s.total_count()))
                page_size=Signal::derive(move || state.with(|s| s.page_size))
                on_page_change=Callback::new(move |page| state.update(|s| s.set_page(page)))
                on_page_size_change=Callback::new(move |size| state.update(|s| s.set_page_size(size)))
            />

            <BulkActionBar on_done=request_reload />

            <Show when=move || show_import.get()>
                <Modal title="Importer des produits" on_close=close_import>
                    <CsvImporter
                        on_close=close_import
                        on_imported=Callback::new(move |_: ()| {
                            notifications.success("Liste des produits mise à jour.");
                            request_reload.run(());
                        })
                    />
                </Modal>
            </Show>
        </div>
    }
}
