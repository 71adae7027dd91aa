//! Окно импорта товаров из CSV
//!
//! Файл разбирается в браузере, пользователь видит первые строки и
//! подтверждает отправку. Все строки уходят одним запросом.

use crate::domain::a001_product::api::StockPilotApi;
use crate::shared::api_utils::AjaxClient;
use crate::shared::csv_importer::{FinishOutcome, ImportPhase, ImportPipeline, PreviewModel};
use crate::shared::icons::icon;
use crate::shared::notification::NotificationService;
use contracts::domain::a001_product::ImportResult;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

const ACCEPTED_FILES: &str = ".csv,.txt";

pub fn results_title(result: &ImportResult) -> String {
    format!("{} produit(s) importé(s)", result.success_count)
}

fn preview_view(model: PreviewModel) -> impl IntoView {
    let more = model.more_notice();
    view! {
        <div class="csv-importer__preview">
            <div class="csv-importer__summary">
                <strong>{model.title()}</strong>
                <span class="csv-importer__fileinfo">
                    {format!("{} · séparateur : {}", model.file_name, model.delimiter.label())}
                </span>
            </div>
            <div class="csv-importer__table-wrap">
                <table class="csv-importer__table">
                    <thead>
                        <tr>
                            {model.headers.into_iter().map(|h| view! { <th>{h}</th> }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {model
                            .rows
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <tr>
                                        {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
            {more.map(|text| view! { <p class="csv-importer__more">{text}</p> })}
        </div>
    }
}

fn results_view(result: ImportResult) -> impl IntoView {
    let has_errors = !result.errors.is_empty();
    view! {
        <div class="csv-importer__results">
            <div class="warning-box warning-box--success">
                <span class="warning-box__text">{results_title(&result)}</span>
            </div>
            <Show when=move || has_errors>
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">"Erreurs :"</span>
                </div>
            </Show>
            <ul class="csv-importer__errors">
                {result.errors.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
            </ul>
        </div>
    }
}

async fn read_file(file: web_sys::File) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string()
        .ok_or_else(|| "Le fichier n'est pas un texte".to_string())
}

#[component]
pub fn CsvImporter(
    /// Закрыть окно
    on_close: Callback<()>,
    /// Импорт изменил данные, список нужно перезагрузить
    on_imported: Callback<()>,
) -> impl IntoView {
    let client = use_context::<AjaxClient>().expect("AjaxClient not provided in context");
    let notifications =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    let client = StoredValue::new(client);
    let pipeline = RwSignal::new(ImportPipeline::new());
    let is_drag_over = RwSignal::new(false);
    let is_submitting = Signal::derive(move || pipeline.with(|p| p.is_submitting()));

    let load_file = move |file: web_sys::File| {
        let name = file.name();
        leptos::task::spawn_local(async move {
            let text = match read_file(file).await {
                Ok(text) => text,
                Err(e) => {
                    log::error!("Failed to read {}: {}", name, e);
                    notifications.error(format!("Lecture de « {} » impossible.", name));
                    return;
                }
            };
            match pipeline.try_update(|p| p.load(&name, &text)) {
                Some(Ok(preview)) => log::info!("{}: {} row(s) parsed", name, preview.total),
                Some(Err(warning)) => notifications.warning(warning.to_string()),
                None => {}
            }
        });
    };

    let handle_file_select = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            load_file(file);
        }
    };

    let handle_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        is_drag_over.set(false);
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            load_file(file);
        }
    };

    let handle_confirm = move |_| {
        let Some((ticket, rows)) = pipeline.try_update(|p| p.begin_submit()).flatten() else {
            return;
        };
        let client = client.get_value();
        leptos::task::spawn_local(async move {
            let result = client.import_products(&rows).await;
            match pipeline.try_update(|p| p.finish(ticket, result)) {
                Some(FinishOutcome::Completed { reload }) => {
                    if reload {
                        on_imported.run(());
                    }
                }
                Some(FinishOutcome::Failed(e)) => notifications.error(e.user_message()),
                Some(FinishOutcome::Ignored) | None => {}
            }
        });
    };

    let handle_close = move |_| {
        pipeline.update(|p| p.reset());
        on_close.run(());
    };

    let handle_restart = move |_| pipeline.update(|p| p.reset());

    view! {
        <div class="csv-importer">
            {move || match pipeline.with(|p| p.phase().clone()) {
                ImportPhase::Idle => view! {
                    <label
                        class=move || if is_drag_over.get() {
                            "csv-importer__dropzone csv-importer__dropzone--active"
                        } else {
                            "csv-importer__dropzone"
                        }
                        on:dragover=move |ev: ev::DragEvent| {
                            ev.prevent_default();
                            is_drag_over.set(true);
                        }
                        on:dragleave=move |_| is_drag_over.set(false)
                        on:drop=handle_drop
                    >
                        {icon("upload")}
                        <span>"Glissez un fichier CSV ici ou cliquez pour le choisir"</span>
                        <input
                            type="file"
                            accept=ACCEPTED_FILES
                            class="hidden"
                            on:change=handle_file_select
                        />
                    </label>
                }
                .into_any(),
                ImportPhase::Previewing(model) | ImportPhase::Submitting(model) => view! {
                    {preview_view(model)}
                    <Flex justify=FlexJustify::End>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=handle_restart
                            disabled=is_submitting
                        >
                            "Annuler"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_confirm
                            disabled=is_submitting
                        >
                            {move || if is_submitting.get() { "Import en cours..." } else { "Importer" }}
                        </Button>
                    </Flex>
                }
                .into_any(),
                ImportPhase::Results(result) => view! {
                    {results_view(result)}
                    <Flex justify=FlexJustify::End>
                        <Button appearance=ButtonAppearance::Secondary on_click=handle_restart>
                            {icon("refresh")}
                            " Importer un autre fichier"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=handle_close>
                            "Fermer"
                        </Button>
                    </Flex>
                }
                .into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_title() {
        let result = ImportResult {
            success_count: 6,
            errors: vec!["Ligne 5 : SKU en double".to_string()],
        };
        assert_eq!(results_title(&result), "6 produit(s) importé(s)");
    }
}
