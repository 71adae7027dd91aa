use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Модальное окно поверх списка
///
/// Закрывается по Escape, по клику на подложку и по крестику.
#[component]
pub fn Modal(
    #[prop(into)]
    title: String,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        <button
                            class="button button--icon modal__close"
                            title="Fermer"
                            on:click=move |_| on_close.run(())
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
