use crate::domain::a001_product::ui::list::ProductList;
use crate::shared::api_utils::AjaxClient;
use crate::shared::config::AjaxConfig;
use crate::shared::notification::{NotificationHost, NotificationService};
use crate::shared::selection::SelectionController;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Настройки admin-ajax читаются один раз при старте
    provide_context(AjaxClient::new(AjaxConfig::load()));
    provide_context(NotificationService::new());
    provide_context(SelectionController::new());

    view! {
        <div class="stockpilot">
            <ProductList />
            <NotificationHost />
        </div>
    }
}
