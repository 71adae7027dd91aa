pub mod state;

pub use state::{HeaderCheckboxState, SelectionState};

use contracts::domain::a001_product::ProductId;
use leptos::prelude::*;

/// Представление списка (сетка или таблица), из которого выбирают товары
pub trait SelectionView {
    /// Товары текущей страницы после фильтрации, в порядке отображения
    fn visible_ids(&self) -> Vec<ProductId>;
}

/// Хранилище выбора, с которым работают массовые действия
pub trait SelectionStore {
    fn selected_ids(&self) -> Vec<ProductId>;
    fn clear(&self);
}

/// Контроллер выбора: создаётся один раз в `App` и раздаётся через context
#[derive(Clone, Copy)]
pub struct SelectionController {
    state: RwSignal<SelectionState>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SelectionState::new()),
        }
    }

    pub fn is_mode(&self) -> bool {
        self.state.with(|s| s.is_mode())
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.state.with(|s| s.is_selected(id))
    }

    pub fn count(&self) -> usize {
        self.state.with(|s| s.count())
    }

    pub fn is_all_visible_selected(&self, view: &impl SelectionView) -> bool {
        let visible = view.visible_ids();
        self.state.with(|s| s.is_all_visible_selected(&visible))
    }

    pub fn header_state(&self, view: &impl SelectionView) -> HeaderCheckboxState {
        let visible = view.visible_ids();
        self.state.with(|s| s.header_state(&visible))
    }

    pub fn toggle_mode(&self) {
        self.state.update(|s| s.toggle_mode());
        log::debug!("Selection mode: {}", self.state.with_untracked(|s| s.is_mode()));
    }

    pub fn select(&self, id: ProductId, included: bool) {
        self.state.update(|s| s.select(id, included));
    }

    pub fn select_all_visible(&self, view: &impl SelectionView) {
        let visible = view.visible_ids();
        self.state.update(|s| s.select_all_visible(&visible));
    }

    pub fn deselect_visible(&self, view: &impl SelectionView) {
        let visible = view.visible_ids();
        self.state.update(|s| s.deselect_visible(&visible));
    }

    pub fn deselect_all(&self) {
        self.state.update(|s| s.deselect_all());
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore for SelectionController {
    fn selected_ids(&self) -> Vec<ProductId> {
        self.state.with_untracked(|s| s.sorted_ids())
    }

    fn clear(&self) {
        self.deselect_all();
    }
}
