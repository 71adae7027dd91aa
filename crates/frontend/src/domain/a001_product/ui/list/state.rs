use crate::shared::selection::SelectionView;
use contracts::domain::a001_product::{Product, ProductId};
use leptos::prelude::*;

const VIEW_MODE_KEY: &str = "stockpilot_products_view";

/// Отображение списка: карточки или таблица
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    Table,
}

impl ViewMode {
    pub fn code(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "table" => ViewMode::Table,
            _ => ViewMode::Grid,
        }
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the saved view mode from localStorage
pub fn load_view_mode() -> ViewMode {
    get_local_storage()
        .and_then(|s| s.get_item(VIEW_MODE_KEY).ok().flatten())
        .map(|code| ViewMode::from_code(&code))
        .unwrap_or_default()
}

/// Save the view mode to localStorage
pub fn save_view_mode(mode: ViewMode) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(VIEW_MODE_KEY, mode.code());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductListState {
    pub items: Vec<Product>,

    // filters
    pub q: String,

    // pagination
    pub page: usize,
    pub page_size: usize,

    pub view_mode: ViewMode,
    pub is_loaded: bool,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            q: String::new(),
            page: 0,
            page_size: 24,
            view_mode: ViewMode::Grid,
            is_loaded: false,
        }
    }
}

impl ProductListState {
    pub fn filtered(&self) -> Vec<&Product> {
        self.items
            .iter()
            .filter(|p| p.matches_filter(&self.q))
            .collect()
    }

    pub fn total_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn total_pages(&self) -> usize {
        let total = self.total_count();
        if total == 0 {
            0
        } else {
            total.div_ceil(self.page_size.max(1))
        }
    }

    /// Текущая страница после фильтра
    pub fn visible(&self) -> Vec<Product> {
        let page_size = self.page_size.max(1);
        self.filtered()
            .into_iter()
            .skip(self.page * page_size)
            .take(page_size)
            .cloned()
            .collect()
    }

    /// Новый фильтр сбрасывает страницу
    pub fn set_filter(&mut self, q: String) {
        self.q = q;
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages().saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Новые данные после перезагрузки: страница остаётся, если ещё существует
    pub fn set_items(&mut self, items: Vec<Product>) {
        self.items = items;
        self.is_loaded = true;
        let page = self.page;
        self.set_page(page);
    }
}

impl SelectionView for ProductListState {
    fn visible_ids(&self) -> Vec<ProductId> {
        self.visible().iter().map(|p| p.id).collect()
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState {
        view_mode: load_view_mode(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::ProductState;

    fn product(id: ProductId, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            reference: format!("REF-{id}"),
            category: String::new(),
            supplier: String::new(),
            stock: 0,
            price_sale: 0.0,
            state: ProductState::Active,
        }
    }

    fn state_with(n: i64, page_size: usize) -> ProductListState {
        let mut state = ProductListState {
            page_size,
            ..Default::default()
        };
        let names = ["Vis", "Écrou"];
        state.set_items(
            (1..=n)
                .map(|id| product(id, names[(id % 2) as usize]))
                .collect(),
        );
        state
    }

    #[test]
    fn test_visible_ids_are_current_page_only() {
        let mut state = state_with(10, 4);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.visible_ids(), vec![1, 2, 3, 4]);
        state.set_page(2);
        assert_eq!(state.visible_ids(), vec![9, 10]);
        state.set_page(99);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_visible_ids_respect_filter() {
        let mut state = state_with(10, 4);
        state.set_page(1);
        state.set_filter("écrou".to_string());
        assert_eq!(state.page, 0);
        assert_eq!(state.visible_ids(), vec![1, 3, 5, 7]);
        assert_eq!(state.total_count(), 5);
        assert_eq!(
            state.visible().iter().map(|p| p.id).collect::<Vec<_>>(),
            state.visible_ids()
        );
    }

    #[test]
    fn test_reload_keeps_page_when_possible() {
        let mut state = state_with(10, 4);
        state.set_page(2);
        state.set_items((1..=6).map(|id| product(id, "Vis")).collect());
        assert_eq!(state.page, 1);
        state.set_items(vec![]);
        assert_eq!(state.page, 0);
        assert!(state.visible_ids().is_empty());
    }

    #[test]
    fn test_view_mode_codes() {
        assert_eq!(ViewMode::from_code("table"), ViewMode::Table);
        assert_eq!(ViewMode::from_code("grid"), ViewMode::Grid);
        assert_eq!(ViewMode::from_code("???"), ViewMode::Grid);
    }
}
