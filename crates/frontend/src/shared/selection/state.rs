use contracts::domain::a001_product::ProductId;
use std::collections::HashSet;

/// Состояние чекбокса "выбрать все" в заголовке таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Режим выбора и набор выбранных товаров
///
/// Набор переживает смену фильтра и страницы, очищается при выходе из режима,
/// после успешного массового действия и по "снять выделение".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: bool,
    ids: HashSet<ProductId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mode(&self) -> bool {
        self.mode
    }

    /// Выключение режима снимает выделение
    pub fn toggle_mode(&mut self) {
        self.mode = !self.mode;
        if !self.mode {
            self.deselect_all();
        }
    }

    pub fn select(&mut self, id: ProductId, included: bool) {
        if included {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    /// Добавляет только товары текущей страницы (с учётом фильтра)
    pub fn select_all_visible(&mut self, visible: &[ProductId]) {
        self.ids.extend(visible.iter().copied());
    }

    /// Снимает выделение только с товаров текущей страницы
    pub fn deselect_visible(&mut self, visible: &[ProductId]) {
        for id in visible {
            self.ids.remove(id);
        }
    }

    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Плавающая панель действий видна, только если что-то выбрано
    pub fn is_bar_visible(&self) -> bool {
        !self.ids.is_empty()
    }

    pub fn is_all_visible_selected(&self, visible: &[ProductId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    pub fn header_state(&self, visible: &[ProductId]) -> HeaderCheckboxState {
        if visible.is_empty() {
            return HeaderCheckboxState::Unchecked;
        }
        let selected = visible.iter().filter(|id| self.ids.contains(id)).count();
        if selected == 0 {
            HeaderCheckboxState::Unchecked
        } else if selected == visible.len() {
            HeaderCheckboxState::Checked
        } else {
            HeaderCheckboxState::Indeterminate
        }
    }

    /// Идентификаторы по возрастанию, для тела запроса
    pub fn sorted_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_then_unselect_leaves_empty() {
        let mut state = SelectionState::new();
        state.select(5, true);
        assert!(state.is_selected(5));
        assert!(state.is_bar_visible());
        state.select(5, false);
        assert!(state.is_empty());
        assert!(!state.is_bar_visible());
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut state = SelectionState::new();
        state.select(5, true);
        state.select(5, true);
        assert_eq!(state.count(), 1);
        state.select(9, false);
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn test_select_all_visible_then_deselect_all() {
        let prior_states = [vec![], vec![1], vec![1, 2, 3, 40, 41]];
        for prior in prior_states {
            let mut state = SelectionState::new();
            for id in prior {
                state.select(id, true);
            }
            state.select_all_visible(&[1, 2, 3]);
            assert!(state.count() >= 3);
            state.deselect_all();
            assert!(state.is_empty());
        }
    }

    #[test]
    fn test_select_all_visible_keeps_other_pages() {
        let mut state = SelectionState::new();
        state.select(100, true);
        state.select_all_visible(&[1, 2]);
        assert_eq!(state.sorted_ids(), vec![1, 2, 100]);
        state.deselect_visible(&[1, 2]);
        assert_eq!(state.sorted_ids(), vec![100]);
    }

    #[test]
    fn test_mode_off_clears_selection() {
        let mut state = SelectionState::new();
        state.toggle_mode();
        assert!(state.is_mode());
        state.select_all_visible(&[4, 5]);
        state.toggle_mode();
        assert!(!state.is_mode());
        assert!(state.is_empty());
    }

    #[test]
    fn test_header_state() {
        let mut state = SelectionState::new();
        let visible = [1, 2, 3];
        assert_eq!(state.header_state(&visible), HeaderCheckboxState::Unchecked);
        state.select(2, true);
        assert_eq!(state.header_state(&visible), HeaderCheckboxState::Indeterminate);
        state.select_all_visible(&visible);
        assert_eq!(state.header_state(&visible), HeaderCheckboxState::Checked);
        assert_eq!(state.header_state(&[]), HeaderCheckboxState::Unchecked);
    }

    #[test]
    fn test_all_visible_selected_ignores_other_pages() {
        let mut state = SelectionState::new();
        assert!(!state.is_all_visible_selected(&[]));
        state.select_all_visible(&[1, 2]);
        assert!(state.is_all_visible_selected(&[1, 2]));
        assert!(!state.is_all_visible_selected(&[1, 2, 3]));
        state.select(3, true);
        state.select(2, false);
        assert!(!state.is_all_visible_selected(&[1, 2, 3]));
    }
}
