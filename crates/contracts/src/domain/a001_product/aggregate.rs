use serde::{Deserialize, Serialize};

/// Идентификатор товара (WordPress post ID)
pub type ProductId = i64;

/// Состояние товара в каталоге
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductState {
    #[default]
    Active,
    Inactive,
    Discontinued,
}

impl ProductState {
    pub const ALL: [ProductState; 3] = [
        ProductState::Active,
        ProductState::Inactive,
        ProductState::Discontinued,
    ];

    /// Код, который ожидает backend
    pub fn code(&self) -> &'static str {
        match self {
            ProductState::Active => "active",
            ProductState::Inactive => "inactive",
            ProductState::Discontinued => "discontinued",
        }
    }

    /// Подпись для интерфейса
    pub fn label(&self) -> &'static str {
        match self {
            ProductState::Active => "Actif",
            ProductState::Inactive => "Inactif",
            ProductState::Discontinued => "Arrêté",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

/// Строка списка товаров, как её отдаёт `stockpilot_get_products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub price_sale: f64,
    #[serde(default)]
    pub state: ProductState,
}

impl Product {
    /// Поиск без учёта регистра по имени, артикулу, категории и поставщику
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.reference, &self.category, &self.supplier]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 7,
            name: "Vis inox M6".to_string(),
            reference: "VIS-M6".to_string(),
            category: "Quincaillerie".to_string(),
            supplier: "Würth".to_string(),
            stock: 120,
            price_sale: 0.35,
            state: ProductState::Active,
        }
    }

    #[test]
    fn test_state_codes_round_trip() {
        for state in ProductState::ALL {
            assert_eq!(ProductState::from_code(state.code()), Some(state));
        }
        assert_eq!(ProductState::from_code("archived"), None);
    }

    #[test]
    fn test_matches_filter() {
        let p = product();
        assert!(p.matches_filter(""));
        assert!(p.matches_filter("vis-m6"));
        assert!(p.matches_filter("  QUINCAILLERIE "));
        assert!(p.matches_filter("würth"));
        assert!(!p.matches_filter("écrou"));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let p: Product = serde_json::from_str(r#"{"id": 3, "name": "Écrou"}"#).unwrap();
        assert_eq!(p.id, 3);
        assert_eq!(p.stock, 0);
        assert_eq!(p.state, ProductState::Active);
    }
}
