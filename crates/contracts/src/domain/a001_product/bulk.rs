use super::aggregate::{ProductId, ProductState};
use crate::shared::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Поле, которое меняет массовое действие (`update_action`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkField {
    Category,
    Supplier,
    Stock,
    State,
    PricePurchase,
    PriceSale,
    StockMin,
    StockMax,
    Location,
    Reference,
}

impl BulkField {
    pub const ALL: [BulkField; 10] = [
        BulkField::Category,
        BulkField::Supplier,
        BulkField::Stock,
        BulkField::State,
        BulkField::PricePurchase,
        BulkField::PriceSale,
        BulkField::StockMin,
        BulkField::StockMax,
        BulkField::Location,
        BulkField::Reference,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BulkField::Category => "category",
            BulkField::Supplier => "supplier",
            BulkField::Stock => "stock",
            BulkField::State => "state",
            BulkField::PricePurchase => "price_purchase",
            BulkField::PriceSale => "price_sale",
            BulkField::StockMin => "stock_min",
            BulkField::StockMax => "stock_max",
            BulkField::Location => "location",
            BulkField::Reference => "reference",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BulkField::Category => "Catégorie",
            BulkField::Supplier => "Fournisseur",
            BulkField::Stock => "Stock",
            BulkField::State => "État",
            BulkField::PricePurchase => "Prix d'achat",
            BulkField::PriceSale => "Prix de vente",
            BulkField::StockMin => "Stock minimum",
            BulkField::StockMax => "Stock maximum",
            BulkField::Location => "Emplacement",
            BulkField::Reference => "Référence",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOp {
    Add,
    Subtract,
    Set,
}

impl StockOp {
    fn sign(&self) -> char {
        match self {
            StockOp::Add => '+',
            StockOp::Subtract => '-',
            StockOp::Set => '=',
        }
    }
}

/// Изменение остатка: `+N` прибавить, `-N` вычесть, `=N` установить
///
/// Количество хранится строкой цифр как введено: длина числа не ограничена.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub op: StockOp,
    pub amount: String,
}

impl StockAdjustment {
    /// Принимает только `^[+\-=]\d+$`
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut chars = raw.chars();
        let op = match chars.next() {
            Some('+') => StockOp::Add,
            Some('-') => StockOp::Subtract,
            Some('=') => StockOp::Set,
            _ => return Err(ValidationError::StockAdjustment),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::StockAdjustment);
        }
        Ok(Self {
            op,
            amount: digits.to_string(),
        })
    }

    pub fn encode(&self) -> String {
        format!("{}{}", self.op.sign(), self.amount)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMode {
    #[default]
    Prefix,
    Suffix,
    Replace,
}

impl ReferenceMode {
    pub const ALL: [ReferenceMode; 3] = [
        ReferenceMode::Prefix,
        ReferenceMode::Suffix,
        ReferenceMode::Replace,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReferenceMode::Prefix => "prefix",
            ReferenceMode::Suffix => "suffix",
            ReferenceMode::Replace => "replace",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReferenceMode::Prefix => "Ajouter un préfixe",
            ReferenceMode::Suffix => "Ajouter un suffixe",
            ReferenceMode::Replace => "Remplacer",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEdit {
    pub mode: ReferenceMode,
    pub text: String,
}

/// Значение, введённое пользователем в панели массовых действий
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkInput {
    Text(String),
    Reference { mode: ReferenceMode, text: String },
}

/// Проверенное значение массового действия
#[derive(Debug, Clone, PartialEq)]
pub enum BulkValue {
    Text(String),
    Stock(StockAdjustment),
    Reference(ReferenceEdit),
}

impl BulkValue {
    /// Проверка значения под конкретное поле
    pub fn validate(field: BulkField, input: BulkInput) -> Result<Self, ValidationError> {
        let raw = match input {
            BulkInput::Reference { .. } if field != BulkField::Reference => {
                return Err(ValidationError::UnexpectedReference(field.label()));
            }
            BulkInput::Reference { mode, text } => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(ValidationError::EmptyReference);
                }
                return Ok(BulkValue::Reference(ReferenceEdit { mode, text }));
            }
            BulkInput::Text(raw) => raw.trim().to_string(),
        };

        match field {
            BulkField::Stock => Ok(BulkValue::Stock(StockAdjustment::parse(&raw)?)),
            BulkField::PricePurchase | BulkField::PriceSale => {
                let price = parse_decimal(&raw, field.label())?;
                Ok(BulkValue::Text(price))
            }
            BulkField::StockMin | BulkField::StockMax => {
                let qty = parse_quantity(&raw, field.label())?;
                Ok(BulkValue::Text(qty.to_string()))
            }
            BulkField::State => ProductState::from_code(&raw)
                .map(|s| BulkValue::Text(s.code().to_string()))
                .ok_or(ValidationError::UnknownState(raw)),
            BulkField::Category | BulkField::Supplier => match raw.parse::<u64>() {
                Ok(id) if id > 0 => Ok(BulkValue::Text(id.to_string())),
                _ => Err(ValidationError::InvalidIdentifier(field.label())),
            },
            BulkField::Location => Ok(BulkValue::Text(raw)),
            BulkField::Reference => {
                if raw.is_empty() {
                    return Err(ValidationError::EmptyReference);
                }
                Ok(BulkValue::Reference(ReferenceEdit {
                    mode: ReferenceMode::Replace,
                    text: raw,
                }))
            }
        }
    }

    /// Строковое значение параметра `value`
    pub fn encode(&self) -> String {
        match self {
            BulkValue::Text(text) => text.clone(),
            BulkValue::Stock(adjustment) => adjustment.encode(),
            BulkValue::Reference(edit) => {
                // Два строковых поля: сериализация не может упасть
                serde_json::to_string(edit).unwrap_or_default()
            }
        }
    }
}

/// Десятичное число >= 0; запятая допускается как разделитель
fn parse_decimal(raw: &str, label: &'static str) -> Result<String, ValidationError> {
    let normalized = raw.replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::NotANumber(label))?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(label));
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(label));
    }
    Ok(normalized)
}

fn parse_quantity(raw: &str, label: &'static str) -> Result<u64, ValidationError> {
    if let Some(rest) = raw.strip_prefix('-') {
        if rest.parse::<u64>().is_ok() {
            return Err(ValidationError::Negative(label));
        }
    }
    raw.parse::<u64>()
        .map_err(|_| ValidationError::NotANumber(label))
}

/// Массовое изменение одного поля
#[derive(Debug, Clone, PartialEq)]
pub struct BulkActionRequest {
    pub ids: Vec<ProductId>,
    pub field: BulkField,
    pub value: BulkValue,
}

impl BulkActionRequest {
    pub fn new(
        ids: Vec<ProductId>,
        field: BulkField,
        input: BulkInput,
    ) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::EmptySelection);
        }
        let value = BulkValue::validate(field, input)?;
        Ok(Self { ids, field, value })
    }

    pub fn payload(&self) -> BulkUpdatePayload {
        BulkUpdatePayload {
            ids: self.ids.clone(),
            update_action: self.field,
            value: self.value.encode(),
        }
    }
}

/// Тело запроса `stockpilot_bulk_update`
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpdatePayload {
    pub ids: Vec<ProductId>,
    pub update_action: BulkField,
    pub value: String,
}

/// Тело запроса `stockpilot_bulk_delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<ProductId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> BulkInput {
        BulkInput::Text(s.to_string())
    }

    #[test]
    fn test_stock_adjustment_accepts_signed_values() {
        assert_eq!(
            StockAdjustment::parse("+10").unwrap(),
            StockAdjustment {
                op: StockOp::Add,
                amount: "10".to_string()
            }
        );
        assert_eq!(StockAdjustment::parse("-3").unwrap().op, StockOp::Subtract);
        assert_eq!(StockAdjustment::parse("=0").unwrap().encode(), "=0");
    }

    #[test]
    fn test_stock_adjustment_keeps_long_amounts() {
        let adjustment = StockAdjustment::parse("+99999999999999999999").unwrap();
        assert_eq!(adjustment.op, StockOp::Add);
        assert_eq!(adjustment.encode(), "+99999999999999999999");
        assert_eq!(StockAdjustment::parse("=007").unwrap().encode(), "=007");
    }

    #[test]
    fn test_reference_input_only_for_reference_field() {
        let edit = || BulkInput::Reference {
            mode: ReferenceMode::Prefix,
            text: "-5".to_string(),
        };
        for field in BulkField::ALL {
            let result = BulkValue::validate(field, edit());
            if field == BulkField::Reference {
                assert!(result.is_ok());
            } else {
                assert_eq!(
                    result,
                    Err(ValidationError::UnexpectedReference(field.label())),
                    "{}",
                    field.code()
                );
            }
        }
        assert_eq!(
            BulkActionRequest::new(vec![1], BulkField::PriceSale, edit()).map(|_| ()),
            Err(ValidationError::UnexpectedReference("Prix de vente"))
        );
    }

    #[test]
    fn test_stock_adjustment_rejects_missing_sign() {
        for raw in ["10", "+", "", "+1.5", "++2", "=-4", "+ 3", "x5"] {
            assert_eq!(
                StockAdjustment::parse(raw),
                Err(ValidationError::StockAdjustment),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_prices_must_be_non_negative_numbers() {
        assert_eq!(
            BulkValue::validate(BulkField::PriceSale, text("12,50")).unwrap(),
            BulkValue::Text("12.50".to_string())
        );
        assert_eq!(
            BulkValue::validate(BulkField::PricePurchase, text("-1")),
            Err(ValidationError::Negative("Prix d'achat"))
        );
        assert_eq!(
            BulkValue::validate(BulkField::PriceSale, text("abc")),
            Err(ValidationError::NotANumber("Prix de vente"))
        );
        assert!(BulkValue::validate(BulkField::PriceSale, text("NaN")).is_err());
    }

    #[test]
    fn test_stock_thresholds_are_integers() {
        assert_eq!(
            BulkValue::validate(BulkField::StockMin, text(" 5 ")).unwrap(),
            BulkValue::Text("5".to_string())
        );
        assert_eq!(
            BulkValue::validate(BulkField::StockMax, text("-2")),
            Err(ValidationError::Negative("Stock maximum"))
        );
        assert_eq!(
            BulkValue::validate(BulkField::StockMax, text("2.5")),
            Err(ValidationError::NotANumber("Stock maximum"))
        );
    }

    #[test]
    fn test_state_must_be_known() {
        assert_eq!(
            BulkValue::validate(BulkField::State, text("inactive")).unwrap(),
            BulkValue::Text("inactive".to_string())
        );
        assert_eq!(
            BulkValue::validate(BulkField::State, text("archived")),
            Err(ValidationError::UnknownState("archived".to_string()))
        );
    }

    #[test]
    fn test_category_requires_positive_id() {
        assert!(BulkValue::validate(BulkField::Category, text("12")).is_ok());
        assert_eq!(
            BulkValue::validate(BulkField::Supplier, text("0")),
            Err(ValidationError::InvalidIdentifier("Fournisseur"))
        );
    }

    #[test]
    fn test_reference_edit_encoding() {
        let value = BulkValue::validate(
            BulkField::Reference,
            BulkInput::Reference {
                mode: ReferenceMode::Suffix,
                text: " -2024 ".to_string(),
            },
        )
        .unwrap();
        assert_eq!(value.encode(), r#"{"mode":"suffix","text":"-2024"}"#);

        assert_eq!(
            BulkValue::validate(
                BulkField::Reference,
                BulkInput::Reference {
                    mode: ReferenceMode::Prefix,
                    text: "   ".to_string(),
                },
            ),
            Err(ValidationError::EmptyReference)
        );
    }

    #[test]
    fn test_request_requires_ids() {
        assert_eq!(
            BulkActionRequest::new(vec![], BulkField::Stock, text("+1")),
            Err(ValidationError::EmptySelection)
        );
        let request = BulkActionRequest::new(vec![4, 9], BulkField::Stock, text("+10")).unwrap();
        let payload = request.payload();
        assert_eq!(payload.ids, vec![4, 9]);
        assert_eq!(payload.update_action, BulkField::Stock);
        assert_eq!(payload.value, "+10");
    }

    #[test]
    fn test_field_codes_round_trip() {
        for field in BulkField::ALL {
            assert_eq!(BulkField::from_code(field.code()), Some(field));
        }
        assert_eq!(
            serde_json::to_string(&BulkField::PricePurchase).unwrap(),
            r#""price_purchase""#
        );
    }
}
