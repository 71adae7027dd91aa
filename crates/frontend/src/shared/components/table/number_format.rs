//! Форматирование чисел во французской записи

/// Разделитель тысяч: узкий неразрывный пробел
const THOUSANDS_SEPARATOR: char = '\u{202f}';

/// Число с разделителем тысяч и запятой перед дробной частью
///
/// # Примеры
///
/// ```
/// use stockpilot_frontend::shared::components::table::format_number_with_decimals;
///
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1\u{202f}234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{},{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Цена продажи: 2 знака и символ евро
pub fn format_price(value: f64) -> String {
    format!("{}\u{a0}€", format_number_with_decimals(value, 2))
}

pub fn format_stock(value: i64) -> String {
    format_number_with_decimals(value as f64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.56), "1\u{202f}234,56\u{a0}€");
        assert_eq!(format_price(0.0), "0,00\u{a0}€");
        assert_eq!(format_price(-1234.5), "-1\u{202f}234,50\u{a0}€");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1\u{202f}235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1\u{202f}234,6");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
    }

    #[test]
    fn test_format_stock() {
        assert_eq!(format_stock(1234567), "1\u{202f}234\u{202f}567");
        assert_eq!(format_stock(0), "0");
        assert_eq!(format_stock(-120), "-120");
    }
}
