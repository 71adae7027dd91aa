//! Разбор CSV файла, уже прочитанного в память
//!
//! Разделитель определяется по строке заголовков. Кавычки не обрабатываются:
//! поле в кавычках, содержащее разделитель, будет разбито на части и строка
//! уйдёт в пропущенные из-за несовпадения числа полей.

use contracts::domain::a001_product::{ParseSkip, ParsedRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Delimiter::Tab => "tabulation",
            Delimiter::Comma => "virgule",
            Delimiter::Semicolon => "point-virgule",
        }
    }
}

/// Определяет разделитель по количеству вхождений в строке заголовков
///
/// Табуляция выигрывает только при строгом превосходстве над обоими,
/// точка с запятой - при строгом превосходстве над запятой, иначе запятая.
pub fn detect_delimiter(header_line: &str) -> Delimiter {
    let count = |c: char| header_line.chars().filter(|&ch| ch == c).count();
    let tabs = count('\t');
    let commas = count(',');
    let semicolons = count(';');

    if tabs > commas && tabs > semicolons {
        Delimiter::Tab
    } else if semicolons > commas {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Результат разбора файла
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub delimiter: Delimiter,
    /// Заголовки в порядке файла
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
    pub skipped: Vec<ParseSkip>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Разбирает текст файла в строки `заголовок -> значение`
///
/// Пустой файл или файл только с заголовком дают пустой результат, а не ошибку.
pub fn parse(text: &str) -> ParseOutcome {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{feff}');

    let Some(header_line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return ParseOutcome {
            delimiter: Delimiter::Comma,
            headers: Vec::new(),
            rows: Vec::new(),
            skipped: Vec::new(),
        };
    };
    let delimiter = detect_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut records = reader
        .records()
        .filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("CSV record skipped: {}", e);
                None
            }
        })
        .filter(|record| !is_blank(record, delimiter));

    let headers: Vec<String> = records
        .next()
        .map(|record| record.iter().map(|h| h.trim().to_string()).collect())
        .unwrap_or_default();

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for record in records {
        if record.len() != headers.len() {
            let line_no = record.position().map(|p| p.line() as usize).unwrap_or_default();
            log::warn!(
                "CSV line {} skipped: expected {} fields, found {}",
                line_no,
                headers.len(),
                record.len()
            );
            skipped.push(ParseSkip {
                line: line_no,
                expected: headers.len(),
                found: record.len(),
            });
            continue;
        }

        let row: ParsedRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.trim().to_string()))
            .collect();
        rows.push(row);
    }

    log::debug!(
        "CSV parsed: delimiter={}, {} row(s), {} skipped",
        delimiter.label(),
        rows.len(),
        skipped.len()
    );

    ParseOutcome {
        delimiter,
        headers,
        rows,
        skipped,
    }
}

/// Строка только из пробелов (для табуляции - и из разделителей)
fn is_blank(record: &csv::StringRecord, delimiter: Delimiter) -> bool {
    let whitespace_only = record.iter().all(|field| field.trim().is_empty());
    whitespace_only && (record.len() <= 1 || delimiter == Delimiter::Tab)
}
