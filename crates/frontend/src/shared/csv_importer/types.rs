use super::parser::{parse, Delimiter, ParseOutcome};
use contracts::domain::a001_product::{ImportResult, ParsedRow};
use contracts::shared::error::ApiError;
use thiserror::Error;

/// Сколько строк показывать в предпросмотре
pub const PREVIEW_LIMIT: usize = 5;

/// Модель предпросмотра: данные для отрисовки, без разметки
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewModel {
    pub file_name: String,
    pub delimiter: Delimiter,
    pub total: usize,
    pub headers: Vec<String>,
    /// Первые строки в порядке заголовков
    pub rows: Vec<Vec<String>>,
    /// Строки, не попавшие в предпросмотр
    pub hidden: usize,
}

impl PreviewModel {
    pub fn build(file_name: &str, outcome: &ParseOutcome, limit: usize) -> Self {
        let rows: Vec<Vec<String>> = outcome
            .rows
            .iter()
            .take(limit)
            .map(|row| {
                outcome
                    .headers
                    .iter()
                    .map(|h| row.get(h).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            file_name: file_name.to_string(),
            delimiter: outcome.delimiter,
            total: outcome.rows.len(),
            headers: outcome.headers.clone(),
            hidden: outcome.rows.len().saturating_sub(rows.len()),
            rows,
        }
    }

    pub fn title(&self) -> String {
        format!("{} produit(s) trouvé(s)", self.total)
    }

    pub fn more_notice(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("+{} autre(s) produit(s) non affiché(s)", self.hidden))
    }
}

/// Предупреждения загрузки файла (показываются пользователю, не ошибки)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportWarning {
    #[error("Aucun produit à importer dans « {0} ».")]
    NothingToImport(String),

    #[error("Un import est déjà en cours.")]
    Busy,
}

/// Состояние окна импорта
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImportPhase {
    /// Зона для перетаскивания файла
    #[default]
    Idle,
    Previewing(PreviewModel),
    Submitting(PreviewModel),
    Results(ImportResult),
}

/// Квитанция отправки: ответ принимается только для той же сессии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    session: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishOutcome {
    /// Пользователь уже закрыл или сбросил импорт
    Ignored,
    Completed { reload: bool },
    Failed(ApiError),
}

/// Конвейер импорта: файл -> предпросмотр -> отправка -> результат
#[derive(Debug, Clone, Default)]
pub struct ImportPipeline {
    phase: ImportPhase,
    rows: Vec<ParsedRow>,
    session: u64,
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ImportPhase {
        &self.phase
    }

    pub fn rows(&self) -> &[ParsedRow] {
        &self.rows
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, ImportPhase::Submitting(_))
    }

    /// Разбирает файл и переходит к предпросмотру
    pub fn load(&mut self, file_name: &str, text: &str) -> Result<PreviewModel, ImportWarning> {
        if self.is_submitting() {
            return Err(ImportWarning::Busy);
        }

        let outcome = parse(text);
        if outcome.is_empty() {
            self.rows.clear();
            self.phase = ImportPhase::Idle;
            return Err(ImportWarning::NothingToImport(file_name.to_string()));
        }

        let preview = PreviewModel::build(file_name, &outcome, PREVIEW_LIMIT);
        self.rows = outcome.rows;
        self.phase = ImportPhase::Previewing(preview.clone());
        Ok(preview)
    }

    /// Переход к отправке; строки остаются у конвейера до ответа
    pub fn begin_submit(&mut self) -> Option<(SubmitTicket, Vec<ParsedRow>)> {
        let preview = match std::mem::take(&mut self.phase) {
            ImportPhase::Previewing(preview) => preview,
            other => {
                self.phase = other;
                return None;
            }
        };
        self.phase = ImportPhase::Submitting(preview);
        Some((
            SubmitTicket {
                session: self.session,
            },
            self.rows.clone(),
        ))
    }

    /// Применяет ответ backend
    pub fn finish(
        &mut self,
        ticket: SubmitTicket,
        result: Result<ImportResult, ApiError>,
    ) -> FinishOutcome {
        if ticket.session != self.session || !self.is_submitting() {
            log::debug!("Import response for stale session {} ignored", ticket.session);
            return FinishOutcome::Ignored;
        }

        match result {
            Ok(result) => {
                let reload = result.requires_reload();
                self.rows.clear();
                self.phase = ImportPhase::Results(result);
                FinishOutcome::Completed { reload }
            }
            Err(error) => {
                if let ImportPhase::Submitting(preview) = std::mem::take(&mut self.phase) {
                    self.phase = ImportPhase::Previewing(preview);
                }
                FinishOutcome::Failed(error)
            }
        }
    }

    /// Отмена, закрытие окна: строки выбрасываются, ответ текущей отправки будет проигнорирован
    pub fn reset(&mut self) {
        self.rows.clear();
        self.phase = ImportPhase::Idle;
        self.session += 1;
    }
}
