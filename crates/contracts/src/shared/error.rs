use thiserror::Error;

/// Сообщение по умолчанию, когда backend не вернул текст ошибки
pub const FALLBACK_ERROR_MESSAGE: &str = "Une erreur est survenue.";

/// Ошибки обращения к backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Текст для уведомления пользователя
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => {
                "Erreur réseau : le serveur est injoignable. Réessayez.".to_string()
            }
            ApiError::Timeout => "Erreur réseau : délai d'attente dépassé. Réessayez.".to_string(),
            ApiError::Server(message) => message.clone(),
        }
    }
}

/// Локальная проверка значения массового действия (до отправки запроса)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Aucun produit sélectionné.")]
    EmptySelection,

    #[error("{0} : valeur numérique attendue.")]
    NotANumber(&'static str),

    #[error("{0} : la valeur doit être positive ou nulle.")]
    Negative(&'static str),

    #[error("Stock : format attendu +N, -N ou =N.")]
    StockAdjustment,

    #[error("État inconnu : {0}.")]
    UnknownState(String),

    #[error("{0} : identifiant invalide.")]
    InvalidIdentifier(&'static str),

    #[error("Référence : le texte ne peut pas être vide.")]
    EmptyReference,

    /// Префикс/суффикс/замена допустимы только для поля "Référence"
    #[error("{0} : cette valeur ne s'applique qu'à la référence.")]
    UnexpectedReference(&'static str),
}
