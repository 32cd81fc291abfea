//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// Display はそのままユーザーに表示される文言
#[derive(Error, Debug)]
pub enum Error {
    #[error("Veuillez sélectionner uniquement des fichiers PDF")]
    NoPdfInBatch,

    #[error("Veuillez sélectionner au moins un fichier")]
    EmptySelection,

    #[error("Fichier introuvable dans la sélection (position {index}, {len} fichier(s))")]
    InvalidIndex { index: usize, len: usize },

    #[error("Erreur lors de l'envoi des fichiers : {0}")]
    Transport(String),

    #[error("Erreur lors de l'envoi des fichiers (HTTP {0})")]
    HttpStatus(u16),

    #[error("{0}")]
    Server(String),

    #[error("Réponse du serveur invalide : {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erreur de configuration : {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_server_is_verbatim() {
        let error = Error::Server("Aucun fichier fourni".to_string());
        assert_eq!(format!("{}", error), "Aucun fichier fourni");
    }

    #[test]
    fn test_error_display_http_status() {
        let display = format!("{}", Error::HttpStatus(500));
        assert!(display.contains("HTTP 500"));
    }

    #[test]
    fn test_error_display_invalid_index() {
        let display = format!("{}", Error::InvalidIndex { index: 4, len: 2 });
        assert!(display.contains("position 4"));
        assert!(display.contains("2 fichier"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
