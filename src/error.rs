use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfSignError {
    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("PDFではありません: {0}")]
    NotPdf(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PdfSignError>;
