//! 署名ワークフローの型定義
//!
//! Web(WASM)とネイティブで共有される型:
//! - FileHandle: 選択されたファイル（ブラウザの File / ローカルファイル）
//! - FileResult: 1ファイル分のサーバー処理結果
//! - ResultSet: 1回の送信に対するサーバー応答

use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// 選択されたファイルのハンドル
pub trait FileHandle {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
    fn mime_type(&self) -> &str;
}

/// MIMEタイプか拡張子（大文字小文字無視）でPDFと判定
pub fn is_pdf<F: FileHandle + ?Sized>(file: &F) -> bool {
    file.mime_type() == PDF_MIME_TYPE || file.name().to_lowercase().ends_with(".pdf")
}

/// ファイル単位の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Success,
    Error,
}

/// サーバーが返す1ファイル分の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub filename: String,
    pub status: FileStatus,

    #[serde(default)]
    pub signature_found: bool,

    #[serde(default)]
    pub date_found: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 1回の送信に対する結果一式
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub date: String,
    pub total: u32,
    pub success: u32,
    pub results: Vec<FileResult>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
