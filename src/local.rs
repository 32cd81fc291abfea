//! ディスク上のPDFファイル

use crate::error::{PdfSignError, Result};
use pdf_sign_common::{FileHandle, PDF_MIME_TYPE};
use std::fmt;
use std::path::Path;

/// 送信用にメモリへ読み込んだファイル
#[derive(Clone, PartialEq)]
pub struct LocalPdf {
    name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl LocalPdf {
    /// パスから読み込む。拡張子が .pdf でなければ読まずにエラー
    pub async fn open(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if mime_type_for(&name) != PDF_MIME_TYPE {
            return Err(PdfSignError::NotPdf(path.display().to_string()));
        }

        if !path.is_file() {
            return Err(PdfSignError::FileNotFound(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(name, bytes))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_type_for(&name).to_string();
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// 拡張子からMIMEタイプを決める
fn mime_type_for(name: &str) -> &'static str {
    if name.to_lowercase().ends_with(".pdf") {
        PDF_MIME_TYPE
    } else {
        "application/octet-stream"
    }
}

// 中身のバイト列は出さない
impl fmt::Debug for LocalPdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPdf")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl FileHandle for LocalPdf {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
