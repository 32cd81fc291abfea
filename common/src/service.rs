//! 署名サービスとのインターフェース
//!
//! - POST /upload (multipart, `files[]`)
//! - GET /download/{output_path}
//! - GET /download-all
//! - GET /clear

use crate::error::{Error, Result};
use crate::types::{FileHandle, ResultSet};
use std::future::Future;

pub const UPLOAD_PATH: &str = "/upload";
pub const DOWNLOAD_PATH: &str = "/download/";
pub const DOWNLOAD_ALL_PATH: &str = "/download-all";
pub const CLEAR_PATH: &str = "/clear";

/// multipartのフィールド名（ファイルごとに繰り返す）
pub const FILES_FIELD: &str = "files[]";

/// /upload の生レスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReply {
    pub status: u16,
    pub body: String,
}

impl UploadReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 署名サービス
///
/// `upload` はトランスポート失敗のときだけ Err を返す。
/// HTTPステータスとボディの解釈は `interpret_reply` が行う。
pub trait SigningService<F: FileHandle> {
    /// 全ファイルを1つのmultipartリクエストで送信
    fn upload(&self, files: &[F]) -> impl Future<Output = Result<UploadReply>>;

    /// サーバー側に残っているファイルを破棄させる
    fn discard(&self) -> impl Future<Output = Result<()>>;
}

/// /upload のレスポンスを結果一式に変換
///
/// `error` フィールドがあればステータスに関係なくサーバーエラー、
/// 次に非2xxステータス、最後に ResultSet としてパースする。
pub fn interpret_reply(reply: &UploadReply) -> Result<ResultSet> {
    let value: Option<serde_json::Value> = serde_json::from_str(&reply.body).ok();

    if let Some(message) = value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.as_str())
    {
        return Err(Error::Server(message.to_string()));
    }

    if !reply.is_success() {
        return Err(Error::HttpStatus(reply.status));
    }

    let result_set: ResultSet = serde_json::from_str(&reply.body)?;
    Ok(result_set)
}

/// 署名済みファイル1件のダウンロードパス
pub fn download_path(output_path: &str) -> String {
    format!("{}{}", DOWNLOAD_PATH, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> UploadReply {
        UploadReply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_interpret_reply_success() {
        let body = r#"{"date": "18/10/2026", "total": 1, "success": 1,
            "results": [{"filename": "a.pdf", "status": "success",
                "signature_found": true, "date_found": true,
                "output_path": "p_signed_a.pdf", "output_filename": "signed_a.pdf"}]}"#;

        let set = interpret_reply(&reply(200, body)).unwrap();
        assert_eq!(set.date, "18/10/2026");
        assert_eq!(set.results.len(), 1);
    }

    #[test]
    fn test_interpret_reply_error_field_with_ok_status() {
        let err = interpret_reply(&reply(200, r#"{"error": "Signature non trouvée"}"#)).unwrap_err();
        assert!(matches!(err, Error::Server(ref m) if m == "Signature non trouvée"));
    }

    #[test]
    fn test_interpret_reply_error_field_wins_over_status() {
        let err = interpret_reply(&reply(400, r#"{"error": "Aucun fichier fourni"}"#)).unwrap_err();
        assert!(matches!(err, Error::Server(_)));
    }

    #[test]
    fn test_interpret_reply_bad_status_without_json() {
        let err = interpret_reply(&reply(502, "<html>Bad Gateway</html>")).unwrap_err();
        assert!(matches!(err, Error::HttpStatus(502)));
    }

    #[test]
    fn test_interpret_reply_malformed_success_body() {
        let err = interpret_reply(&reply(200, r#"{"results": "nope"}"#)).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_interpret_reply_ignores_non_string_error_field() {
        // error: null は失敗扱いしないが、ResultSetとして不完全なのでJSONエラー
        let err = interpret_reply(&reply(200, r#"{"error": null}"#)).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_download_path() {
        assert_eq!(
            download_path("20261018_101500_signed_a.pdf"),
            "/download/20261018_101500_signed_a.pdf"
        );
    }
}
