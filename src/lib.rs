//! PDF署名ワークフローのネイティブクライアント
//!
//! ブラウザ版と同じ `Controller` を、reqwest の署名サービスと
//! ディスク上のPDFで動かすための部品。

pub mod error;
pub mod local;
pub mod http;

pub use error::{PdfSignError, Result};
pub use http::HttpSigningService;
pub use local::LocalPdf;
