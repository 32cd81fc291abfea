//! PDF Sign Common Library
//!
//! WebクライアントとネイティブクライアントでPDF署名ワークフローを共有する。
//! 選択 → 送信 → 進捗 → 結果表示 → リセット の状態遷移と、
//! その表示用ビューモデル、署名サービスとの境界を持つ。

pub mod types;
pub mod error;
pub mod format;
pub mod config;
pub mod service;
pub mod workflow;
pub mod presenter;
pub mod controller;

pub use types::{is_pdf, FileHandle, FileResult, FileStatus, ResultSet, PDF_MIME_TYPE};
pub use error::{Error, Result};
pub use format::format_file_size;
pub use config::ClientConfig;
pub use service::{interpret_reply, SigningService, UploadReply};
pub use workflow::{Effect, Event, Phase, Progress, Stage, Workflow};
pub use presenter::{DownloadLink, FileRow, MissingZone, ResultRow, ResultTier, ResultsView, Screen, Summary};
pub use controller::{Controller, DetachedTask, Frontend};
