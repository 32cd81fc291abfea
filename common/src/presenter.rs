//! 画面表示用のビューモデル
//!
//! `Phase` から1つの `Screen` を作るので、表示領域（ドロップ領域・
//! ファイル一覧・進捗・結果）は常にどれか1つだけになる。

use crate::config::ClientConfig;
use crate::format::format_file_size;
use crate::service::download_path;
use crate::types::{FileHandle, FileResult, FileStatus, ResultSet};
use crate::workflow::{Phase, Progress};

/// 検出できなかったゾーン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingZone {
    Signature,
    Date,
}

impl MissingZone {
    pub fn describe(self) -> &'static str {
        match self {
            MissingZone::Signature => "zone signature non détectée",
            MissingZone::Date => "zone date non détectée",
        }
    }
}

/// 結果1件の表示区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultTier {
    Signed,
    SignedWithWarning(Vec<MissingZone>),
    Failed(String),
}

impl ResultTier {
    pub fn classify(result: &FileResult) -> Self {
        match result.status {
            FileStatus::Error => ResultTier::Failed(
                result
                    .error
                    .clone()
                    .unwrap_or_else(|| "Erreur inconnue".to_string()),
            ),
            FileStatus::Success => {
                let mut missing = Vec::new();
                if !result.signature_found {
                    missing.push(MissingZone::Signature);
                }
                if !result.date_found {
                    missing.push(MissingZone::Date);
                }
                if missing.is_empty() {
                    ResultTier::Signed
                } else {
                    ResultTier::SignedWithWarning(missing)
                }
            }
        }
    }

    /// CSSクラス名
    pub fn css_class(&self) -> &'static str {
        match self {
            ResultTier::Signed => "success",
            ResultTier::SignedWithWarning(_) => "warning",
            ResultTier::Failed(_) => "error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ResultTier::Signed => "✅",
            ResultTier::SignedWithWarning(_) => "⚠️",
            ResultTier::Failed(_) => "❌",
        }
    }

    pub fn status_text(&self) -> String {
        match self {
            ResultTier::Signed => "Signé et daté avec succès".to_string(),
            ResultTier::SignedWithWarning(missing) => {
                let zones: Vec<&str> = missing.iter().map(|z| z.describe()).collect();
                format!("Signé avec avertissement : {}", zones.join(", "))
            }
            ResultTier::Failed(message) => format!("Erreur : {}", message),
        }
    }
}

/// 署名済みファイルのダウンロードリンク
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub filename: String,
    pub tier: ResultTier,
    pub download: Option<DownloadLink>,
}

impl ResultRow {
    pub fn build(result: &FileResult, config: &ClientConfig) -> Self {
        let tier = ResultTier::classify(result);
        let download = match tier {
            ResultTier::Failed(_) => None,
            _ => result.output_path.as_ref().map(|path| DownloadLink {
                href: config.url(&download_path(path)),
                filename: result
                    .output_filename
                    .clone()
                    .unwrap_or_else(|| result.filename.clone()),
            }),
        };

        Self {
            filename: result.filename.clone(),
            tier,
            download,
        }
    }
}

/// 集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub date: String,
    pub total: u32,
    pub success: u32,
    /// 0件のときは表示しない
    pub errors: Option<u32>,
}

impl Summary {
    pub fn of(results: &ResultSet) -> Self {
        let errors = results.total.saturating_sub(results.success);
        Self {
            date: results.date.clone(),
            total: results.total,
            success: results.success,
            errors: (errors > 0).then_some(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub summary: Summary,
    pub rows: Vec<ResultRow>,
}

impl ResultsView {
    pub fn build(results: &ResultSet, config: &ClientConfig) -> Self {
        Self {
            summary: Summary::of(results),
            rows: results
                .results
                .iter()
                .map(|r| ResultRow::build(r, config))
                .collect(),
        }
    }
}

/// ファイル一覧の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub index: usize,
    pub name: String,
    pub size_label: String,
}

/// 現在表示すべき画面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Drop,
    FileList(Vec<FileRow>),
    Progress(Progress),
    Results(ResultsView),
    Failed(String),
}

impl Screen {
    pub fn of<F: FileHandle>(phase: &Phase<F>, config: &ClientConfig) -> Self {
        match phase {
            Phase::Idle => Screen::Drop,
            Phase::Selecting(files) => Screen::FileList(
                files
                    .iter()
                    .enumerate()
                    .map(|(index, file)| FileRow {
                        index,
                        name: file.name().to_string(),
                        size_label: format_file_size(file.size()),
                    })
                    .collect(),
            ),
            Phase::Submitting(progress) => Screen::Progress(*progress),
            Phase::ShowingResults(results) => Screen::Results(ResultsView::build(results, config)),
            Phase::Error(reason) => Screen::Failed(reason.clone()),
        }
    }
}
