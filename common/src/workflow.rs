//! アップロード → 署名 → 結果表示 → リセット の状態遷移
//!
//! 状態は `Phase` ひとつだけで持ち、遷移は `Workflow::apply` に集約する。
//! 遷移は副作用を直接実行せず `Effect` として返し、実行は呼び出し側
//! （`Controller`）が担当する。

use crate::config::ClientConfig;
use crate::error::Error;
use crate::service::DOWNLOAD_ALL_PATH;
use crate::types::{is_pdf, FileHandle, ResultSet};
use log::debug;

/// 送信中の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preparing,
    Sending,
    Signing,
    Complete,
}

impl Stage {
    /// 実際の送信バイト数ではなく段階ごとの固定値
    pub fn percent(self) -> u8 {
        match self {
            Stage::Preparing => 0,
            Stage::Sending => 10,
            Stage::Signing => 50,
            Stage::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Preparing => "Préparation...",
            Stage::Sending => "Envoi des fichiers...",
            Stage::Signing => "Signature en cours...",
            Stage::Complete => "Signature terminée !",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub stage: Stage,
}

impl Progress {
    pub fn at(stage: Stage) -> Self {
        Self {
            percent: stage.percent(),
            stage,
        }
    }

    pub fn label(&self) -> &'static str {
        self.stage.label()
    }
}

/// ワークフローの状態
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<F> {
    Idle,
    /// 空にはならない（最後の1件を外すと Idle に戻る）
    Selecting(Vec<F>),
    Submitting(Progress),
    ShowingResults(ResultSet),
    Error(String),
}

impl<F> Phase<F> {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selecting(_) => "selecting",
            Phase::Submitting(_) => "submitting",
            Phase::ShowingResults(_) => "showing-results",
            Phase::Error(_) => "error",
        }
    }

    /// 選択中のファイル（選択中でなければ空）
    pub fn selection(&self) -> &[F] {
        match self {
            Phase::Selecting(files) => files,
            _ => &[],
        }
    }

    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            Phase::ShowingResults(results) => Some(results),
            _ => None,
        }
    }

    /// サーバー側にこのセッションのファイルが残っている可能性があるか
    fn holds_session_files(&self) -> bool {
        match self {
            Phase::Idle => false,
            Phase::ShowingResults(results) => !results.is_empty(),
            Phase::Selecting(_) | Phase::Submitting(_) | Phase::Error(_) => true,
        }
    }
}

/// ワークフローへの入力
#[derive(Debug)]
pub enum Event<F> {
    /// ドラッグ&ドロップまたはファイル選択で受け取ったファイル群
    Ingest(Vec<F>),
    Remove(usize),
    ClearSelection,
    Submit,
    RequestSent,
    ResponseReceived,
    UploadSucceeded(ResultSet),
    UploadFailed(Error),
    RevealResults(ResultSet),
    Reset,
    DownloadAll,
    Unload,
}

impl<F> Event<F> {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Ingest(_) => "ingest",
            Event::Remove(_) => "remove",
            Event::ClearSelection => "clear-selection",
            Event::Submit => "submit",
            Event::RequestSent => "request-sent",
            Event::ResponseReceived => "response-received",
            Event::UploadSucceeded(_) => "upload-succeeded",
            Event::UploadFailed(_) => "upload-failed",
            Event::RevealResults(_) => "reveal-results",
            Event::Reset => "reset",
            Event::DownloadAll => "download-all",
            Event::Unload => "unload",
        }
    }
}

/// 遷移に伴って実行すべき副作用
#[derive(Debug)]
pub enum Effect<F> {
    /// 入力検証の警告（状態は変わらない）
    Warn(String),
    /// 送信失敗の通知
    Alert(String),
    ResetFilePicker,
    Upload(Vec<F>),
    /// 完了表示を少し見せてから結果を出す
    Hold { millis: u32, results: ResultSet },
    /// サーバー側ファイルの破棄（結果を待たない）
    Discard,
    Navigate(String),
    Next(Event<F>),
}

impl<F> Effect<F> {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Warn(_) => "warn",
            Effect::Alert(_) => "alert",
            Effect::ResetFilePicker => "reset-file-picker",
            Effect::Upload(_) => "upload",
            Effect::Hold { .. } => "hold",
            Effect::Discard => "discard",
            Effect::Navigate(_) => "navigate",
            Effect::Next(_) => "next",
        }
    }
}

/// 状態を所有し、イベントを受けて遷移する
pub struct Workflow<F> {
    phase: Phase<F>,
    config: ClientConfig,
}

impl<F: FileHandle> Workflow<F> {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            phase: Phase::Idle,
            config,
        }
    }

    pub fn phase(&self) -> &Phase<F> {
        &self.phase
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn apply(&mut self, event: Event<F>) -> Vec<Effect<F>> {
        let current = std::mem::replace(&mut self.phase, Phase::Idle);
        let from = current.name();
        let event_name = event.name();

        let (next, effects) = self.transition(current, event);

        debug!(
            "{} --{}--> {} ({} effect(s))",
            from,
            event_name,
            next.name(),
            effects.len()
        );
        self.phase = next;
        effects
    }

    fn transition(&self, phase: Phase<F>, event: Event<F>) -> (Phase<F>, Vec<Effect<F>>) {
        match (phase, event) {
            (current @ (Phase::Idle | Phase::Selecting(_)), Event::Ingest(raw)) => {
                let pdfs: Vec<F> = raw.into_iter().filter(|f| is_pdf(f)).collect();
                if pdfs.is_empty() {
                    (current, vec![Effect::Warn(Error::NoPdfInBatch.to_string())])
                } else {
                    // 既存の選択にはマージしない
                    (Phase::Selecting(pdfs), vec![])
                }
            }

            (Phase::Selecting(mut files), Event::Remove(index)) => {
                if index >= files.len() {
                    let warning = Error::InvalidIndex {
                        index,
                        len: files.len(),
                    };
                    return (Phase::Selecting(files), vec![Effect::Warn(warning.to_string())]);
                }
                files.remove(index);
                if files.is_empty() {
                    (Phase::Idle, vec![Effect::ResetFilePicker])
                } else {
                    (Phase::Selecting(files), vec![])
                }
            }

            (Phase::Idle | Phase::Selecting(_), Event::ClearSelection) => {
                (Phase::Idle, vec![Effect::ResetFilePicker])
            }

            (Phase::Selecting(files), Event::Submit) => (
                Phase::Submitting(Progress::at(Stage::Preparing)),
                vec![Effect::Upload(files)],
            ),

            (Phase::Idle, Event::Submit) => (
                Phase::Idle,
                vec![Effect::Warn(Error::EmptySelection.to_string())],
            ),

            (Phase::Submitting(_), Event::RequestSent) => {
                (Phase::Submitting(Progress::at(Stage::Sending)), vec![])
            }

            (Phase::Submitting(_), Event::ResponseReceived) => {
                (Phase::Submitting(Progress::at(Stage::Signing)), vec![])
            }

            (Phase::Submitting(_), Event::UploadSucceeded(results)) => (
                Phase::Submitting(Progress::at(Stage::Complete)),
                vec![Effect::Hold {
                    millis: self.config.completion_hold_ms,
                    results,
                }],
            ),

            (Phase::Submitting(_), Event::RevealResults(results)) => {
                (Phase::ShowingResults(results), vec![])
            }

            // サーバー側の状態が中途半端な可能性があるので選択には戻さず全リセット
            (Phase::Submitting(_), Event::UploadFailed(error)) => {
                let message = format!("Erreur : {}", error);
                (
                    Phase::Error(error.to_string()),
                    vec![Effect::Alert(message), Effect::Next(Event::Reset)],
                )
            }

            // 送信中はキャンセル不可
            (current @ Phase::Submitting(_), Event::Reset) => {
                debug!("reset ignored while a submission is in flight");
                (current, vec![])
            }

            (_, Event::Reset) => (Phase::Idle, vec![Effect::Discard, Effect::ResetFilePicker]),

            (Phase::ShowingResults(results), Event::DownloadAll) => {
                let url = self.config.url(DOWNLOAD_ALL_PATH);
                (Phase::ShowingResults(results), vec![Effect::Navigate(url)])
            }

            (current, Event::Unload) => {
                let effects = if current.holds_session_files() {
                    vec![Effect::Discard]
                } else {
                    vec![]
                };
                (current, effects)
            }

            // 選択中以外は外せるファイルが無い
            (current, Event::Remove(index)) => {
                let warning = Error::InvalidIndex { index, len: 0 };
                (current, vec![Effect::Warn(warning.to_string())])
            }

            (current, event) => {
                debug!("{} ignored in phase {}", event.name(), current.name());
                (current, vec![])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::TestFile;
    use crate::types::{FileResult, FileStatus};

    fn workflow() -> Workflow<TestFile> {
        Workflow::new(ClientConfig::default())
    }

    fn selecting(names: &[&str]) -> Workflow<TestFile> {
        let mut wf = workflow();
        let files = names.iter().map(|n| TestFile::pdf(n)).collect();
        assert!(wf.apply(Event::Ingest(files)).is_empty());
        wf
    }

    fn names(wf: &Workflow<TestFile>) -> Vec<String> {
        wf.phase().selection().iter().map(|f| f.name.clone()).collect()
    }

    fn result_set() -> ResultSet {
        ResultSet {
            date: "18/10/2026".to_string(),
            total: 1,
            success: 1,
            results: vec![FileResult {
                filename: "a.pdf".to_string(),
                status: FileStatus::Success,
                signature_found: true,
                date_found: true,
                output_path: Some("x_signed_a.pdf".to_string()),
                output_filename: Some("signed_a.pdf".to_string()),
                error: None,
            }],
        }
    }

    fn submitting() -> Workflow<TestFile> {
        let mut wf = selecting(&["a.pdf"]);
        wf.apply(Event::Submit);
        wf
    }

    #[test]
    fn test_ingest_keeps_only_pdfs_in_order() {
        let mut wf = workflow();
        let effects = wf.apply(Event::Ingest(vec![
            TestFile::pdf("b.pdf"),
            TestFile::new("photo.png", 10, "image/png"),
            TestFile::new("A.PDF", 10, ""),
        ]));

        assert!(effects.is_empty());
        assert_eq!(wf.phase().name(), "selecting");
        assert_eq!(names(&wf), vec!["b.pdf", "A.PDF"]);
    }

    #[test]
    fn test_ingest_without_pdf_warns_and_keeps_state() {
        let mut wf = selecting(&["keep.pdf"]);
        let effects = wf.apply(Event::Ingest(vec![TestFile::new("x.docx", 1, "")]));

        assert!(matches!(effects.as_slice(), [Effect::Warn(_)]));
        assert_eq!(names(&wf), vec!["keep.pdf"]);

        let mut idle = workflow();
        idle.apply(Event::Ingest(vec![TestFile::new("x.txt", 1, "text/plain")]));
        assert_eq!(idle.phase(), &Phase::Idle);
    }

    #[test]
    fn test_ingest_replaces_previous_selection() {
        let mut wf = selecting(&["old.pdf"]);
        wf.apply(Event::Ingest(vec![TestFile::pdf("new.pdf")]));
        assert_eq!(names(&wf), vec!["new.pdf"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut wf = selecting(&["a.pdf", "b.pdf", "c.pdf"]);
        assert!(wf.apply(Event::Remove(1)).is_empty());
        assert_eq!(names(&wf), vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn test_remove_last_entry_returns_to_idle() {
        let mut wf = selecting(&["a.pdf"]);
        let effects = wf.apply(Event::Remove(0));

        assert_eq!(wf.phase(), &Phase::Idle);
        assert!(matches!(effects.as_slice(), [Effect::ResetFilePicker]));
    }

    #[test]
    fn test_remove_out_of_range_warns() {
        let mut wf = selecting(&["a.pdf", "b.pdf"]);
        let effects = wf.apply(Event::Remove(2));

        assert!(matches!(effects.as_slice(), [Effect::Warn(_)]));
        assert_eq!(names(&wf), vec!["a.pdf", "b.pdf"]);

        let mut idle = workflow();
        let effects = idle.apply(Event::Remove(0));
        assert!(matches!(effects.as_slice(), [Effect::Warn(_)]));
    }

    #[test]
    fn test_clear_selection() {
        let mut wf = selecting(&["a.pdf", "b.pdf"]);
        let effects = wf.apply(Event::ClearSelection);

        assert_eq!(wf.phase(), &Phase::Idle);
        assert!(matches!(effects.as_slice(), [Effect::ResetFilePicker]));
    }

    #[test]
    fn test_submit_without_selection_warns() {
        let mut wf = workflow();
        let effects = wf.apply(Event::Submit);

        assert_eq!(wf.phase(), &Phase::Idle);
        match effects.as_slice() {
            [Effect::Warn(message)] => assert!(message.contains("au moins un fichier")),
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[test]
    fn test_submit_hands_files_to_upload() {
        let mut wf = selecting(&["a.pdf", "b.pdf"]);
        let effects = wf.apply(Event::Submit);

        assert_eq!(wf.phase(), &Phase::Submitting(Progress::at(Stage::Preparing)));
        assert!(wf.phase().selection().is_empty());
        match effects.as_slice() {
            [Effect::Upload(files)] => assert_eq!(files.len(), 2),
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[test]
    fn test_progress_stages() {
        let mut wf = submitting();
        wf.apply(Event::RequestSent);
        assert_eq!(wf.phase(), &Phase::Submitting(Progress { percent: 10, stage: Stage::Sending }));
        wf.apply(Event::ResponseReceived);
        assert_eq!(wf.phase(), &Phase::Submitting(Progress { percent: 50, stage: Stage::Signing }));
    }

    #[test]
    fn test_success_holds_then_reveals() {
        let mut wf = submitting();
        let effects = wf.apply(Event::UploadSucceeded(result_set()));

        assert_eq!(wf.phase(), &Phase::Submitting(Progress::at(Stage::Complete)));
        let results = match effects.into_iter().next() {
            Some(Effect::Hold { millis, results }) => {
                assert_eq!(millis, 500);
                results
            }
            other => panic!("unexpected effect: {:?}", other),
        };

        wf.apply(Event::RevealResults(results));
        assert_eq!(wf.phase().results(), Some(&result_set()));
    }

    #[test]
    fn test_failure_alerts_then_resets() {
        let mut wf = submitting();
        let effects = wf.apply(Event::UploadFailed(Error::Server("Signature non trouvée".into())));

        assert_eq!(wf.phase(), &Phase::Error("Signature non trouvée".to_string()));
        match effects.as_slice() {
            [Effect::Alert(message), Effect::Next(Event::Reset)] => {
                assert_eq!(message, "Erreur : Signature non trouvée");
            }
            other => panic!("unexpected effects: {:?}", other),
        }

        let effects = wf.apply(Event::Reset);
        assert_eq!(wf.phase(), &Phase::Idle);
        assert!(matches!(effects.as_slice(), [Effect::Discard, Effect::ResetFilePicker]));
    }

    #[test]
    fn test_reset_ignored_while_submitting() {
        let mut wf = submitting();
        assert!(wf.apply(Event::Reset).is_empty());
        assert_eq!(wf.phase().name(), "submitting");
    }

    #[test]
    fn test_ingest_ignored_while_submitting() {
        let mut wf = submitting();
        assert!(wf.apply(Event::Ingest(vec![TestFile::pdf("late.pdf")])).is_empty());
        assert_eq!(wf.phase().name(), "submitting");
    }

    #[test]
    fn test_reset_from_results() {
        let mut wf = submitting();
        wf.apply(Event::RevealResults(result_set()));

        let effects = wf.apply(Event::Reset);
        assert_eq!(wf.phase(), &Phase::Idle);
        assert!(matches!(effects.as_slice(), [Effect::Discard, Effect::ResetFilePicker]));
    }

    #[test]
    fn test_download_all_navigates_without_state_change() {
        let mut wf = Workflow::<TestFile>::new(ClientConfig {
            base_url: "http://signer.local".to_string(),
            ..Default::default()
        });
        wf.apply(Event::Ingest(vec![TestFile::pdf("a.pdf")]));
        wf.apply(Event::Submit);
        wf.apply(Event::RevealResults(result_set()));

        let effects = wf.apply(Event::DownloadAll);
        match effects.as_slice() {
            [Effect::Navigate(url)] => assert_eq!(url, "http://signer.local/download-all"),
            other => panic!("unexpected effects: {:?}", other),
        }
        assert_eq!(wf.phase().name(), "showing-results");
    }

    #[test]
    fn test_unload_discards_only_when_session_has_files() {
        let mut idle = workflow();
        assert!(idle.apply(Event::Unload).is_empty());

        let mut wf = selecting(&["a.pdf"]);
        assert!(matches!(wf.apply(Event::Unload).as_slice(), [Effect::Discard]));
        assert_eq!(names(&wf), vec!["a.pdf"]);

        let mut wf = submitting();
        assert!(matches!(wf.apply(Event::Unload).as_slice(), [Effect::Discard]));
        assert_eq!(wf.phase().name(), "submitting");

        let mut wf = submitting();
        wf.apply(Event::RevealResults(result_set()));
        assert!(matches!(wf.apply(Event::Unload).as_slice(), [Effect::Discard]));
        assert_eq!(wf.phase().name(), "showing-results");

        let mut wf = submitting();
        wf.apply(Event::UploadFailed(Error::HttpStatus(500)));
        assert_eq!(wf.phase().name(), "error");
        assert!(matches!(wf.apply(Event::Unload).as_slice(), [Effect::Discard]));

        let mut wf = submitting();
        wf.apply(Event::RevealResults(ResultSet::default()));
        assert!(wf.apply(Event::Unload).is_empty());
    }

    #[test]
    fn test_remove_outside_selection_warns_and_keeps_phase() {
        let mut wf = submitting();
        assert!(matches!(wf.apply(Event::Remove(0)).as_slice(), [Effect::Warn(_)]));
        assert_eq!(wf.phase().name(), "submitting");

        wf.apply(Event::RevealResults(result_set()));
        assert!(matches!(wf.apply(Event::Remove(0)).as_slice(), [Effect::Warn(_)]));
        assert!(wf.phase().results().is_some());

        let mut wf = submitting();
        wf.apply(Event::UploadFailed(Error::HttpStatus(502)));
        assert!(matches!(wf.apply(Event::Remove(1)).as_slice(), [Effect::Warn(_)]));
        assert_eq!(wf.phase().name(), "error");
    }
}
