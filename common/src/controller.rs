//! ワークフローの駆動
//!
//! `Workflow` が返した `Effect` を実行し、送信の非同期処理と
//! 後続イベントの投入を行う。シングルスレッド前提（ブラウザ）なので
//! 状態は `RefCell` で持ち、await をまたいで借用しない。

use crate::config::ClientConfig;
use crate::presenter::Screen;
use crate::service::{interpret_reply, SigningService};
use crate::types::FileHandle;
use crate::workflow::{Effect, Event, Phase, Workflow};
use log::{debug, error, info, warn};
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::future::{poll_fn, Future};
use std::pin::{pin, Pin};
use std::task::Poll;

/// 完了を待たずに走らせるタスク
pub type DetachedTask = Pin<Box<dyn Future<Output = ()>>>;

/// UI側の出口
pub trait Frontend {
    /// 遷移のたびに現在の画面を渡す
    fn render(&self, screen: Screen);

    fn warn(&self, message: &str);

    fn alert(&self, message: &str);

    /// 同じファイルを選び直しても change が発火するように値を消す
    fn reset_file_picker(&self);

    fn navigate(&self, url: &str);

    fn pause(&self, millis: u32) -> impl Future<Output = ()>;

    /// キャンセル手段も結果の受け取りもないタスクを起動する。
    /// ページ離脱時は実行されずに捨てられることもある。
    fn spawn_detached(&self, task: DetachedTask);
}

pub struct Controller<F, S, U> {
    workflow: RefCell<Workflow<F>>,
    service: S,
    frontend: U,
}

impl<F, S, U> Controller<F, S, U>
where
    F: FileHandle + 'static,
    S: SigningService<F> + Clone + 'static,
    U: Frontend,
{
    pub fn new(config: ClientConfig, service: S, frontend: U) -> Self {
        Self {
            workflow: RefCell::new(Workflow::new(config)),
            service,
            frontend,
        }
    }

    pub fn phase(&self) -> Ref<'_, Phase<F>> {
        Ref::map(self.workflow.borrow(), |wf| wf.phase())
    }

    pub fn frontend(&self) -> &U {
        &self.frontend
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 現在の状態をそのまま描画
    pub fn render(&self) {
        let screen = {
            let wf = self.workflow.borrow();
            Screen::of(wf.phase(), wf.config())
        };
        self.frontend.render(screen);
    }

    /// イベントを処理し、後続イベントがなくなるまで進める
    pub async fn dispatch(&self, event: Event<F>) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.step(event) {
                if let Some(next) = self.perform(effect).await {
                    queue.push_back(next);
                }
            }
        }
    }

    /// ページ離脱時のフック。同期的に破棄通知を投げるだけで待たない
    pub fn unload(&self) {
        for effect in self.step(Event::Unload) {
            match effect {
                Effect::Discard => self.discard_detached(),
                other => debug!("unload: skipping {} effect", other.name()),
            }
        }
    }

    fn step(&self, event: Event<F>) -> Vec<Effect<F>> {
        let (effects, screen) = {
            let mut wf = self.workflow.borrow_mut();
            let effects = wf.apply(event);
            (effects, Screen::of(wf.phase(), wf.config()))
        };
        self.frontend.render(screen);
        effects
    }

    async fn perform(&self, effect: Effect<F>) -> Option<Event<F>> {
        match effect {
            Effect::Warn(message) => {
                warn!("{}", message);
                self.frontend.warn(&message);
                None
            }
            Effect::Alert(message) => {
                error!("{}", message);
                self.frontend.alert(&message);
                None
            }
            Effect::ResetFilePicker => {
                self.frontend.reset_file_picker();
                None
            }
            Effect::Upload(files) => Some(self.submit(files).await),
            Effect::Hold { millis, results } => {
                self.frontend.pause(millis).await;
                Some(Event::RevealResults(results))
            }
            Effect::Discard => {
                self.discard_detached();
                None
            }
            Effect::Navigate(url) => {
                self.frontend.navigate(&url);
                None
            }
            Effect::Next(event) => Some(event),
        }
    }

    async fn submit(&self, files: Vec<F>) -> Event<F> {
        info!("submitting {} file(s) for signing", files.len());

        // 最初のpollでリクエストの組み立てと送信が行われる。
        // そこで失敗したら「送信中」は表示しない
        let mut request = pin!(self.service.upload(&files));
        let first = poll_fn(|cx| Poll::Ready(request.as_mut().poll(cx))).await;
        let reply = match first {
            Poll::Ready(Err(e)) => return Event::UploadFailed(e),
            Poll::Ready(Ok(reply)) => {
                self.step(Event::RequestSent);
                reply
            }
            Poll::Pending => {
                self.step(Event::RequestSent);
                match request.await {
                    Ok(reply) => reply,
                    Err(e) => return Event::UploadFailed(e),
                }
            }
        };
        self.step(Event::ResponseReceived);

        match interpret_reply(&reply) {
            Ok(results) => {
                info!(
                    "signing finished: {}/{} succeeded",
                    results.success, results.total
                );
                Event::UploadSucceeded(results)
            }
            Err(e) => Event::UploadFailed(e),
        }
    }

    /// 破棄通知の結果は使わない。失敗はログに残すだけ
    fn discard_detached(&self) {
        let service = self.service.clone();
        self.frontend.spawn_detached(Box::pin(async move {
            match service.discard().await {
                Ok(()) => debug!("server-side files discarded"),
                Err(e) => warn!("failed to discard server-side files: {}", e),
            }
        }));
    }
}
