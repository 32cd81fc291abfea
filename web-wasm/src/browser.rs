//! ブラウザとの接点
//!
//! - BrowserFile: web_sys::File を FileHandle として扱うラッパー
//! - WebFrontend: Controller からの描画・通知をLeptosのシグナルとDOMに流す
//! - beforeunload フックと設定の読み込み

use crate::api::signing::FetchService;
use leptos::prelude::*;
use pdf_sign_common::{ClientConfig, Controller, DetachedTask, FileHandle, Frontend, Screen};
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileList};

pub type WebController = Controller<BrowserFile, FetchService, WebFrontend>;

const CONFIG_META_SELECTOR: &str = "meta[name=\"pdf-sign-config\"]";

/// 選択されたファイル
#[derive(Debug, Clone)]
pub struct BrowserFile {
    pub name: String,
    size: u64,
    mime_type: String,
    file: File,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self {
            name: file.name(),
            size: file.size() as u64,
            mime_type: file.type_(),
            file,
        }
    }

    pub fn blob(&self) -> &web_sys::Blob {
        &self.file
    }
}

impl FileHandle for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// FileList（ドロップ / ファイル選択）をまとめて変換
pub fn files_from_list(files: &FileList) -> Vec<BrowserFile> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(BrowserFile::new)
        .collect()
}

pub struct WebFrontend {
    set_screen: WriteSignal<Screen>,
    file_input: NodeRef<leptos::html::Input>,
}

impl WebFrontend {
    pub fn new(set_screen: WriteSignal<Screen>, file_input: NodeRef<leptos::html::Input>) -> Self {
        Self {
            set_screen,
            file_input,
        }
    }
}

impl Frontend for WebFrontend {
    fn render(&self, screen: Screen) {
        self.set_screen.set(screen);
    }

    fn warn(&self, message: &str) {
        gloo::dialogs::alert(&format!("⚠️ {}", message));
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(&format!("❌ {}", message));
    }

    fn reset_file_picker(&self) {
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }

    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            log::error!("navigation to {} failed: {:?}", url, e);
        }
    }

    fn pause(&self, millis: u32) -> impl Future<Output = ()> {
        gloo::timers::future::TimeoutFuture::new(millis)
    }

    fn spawn_detached(&self, task: DetachedTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// `<meta name="pdf-sign-config" content="{...}">` から設定を読む
///
/// 無い場合・壊れている場合はデフォルト
pub fn load_config() -> ClientConfig {
    let content = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(CONFIG_META_SELECTOR).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"));

    match content {
        Some(json) => ClientConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            ClientConfig::default()
        }),
        None => ClientConfig::default(),
    }
}

/// ページ離脱時にサーバー側ファイルの破棄を投げる（待たない）
pub fn install_unload_hook(controller: Rc<WebController>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        controller.unload();
    }) as Box<dyn FnMut(_)>);

    if let Err(e) =
        window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref())
    {
        log::error!("failed to install beforeunload hook: {:?}", e);
    }
    closure.forget();
}
