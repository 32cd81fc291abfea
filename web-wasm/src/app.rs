//! メインアプリケーションコンポーネント

use crate::api::signing::FetchService;
use crate::browser::{self, BrowserFile, WebController, WebFrontend};
use crate::components::{
    file_list::FileList,
    header::Header,
    progress_bar::ProgressBar,
    results_panel::ResultsPanel,
    upload_zone::UploadZone,
};
use leptos::prelude::*;
use pdf_sign_common::workflow::Event;
use pdf_sign_common::{Controller, Screen};
use std::rc::Rc;

/// メインアプリケーションコンポーネント
///
/// 状態は Controller が1つだけ持ち、画面は Controller が描画する
/// `Screen` のシグナルから組み立てる。
#[component]
pub fn App() -> impl IntoView {
    let (screen, set_screen) = signal(Screen::default());
    let file_input = NodeRef::<leptos::html::Input>::new();

    let config = browser::load_config();
    let controller: Rc<WebController> = Rc::new(Controller::new(
        config.clone(),
        FetchService::new(config),
        WebFrontend::new(set_screen, file_input),
    ));
    controller.render();
    browser::install_unload_hook(Rc::clone(&controller));

    let controller = StoredValue::new_local(controller);

    // イベントは順番に処理される（シングルスレッド）
    let dispatch = move |event: Event<BrowserFile>| {
        let controller = controller.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            controller.dispatch(event).await;
        });
    };

    let on_files = move |files: Vec<BrowserFile>| dispatch(Event::Ingest(files));
    let on_remove = move |index: usize| dispatch(Event::Remove(index));
    let on_cancel = move |_: ()| dispatch(Event::ClearSelection);
    let on_submit = move |_: ()| dispatch(Event::Submit);
    let on_download_all = move |_: ()| dispatch(Event::DownloadAll);
    let on_reset = move |_: ()| dispatch(Event::Reset);

    let on_picker_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            on_files(browser::files_from_list(&files));
        }
    };

    view! {
        <div class="container">
            <Header />

            <input
                type="file"
                accept=".pdf,application/pdf"
                multiple=true
                style="display: none"
                node_ref=file_input
                on:change=on_picker_change
            />

            {move || match screen.get() {
                Screen::Drop => view! {
                    <UploadZone file_input=file_input on_files=on_files />
                }.into_any(),
                Screen::FileList(rows) => view! {
                    <FileList
                        rows=rows
                        on_remove=on_remove
                        on_cancel=on_cancel
                        on_submit=on_submit
                    />
                }.into_any(),
                Screen::Progress(progress) => view! {
                    <ProgressBar progress=progress />
                }.into_any(),
                Screen::Results(results) => view! {
                    <ResultsPanel
                        results=results
                        on_download_all=on_download_all
                        on_reset=on_reset
                    />
                }.into_any(),
                Screen::Failed(reason) => view! {
                    <p class="error-banner">{reason}</p>
                }.into_any(),
            }}
        </div>
    }
}
