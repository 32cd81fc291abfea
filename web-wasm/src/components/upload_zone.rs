//! アップロード領域コンポーネント

use leptos::prelude::*;
use web_sys::DragEvent;
use crate::browser::{files_from_list, BrowserFile};

#[component]
pub fn UploadZone<F>(
    file_input: NodeRef<leptos::html::Input>,
    on_files: F,
) -> impl IntoView
where
    F: Fn(Vec<BrowserFile>) + Copy + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(false);

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            on_files(files_from_list(&files));
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
    };

    // ファイル選択ダイアログは常設の input を使う
    let on_click = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    view! {
        <div
            class="upload-zone"
            class:dragover=move || is_dragover.get()
            on:drop=on_drop
            on:dragenter=on_dragover
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">"📄"</div>
            <p>"Glissez-déposez vos PDF ici ou cliquez pour les sélectionner"</p>
            <p class="text-muted">"Format accepté : PDF"</p>
        </div>
    }
}
