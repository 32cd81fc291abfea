//! プログレスバーコンポーネント

use leptos::prelude::*;
use pdf_sign_common::Progress;

#[component]
pub fn ProgressBar(progress: Progress) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=format!("width: {}%", progress.percent)
                />
            </div>
            <p class="progress-text">{progress.label()}</p>
        </div>
    }
}
