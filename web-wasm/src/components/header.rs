//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Signature automatique de PDF"</h1>
            <p class="text-muted">"Déposez vos conventions, elles seront signées et datées automatiquement"</p>
        </header>
    }
}
