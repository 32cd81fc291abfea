//! 署名結果パネルコンポーネント

use leptos::prelude::*;
use pdf_sign_common::{ResultRow, ResultsView, Summary};

#[component]
pub fn ResultsPanel<FD, FR>(
    results: ResultsView,
    on_download_all: FD,
    on_reset: FR,
) -> impl IntoView
where
    FD: Fn(()) + Copy + 'static,
    FR: Fn(()) + Copy + 'static,
{
    let ResultsView { summary, rows } = results;

    view! {
        <div class="results-section">
            <h2>"Résultats"</h2>
            <SummaryStats summary=summary />
            <div class="results-list">
                {rows
                    .into_iter()
                    .map(|row| view! { <ResultItem row=row /> })
                    .collect_view()}
            </div>
            <div class="results-actions">
                <button class="btn btn-primary" on:click=move |_| on_download_all(())>
                    "📦 Tout télécharger (ZIP)"
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_reset(())>
                    "🔄 Nouveaux documents"
                </button>
            </div>
        </div>
    }
}

#[component]
fn SummaryStats(summary: Summary) -> impl IntoView {
    view! {
        <div class="results-info">
            <p class="results-date">
                "📅 Date de signature : "<strong>{summary.date}</strong>
            </p>
            <div class="results-stats">
                <div class="stat-item">
                    <div class="stat-value">{summary.total}</div>
                    <div class="stat-label">"Documents traités"</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value">{summary.success}</div>
                    <div class="stat-label">"Signés avec succès"</div>
                </div>
                {summary.errors.map(|errors| view! {
                    <div class="stat-item">
                        <div class="stat-value">{errors}</div>
                        <div class="stat-label">"Erreurs"</div>
                    </div>
                })}
            </div>
        </div>
    }
}

#[component]
fn ResultItem(row: ResultRow) -> impl IntoView {
    let status_class = format!("result-status {}", row.tier.css_class());

    view! {
        <div class="result-item">
            <div class="result-info">
                <span class="result-icon">{row.tier.icon()}</span>
                <div class="result-details">
                    <div class="result-name">{row.filename}</div>
                    <div class=status_class>{row.tier.status_text()}</div>
                </div>
            </div>
            {row.download.map(|link| view! {
                <a href=link.href class="btn-download" download=link.filename>
                    "📥 Télécharger"
                </a>
            })}
        </div>
    }
}
