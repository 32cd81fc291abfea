//! 選択済みファイル一覧コンポーネント

use leptos::prelude::*;
use pdf_sign_common::FileRow;

#[component]
pub fn FileList<FR, FC, FS>(
    rows: Vec<FileRow>,
    on_remove: FR,
    on_cancel: FC,
    on_submit: FS,
) -> impl IntoView
where
    FR: Fn(usize) + Copy + 'static,
    FC: Fn(()) + Copy + 'static,
    FS: Fn(()) + Copy + 'static,
{
    let count = rows.len();

    view! {
        <div class="file-list">
            <h3>{format!("Fichiers sélectionnés ({})", count)}</h3>
            <div class="selected-files">
                {rows
                    .into_iter()
                    .map(|row| {
                        let index = row.index;
                        view! {
                            <div class="file-item">
                                <div class="file-info">
                                    <span class="file-icon">"📄"</span>
                                    <div>
                                        <div class="file-name">{row.name}</div>
                                        <div class="file-size">{row.size_label}</div>
                                    </div>
                                </div>
                                <button
                                    class="remove-file"
                                    title="Retirer ce fichier"
                                    on:click=move |_| on_remove(index)
                                >
                                    "✖"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="file-actions">
                <button class="btn btn-secondary" on:click=move |_| on_cancel(())>
                    "Annuler"
                </button>
                <button class="btn btn-primary" on:click=move |_| on_submit(())>
                    "✍️ Signer les documents"
                </button>
            </div>
        </div>
    }
}
