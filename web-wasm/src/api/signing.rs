//! 署名サービス（fetch API）
//!
//! /upload にはブラウザの FormData をそのまま送る（multipartの組み立ては
//! ブラウザ任せ）。/clear は keepalive 付きで送り、ページ離脱後も
//! 送信が続くようにする。

use crate::browser::BrowserFile;
use pdf_sign_common::service::{CLEAR_PATH, FILES_FIELD, UPLOAD_PATH};
use pdf_sign_common::{ClientConfig, Error, Result, SigningService, UploadReply};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

#[derive(Clone)]
pub struct FetchService {
    config: Rc<ClientConfig>,
}

impl FetchService {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }
}

impl SigningService<BrowserFile> for FetchService {
    async fn upload(&self, files: &[BrowserFile]) -> Result<UploadReply> {
        let form = FormData::new().map_err(js_error)?;
        for file in files {
            form.append_with_blob_and_filename(FILES_FIELD, file.blob(), &file.name)
                .map_err(js_error)?;
        }

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        let request =
            Request::new_with_str_and_init(&self.config.url(UPLOAD_PATH), &opts).map_err(js_error)?;
        let response = fetch(&request).await?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(UploadReply {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }

    async fn discard(&self) -> Result<()> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        // web-sys has no `set_keepalive` binding; set the RequestInit field directly.
        let _ = js_sys::Reflect::set(&opts, &"keepalive".into(), &true.into());

        let request =
            Request::new_with_str_and_init(&self.config.url(CLEAR_PATH), &opts).map_err(js_error)?;
        let response = fetch(&request).await?;

        if response.ok() {
            Ok(())
        } else {
            Err(Error::HttpStatus(response.status()))
        }
    }
}

async fn fetch(request: &Request) -> Result<Response> {
    let window = web_sys::window().ok_or_else(|| Error::Transport("window unavailable".into()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    value.dyn_into::<Response>().map_err(js_error)
}

/// JS側の例外をトランスポートエラーに変換
fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}
