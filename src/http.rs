//! 署名サービス（reqwest）

use crate::local::LocalPdf;
use log::debug;
use pdf_sign_common::service::{CLEAR_PATH, FILES_FIELD, UPLOAD_PATH};
use pdf_sign_common::{ClientConfig, Error, FileHandle, Result, SigningService, UploadReply};
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpSigningService {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpSigningService {
    /// ブラウザと違い同一オリジンが無いので base_url は絶対URL必須
    pub fn new(config: ClientConfig) -> Result<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must be an absolute http(s) URL, got {:?}",
                config.base_url
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl SigningService<LocalPdf> for HttpSigningService {
    async fn upload(&self, files: &[LocalPdf]) -> Result<UploadReply> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes().to_vec())
                .file_name(file.name().to_string())
                .mime_str(file.mime_type())
                .map_err(transport)?;
            form = form.part(FILES_FIELD, part);
        }

        let url = self.config.url(UPLOAD_PATH);
        debug!("POST {} ({} file(s))", url, files.len());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        Ok(UploadReply { status, body })
    }

    async fn discard(&self) -> Result<()> {
        let response = self
            .client
            .get(self.config.url(CLEAR_PATH))
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::HttpStatus(response.status().as_u16()))
        }
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}
