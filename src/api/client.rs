use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::io::ReaderStream;
use url::Url;

use crate::api::backend::Backend;
use crate::api::error::ApiError;
use crate::dashboard::conversation::ConversationKind;
use crate::dashboard::section::Section;
use crate::dashboard::upload::{percent, UploadFile};

const UPLOAD_PATH: &str = "upload";
const UPLOAD_CHUNK: usize = 64 * 1024;

pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_http(HttpClient::new(), base_url)
    }

    pub fn with_http(http: HttpClient, base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self { http, base })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Checks that the server answers on the chats endpoint.
    pub async fn probe(&self) -> Result<u16, ApiError> {
        let url = self.endpoint(&[Section::DEFAULT.list_path()])?;
        let resp = self.http.get(url).send().await?;
        Ok(resp.status().as_u16())
    }

    async fn json_array(resp: reqwest::Response) -> Result<Vec<Value>, ApiError> {
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        match resp.json::<Value>().await? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Decode(format!("expected a JSON array, got {other}"))),
        }
    }

    async fn get_array(&self, url: Url) -> Result<Vec<Value>, ApiError> {
        log::debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::json_array(resp).await
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn collection(&self, section: Section) -> Result<Vec<Value>, ApiError> {
        let url = self.endpoint(&[section.list_path()])?;
        self.get_array(url).await
    }

    async fn search(&self, section: Section, term: &str) -> Result<Vec<Value>, ApiError> {
        let url = self.endpoint(&[section.search_path()])?;
        log::debug!("POST {url}");
        let resp = self
            .http
            .post(url)
            .form(&[("search_term", term)])
            .send()
            .await?;
        Self::json_array(resp).await
    }

    async fn thread(&self, kind: ConversationKind, name: &str) -> Result<Vec<Value>, ApiError> {
        let url = self.endpoint(&[kind.path_prefix(), name])?;
        self.get_array(url).await
    }

    async fn upload(&self, file: UploadFile, progress: UnboundedSender<u8>) -> Result<(), ApiError> {
        let url = self.endpoint(&[UPLOAD_PATH])?;
        let source = tokio::fs::File::open(&file.path).await?;
        let total = source.metadata().await?.len();
        log::info!("uploading {} ({total} bytes) to {url}", file.file_name);

        let _ = progress.send(0);
        let mut sent = 0u64;
        let stream = ReaderStream::with_capacity(source, UPLOAD_CHUNK).inspect(move |chunk| {
            if let Ok(bytes) = chunk {
                sent += bytes.len() as u64;
                let _ = progress.send(percent(sent, total));
            }
        });

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
            .file_name(file.file_name.clone())
            .mime_str(file.mime)?;
        let form = Form::new().part("file", part);
        let resp = self.http.post(url).multipart(form).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
