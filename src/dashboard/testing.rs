//! Scripted backend and recording view shared by the dashboard tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::backend::Backend;
use crate::api::error::ApiError;
use crate::dashboard::conversation::{ConversationKind, ConversationPanel};
use crate::dashboard::rows::{Row, SearchResults};
use crate::dashboard::section::Section;
use crate::dashboard::upload::{UploadFile, UploadState};
use crate::dashboard::view::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Collection(Section),
    Search(Section, String),
    Thread(ConversationKind, String),
    Upload(String),
}

#[derive(Debug, Clone)]
pub enum Reply {
    Items(Vec<Value>),
    Status(u16),
    Network,
}

impl Reply {
    fn into_result(self) -> Result<Vec<Value>, ApiError> {
        match self {
            Reply::Items(items) => Ok(items),
            Reply::Status(code) => Err(ApiError::Status(code)),
            Reply::Network => Err(ApiError::Transport("connection refused".into())),
        }
    }
}

/// Answers with scripted replies keyed by path; unscripted paths return `[]`.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn reply(&self, path: &str, reply: Reply) -> &Self {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, path: String, call: Call) -> Result<Vec<Value>, ApiError> {
        self.calls.lock().unwrap().push(call);
        let reply = self.replies.lock().unwrap().get(&path).cloned();
        reply.unwrap_or(Reply::Items(Vec::new())).into_result()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn collection(&self, section: Section) -> Result<Vec<Value>, ApiError> {
        self.answer(section.list_path().into(), Call::Collection(section))
    }

    async fn search(&self, section: Section, term: &str) -> Result<Vec<Value>, ApiError> {
        self.answer(
            section.search_path().into(),
            Call::Search(section, term.to_string()),
        )
    }

    async fn thread(&self, kind: ConversationKind, name: &str) -> Result<Vec<Value>, ApiError> {
        self.answer(
            format!("{}/{name}", kind.path_prefix()),
            Call::Thread(kind, name.to_string()),
        )
    }

    async fn upload(&self, file: UploadFile, progress: UnboundedSender<u8>) -> Result<(), ApiError> {
        for pct in [0, 50, 100] {
            let _ = progress.send(pct);
        }
        self.answer("upload".into(), Call::Upload(file.file_name))
            .map(|_| ())
    }
}

/// In-memory stand-in for the widget tree.
#[derive(Default)]
pub struct RecordingView {
    pub visible_section: Option<Section>,
    pub hidden_lists: Vec<Section>,
    pub rows: HashMap<Section, Vec<Row>>,
    pub results: HashMap<Section, SearchResults>,
    pub panels: HashMap<ConversationKind, ConversationPanel>,
    pub upload: UploadState,
    pub upload_frames: Vec<UploadState>,
}

impl RecordingView {
    pub fn rows(&self, section: Section) -> &[Row] {
        self.rows.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn results(&self, section: Section) -> SearchResults {
        self.results.get(&section).cloned().unwrap_or_default()
    }

    pub fn panel(&self, kind: ConversationKind) -> ConversationPanel {
        self.panels.get(&kind).cloned().unwrap_or_default()
    }
}

impl View for RecordingView {
    fn show_section(&mut self, section: Section) {
        self.visible_section = Some(section);
    }

    fn set_list_visible(&mut self, section: Section, visible: bool) {
        self.hidden_lists.retain(|s| *s != section);
        if !visible {
            self.hidden_lists.push(section);
        }
    }

    fn render_rows(&mut self, section: Section, rows: &[Row]) {
        self.rows.insert(section, rows.to_vec());
    }

    fn render_search_results(&mut self, section: Section, results: &SearchResults) {
        self.results.insert(section, results.clone());
    }

    fn render_conversation(&mut self, kind: ConversationKind, panel: &ConversationPanel) {
        self.panels.insert(kind, panel.clone());
    }

    fn render_upload(&mut self, upload: &UploadState) {
        self.upload = upload.clone();
        self.upload_frames.push(upload.clone());
    }
}
