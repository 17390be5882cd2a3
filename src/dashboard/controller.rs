use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::backend::Backend;
use crate::api::error::ApiError;
use crate::api::models::Message;
use crate::dashboard::conversation::{Bubble, ConversationKind, ConversationPanel, PanelState};
use crate::dashboard::debounce::Debouncer;
use crate::dashboard::rows::{decode, OpenTarget, RenderRules, SearchResults};
use crate::dashboard::section::Section;
use crate::dashboard::upload::{UploadFile, UploadState};
use crate::dashboard::view::View;

/// A debounced search that is ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub section: Section,
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub section: Section,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub section: Section,
    pub term: String,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTicket {
    pub kind: ConversationKind,
    pub name: String,
    seq: u64,
}

/// What happened to a request once its response was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered(usize),
    Uploaded,
    /// Nothing was requested (empty search term, unsupported upload).
    Skipped,
    Failed,
    /// A newer request for the same panel superseded this one.
    Stale,
}

/// Navigation, loading, search, conversation and upload state of one
/// dashboard session.
///
/// Requests are split into `begin_*` (update state, hand out a ticket) and
/// `finish_*` (apply a response) so a GUI can run the network part elsewhere
/// and come back on its own thread. The `async` methods chain the two for
/// callers that can simply await.
pub struct Dashboard<V> {
    backend: Arc<dyn Backend>,
    view: V,
    active: Section,
    load_seq: [u64; 6],
    search_seq: [u64; 6],
    open_seq: [u64; 2],
    panels: [ConversationPanel; 2],
    upload: UploadState,
    debouncers: Vec<Debouncer<SearchRequest>>,
}

impl<V: View> Dashboard<V> {
    /// Returns the dashboard and the stream of debounced searches it emits.
    pub fn new(
        backend: Arc<dyn Backend>,
        view: V,
        debounce: Duration,
        runtime: Handle,
    ) -> (Self, UnboundedReceiver<SearchRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncers = Section::ALL
            .iter()
            .map(|_| Debouncer::new(debounce, runtime.clone(), tx.clone()))
            .collect();
        let dashboard = Self {
            backend,
            view,
            active: Section::DEFAULT,
            load_seq: [0; 6],
            search_seq: [0; 6],
            open_seq: [0; 2],
            panels: Default::default(),
            upload: UploadState::default(),
            debouncers,
        };
        (dashboard, rx)
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::clone(&self.backend)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn active_section(&self) -> Section {
        self.active
    }

    pub fn panel(&self, kind: ConversationKind) -> &ConversationPanel {
        &self.panels[kind.index()]
    }

    pub fn upload_state(&self) -> &UploadState {
        &self.upload
    }

    pub fn start(&mut self) -> LoadTicket {
        log::info!("dashboard starting on {}", Section::DEFAULT);
        self.select(Section::DEFAULT)
    }

    /// Switches to the section named `id`. Unknown ids change nothing.
    pub fn navigate(&mut self, id: &str) -> Option<LoadTicket> {
        match Section::from_id(id) {
            Some(section) => Some(self.select(section)),
            None => {
                log::warn!("no section with id {id:?}");
                None
            }
        }
    }

    pub fn select(&mut self, section: Section) -> LoadTicket {
        self.active = section;
        self.view.show_section(section);
        self.begin_load(section)
    }

    pub fn begin_load(&mut self, section: Section) -> LoadTicket {
        let slot = &mut self.load_seq[section.index()];
        *slot += 1;
        self.view.render_rows(section, &[]);
        LoadTicket { section, seq: *slot }
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Value>, ApiError>) -> Outcome {
        let section = ticket.section;
        if self.load_seq[section.index()] != ticket.seq {
            log::debug!("dropping stale {section} load");
            return Outcome::Stale;
        }
        match result {
            Ok(items) => {
                let rows = RenderRules::for_section(section).rows(&items);
                self.view.render_rows(section, &rows);
                Outcome::Rendered(rows.len())
            }
            Err(e) => {
                log::error!("Error loading {section}: {e}");
                Outcome::Failed
            }
        }
    }

    pub async fn run_load(&mut self, ticket: LoadTicket) -> Outcome {
        let result = self.backend().collection(ticket.section).await;
        self.finish_load(ticket, result)
    }

    pub async fn load(&mut self, section: Section) -> Outcome {
        let ticket = self.begin_load(section);
        self.run_load(ticket).await
    }

    /// Feeds a keystroke into the section's debouncer.
    pub fn search_input(&mut self, section: Section, term: &str) {
        self.debouncers[section.index()].push(SearchRequest {
            section,
            term: term.to_string(),
        });
    }

    /// Clears the results area; returns a ticket only when a request is needed.
    pub fn begin_search(&mut self, request: SearchRequest) -> Option<SearchTicket> {
        let SearchRequest { section, term } = request;
        let slot = &mut self.search_seq[section.index()];
        *slot += 1;
        let seq = *slot;
        self.view.render_search_results(section, &SearchResults::Cleared);
        if term.is_empty() {
            return None;
        }
        Some(SearchTicket { section, term, seq })
    }

    pub fn finish_search(&mut self, ticket: SearchTicket, result: Result<Vec<Value>, ApiError>) -> Outcome {
        let section = ticket.section;
        if self.search_seq[section.index()] != ticket.seq {
            log::debug!("dropping stale {section} search for {:?}", ticket.term);
            return Outcome::Stale;
        }
        match result {
            Ok(items) => {
                let results = RenderRules::for_section(section).results(&items);
                let count = match &results {
                    SearchResults::Lines(lines) => lines.len(),
                    _ => 0,
                };
                self.view.render_search_results(section, &results);
                Outcome::Rendered(count)
            }
            Err(e) => {
                log::error!("Error during {section} search: {e}");
                Outcome::Failed
            }
        }
    }

    pub async fn search(&mut self, request: SearchRequest) -> Outcome {
        let Some(ticket) = self.begin_search(request) else {
            return Outcome::Skipped;
        };
        let result = self.backend().search(ticket.section, &ticket.term).await;
        self.finish_search(ticket, result)
    }

    pub fn begin_open(&mut self, target: OpenTarget) -> OpenTicket {
        let OpenTarget { kind, name } = target;
        let slot = &mut self.open_seq[kind.index()];
        *slot += 1;
        let seq = *slot;
        self.panels[kind.index()].reset_for(&name);
        self.view.set_list_visible(kind.section(), false);
        self.view.render_conversation(kind, &self.panels[kind.index()]);
        OpenTicket { kind, name, seq }
    }

    pub fn finish_open(&mut self, ticket: OpenTicket, result: Result<Vec<Value>, ApiError>) -> Outcome {
        let kind = ticket.kind;
        if self.open_seq[kind.index()] != ticket.seq {
            log::debug!("dropping stale thread for {:?}", ticket.name);
            return Outcome::Stale;
        }
        let panel = &mut self.panels[kind.index()];
        let outcome = match result {
            Ok(items) => {
                panel.bubbles = items
                    .iter()
                    .filter_map(decode::<Message>)
                    .map(|m| Bubble::from_message(kind, &m))
                    .collect();
                Outcome::Rendered(panel.bubbles.len())
            }
            Err(e) => {
                log::error!("Error opening {:?} thread for {:?}: {e}", kind, ticket.name);
                panel.bubbles.clear();
                panel.error = Some(kind.error_text().to_string());
                Outcome::Failed
            }
        };
        panel.state = PanelState::Open;
        self.view.render_conversation(kind, &self.panels[kind.index()]);
        outcome
    }

    pub async fn open(&mut self, target: OpenTarget) -> Outcome {
        let ticket = self.begin_open(target);
        let result = self.backend().thread(ticket.kind, &ticket.name).await;
        self.finish_open(ticket, result)
    }

    pub fn close(&mut self, kind: ConversationKind) {
        // Invalidate any thread still in flight.
        self.open_seq[kind.index()] += 1;
        let panel = &mut self.panels[kind.index()];
        panel.state = PanelState::Closed;
        self.view.render_conversation(kind, &self.panels[kind.index()]);
        self.view.set_list_visible(kind.section(), true);
    }

    /// Validates the picked file and shows the progress bar.
    pub fn begin_upload(&mut self, path: &Path) -> Option<UploadFile> {
        let Some(file) = UploadFile::from_path(path) else {
            log::warn!("refusing to upload {}", path.display());
            self.upload = UploadState {
                progress_visible: false,
                progress: 0,
                message: UploadState::UNSUPPORTED.to_string(),
            };
            self.view.render_upload(&self.upload);
            return None;
        };
        self.upload = UploadState {
            progress_visible: true,
            progress: 0,
            message: UploadState::UPLOADING.to_string(),
        };
        self.view.render_upload(&self.upload);
        Some(file)
    }

    pub fn upload_progress(&mut self, percent: u8) {
        self.upload.progress = percent.min(100);
        self.view.render_upload(&self.upload);
    }

    /// Applies the upload result; on success the default section is reloaded.
    pub fn finish_upload(&mut self, result: Result<(), ApiError>) -> Option<LoadTicket> {
        match result {
            Ok(()) => {
                log::info!("File uploaded successfully");
                self.upload.progress_visible = false;
                self.upload.progress = 100;
                self.upload.message = UploadState::COMPLETE.to_string();
                self.view.render_upload(&self.upload);
                Some(self.begin_load(Section::DEFAULT))
            }
            Err(e) => {
                log::error!("Error uploading file: {e}");
                self.upload.message = UploadState::FAILED.to_string();
                self.view.render_upload(&self.upload);
                None
            }
        }
    }

    pub async fn upload(&mut self, path: &Path) -> Outcome {
        let Some(file) = self.begin_upload(path) else {
            return Outcome::Skipped;
        };
        let backend = self.backend();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let transfer = backend.upload(file, tx);
        tokio::pin!(transfer);
        let result = loop {
            tokio::select! {
                result = &mut transfer => break result,
                Some(percent) = rx.recv() => self.upload_progress(percent),
            }
        };
        while let Ok(percent) = rx.try_recv() {
            self.upload_progress(percent);
        }
        match self.finish_upload(result) {
            Some(reload) => {
                self.run_load(reload).await;
                Outcome::Uploaded
            }
            None => Outcome::Failed,
        }
    }
}
