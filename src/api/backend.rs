use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::error::ApiError;
use crate::dashboard::conversation::ConversationKind;
use crate::dashboard::section::Section;
use crate::dashboard::upload::UploadFile;

/// The dashboard server as seen by the controller.
///
/// Every call returns the raw JSON records; decoding is left to the
/// per-kind render rules so one bad record cannot fail a whole collection.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET` the full collection behind `section`.
    async fn collection(&self, section: Section) -> Result<Vec<Value>, ApiError>;

    /// `POST search_term=<term>` to the section's search endpoint.
    async fn search(&self, section: Section, term: &str) -> Result<Vec<Value>, ApiError>;

    /// `GET` the message thread for one contact.
    async fn thread(&self, kind: ConversationKind, name: &str) -> Result<Vec<Value>, ApiError>;

    /// Streams `file` to the upload endpoint, reporting percentages on `progress`.
    async fn upload(&self, file: UploadFile, progress: UnboundedSender<u8>) -> Result<(), ApiError>;
}
