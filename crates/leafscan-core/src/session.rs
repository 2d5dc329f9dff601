//! Upload widget state, independent of any UI framework.
//!
//! The session holds at most one selected file (with its preview reference)
//! and at most one classification result. Accepting a file replaces both and
//! hands back an [`UploadTicket`]; the caller runs [`upload`] wherever it likes
//! and feeds the outcome to [`UploadSession::settle`].
//!
//! Uploads are not ordered against each other. If two are in flight, the one
//! that settles last decides the result.

use crate::client::Classifier;
use crate::error::UploadFailed;
use crate::preview::{PreviewHandle, PreviewRegistry};
use crate::types::{ClassificationResult, SelectedFile};

/// One upload request, issued per accepted file.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub id: u64,
    pub file: SelectedFile,
}

/// A settled upload, ready to be applied to the session.
#[derive(Debug)]
pub struct UploadOutcome {
    pub ticket_id: u64,
    pub file_name: String,
    pub result: Result<ClassificationResult, UploadFailed>,
}

/// Everything the widget needs to draw itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetView {
    pub preview_src: Option<String>,
    pub result: Option<ClassificationResult>,
}

#[derive(Debug)]
pub struct UploadSession {
    previews: PreviewRegistry,
    image: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
    result: Option<ClassificationResult>,
    issued: u64,
}

impl UploadSession {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self {
            previews,
            image: None,
            preview: None,
            result: None,
            issued: 0,
        }
    }

    pub fn image(&self) -> Option<&SelectedFile> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    /// Number of tickets issued so far.
    pub fn uploads_issued(&self) -> u64 {
        self.issued
    }

    /// Take a newly selected file.
    ///
    /// Replaces the current image, revokes its preview reference and creates
    /// a new one, and clears the previous result.
    pub fn accept(&mut self, file: SelectedFile) -> UploadTicket {
        self.release_preview();
        self.preview = Some(self.previews.create(&file));
        self.image = Some(file.clone());
        self.result = None;

        self.issued += 1;
        tracing::info!(
            ticket = self.issued,
            name = file.name(),
            mime = file.mime(),
            size = file.len(),
            "Image selected"
        );
        UploadTicket {
            id: self.issued,
            file,
        }
    }

    /// Apply a finished upload.
    ///
    /// Failures are logged and otherwise ignored; the current result stays.
    pub fn settle(&mut self, outcome: UploadOutcome) {
        match outcome.result {
            Ok(result) => {
                tracing::info!(
                    ticket = outcome.ticket_id,
                    label = %result.label,
                    accuracy = result.accuracy,
                    "Classification received"
                );
                self.result = Some(result);
            }
            Err(e) => {
                tracing::error!(
                    ticket = outcome.ticket_id,
                    name = %outcome.file_name,
                    error = %e,
                    "Upload failed"
                );
            }
        }
    }

    pub fn view(&self) -> WidgetView {
        WidgetView {
            preview_src: self.preview.as_ref().and_then(|h| self.previews.resolve(h)),
            result: self.result.clone(),
        }
    }

    /// Revoke the live preview reference. Call on unmount.
    pub fn teardown(&mut self) {
        self.release_preview();
        self.image = None;
    }

    fn release_preview(&mut self) {
        if let Some(handle) = self.preview.take() {
            self.previews.revoke(handle);
        }
    }
}

/// Send a ticket's file to the classifier. This is the only suspension point.
pub async fn upload(classifier: &dyn Classifier, ticket: UploadTicket) -> UploadOutcome {
    let result = classifier.classify(&ticket.file).await;
    UploadOutcome {
        ticket_id: ticket.id,
        file_name: ticket.file.name().to_string(),
        result,
    }
}
