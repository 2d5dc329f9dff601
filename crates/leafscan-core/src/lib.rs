//! LeafScan Core Library
//!
//! Everything behind the image upload widget that does not depend on a UI
//! framework: the selected file, MIME filtering and the drop contract,
//! preview references, the upload session, and the `/classify` client.
//!
//! ## Quick Start
//!
//! ```ignore
//! use leafscan_core::{upload, Config, HttpClassifier, PreviewRegistry, SelectedFile, UploadSession};
//!
//! let config = Config::default();
//! let classifier = HttpClassifier::from_config(&config)?;
//! let mut session = UploadSession::new(PreviewRegistry::new());
//!
//! let ticket = session.accept(SelectedFile::read("leaf.jpg").await?);
//! session.settle(upload(&classifier, ticket).await);
//!
//! if let Some(result) = session.result() {
//!     println!("{} ({}%)", result.label, result.accuracy);
//! }
//! ```

pub mod client;
pub mod config;
pub mod drop;
pub mod error;
pub mod logging;
pub mod preview;
pub mod session;
pub mod types;

// Re-exports
pub use client::{classify_endpoint, parse_response, Classifier, HttpClassifier, CLASSIFY_PATH};
pub use config::{Config, Overrides};
pub use drop::{DropConfig, MimeFilter, Rejection, IMAGE_ACCEPT};
pub use error::{LeafscanError, LeafscanResult, UploadFailed};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use session::{upload, UploadOutcome, UploadSession, UploadTicket, WidgetView};
pub use types::{ClassificationResult, SelectedFile};
