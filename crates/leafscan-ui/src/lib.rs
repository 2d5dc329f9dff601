//! LeafScan UI Components
//!
//! Dioxus components for the image upload widget. State and upload logic
//! live in `leafscan-core`; this crate only wires them to events and markup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! #[component]
//! fn App() -> Element {
//!     let classifier: SharedClassifier = Arc::new(HttpClassifier::from_config(&config)?);
//!     use_context_provider(|| classifier);
//!
//!     rsx! { UploadWidget {} }
//! }
//! ```

pub mod components;
pub mod context;

pub use components::*;
pub use context::{use_classifier, SharedClassifier};
