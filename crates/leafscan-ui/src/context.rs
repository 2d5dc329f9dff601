//! Classifier context for the upload widget.
//!
//! The widget takes no props; the app provides the classifier once at the
//! root and every `UploadWidget` below it picks it up.

use std::sync::Arc;

use dioxus::prelude::*;
use leafscan_core::Classifier;

/// Classifier shared through context.
pub type SharedClassifier = Arc<dyn Classifier>;

/// Hook to access the classifier from context.
///
/// Panics if no ancestor provided a `SharedClassifier`.
pub fn use_classifier() -> SharedClassifier {
    use_context::<SharedClassifier>()
}
