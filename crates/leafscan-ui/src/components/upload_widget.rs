//! Upload Widget
//!
//! Drop an image, see it previewed, get a label back from `/classify`.
//! Upload failures are logged and never shown to the user.

use dioxus::prelude::*;
use leafscan_core::{upload, PreviewRegistry, SelectedFile, UploadSession, WidgetView};

use super::{ClassificationPanel, DropTarget, ImagePreview};
use crate::context::{use_classifier, SharedClassifier};

/// Self-contained upload widget. Requires a `SharedClassifier` in context.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     UploadWidget {}
/// }
/// ```
#[component]
pub fn UploadWidget() -> Element {
    let classifier = use_classifier();
    let previews = use_hook(PreviewRegistry::new);
    let session = use_signal({
        let previews = previews.clone();
        move || UploadSession::new(previews)
    });

    // Revoke through the registry so teardown does not depend on the signal
    // outliving the scope.
    use_drop(move || {
        let revoked = previews.revoke_all();
        tracing::debug!(revoked, "Upload widget unmounted");
    });

    let on_accept = move |file: SelectedFile| start_upload(session, classifier.clone(), file);

    let view = session.read().view();

    rsx! {
        UploadView { view, on_accept }
    }
}

/// Show `file` straight away and classify it in the background.
fn start_upload(mut session: Signal<UploadSession>, classifier: SharedClassifier, file: SelectedFile) {
    let ticket = session.write().accept(file);
    spawn(async move {
        let outcome = upload(classifier.as_ref(), ticket).await;
        session.write().settle(outcome);
    });
}

/// Pure rendering of the widget state.
#[component]
pub fn UploadView(view: WidgetView, on_accept: EventHandler<SelectedFile>) -> Element {
    rsx! {
        div { class: "upload-widget",
            DropTarget { on_accept }

            if let Some(src) = view.preview_src.clone() {
                ImagePreview { src }
            }

            if let Some(result) = view.result.clone() {
                ClassificationPanel { result }
            }
        }
    }
}
