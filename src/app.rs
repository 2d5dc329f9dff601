use dioxus::prelude::*;
use leafscan_ui::UploadWidget;

use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Provides global styles and the classifier context.
#[component]
pub fn App() -> Element {
    use_context_provider(crate::classifier);

    rsx! {
        style { {GLOBAL_STYLES} }
        h1 { class: "page-title", "LeafScan" }
        UploadWidget {}
    }
}
