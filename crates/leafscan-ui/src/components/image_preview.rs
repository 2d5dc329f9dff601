//! Local preview of the selected image.

use dioxus::prelude::*;

/// Renders a preview reference resolved by the upload session.
#[component]
pub fn ImagePreview(
    /// `data:` URI of the selected file
    src: String,
    #[props(default = "Uploaded".to_string())]
    alt: String,
) -> Element {
    rsx! {
        img {
            class: "upload-preview",
            src: "{src}",
            alt: "{alt}",
        }
    }
}
