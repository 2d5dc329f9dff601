//! Drop Target Component
//!
//! Drag-and-drop region that doubles as a click-to-browse file picker.
//! Candidate files are handed to `DropConfig::offer`, so `on_accept` only
//! ever sees a single file that matches `accept`.

use std::path::Path;
use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use leafscan_core::{DropConfig, MimeFilter, Rejection, SelectedFile};

/// Prompt shown inside the drop target.
pub const DROP_PROMPT: &str = "Drag & drop an image here, or click to select one";

/// Drop target accepting one file.
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     DropTarget {
///         on_accept: move |file: SelectedFile| println!("got {}", file.name()),
///     }
/// }
/// ```
#[component]
pub fn DropTarget(
    /// MIME filter for accepted files (defaults to `image/*`)
    #[props(default)]
    accept: MimeFilter,
    /// Called with the accepted file
    on_accept: EventHandler<SelectedFile>,
    #[props(default = DROP_PROMPT.to_string())]
    prompt: String,
) -> Element {
    let mut hovered = use_signal(|| false);
    let accept_attr = accept.to_string();
    let drop_accept = accept.clone();
    let pick_accept = accept;

    rsx! {
        label {
            class: if hovered() { "drop-target drop-target--active" } else { "drop-target" },
            ondragover: move |evt: DragEvent| {
                evt.prevent_default();
                hovered.set(true);
            },
            ondragleave: move |_| hovered.set(false),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                hovered.set(false);
                let accept = drop_accept.clone();
                async move {
                    if let Some(engine) = evt.files() {
                        offer_files(engine, accept, on_accept).await;
                    }
                }
            },
            input {
                class: "drop-target__input",
                r#type: "file",
                accept: "{accept_attr}",
                multiple: false,
                onchange: move |evt: FormEvent| {
                    let accept = pick_accept.clone();
                    async move {
                        if let Some(engine) = evt.files() {
                            offer_files(engine, accept, on_accept).await;
                        }
                    }
                },
            }
            p { class: "drop-target__prompt", "{prompt}" }
        }
    }
}

async fn offer_files(
    engine: Arc<dyn FileEngine>,
    accept: MimeFilter,
    on_accept: EventHandler<SelectedFile>,
) {
    let mut read = Vec::new();
    for path in engine.files() {
        let bytes = engine.read_file(&path).await;
        read.push((path, bytes));
    }

    if let Err(rejection) = offer_read_files(read, accept, |file| on_accept.call(file)) {
        tracing::debug!("Drop not accepted: {}", rejection);
    }
}

/// Turn `(path, contents)` pairs into files and offer them as one drop.
/// Unreadable paths are skipped.
fn offer_read_files(
    read: Vec<(String, Option<Vec<u8>>)>,
    accept: MimeFilter,
    on_accept: impl FnMut(SelectedFile),
) -> Result<(), Rejection> {
    let mut files = Vec::new();
    for (path, bytes) in read {
        match bytes {
            Some(bytes) => files.push(SelectedFile::from_bytes(display_name(&path), bytes)),
            None => tracing::warn!("Could not read dropped file {}", path),
        }
    }
    DropConfig::new(accept, on_accept).offer(files)
}

/// The desktop file engine reports full paths; show only the file name.
fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name("/home/me/Pictures/leaf.jpg"), "leaf.jpg");
        assert_eq!(display_name("leaf.png"), "leaf.png");
    }

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn dropped_image_is_accepted_with_short_name() {
        let mut accepted = Vec::new();
        let read = vec![("/tmp/drop/leaf.png".to_string(), Some(PNG_MAGIC.to_vec()))];

        offer_read_files(read, MimeFilter::default(), |f| accepted.push(f)).unwrap();

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name(), "leaf.png");
        assert_eq!(accepted[0].mime(), "image/png");
    }

    #[test]
    fn dropped_text_file_is_rejected() {
        let mut calls = 0;
        let read = vec![("/tmp/notes.txt".to_string(), Some(b"hello".to_vec()))];

        let err = offer_read_files(read, MimeFilter::default(), |_| calls += 1).unwrap_err();

        assert!(matches!(err, Rejection::WrongType { .. }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let mut accepted = Vec::new();
        let read = vec![
            ("/tmp/gone.png".to_string(), None),
            ("/tmp/leaf.png".to_string(), Some(PNG_MAGIC.to_vec())),
        ];

        offer_read_files(read, MimeFilter::default(), |f| accepted.push(f)).unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name(), "leaf.png");

        let err = offer_read_files(vec![("/tmp/gone.png".to_string(), None)], MimeFilter::default(), |_| {})
            .unwrap_err();
        assert_eq!(err, Rejection::Empty);
    }
}
