//! Upload widget components.
//!
//! - `UploadWidget`: stateful root, owns the upload session
//! - `UploadView`: pure render of a `WidgetView`
//! - `DropTarget`: drag-and-drop / click-to-browse region
//! - `ImagePreview`, `ClassificationPanel`: conditional parts of the view

mod classification_panel;
mod drop_target;
mod image_preview;
mod upload_widget;

pub use classification_panel::*;
pub use drop_target::*;
pub use image_preview::*;
pub use upload_widget::*;
