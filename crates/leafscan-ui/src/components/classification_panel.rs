//! Classification result display.

use dioxus::prelude::*;
use leafscan_core::ClassificationResult;

#[component]
pub fn ClassificationPanel(result: ClassificationResult) -> Element {
    rsx! {
        div { class: "classification-panel",
            p {
                strong { "Classification:" }
                " {result.label}"
            }
            p {
                strong { "Test Accuracy:" }
                " {result.accuracy}%"
            }
        }
    }
}
