use dioxus::prelude::*;

use crate::core::SyncError;

/// Fatal load failure. Nothing else is rendered alongside it.
#[component]
pub fn SyncFailure(error: SyncError, on_retry: EventHandler<MouseEvent>) -> Element {
    rsx! {
        section { class: "segment-card segment-status segment-status--error",
            div { class: "segment-card__header",
                h2 { "Couldn't load segment data" }
                span { class: "segment-card__meta segment-card__meta--error", "{error.kind_label()}" }
            }
            p { "{error}" }
            button {
                r#type: "button",
                class: "button button--primary",
                onclick: move |evt| on_retry.call(evt),
                "Retry"
            }
        }
    }
}

/// Non-fatal refresh failure shown above the stale data.
#[component]
pub fn SyncNotice(error: SyncError) -> Element {
    rsx! {
        p { class: "segment-status segment-status--notice",
            "Refresh failed, showing the last loaded data. {error}"
        }
    }
}
