use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::{
    DashboardConfig, HttpSegmentService, SegmentData, SyncController, SyncState, SyncStatus,
};
use crate::segment::{
    OverlapBarChart, OverlapExplainer, OverlapTrendChart, SegmentExport, SegmentSummary,
    SyncFailure, SyncNotice,
};

#[component]
pub fn Dashboard() -> Element {
    let config = use_context::<DashboardConfig>();
    let sync_state = use_signal(SyncState::default);
    let mut show_chart = use_signal(|| false);
    let mut show_info = use_signal(|| false);

    // The controller owns the state; the signal only mirrors it for rendering.
    let controller = use_hook(|| {
        let mirror = sync_state;
        HttpSegmentService::new(config.base_url.clone()).map(|service| {
            Rc::new(
                SyncController::new(service).with_observer(move |state: &SyncState| {
                    let mut mirror = mirror;
                    mirror.set(state.clone());
                }),
            )
        })
    });

    let loader = controller.clone();
    use_future(move || {
        let controller = loader.clone();
        async move {
            if let Ok(controller) = controller {
                // Failures surface through the sync state.
                let _ = controller.load_initial().await;
            }
        }
    });

    let on_refresh = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            if let Ok(controller) = controller.clone() {
                spawn(async move {
                    let _ = controller.refresh().await;
                });
            }
        }
    };

    let on_retry = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            if let Ok(controller) = controller.clone() {
                spawn(async move {
                    let _ = controller.load_initial().await;
                });
            }
        }
    };

    let state = sync_state();
    let features = config.features;
    let segment_url = config.endpoint("/segment");

    let body = match (&controller, state.failure(), state.data.clone()) {
        (Err(err), _, _) => rsx! {
            p { class: "segment-status segment-status--error", "{err}" }
        },
        (Ok(_), Some(err), _) => rsx! {
            SyncFailure { error: err.clone(), on_retry: on_retry }
        },
        (Ok(_), None, None) => rsx! {
            p { class: "segment-card__placeholder", "Loading segment data…" }
        },
        (Ok(_), None, Some(data)) => {
            let refreshing = state.status == SyncStatus::Refreshing;
            let refresh_label = if refreshing { "Refreshing…" } else { "Refresh Data" };
            let chart_label = if show_chart() { "Hide Chart" } else { "Show Chart" };
            let info_label = if show_info() {
                "Hide Explanation"
            } else {
                "What does this mean?"
            };
            let SegmentData { snapshot, history } = data;
            let has_history = !history.is_empty();

            rsx! {
                SegmentSummary { snapshot: snapshot.clone(), last_synced: state.last_synced }

                if let Some(notice) = state.notice.clone() {
                    SyncNotice { error: notice }
                }

                div { class: "dashboard__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: state.is_busy(),
                        onclick: on_refresh,
                        "{refresh_label}"
                    }
                    if features.chart_panel {
                        button {
                            r#type: "button",
                            class: "button button--accent",
                            onclick: move |_| show_chart.set(!show_chart()),
                            "{chart_label}"
                        }
                    }
                    if features.info_panel {
                        button {
                            r#type: "button",
                            class: "button button--info",
                            onclick: move |_| show_info.set(!show_info()),
                            "{info_label}"
                        }
                    }
                    SegmentExport { history: history.clone() }
                }

                if features.chart_panel && show_chart() {
                    OverlapBarChart { snapshot: snapshot.clone(), palette: config.palette.clone() }
                    if has_history {
                        OverlapTrendChart { history: history.clone(), palette: config.palette.clone() }
                    }
                }

                if features.info_panel && show_info() {
                    OverlapExplainer {}
                }
            }
        }
    };

    rsx! {
        section { class: "page page-dashboard",
            h1 { "Privacy-Aware Audience Targeting" }

            if features.wake_notice {
                p { class: "dashboard__notice",
                    "Please allow up to 50 seconds for the backend to wake up if inactive."
                }
            }

            p { class: "dashboard__intro",
                "Compare two user lists through "
                strong { "hashed identifiers" }
                " without sharing private data: a simplified version of the privacy-safe audience matching clean rooms enable."
            }

            {body}

            if features.api_link {
                p { class: "dashboard__api",
                    "View the API directly: "
                    a { href: "{segment_url}", target: "_blank", rel: "noopener noreferrer", "/segment endpoint" }
                }
            }
        }
    }
}

