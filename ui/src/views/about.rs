use dioxus::prelude::*;

use crate::core::DashboardConfig;
use crate::segment::OverlapExplainer;

#[component]
pub fn About() -> Element {
    let config = use_context::<DashboardConfig>();
    let segment_url = config.endpoint("/segment");
    let history_url = config.endpoint("/history");

    rsx! {
        section { class: "page page-about",
            h1 { "About the clean room" }
            p {
                "Two parties hash their user emails and a remote service intersects the hashes. "
                "This dashboard only reads the computed overlap; raw identifiers never reach it."
            }

            OverlapExplainer {}

            section { class: "segment-card",
                div { class: "segment-card__header",
                    h2 { "Service endpoints" }
                }
                ul { class: "page-about__endpoints",
                    li { a { href: "{segment_url}", target: "_blank", rel: "noopener noreferrer", "GET /segment" } " current overlap snapshot" }
                    li { a { href: "{history_url}", target: "_blank", rel: "noopener noreferrer", "GET /history" } " snapshot log" }
                    li { code { "POST /refresh" } " recompute the overlap" }
                }
            }
        }
    }
}
