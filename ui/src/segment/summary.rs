use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::core::{format, Snapshot};

#[component]
pub fn SegmentSummary(
    snapshot: Snapshot,
    #[props(!optional)] last_synced: Option<OffsetDateTime>,
) -> Element {
    let synced = last_synced.map(format::format_synced_at);

    let rows = [
        ("Overlap Count", format::format_count(snapshot.overlap_count)),
        ("Total in Dataset A", format::format_count(snapshot.total_a)),
        ("Total in Dataset B", format::format_count(snapshot.total_b)),
        ("Percent Overlap", format::format_percent(snapshot.percent_overlap)),
    ];

    rsx! {
        section { class: "segment-card segment-summary",
            div { class: "segment-card__header",
                h2 { "Current Segment Overlap" }
                if let Some(stamp) = synced {
                    span { class: "segment-card__meta", "Synced {stamp}" }
                }
            }

            ul { class: "segment-summary__items",
                for (label, value) in rows {
                    li { class: "segment-summary__item",
                        span { class: "segment-summary__label", "{label}" }
                        strong { class: "segment-summary__value", "{value}" }
                    }
                }
            }
        }
    }
}
