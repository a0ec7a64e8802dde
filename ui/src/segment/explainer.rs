use dioxus::prelude::*;

#[component]
pub fn OverlapExplainer() -> Element {
    rsx! {
        section { class: "segment-card segment-explainer",
            p {
                strong { "Dataset A/B: " }
                "These are simulated datasets from two separate parties, such as an advertiser and a publisher."
            }
            p {
                strong { "Overlap Count: " }
                "How many users appear in both datasets, based on matching hashed email identifiers."
            }
            p {
                strong { "Percent Overlap: " }
                "The proportion of shared users across both datasets: overlap divided by the number of unique users in both sets."
            }
            p {
                strong { "Why it matters: " }
                "Overlap metrics help decide whether an audience is viable for targeting or whether two parties can run joint campaigns. "
                "Clean rooms enable this analysis without revealing raw user data."
            }
            p {
                "You can also "
                strong { "export the overlap history to a CSV file" }
                " for deeper analysis in a spreadsheet or notebook."
            }
        }
    }
}
