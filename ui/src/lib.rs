//! Shared UI crate for the audience clean-room dashboard. The sync engine lives
//! in [`core`]; segment cards and routed pages build on top of it.

pub mod core;
pub mod segment;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared theme stylesheet, embedded by both shells.
pub const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
