//! Shared UI crate for Cartridge. Most cross-platform logic and views live here.

pub mod charts;
pub mod core;
pub mod session;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub mod export_panel;
    pub mod metric_cards;
    pub mod sidebar;

    pub use app_navbar::{register_nav, AppNavbar, NavBuilder};
    pub use export_panel::ExportPanel;
    pub use metric_cards::OverviewMetrics;
    pub use sidebar::Sidebar;
}
