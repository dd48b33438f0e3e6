//! Tradeloom Core: loading, cards, charts and the render pass of the
//! textile trade dashboard.
//!
//! - `data`: CP949 CSV decoding into a year-keyed `Table`
//! - `cards`: the export, import and balance summary cards
//! - `chart`: backend-neutral trend and comparison chart specs
//! - `table_view`: the raw table, newest year first
//! - `font`: chart font resolution, cached per process
//! - `dashboard`: the pure render function both front ends call

pub mod cards;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod font;
pub mod format;
pub mod table_view;

pub use config::{ConfigError, DashboardConfig, TrackedColumns};
pub use dashboard::{render, DashboardView, DataSource, Selection};

#[cfg(test)]
mod tests {
    use super::*;

    /// The cached font and a finished dashboard are shared across threads by
    /// the front ends, so they must stay `Send + Sync`.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<data::Table>();
        require_sync::<data::Table>();
        require_send::<dashboard::Dashboard>();
        require_sync::<dashboard::Dashboard>();
        require_send::<font::FontChoice>();
        require_sync::<font::FontChoice>();
        require_send::<DashboardView>();
        require_sync::<DashboardView>();
    }
}
