//! Session wiring: the signals every view reads, provided once by the
//! platform launcher. Each session owns one filter state and one theme flag;
//! the dataset itself is immutable and shared.

use std::sync::Arc;

use dioxus::prelude::*;

use crate::core::dataset::{self, DataUnavailable, Dataset};
use crate::core::filters::FilterState;
use crate::core::theme::Theme;

/// Where the launcher wants the dataset read from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    /// The sample bundled into the binary (the only option in the browser).
    Embedded,
    /// A CSV on disk, resolved by the desktop launcher at startup.
    #[cfg(not(target_arch = "wasm32"))]
    Path(std::path::PathBuf),
}

/// The loaded dataset, or the reason the dashboard cannot render.
#[derive(Clone)]
pub struct DatasetState(pub Result<Arc<Dataset>, DataUnavailable>);

impl DatasetState {
    pub fn load(source: &DatasetSource) -> Self {
        let loaded = match source {
            DatasetSource::Embedded => dataset::load_embedded(),
            #[cfg(not(target_arch = "wasm32"))]
            DatasetSource::Path(path) => dataset::load_path(path),
        };
        if let Err(err) = &loaded {
            tracing::warn!(error = %err, "dataset load failed");
        }
        Self(loaded)
    }
}

/// Install the dataset, filter-state, and theme signals into context.
/// Call once from the platform `App`, before the router mounts.
pub fn provide_session(source: DatasetSource) {
    let dataset = use_signal(move || DatasetState::load(&source));
    let dataset = use_context_provider(|| dataset);

    let filters = use_signal(move || match &dataset.peek().0 {
        Ok(data) => FilterState::initial(data),
        Err(_) => FilterState::default(),
    });
    use_context_provider(|| filters);

    let theme = use_signal(Theme::default);
    use_context_provider(|| theme);
}

pub fn use_dataset() -> Signal<DatasetState> {
    use_context()
}

pub fn use_filters() -> Signal<FilterState> {
    use_context()
}

pub fn use_theme() -> Signal<Theme> {
    use_context()
}
