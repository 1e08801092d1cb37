use crate::dataset::AlertSet;
use crate::table::SortState;

#[derive(Clone)]
pub struct AppState {
    pub alerts: AlertSet,
    /// Sort applied when a request does not name one.
    pub default_sort: SortState,
}

impl AppState {
    pub fn new(alerts: AlertSet, default_sort: SortState) -> Self {
        Self {
            alerts,
            default_sort,
        }
    }
}
