use serde::{Deserialize, Serialize};

use crate::envelope::PaginatedEnvelope;

pub const DEFAULT_ROWS_PER_PAGE: u32 = 15;

/// Client-side pagination state for one collection.
///
/// Invariant: after a successful load, `current_page <= total_pages`. If the
/// backend reports fewer pages than the requested page, [`apply`](Self::apply)
/// clamps and the controller issues one corrective load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub rows_per_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            total_pages: 1,
            total_records: 0,
        }
    }
}

impl Pagination {
    /// Adopt the backend's view of the world, clamping `current_page` so the
    /// invariant holds even when the requested page no longer exists.
    pub fn apply<T>(&mut self, envelope: &PaginatedEnvelope<T>) {
        self.total_pages = envelope.last_page.max(1);
        self.total_records = envelope.total;
        self.rows_per_page = envelope.per_page.max(1);
        self.current_page = envelope.current_page.max(1).min(self.total_pages);
    }

    pub fn record_added(&mut self) {
        self.total_records += 1;
        self.recompute_pages();
    }

    pub fn record_removed(&mut self) {
        self.total_records = self.total_records.saturating_sub(1);
        self.recompute_pages();
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
        }
    }

    fn recompute_pages(&mut self) {
        let per = u64::from(self.rows_per_page.max(1));
        self.total_pages = (self.total_records.div_ceil(per) as u32).max(1);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn apply_clamps_overshot_page() {
        let mut pagination = Pagination {
            current_page: 5,
            ..Pagination::default()
        };
        let envelope = PaginatedEnvelope::<u8>::build(vec![], 5, 15, 40, "/suppliers");

        pagination.apply(&envelope);

        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.current_page, 3);
    }

    #[test]
    fn removals_never_underflow() {
        let mut pagination = Pagination::default();

        pagination.record_removed();

        assert_eq!(pagination.total_records, 0);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.current_page, 1);
    }

    #[test]
    fn additions_grow_page_count() {
        let mut pagination = Pagination {
            rows_per_page: 2,
            total_records: 2,
            total_pages: 1,
            current_page: 1,
        };

        pagination.record_added();

        assert_eq!(pagination.total_records, 3);
        assert_eq!(pagination.total_pages, 2);
    }
}
