//! Display helpers for list and detail pages.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::ApplicationStatus;

/// Rows per page on every list screen.
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed for `total` rows.
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(u64::from(per_page))
}

pub fn status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Submitted => "Submitted",
        ApplicationStatus::UnderReview => "Under review",
        ApplicationStatus::DocumentsRequested => "Documents requested",
        ApplicationStatus::Approved => "Approved",
        ApplicationStatus::Rejected => "Rejected",
        ApplicationStatus::Cancelled => "Cancelled",
    }
}

/// Badge modifier class for a status chip.
pub fn status_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Submitted => "status-badge status-badge--submitted",
        ApplicationStatus::UnderReview => "status-badge status-badge--review",
        ApplicationStatus::DocumentsRequested => "status-badge status-badge--documents",
        ApplicationStatus::Approved => "status-badge status-badge--approved",
        ApplicationStatus::Rejected => "status-badge status-badge--rejected",
        ApplicationStatus::Cancelled => "status-badge status-badge--cancelled",
    }
}

/// Split a free-text list (one item per line or comma) into trimmed entries.
pub fn parse_document_list(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
