use super::*;

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(0, 10), 0);
    assert_eq!(total_pages(1, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(41, 10), 5);
}

#[test]
fn total_pages_with_zero_page_size_is_zero() {
    assert_eq!(total_pages(41, 0), 0);
}

#[test]
fn every_status_has_distinct_class() {
    let statuses = [
        ApplicationStatus::Submitted,
        ApplicationStatus::UnderReview,
        ApplicationStatus::DocumentsRequested,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Cancelled,
    ];
    let mut classes: Vec<_> = statuses.iter().map(|s| status_class(*s)).collect();
    classes.sort_unstable();
    classes.dedup();
    assert_eq!(classes.len(), statuses.len());
    assert_eq!(status_label(ApplicationStatus::UnderReview), "Under review");
}

#[test]
fn parse_document_list_splits_lines_and_commas() {
    assert_eq!(
        parse_document_list("Eye test\n Proof of address ,, ID copy\n"),
        vec!["Eye test".to_owned(), "Proof of address".to_owned(), "ID copy".to_owned()]
    );
    assert!(parse_document_list("  \n , ").is_empty());
}
