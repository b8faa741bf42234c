use super::*;

#[test]
fn newest_ticket_is_current() {
    let latest = LatestRequest::default();
    let first = latest.begin();
    let second = latest.begin();
    assert!(!latest.is_current(first));
    assert!(latest.is_current(second));
}

#[test]
fn slow_response_is_dropped_after_newer_request() {
    let latest = LatestRequest::default();
    let mut applied = Vec::new();

    let short = latest.begin();
    let long = latest.begin();
    for (ticket, rows) in [(long, "smith"), (short, "smi")] {
        if latest.is_current(ticket) {
            applied.push(rows);
        }
    }

    assert_eq!(applied, ["smith"]);
}

#[test]
fn clones_share_the_counter() {
    let latest = LatestRequest::default();
    let handle = latest.clone();
    let ticket = latest.begin();
    handle.begin();
    assert!(!latest.is_current(ticket));
}

#[test]
fn no_ticket_is_current_before_the_first_request() {
    assert!(!LatestRequest::default().is_current(1));
}
