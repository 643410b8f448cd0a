use crate::ConcertStatus;

use std::str::FromStr;

#[test]
fn test_concert_status_as_str() {
    assert_eq!(ConcertStatus::Scheduled.as_str(), "scheduled");
    assert_eq!(ConcertStatus::Cancelled.as_str(), "cancelled");
    assert_eq!(ConcertStatus::SoldOut.as_str(), "sold_out");
}

#[test]
fn test_concert_status_from_str() {
    assert_eq!(
        ConcertStatus::from_str("scheduled").unwrap(),
        ConcertStatus::Scheduled
    );
    assert_eq!(
        ConcertStatus::from_str("sold_out").unwrap(),
        ConcertStatus::SoldOut
    );
    assert!(ConcertStatus::from_str("postponed").is_err());
}

#[test]
fn test_concert_status_default() {
    assert_eq!(ConcertStatus::default(), ConcertStatus::Scheduled);
}
