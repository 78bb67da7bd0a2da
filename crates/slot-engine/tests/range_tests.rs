//! Window-spec tokens and boundary timestamp normalization.

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::America::Chicago;
use slot_engine::{parse_timestamp, SlotError, WindowSpec};

#[test]
fn next_n_days_tokens_parse_case_insensitively() {
    assert_eq!(
        WindowSpec::parse_token("next 7 days").unwrap(),
        WindowSpec::NextDays(7)
    );
    assert_eq!(
        WindowSpec::parse_token("NEXT 14 DAYS").unwrap(),
        WindowSpec::NextDays(14)
    );
    assert_eq!(
        WindowSpec::parse_token("next 1 day").unwrap(),
        WindowSpec::NextDays(1)
    );
}

#[test]
fn this_month_token_parses_with_whitespace() {
    assert_eq!(
        WindowSpec::parse_token("  This Month ").unwrap(),
        WindowSpec::ThisMonth
    );
}

#[test]
fn bad_tokens_are_rejected() {
    for token in ["yesterday", "next 0 days", "next -3 days", "next days", ""] {
        assert!(
            matches!(
                WindowSpec::parse_token(token),
                Err(SlotError::InvalidRange(_))
            ),
            "token {token:?} should not parse"
        );
    }
}

#[test]
fn next_days_resolves_relative_to_now() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();
    let window = WindowSpec::NextDays(7).resolve(now, Chicago).unwrap();

    assert_eq!(window.from, now);
    assert_eq!(window.to, now + Duration::days(7));
}

#[test]
fn this_month_resolves_to_next_month_boundary_in_zone() {
    // April 1st 00:00 Chicago (CDT) is 05:00 UTC.
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();
    let window = WindowSpec::ThisMonth.resolve(now, Chicago).unwrap();

    assert_eq!(window.from, now);
    assert_eq!(window.to, Utc.with_ymd_and_hms(2026, 4, 1, 5, 0, 0).unwrap());
}

#[test]
fn this_month_rolls_over_at_year_end() {
    let now = Utc.with_ymd_and_hms(2026, 12, 10, 12, 0, 0).unwrap();
    let window = WindowSpec::ThisMonth.resolve(now, Chicago).unwrap();

    // January 1st 2027 00:00 Chicago (CST) is 06:00 UTC.
    assert_eq!(window.to, Utc.with_ymd_and_hms(2027, 1, 1, 6, 0, 0).unwrap());
}

#[test]
fn oversized_next_days_token_resolves_to_an_error_not_a_panic() {
    // Any positive N parses, so resolution must absorb the overflow.
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();
    let spec = WindowSpec::parse_token("next 99999999999 days").unwrap();

    assert!(matches!(
        spec.resolve(now, Chicago),
        Err(SlotError::InvalidRange(_))
    ));
    assert!(matches!(
        WindowSpec::NextDays(i64::MAX).resolve(now, Chicago),
        Err(SlotError::InvalidRange(_))
    ));
}

#[test]
fn absolute_spec_rejects_inverted_bounds() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 12, 0, 0).unwrap();
    let spec = WindowSpec::Absolute {
        from: now,
        to: now - Duration::hours(1),
    };
    assert!(matches!(
        spec.resolve(now, Chicago),
        Err(SlotError::InvalidWindow { .. })
    ));
}

#[test]
fn iso_8601_timestamps_parse_to_utc() {
    let parsed = parse_timestamp("2026-03-16T09:00:00-05:00").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 0).unwrap());

    let zulu = parse_timestamp("2026-03-16T14:00:00Z").unwrap();
    assert_eq!(zulu, parsed);
}

#[test]
fn epoch_millis_normalize_like_the_iso_equivalent() {
    assert_eq!(
        parse_timestamp("0").unwrap(),
        Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()
    );

    let iso = parse_timestamp("2026-03-16T14:00:00Z").unwrap();
    let millis = iso.timestamp_millis().to_string();
    assert_eq!(parse_timestamp(&millis).unwrap(), iso);
}

#[test]
fn garbage_timestamps_are_rejected() {
    for raw in ["not-a-time", "123abc", "2026-13-40T00:00:00Z", ""] {
        assert!(
            matches!(parse_timestamp(raw), Err(SlotError::InvalidTimestamp(_))),
            "timestamp {raw:?} should not parse"
        );
    }
}
