use super::*;

fn at(ts: &str) -> OffsetDateTime {
    use time::format_description::well_known::Rfc3339;
    OffsetDateTime::parse(ts, &Rfc3339).unwrap()
}

#[test]
fn absolute_timestamps_are_utc_minutes() {
    assert_eq!(fmt_ts_ui("2026-03-04T05:06:07Z"), "2026-03-04 05:06Z");
    assert_eq!(fmt_ts_ui("2026-03-04T05:06:07+01:00"), "2026-03-04 04:06Z");
    assert_eq!(fmt_ts_ui("yesterday"), "yesterday");
}

#[test]
fn relative_timestamps_bucket_by_age() {
    let now = at("2026-03-10T12:00:00Z");
    assert_eq!(fmt_since("2026-03-10T11:59:30Z", now), "just now");
    assert_eq!(fmt_since("2026-03-10T11:15:00Z", now), "45m ago");
    assert_eq!(fmt_since("2026-03-09T12:00:00Z", now), "24h ago");
    assert_eq!(fmt_since("2026-03-05T12:00:00Z", now), "5d ago");
    assert_eq!(fmt_since("2026-01-01T00:00:00Z", now), "2026-01-01 00:00Z");
}

#[test]
fn step_down_stops_at_last_row() {
    assert_eq!(step_down(0, 0), 0);
    assert_eq!(step_down(0, 3), 1);
    assert_eq!(step_down(2, 3), 2);
}
