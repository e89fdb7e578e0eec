#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{TimeZone, Utc};

use pushmetrics_core::protocol::values::MetricValue;
use pushmetrics_core::quantity::Quantity;

#[test]
fn canonical_decimal_exponent() {
    let cases = [
        (0, "0"),
        (42, "42"),
        (10, "10"),
        (1000, "1e3"),
        (1500, "1500"),
        (120_000, "120e3"),
        (2_000_000, "2e6"),
        (-5000, "-5e3"),
        (i64::MAX, "9223372036854775807"),
    ];
    for (v, want) in cases {
        assert_eq!(Quantity::from_i64(v).to_string(), want, "value={v}");
        assert_eq!(want.parse::<Quantity>().unwrap().value(), v, "text={want}");
    }
}

#[test]
fn rejects_bad_text() {
    for bad in ["", "abc", "1.5", "1e", "1e-3", "1e19", "10e18"] {
        assert!(bad.parse::<Quantity>().is_err(), "text={bad}");
    }
}

#[test]
fn metric_value_json_shape() {
    let mv = MetricValue {
        value: Quantity::from_i64(42),
        time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    };
    let json = serde_json::to_string(&mv).unwrap();
    assert_eq!(json, r#"{"value":"42","time":"2024-05-01T12:00:00Z"}"#);

    let back: MetricValue = serde_json::from_str(&json).unwrap();
    assert_eq!(back, mv);
}
