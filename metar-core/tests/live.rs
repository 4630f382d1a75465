//! Talks to the public data server; run with `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use metar_core::{MetarError, MetarType, fetch_current_station_weather};

#[tokio::test]
#[ignore = "requires network access to aviationweather.gov"]
async fn hamburg_reports_current_metar() {
    let obs = fetch_current_station_weather("EDDH").await.expect("EDDH should report");

    assert_eq!(obs.station_id, "EDDH");
    assert_eq!(obs.latitude, 53.63);
    assert_eq!(obs.longitude, 10.0);
    assert_eq!(obs.metar_type, MetarType::Metar);
    assert!(obs.sky_cover().is_some());
    assert!(obs.flight_category.is_some());
    assert!(Utc::now() - obs.observation_time < Duration::hours(1));
}

#[tokio::test]
#[ignore = "requires network access to aviationweather.gov"]
async fn unknown_station_has_no_data() {
    let err = fetch_current_station_weather("ZZZZ").await.unwrap_err();

    assert!(matches!(err, MetarError::NoData { .. }), "{err:?}");
}
