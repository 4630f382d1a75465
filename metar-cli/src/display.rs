use chrono::Utc;
use metar_core::{Observation, convert};
use std::fmt::Write;

/// Human-readable report with values in their original and converted units.
pub fn render(obs: &Observation, imperial: bool) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", obs.raw_text);
    let _ = writeln!(out);

    let age = Utc::now() - obs.observation_time;
    let _ = writeln!(
        out,
        "Station:      {} ({:.2}, {:.2}, {:.0} m)",
        obs.station_id, obs.latitude, obs.longitude, obs.elevation_m
    );
    let _ = writeln!(
        out,
        "Observed:     {} ({} min ago, {})",
        obs.observation_time.format("%Y-%m-%d %H:%M UTC"),
        age.num_minutes(),
        obs.metar_type
    );

    if imperial {
        let _ = writeln!(
            out,
            "Temperature:  {:.1}°C / {:.1}°F, dewpoint {:.1}°C / {:.1}°F",
            obs.temperature_c,
            convert::celsius_to_fahrenheit(obs.temperature_c),
            obs.dewpoint_c,
            convert::celsius_to_fahrenheit(obs.dewpoint_c)
        );
    } else {
        let _ = writeln!(
            out,
            "Temperature:  {:.1}°C, dewpoint {:.1}°C",
            obs.temperature_c, obs.dewpoint_c
        );
    }

    let _ = writeln!(out, "Wind:         {}", wind(obs));
    let _ = writeln!(
        out,
        "Visibility:   {:.1} sm ({:.1} km)",
        obs.visibility_statute_mi,
        obs.visibility_km()
    );
    let _ = writeln!(
        out,
        "Altimeter:    {:.2} inHg ({:.0} hPa)",
        obs.altim_in_hg,
        obs.altimeter_hpa()
    );
    if obs.sea_level_pressure_mb > 0.0 {
        let _ = writeln!(out, "SLP:          {:.1} mb", obs.sea_level_pressure_mb);
    }
    if !obs.wx_string.is_empty() {
        let _ = writeln!(out, "Weather:      {}", obs.wx_string);
    }

    let layers = obs
        .sky_conditions
        .iter()
        .map(|layer| match layer.cloud_base_ft_agl {
            Some(base) => format!("{} {base} ft", layer.sky_cover),
            None => layer.sky_cover.to_string(),
        })
        .collect::<Vec<_>>();
    if !layers.is_empty() {
        let _ = writeln!(out, "Sky:          {}", layers.join(", "));
    }
    if let Some(category) = obs.flight_category {
        let _ = writeln!(out, "Category:     {category}");
    }
    if obs.quality_control_flags.no_signal {
        let _ = writeln!(out, "Note:         station reports loss of signal");
    }

    out
}

fn wind(obs: &Observation) -> String {
    if obs.is_calm() {
        return "calm".to_string();
    }

    let direction = if obs.wind_dir_degrees == 0 {
        "variable".to_string()
    } else {
        format!("{:03}°", obs.wind_dir_degrees)
    };

    let mut text = format!(
        "{direction} at {} kt ({:.1} m/s, Beaufort {})",
        obs.wind_speed_kt,
        obs.wind_speed_ms(),
        obs.beaufort()
    );
    if obs.wind_gust_kt > 0 {
        let _ = write!(text, ", gusting {} kt ({:.1} m/s)", obs.wind_gust_kt, obs.wind_gust_ms());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use metar_core::{FlightCategory, MetarType, QualityControlFlags, SkyCondition, SkyCover};

    fn observation() -> Observation {
        Observation {
            raw_text: "EDDH 181620Z 27012G22KT 9999 FEW012 14/11 Q1008".into(),
            station_id: "EDDH".into(),
            observation_time: Utc::now(),
            latitude: 53.63,
            longitude: 10.0,
            temperature_c: 14.0,
            dewpoint_c: 11.0,
            wind_dir_degrees: 270,
            wind_speed_kt: 12,
            wind_gust_kt: 22,
            visibility_statute_mi: 6.21,
            altim_in_hg: 29.77,
            sea_level_pressure_mb: 0.0,
            quality_control_flags: QualityControlFlags::default(),
            wx_string: String::new(),
            sky_conditions: vec![SkyCondition { sky_cover: SkyCover::Few, cloud_base_ft_agl: Some(1200) }],
            flight_category: Some(FlightCategory::MarginalVisual),
            metar_type: MetarType::Metar,
            elevation_m: 16.0,
        }
    }

    #[test]
    fn renders_converted_units() {
        let text = render(&observation(), false);

        assert!(text.starts_with("EDDH 181620Z"));
        assert!(text.contains("270° at 12 kt (6.2 m/s, Beaufort 4), gusting 22 kt"));
        assert!(text.contains("(10.0 km)"));
        assert!(text.contains("FEW 1200 ft"));
        assert!(text.contains("Category:     MVFR"));
        assert!(!text.contains("°F"));
        assert!(!text.contains("SLP"));
    }

    #[test]
    fn imperial_adds_fahrenheit() {
        let text = render(&observation(), true);
        assert!(text.contains("14.0°C / 57.2°F"));
    }

    #[test]
    fn calm_and_variable_wind() {
        let mut obs = observation();
        obs.wind_dir_degrees = 0;
        obs.wind_speed_kt = 0;
        obs.wind_gust_kt = 0;
        assert_eq!(wind(&obs), "calm");

        obs.wind_speed_kt = 3;
        assert!(wind(&obs).starts_with("variable at 3 kt"));
    }
}
