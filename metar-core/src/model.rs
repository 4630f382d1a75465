use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::convert;

/// One decoded METAR report.
///
/// Serde attributes carry the mapping from the data server's `METAR` element;
/// elements not listed here are skipped. Missing or empty optional elements
/// decode as zero values, so `wind_dir_degrees == 0 && wind_speed_kt == 0` means calm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The raw METAR.
    pub raw_text: String,
    /// Four character alphanumeric station identifier.
    pub station_id: String,
    pub observation_time: DateTime<Utc>,
    /// Decimal degrees.
    #[serde(default, deserialize_with = "or_zero")]
    pub latitude: f64,
    /// Decimal degrees.
    #[serde(default, deserialize_with = "or_zero")]
    pub longitude: f64,
    #[serde(rename = "temp_c", default, deserialize_with = "or_zero")]
    pub temperature_c: f64,
    #[serde(default, deserialize_with = "or_zero")]
    pub dewpoint_c: f64,
    /// Direction the wind is blowing from; 0 means variable.
    #[serde(default, deserialize_with = "wind_direction")]
    pub wind_dir_degrees: u16,
    #[serde(default, deserialize_with = "or_zero")]
    pub wind_speed_kt: i32,
    #[serde(default, deserialize_with = "or_zero")]
    pub wind_gust_kt: i32,
    #[serde(default, deserialize_with = "visibility")]
    pub visibility_statute_mi: f64,
    #[serde(default, deserialize_with = "or_zero")]
    pub altim_in_hg: f64,
    #[serde(default, deserialize_with = "or_zero")]
    pub sea_level_pressure_mb: f64,
    #[serde(default)]
    pub quality_control_flags: QualityControlFlags,
    /// Present weather groups, e.g. `-RA BR`.
    #[serde(default)]
    pub wx_string: String,
    /// Up to four cloud layers, lowest first.
    #[serde(rename = "sky_condition", default)]
    pub sky_conditions: Vec<SkyCondition>,
    #[serde(default, deserialize_with = "optional_code")]
    pub flight_category: Option<FlightCategory>,
    pub metar_type: MetarType,
    /// Station elevation in meters.
    #[serde(default, deserialize_with = "or_zero")]
    pub elevation_m: f64,
}

impl Observation {
    /// Cover class of the lowest reported layer.
    pub fn sky_cover(&self) -> Option<SkyCover> {
        self.sky_conditions.first().map(|layer| layer.sky_cover)
    }

    pub fn is_calm(&self) -> bool {
        self.wind_dir_degrees == 0 && self.wind_speed_kt == 0
    }

    pub fn altimeter_hpa(&self) -> f64 {
        convert::inhg_to_hpa(self.altim_in_hg)
    }

    pub fn sea_level_pressure_hpa(&self) -> f64 {
        convert::mb_to_hpa(self.sea_level_pressure_mb)
    }

    pub fn wind_speed_ms(&self) -> f64 {
        convert::knots_to_ms(f64::from(self.wind_speed_kt))
    }

    pub fn wind_gust_ms(&self) -> f64 {
        convert::knots_to_ms(f64::from(self.wind_gust_kt))
    }

    pub fn visibility_km(&self) -> f64 {
        convert::statute_miles_to_km(self.visibility_statute_mi)
    }

    pub fn beaufort(&self) -> u8 {
        convert::knots_to_beaufort(f64::from(self.wind_speed_kt))
    }
}

/// Information about the station(s) that produced the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityControlFlags {
    /// The station reported loss of signal.
    #[serde(default, deserialize_with = "flag")]
    pub no_signal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyCondition {
    #[serde(rename(serialize = "sky_cover", deserialize = "@sky_cover"))]
    pub sky_cover: SkyCover,
    #[serde(
        rename(serialize = "cloud_base_ft_agl", deserialize = "@cloud_base_ft_agl"),
        default
    )]
    pub cloud_base_ft_agl: Option<u32>,
}

/// Sky coverage classes, roughly from clear to fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkyCover {
    /// Sky clear; in North America marks a human generated report.
    #[serde(rename = "SKC")]
    SkyClear,
    /// No clouds below 12,000 ft (US) or 25,000 ft (Canada), automated station.
    #[serde(rename = "CLR")]
    Clear,
    /// No significant cloud below 5,000 ft and no TCU or CB.
    #[serde(rename = "NSC")]
    NoSignificantCloud,
    /// 1-2 oktas.
    #[serde(rename = "FEW")]
    Few,
    /// 3-4 oktas.
    #[serde(rename = "SCT")]
    Scattered,
    /// 5-7 oktas.
    #[serde(rename = "BKN")]
    Broken,
    /// 8 oktas.
    #[serde(rename = "OVC")]
    Overcast,
    /// Sky obscured, vertical visibility reported instead of a ceiling.
    #[serde(rename = "OVX")]
    Obscured,
    /// Ceiling and visibility OK: no cloud below 5,000 ft, no CB/TCU,
    /// visibility 10 km or more and no significant weather.
    #[serde(rename = "CAVOK")]
    Cavok,
}

impl SkyCover {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkyCover::SkyClear => "SKC",
            SkyCover::Clear => "CLR",
            SkyCover::NoSignificantCloud => "NSC",
            SkyCover::Few => "FEW",
            SkyCover::Scattered => "SCT",
            SkyCover::Broken => "BKN",
            SkyCover::Overcast => "OVC",
            SkyCover::Obscured => "OVX",
            SkyCover::Cavok => "CAVOK",
        }
    }
}

impl fmt::Display for SkyCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flight rules classification, as computed by the data server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightCategory {
    /// Ceiling above 3,000 ft AGL and visibility above 5 miles.
    #[serde(rename = "VFR")]
    Visual,
    /// Ceiling 1,000 to 3,000 ft AGL and/or visibility 3 to 5 miles.
    #[serde(rename = "MVFR")]
    MarginalVisual,
    /// Ceiling 500 to below 1,000 ft AGL and/or visibility 1 to below 3 miles.
    #[serde(rename = "IFR")]
    Instrument,
    /// Ceiling below 500 ft AGL and/or visibility below 1 mile.
    #[serde(rename = "LIFR")]
    LowInstrument,
}

impl FlightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Visual => "VFR",
            FlightCategory::MarginalVisual => "MVFR",
            FlightCategory::Instrument => "IFR",
            FlightCategory::LowInstrument => "LIFR",
        }
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetarType {
    /// Routine report.
    #[serde(rename = "METAR")]
    Metar,
    /// Special (unscheduled) report.
    #[serde(rename = "SPECI")]
    Speci,
}

impl MetarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetarType::Metar => "METAR",
            MetarType::Speci => "SPECI",
        }
    }
}

impl fmt::Display for MetarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<response><data num_results="N"><METAR/>...</data></response>`
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope {
    pub(crate) data: ResponseData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseData {
    #[serde(rename = "@num_results")]
    pub(crate) num_results: usize,
    #[serde(rename = "METAR", default)]
    pub(crate) observations: Vec<Observation>,
}

// The data server writes booleans as `TRUE`/`FALSE`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" | "" => Ok(false),
        other => Err(de::Error::invalid_value(
            de::Unexpected::Str(other),
            &"a boolean flag",
        )),
    }
}

// Empty text (`<wind_gust_kt/>`) is the zero value.
fn or_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(T::default());
    }
    text.parse()
        .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(text), &"a number"))
}

// Empty text is no code at all.
fn optional_code<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    T::deserialize(de::value::StrDeserializer::<D::Error>::new(text)).map(Some)
}

// `VRB` is reported as 0, the same as a variable direction in degrees.
fn wind_direction<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("VRB") {
        return Ok(0);
    }
    text.parse().map_err(|_| {
        de::Error::invalid_value(de::Unexpected::Str(text), &"wind direction in degrees or VRB")
    })
}

// Unlimited visibility comes through as e.g. `10+`.
fn visibility<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    text.trim_end_matches('+').parse().map_err(|_| {
        de::Error::invalid_value(de::Unexpected::Str(text), &"visibility in statute miles")
    })
}
