//! Station feed payload types and parser.
//!
//! The feed uses PascalCase field names and has been observed in two
//! shapes: a bare array of stations, or an object wrapping the array under
//! `Data` (sometimes `data`). Unknown fields are ignored.

use serde::Deserialize;

/// One station as listed by the feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationRecord {
    /// Feed-assigned identifier. Numeric or string depending on the feed version.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Brand visibility bitmask.
    pub filter: i64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedBody {
    List(Vec<StationRecord>),
    Wrapped {
        #[serde(rename = "Data", alias = "data")]
        data: Vec<StationRecord>,
    },
}

impl FeedBody {
    fn into_stations(self) -> Vec<StationRecord> {
        match self {
            Self::List(stations) | Self::Wrapped { data: stations } => stations,
        }
    }
}

/// Parse a raw feed body into station records.
pub fn parse_feed(body: &[u8]) -> Result<Vec<StationRecord>, serde_json::Error> {
    serde_json::from_slice::<FeedBody>(body).map(FeedBody::into_stations)
}
