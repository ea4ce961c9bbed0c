use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse weather family derived from a provider icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Clear,
    Cloud,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
}

impl WeatherCategory {
    /// Map an icon code such as `"10n"` by its two-character prefix.
    ///
    /// Unknown or short codes fall into `Cloud`.
    pub fn from_icon_code(code: &str) -> Self {
        match code.get(..2) {
            Some("01") => Self::Clear,
            Some("02" | "03" | "04") => Self::Cloud,
            Some("09" | "10") => Self::Rain,
            Some("11") => Self::Thunderstorm,
            Some("13") => Self::Snow,
            Some("50") => Self::Fog,
            _ => Self::Cloud,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloud => "cloud",
            Self::Rain => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Fog => "fog",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
