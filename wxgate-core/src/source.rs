//! Source-mode selection
//!
//! Each request consults exactly one upstream source. The query flags are
//! folded into an explicit mode with a fixed precedence (metar > raw
//! forecast > weekly forecast), falling back to the map-click
//! current-conditions source when no flag is present.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Metar,
    RawForecast,
    WeeklyForecast,
    MapClick,
}

/// Which source flags were present on the query string. Flag values are
/// ignored; presence alone selects the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceFlags {
    pub metar: bool,
    pub raw_forecast: bool,
    pub weekly_forecast: bool,
    pub map_click: bool,
}

impl SourceMode {
    /// Pick the highest-precedence source among the flags present.
    pub fn select(flags: SourceFlags) -> SourceMode {
        if flags.metar {
            SourceMode::Metar
        } else if flags.raw_forecast {
            SourceMode::RawForecast
        } else if flags.weekly_forecast {
            SourceMode::WeeklyForecast
        } else {
            // map_click is the default whether or not its flag was given
            SourceMode::MapClick
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Metar => "metar",
            SourceMode::RawForecast => "raw_forecast",
            SourceMode::WeeklyForecast => "weekly_forecast",
            SourceMode::MapClick => "map_click",
        }
    }
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_map_click() {
        assert_eq!(SourceMode::select(SourceFlags::default()), SourceMode::MapClick);
    }

    #[test]
    fn test_explicit_map_click_flag() {
        let flags = SourceFlags {
            map_click: true,
            ..Default::default()
        };
        assert_eq!(SourceMode::select(flags), SourceMode::MapClick);
    }

    #[test]
    fn test_single_flags() {
        let metar = SourceFlags {
            metar: true,
            ..Default::default()
        };
        assert_eq!(SourceMode::select(metar), SourceMode::Metar);

        let raw = SourceFlags {
            raw_forecast: true,
            ..Default::default()
        };
        assert_eq!(SourceMode::select(raw), SourceMode::RawForecast);

        let weekly = SourceFlags {
            weekly_forecast: true,
            ..Default::default()
        };
        assert_eq!(SourceMode::select(weekly), SourceMode::WeeklyForecast);
    }

    #[test]
    fn test_precedence_when_multiple_flags_present() {
        let all = SourceFlags {
            metar: true,
            raw_forecast: true,
            weekly_forecast: true,
            map_click: true,
        };
        assert_eq!(SourceMode::select(all), SourceMode::Metar);

        let no_metar = SourceFlags {
            raw_forecast: true,
            weekly_forecast: true,
            map_click: true,
            ..Default::default()
        };
        assert_eq!(SourceMode::select(no_metar), SourceMode::RawForecast);

        let weekly_and_click = SourceFlags {
            weekly_forecast: true,
            map_click: true,
            ..Default::default()
        };
        assert_eq!(SourceMode::select(weekly_and_click), SourceMode::WeeklyForecast);
    }
}
