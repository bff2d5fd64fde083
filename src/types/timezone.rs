use chrono::{FixedOffset, Local, MappedLocalTime, NaiveDate, NaiveDateTime, TimeZone};
use derive_more::{Display, From};
use std::str::FromStr;

/// Timezone attached to every timestamp produced by the parser.
///
/// `Local` is the zone of the host the parser runs on, `Olson` is a zone
/// from the IANA database (UTC included).
#[derive(Debug, Clone, Copy, Default, From, PartialEq, Eq)]
pub enum Tz {
    #[default]
    Local,
    Olson(chrono_tz::Tz),
}

impl Tz {
    pub const UTC: Self = Self::Olson(chrono_tz::UTC);

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local => "Local",
            Self::Olson(tz) => tz.name(),
        }
    }

    /// Resolve a TZID parameter value.
    ///
    /// IANA names are tried first, then the names some proprietary clients
    /// (mostly Microsoft products) put into TZID.
    pub fn from_tzid(tzid: &str) -> Option<Self> {
        if let Ok(tz) = chrono_tz::Tz::from_str(tzid) {
            return Some(Self::Olson(tz));
        }
        get_proprietary_tzid(tzid).map(Self::Olson)
    }
}

static PROPRIETARY_TZIDS: phf::Map<&'static str, chrono_tz::Tz> = phf::phf_map! {
    "UTC" => chrono_tz::UTC,
    "GMT Standard Time" => chrono_tz::Europe::London,
    "Greenwich Standard Time" => chrono_tz::Atlantic::Reykjavik,
    "W. Europe Standard Time" => chrono_tz::Europe::Berlin,
    "Romance Standard Time" => chrono_tz::Europe::Paris,
    "Central Europe Standard Time" => chrono_tz::Europe::Budapest,
    "Central European Standard Time" => chrono_tz::Europe::Warsaw,
    "E. Europe Standard Time" => chrono_tz::Europe::Chisinau,
    "FLE Standard Time" => chrono_tz::Europe::Helsinki,
    "Russian Standard Time" => chrono_tz::Europe::Moscow,
    "Eastern Standard Time" => chrono_tz::America::New_York,
    "Central Standard Time" => chrono_tz::America::Chicago,
    "Mountain Standard Time" => chrono_tz::America::Denver,
    "Pacific Standard Time" => chrono_tz::America::Los_Angeles,
    "India Standard Time" => chrono_tz::Asia::Kolkata,
    "China Standard Time" => chrono_tz::Asia::Shanghai,
    "Tokyo Standard Time" => chrono_tz::Asia::Tokyo,
    "AUS Eastern Standard Time" => chrono_tz::Australia::Sydney,
};

/// Map a proprietary timezone name onto its IANA counterpart.
pub fn get_proprietary_tzid(tzid: &str) -> Option<chrono_tz::Tz> {
    PROPRIETARY_TZIDS.get(tzid).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CalTimezoneOffset {
    Local(FixedOffset),
    Olson(chrono_tz::TzOffset),
}

impl chrono::Offset for CalTimezoneOffset {
    fn fix(&self) -> FixedOffset {
        match self {
            Self::Local(offset) => *offset,
            Self::Olson(olson) => olson.fix(),
        }
    }
}

impl TimeZone for Tz {
    type Offset = CalTimezoneOffset;

    fn from_offset(offset: &Self::Offset) -> Self {
        match offset {
            CalTimezoneOffset::Local(_) => Self::Local,
            CalTimezoneOffset::Olson(offset) => Self::Olson(chrono_tz::Tz::from_offset(offset)),
        }
    }

    #[cfg(not(tarpaulin_include))] // Only used by deprecated chrono::Date type
    fn offset_from_local_date(&self, local: &NaiveDate) -> MappedLocalTime<Self::Offset> {
        match self {
            Self::Local => Local
                .offset_from_local_date(local)
                .map(CalTimezoneOffset::Local),
            Self::Olson(tz) => tz
                .offset_from_local_date(local)
                .map(CalTimezoneOffset::Olson),
        }
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<Self::Offset> {
        match self {
            Self::Local => Local
                .offset_from_local_datetime(local)
                .map(CalTimezoneOffset::Local),
            Self::Olson(tz) => tz
                .offset_from_local_datetime(local)
                .map(CalTimezoneOffset::Olson),
        }
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> Self::Offset {
        match self {
            Self::Local => CalTimezoneOffset::Local(Local.offset_from_utc_datetime(utc)),
            Self::Olson(tz) => CalTimezoneOffset::Olson(tz.offset_from_utc_datetime(utc)),
        }
    }

    #[cfg(not(tarpaulin_include))] // Only used by deprecated chrono::Date type
    fn offset_from_utc_date(&self, utc: &NaiveDate) -> Self::Offset {
        match self {
            Self::Local => CalTimezoneOffset::Local(Local.offset_from_utc_date(utc)),
            Self::Olson(tz) => CalTimezoneOffset::Olson(tz.offset_from_utc_date(utc)),
        }
    }
}
