use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// How a timestamp was stored before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeEncoding {
    /// 100ns intervals since 1601-01-01
    Filetime,
    /// 16 byte `SYSTEMTIME` structure
    Systemtime,
    /// 32 bit seconds since 1970-01-01
    Unixepoch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    At(DateTime<Utc>),
    Absent,
    /// Value was present but outside of the representable range
    Invalid,
}

/// A decoded point in time. Raw integers never leave the decoders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalValue {
    pub moment: Moment,
    pub encoding: TimeEncoding,
}

impl TemporalValue {
    pub fn at(time: DateTime<Utc>, encoding: TimeEncoding) -> TemporalValue {
        TemporalValue {
            moment: Moment::At(time),
            encoding,
        }
    }

    pub fn absent(encoding: TimeEncoding) -> TemporalValue {
        TemporalValue {
            moment: Moment::Absent,
            encoding,
        }
    }

    pub fn invalid(encoding: TimeEncoding) -> TemporalValue {
        TemporalValue {
            moment: Moment::Invalid,
            encoding,
        }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        match self.moment {
            Moment::At(time) => Some(time),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self.moment, Moment::At(_))
    }

    /// Use `fallback` when this value does not hold a time
    pub fn or(self, fallback: TemporalValue) -> TemporalValue {
        if self.is_present() {
            return self;
        }
        fallback
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.moment {
            Moment::At(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S")),
            Moment::Absent => write!(f, "N/A"),
            Moment::Invalid => write!(f, "Invalid Timestamp"),
        }
    }
}

impl Serialize for TemporalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{TemporalValue, TimeEncoding};
    use chrono::DateTime;

    #[test]
    fn test_display() {
        let time = DateTime::from_timestamp(1673778600, 0).unwrap();
        let value = TemporalValue::at(time, TimeEncoding::Filetime);
        assert_eq!(value.to_string(), "2023-01-15 10:30:00");
        assert_eq!(
            TemporalValue::absent(TimeEncoding::Filetime).to_string(),
            "N/A"
        );
        assert_eq!(
            TemporalValue::invalid(TimeEncoding::Unixepoch).to_string(),
            "Invalid Timestamp"
        );
    }

    #[test]
    fn test_or() {
        let time = DateTime::from_timestamp(1673778600, 0).unwrap();
        let fallback = TemporalValue::at(time, TimeEncoding::Filetime);
        let result = TemporalValue::absent(TimeEncoding::Filetime).or(fallback);
        assert_eq!(result, fallback);

        let invalid = TemporalValue::invalid(TimeEncoding::Unixepoch);
        assert_eq!(invalid.or(fallback), fallback);
    }

    #[test]
    fn test_serialize() {
        let value = TemporalValue::absent(TimeEncoding::Systemtime);
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"N/A\"");
    }
}
