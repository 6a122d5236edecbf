use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The zone calendar days are computed in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ReferenceZone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl ReferenceZone {
    /// The offset this zone has at the given instant. Only `Local` can vary over time.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            ReferenceZone::Local => instant.with_timezone(&Local).offset().fix(),
            ReferenceZone::Utc => Utc.fix(),
            ReferenceZone::Fixed(offset) => *offset,
        }
    }
}

impl FromStr for ReferenceZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ReferenceZone::Local),
            "utc" | "z" => Ok(ReferenceZone::Utc),
            offset => parse_offset(offset)
                .map(ReferenceZone::Fixed)
                .ok_or_else(|| format!("invalid reference zone '{}', expected 'local', 'utc' or an offset like '+02:00'", s)),
        }
    }
}

impl Display for ReferenceZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceZone::Local => write!(f, "local"),
            ReferenceZone::Utc => write!(f, "utc"),
            ReferenceZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

// Accepts +HH:MM, +HHMM and +HH
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let rest = &s[1..];

    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "00"),
    };

    let is_two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !is_two_digits(hours) || !is_two_digits(minutes) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
