// Attendance-based rescaling of the requested bracket depth.
//
// Asking for a "top 8" on a 20-player event overstates how deep the cut
// really was. The table below maps event size to the depth actually shown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Requested top
// ---------------------------------------------------------------------------

/// Bracket depth a viewer asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RequestedTop {
    Top4,
    #[default]
    Top8,
    Top16,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported bracket size {0}: expected 4, 8 or 16")]
pub struct InvalidRequestedTop(pub String);

impl RequestedTop {
    pub const ALL: [RequestedTop; 3] = [RequestedTop::Top4, RequestedTop::Top8, RequestedTop::Top16];

    pub fn value(&self) -> u32 {
        match self {
            RequestedTop::Top4 => 4,
            RequestedTop::Top8 => 8,
            RequestedTop::Top16 => 16,
        }
    }

    /// Column of this request in the attendance table.
    pub fn index(&self) -> usize {
        match self {
            RequestedTop::Top4 => 0,
            RequestedTop::Top8 => 1,
            RequestedTop::Top16 => 2,
        }
    }

    /// The next size in the 4 -> 8 -> 16 -> 4 cycle.
    pub fn next(&self) -> Self {
        match self {
            RequestedTop::Top4 => RequestedTop::Top8,
            RequestedTop::Top8 => RequestedTop::Top16,
            RequestedTop::Top16 => RequestedTop::Top4,
        }
    }
}

impl TryFrom<u32> for RequestedTop {
    type Error = InvalidRequestedTop;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(RequestedTop::Top4),
            8 => Ok(RequestedTop::Top8),
            16 => Ok(RequestedTop::Top16),
            other => Err(InvalidRequestedTop(other.to_string())),
        }
    }
}

impl From<RequestedTop> for u32 {
    fn from(top: RequestedTop) -> Self {
        top.value()
    }
}

impl FromStr for RequestedTop {
    type Err = InvalidRequestedTop;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("top")
            .or_else(|| trimmed.strip_prefix("Top"))
            .unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map_err(|_| InvalidRequestedTop(s.to_string()))
            .and_then(RequestedTop::try_from)
    }
}

impl fmt::Display for RequestedTop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Top {}", self.value())
    }
}

// ---------------------------------------------------------------------------
// Attendance table
// ---------------------------------------------------------------------------

/// One row of the rescaling table.
struct AttendanceTier {
    /// Exclusive upper bound on attendance; `None` is unbounded.
    below: Option<u32>,
    /// Effective depth per requested top (4, 8, 16). `None` = not applicable.
    tops: [Option<u32>; 3],
}

const ATTENDANCE_TIERS: &[AttendanceTier] = &[
    AttendanceTier { below: Some(32), tops: [Some(2), Some(4), None] },
    AttendanceTier { below: Some(64), tops: [Some(4), Some(8), None] },
    AttendanceTier { below: Some(128), tops: [Some(4), Some(8), Some(16)] },
    AttendanceTier { below: Some(256), tops: [Some(4), Some(8), Some(16)] },
    AttendanceTier { below: None, tops: [Some(4), Some(8), Some(16)] },
];

/// Rescale `requested` for an event of the given size.
///
/// Returns `None` when attendance is unknown (0) or the table has no entry
/// for this request at this size; callers then show the requested depth
/// unchanged (see [`effective_top_or_requested`]).
pub fn select_effective_top(attendance: u32, requested: RequestedTop) -> Option<u32> {
    if attendance == 0 {
        return None;
    }

    let tier = ATTENDANCE_TIERS
        .iter()
        .find(|tier| tier.below.map_or(true, |ceiling| attendance < ceiling))?;

    tier.tops[requested.index()]
}

/// [`select_effective_top`] with the fallback applied.
pub fn effective_top_or_requested(attendance: u32, requested: RequestedTop) -> u32 {
    select_effective_top(attendance, requested).unwrap_or_else(|| requested.value())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(select_effective_top(20, RequestedTop::Top8), Some(4));
        assert_eq!(select_effective_top(40, RequestedTop::Top8), Some(8));
        assert_eq!(select_effective_top(5000, RequestedTop::Top8), Some(8));
        assert_eq!(select_effective_top(15, RequestedTop::Top8), Some(4));
    }

    #[test]
    fn ceilings_are_exclusive() {
        assert_eq!(select_effective_top(31, RequestedTop::Top4), Some(2));
        assert_eq!(select_effective_top(32, RequestedTop::Top4), Some(4));
        assert_eq!(select_effective_top(63, RequestedTop::Top16), None);
        assert_eq!(select_effective_top(64, RequestedTop::Top16), Some(16));
    }

    #[test]
    fn zero_attendance_is_unknown() {
        for requested in RequestedTop::ALL {
            assert_eq!(select_effective_top(0, requested), None);
            assert_eq!(effective_top_or_requested(0, requested), requested.value());
        }
    }

    #[test]
    fn small_events_have_no_top_16() {
        assert_eq!(select_effective_top(10, RequestedTop::Top16), None);
        assert_eq!(effective_top_or_requested(10, RequestedTop::Top16), 16);
    }

    #[test]
    fn result_is_power_of_two_not_above_request() {
        for attendance in 0..600 {
            for requested in RequestedTop::ALL {
                if let Some(top) = select_effective_top(attendance, requested) {
                    assert!(top.is_power_of_two(), "{top} for {attendance}/{requested}");
                    assert!(top <= requested.value());
                    assert!(top >= 2);
                }
            }
        }
    }

    #[test]
    fn requested_top_parsing() {
        assert_eq!("8".parse::<RequestedTop>(), Ok(RequestedTop::Top8));
        assert_eq!("top16".parse::<RequestedTop>(), Ok(RequestedTop::Top16));
        assert_eq!(" 4 ".parse::<RequestedTop>(), Ok(RequestedTop::Top4));
        assert!("32".parse::<RequestedTop>().is_err());
        assert!("eight".parse::<RequestedTop>().is_err());
        assert_eq!(RequestedTop::try_from(6), Err(InvalidRequestedTop("6".into())));
    }

    #[test]
    fn requested_top_cycles() {
        assert_eq!(RequestedTop::Top4.next(), RequestedTop::Top8);
        assert_eq!(RequestedTop::Top8.next(), RequestedTop::Top16);
        assert_eq!(RequestedTop::Top16.next(), RequestedTop::Top4);
        assert_eq!(RequestedTop::Top16.to_string(), "Top 16");
    }
}
