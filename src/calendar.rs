// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Google-Calendar-compatible event payload construction. Pure transform,
//! no I/O.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// A dateless event has nothing to anchor the payload to and is rejected.
    #[error("cannot build a calendar payload for an event without a date")]
    MissingDate,
}

/// An invitation as seen by the payload builder: a guest name plus RSVP
/// status. Only "attending" entries make it into the guest list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub friend_name: String,
    pub status: String,
}

/// Start or end time in the Google Calendar wire shape: either a timed
/// `dateTime` or an all-day `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    Timed {
        #[serde(rename = "dateTime")]
        date_time: String,
    },
    AllDay { date: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPayload {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Build the calendar event payload.
///
/// date + time: a timed event lasting exactly one hour; an end past midnight
/// rolls onto the next calendar day. date only: an all-day event spanning
/// date to date+1 (exclusive end, per the Google convention). No date is an
/// error.
pub fn build_calendar_payload(
    name: &str,
    activity_name: Option<&str>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    location: Option<&str>,
    invitations: &[Invitation],
) -> Result<CalendarPayload, CalendarError> {
    let date = date.ok_or(CalendarError::MissingDate)?;

    let (start, end) = match time {
        Some(time) => {
            let start = date.and_time(time);
            let end = start + Duration::hours(1);
            (
                EventTime::Timed {
                    date_time: start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                },
                EventTime::Timed {
                    date_time: end.format("%Y-%m-%dT%H:%M:%S").to_string(),
                },
            )
        }
        None => (
            EventTime::AllDay {
                date: date.format("%Y-%m-%d").to_string(),
            },
            EventTime::AllDay {
                date: (date + Duration::days(1)).format("%Y-%m-%d").to_string(),
            },
        ),
    };

    Ok(CalendarPayload {
        summary: name.to_string(),
        description: build_description(activity_name, invitations),
        location: location.map(|l| l.to_string()),
        start,
        end,
    })
}

/// Description lists the activity (if present) and the attending guests.
/// Declined and pending invitations are excluded silently.
fn build_description(activity_name: Option<&str>, invitations: &[Invitation]) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(activity) = activity_name {
        lines.push(format!("Activity: {}", activity));
    }

    let attending: Vec<&str> = invitations
        .iter()
        .filter(|i| i.status == "attending")
        .map(|i| i.friend_name.as_str())
        .collect();
    if !attending.is_empty() {
        lines.push(format!("Attending: {}", attending.join(", ")));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Parse an "HH:MM" form value into a time of day.
pub fn parse_event_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(name: &str, status: &str) -> Invitation {
        Invitation {
            friend_name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn timed_event_lasts_one_hour() {
        let payload = build_calendar_payload(
            "Dinner",
            None,
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
            Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
            Some("Cafe Luna"),
            &[],
        )
        .unwrap();

        assert_eq!(
            payload.start,
            EventTime::Timed {
                date_time: "2026-03-15T18:00:00".to_string()
            }
        );
        assert_eq!(
            payload.end,
            EventTime::Timed {
                date_time: "2026-03-15T19:00:00".to_string()
            }
        );
        assert_eq!(payload.location.as_deref(), Some("Cafe Luna"));
    }

    #[test]
    fn end_time_rolls_over_midnight() {
        let payload = build_calendar_payload(
            "Late show",
            None,
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
            Some(NaiveTime::from_hms_opt(23, 30, 0).unwrap()),
            None,
            &[],
        )
        .unwrap();

        assert_eq!(
            payload.end,
            EventTime::Timed {
                date_time: "2026-03-16T00:30:00".to_string()
            }
        );
    }

    #[test]
    fn date_without_time_is_all_day_with_exclusive_end() {
        let payload = build_calendar_payload(
            "Hike",
            None,
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
            None,
            None,
            &[],
        )
        .unwrap();

        assert_eq!(
            payload.start,
            EventTime::AllDay {
                date: "2026-03-15".to_string()
            }
        );
        assert_eq!(
            payload.end,
            EventTime::AllDay {
                date: "2026-03-16".to_string()
            }
        );
    }

    #[test]
    fn dateless_event_is_rejected() {
        let result = build_calendar_payload("Sometime", None, None, None, None, &[]);
        assert!(matches!(result, Err(CalendarError::MissingDate)));
    }

    #[test]
    fn guest_list_keeps_only_attending_invitations() {
        let payload = build_calendar_payload(
            "Picnic",
            Some("hiking"),
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
            None,
            None,
            &[
                invitation("Ana", "attending"),
                invitation("Ben", "declined"),
                invitation("Cleo", "invited"),
            ],
        )
        .unwrap();

        assert_eq!(
            payload.description.as_deref(),
            Some("Activity: hiking\nAttending: Ana")
        );
    }

    #[test]
    fn description_absent_without_activity_or_guests() {
        let payload = build_calendar_payload(
            "Coffee",
            None,
            Some(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
            None,
            None,
            &[invitation("Ben", "declined")],
        )
        .unwrap();
        assert!(payload.description.is_none());
    }

    #[test]
    fn event_time_parsing() {
        assert_eq!(
            parse_event_time("23:30"),
            Some(NaiveTime::from_hms_opt(23, 30, 0).unwrap())
        );
        assert_eq!(parse_event_time("not a time"), None);
    }
}
