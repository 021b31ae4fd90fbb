use std::{borrow::Cow, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::null_as_default;

pub const DEFAULT_MARKER: &str = "/RMK KLMVA";

/// Which feed a flight plan was filed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightPlanSource {
    /// Routine `FLIGHT_PLAN` events.
    Main,
    /// `EVENT_FLIGHT_PLAN`, filed on the event server.
    Event,
}

impl fmt::Display for FlightPlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Main => "Main",
            Self::Event => "Event",
        })
    }
}

/// A filed flight plan. Only `route` is interpreted, the other fields are
/// carried as whatever JSON the feed sent so an odd type never drops a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    #[serde(default, deserialize_with = "null_as_default")]
    pub route: String,
    pub callsign: Option<Value>,
    pub aircraft: Option<Value>,
    pub flightrules: Option<Value>,
    pub departing: Option<Value>,
    pub arriving: Option<Value>,
    pub flightlevel: Option<Value>,
    #[serde(rename = "robloxName")]
    pub roblox_name: Option<Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Text form of a pass-through field. Strings come back unquoted, `null`
/// counts as missing and anything else is rendered as JSON.
pub fn field_text(value: &Option<Value>) -> Option<Cow<'_, str>> {
    match value.as_ref()? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredFlightPlan {
    pub plan: FlightPlan,
    /// Route without the marker, original casing kept.
    pub route: String,
    pub source: FlightPlanSource,
}

#[derive(Debug, Clone)]
pub struct FlightPlanFilter {
    marker: String,
}

impl Default for FlightPlanFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl FlightPlanFilter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().trim().to_string(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Keeps plans whose trimmed route ends with the marker, ignoring case.
    /// Everything else is not ours and yields `None`.
    pub fn filter(&self, plan: FlightPlan, source: FlightPlanSource) -> Option<FilteredFlightPlan> {
        let route = self.strip_marker(&plan.route)?.to_string();
        Some(FilteredFlightPlan {
            plan,
            route,
            source,
        })
    }

    fn strip_marker<'a>(&self, route: &'a str) -> Option<&'a str> {
        let trimmed = route.trim();
        let split = trimmed.len().checked_sub(self.marker.len())?;
        if !trimmed.is_char_boundary(split) || !trimmed[split..].eq_ignore_ascii_case(&self.marker) {
            return None;
        }
        Some(trimmed[..split].trim())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn plan(route: &str) -> FlightPlan {
        FlightPlan {
            route: route.to_string(),
            callsign: Some(json!("KLM123")),
            ..FlightPlan::default()
        }
    }

    #[test]
    fn test_marked_route_is_accepted_and_stripped() {
        let filter = FlightPlanFilter::default();
        let out = filter
            .filter(plan("IRFD/07L N869 IPPH/29 /RMK KLMVA"), FlightPlanSource::Main)
            .unwrap();
        assert_eq!(out.route, "IRFD/07L N869 IPPH/29");
        assert_eq!(out.source, FlightPlanSource::Main);
        assert_eq!(field_text(&out.plan.callsign).as_deref(), Some("KLM123"));
    }

    #[test]
    fn test_unmarked_route_is_rejected() {
        let filter = FlightPlanFilter::default();
        assert!(filter.filter(plan("IRFD/07L N869 IPPH/29"), FlightPlanSource::Main).is_none());
        assert!(filter.filter(plan(""), FlightPlanSource::Main).is_none());
        assert!(filter.filter(plan("/RMK KLMVA IRFD/07L"), FlightPlanSource::Main).is_none());
    }

    #[test]
    fn test_lowercase_marker_with_whitespace_keeps_original_casing() {
        let filter = FlightPlanFilter::default();
        let out = filter
            .filter(plan("  irfd/07l dct Ipph/29 /rmk klmva  "), FlightPlanSource::Event)
            .unwrap();
        assert_eq!(out.route, "irfd/07l dct Ipph/29");
        assert_eq!(out.source, FlightPlanSource::Event);
    }

    #[test]
    fn test_marker_only_route_gives_empty_route() {
        let filter = FlightPlanFilter::default();
        let out = filter.filter(plan("/RMK KLMVA"), FlightPlanSource::Main).unwrap();
        assert_eq!(out.route, "");
    }

    #[test]
    fn test_non_ascii_route_does_not_panic() {
        let filter = FlightPlanFilter::default();
        assert!(filter.filter(plan("ÅÅÅÅÅÅ"), FlightPlanSource::Main).is_none());
        let out = filter.filter(plan("ÆØÅ DCT /RMK KLMVA"), FlightPlanSource::Main).unwrap();
        assert_eq!(out.route, "ÆØÅ DCT");
    }

    #[test]
    fn test_configured_marker_is_trimmed() {
        let filter = FlightPlanFilter::new("  /RMK EXAMPLE \n");
        assert_eq!(filter.marker(), "/RMK EXAMPLE");
        let out = filter.filter(plan("DCT /rmk example"), FlightPlanSource::Main).unwrap();
        assert_eq!(out.route, "DCT");
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&None), None);
        assert_eq!(field_text(&Some(Value::Null)), None);
        assert_eq!(field_text(&Some(json!("FL320"))).as_deref(), Some("FL320"));
        assert_eq!(field_text(&Some(json!(320))).as_deref(), Some("320"));
        assert_eq!(field_text(&Some(json!(true))).as_deref(), Some("true"));
    }

    #[test]
    fn test_decode_keeps_unknown_fields() {
        let json = r#"{"route":"DCT /RMK KLMVA","callsign":"KLM1","robloxName":"pilot","realcallsign":"KLM-1"}"#;
        let plan: FlightPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.roblox_name, Some(json!("pilot")));
        assert_eq!(plan.extra["realcallsign"], "KLM-1");
    }
}
