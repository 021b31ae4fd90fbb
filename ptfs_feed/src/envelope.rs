use serde::{Deserialize, Deserializer};

use crate::{
    airport::AirportCode,
    error::FeedResult,
    flight_plan::{FlightPlan, FlightPlanSource},
};

/// Raw `{"t": ..., "d": ...}` frame from the event stream.
#[derive(Debug, Deserialize)]
struct Envelope {
    t: String,
    #[serde(default)]
    d: serde_json::Value,
}

/// Airport advisory (ATIS) payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Advisory {
    pub airport: AirportCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lines: Vec<String>,
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Atis(Advisory),
    FlightPlan(FlightPlan, FlightPlanSource),
    Unknown(String),
}

impl StreamEvent {
    pub fn decode(text: &str) -> FeedResult<Self> {
        let Envelope { t, d } = serde_json::from_str(text)?;
        Ok(match t.as_str() {
            "ATIS" => Self::Atis(serde_json::from_value(d)?),
            "FLIGHT_PLAN" => Self::FlightPlan(serde_json::from_value(d)?, FlightPlanSource::Main),
            "EVENT_FLIGHT_PLAN" => {
                Self::FlightPlan(serde_json::from_value(d)?, FlightPlanSource::Event)
            }
            _ => Self::Unknown(t),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::flight_plan::{FlightPlanFilter, field_text};

    #[test]
    fn test_decode_atis() {
        let text = r#"{"t":"ATIS","d":{"airport":"IRFD","letter":"C","lines":["DEP RWY 25L","ARR RWY 25R"]}}"#;
        let StreamEvent::Atis(advisory) = StreamEvent::decode(text).unwrap() else {
            panic!("expected advisory");
        };
        assert_eq!(advisory.airport.as_str(), "IRFD");
        assert_eq!(advisory.lines.len(), 2);
    }

    #[test]
    fn test_decode_flight_plan_variants() {
        let main = r#"{"t":"FLIGHT_PLAN","d":{"route":"DCT /RMK KLMVA","callsign":"KLM1","flightlevel":"320"}}"#;
        let event = r#"{"t":"EVENT_FLIGHT_PLAN","d":{"route":"DCT","flightlevel":280}}"#;
        match StreamEvent::decode(main).unwrap() {
            StreamEvent::FlightPlan(plan, FlightPlanSource::Main) => {
                assert_eq!(plan.callsign, Some(json!("KLM1")))
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            StreamEvent::decode(event).unwrap(),
            StreamEvent::FlightPlan(_, FlightPlanSource::Event)
        ));
    }

    #[test]
    fn test_null_lines_decode_as_empty() {
        let text = r#"{"t":"ATIS","d":{"airport":"IRFD","lines":null}}"#;
        let StreamEvent::Atis(advisory) = StreamEvent::decode(text).unwrap() else {
            panic!("expected advisory");
        };
        assert_eq!(advisory.airport.as_str(), "IRFD");
        assert!(advisory.lines.is_empty());
    }

    #[test]
    fn test_marked_plan_with_odd_field_types_passes_filter() {
        let text = r#"{"t":"FLIGHT_PLAN","d":{"route":"IRFD/07 N869 IPPH/29 /RMK KLMVA","callsign":1234,"flightlevel":35.5,"aircraft":null,"arriving":["IPPH"]}}"#;
        let StreamEvent::FlightPlan(plan, source) = StreamEvent::decode(text).unwrap() else {
            panic!("expected flight plan");
        };
        let filtered = FlightPlanFilter::default().filter(plan, source).unwrap();
        assert_eq!(filtered.route, "IRFD/07 N869 IPPH/29");
        assert_eq!(filtered.source, FlightPlanSource::Main);
        assert_eq!(field_text(&filtered.plan.callsign).as_deref(), Some("1234"));
        assert_eq!(field_text(&filtered.plan.flightlevel).as_deref(), Some("35.5"));
        assert_eq!(field_text(&filtered.plan.aircraft), None);
        assert_eq!(field_text(&filtered.plan.arriving).as_deref(), Some(r#"["IPPH"]"#));
    }

    #[test]
    fn test_null_route_is_not_a_decode_error() {
        let text = r#"{"t":"EVENT_FLIGHT_PLAN","d":{"route":null,"callsign":"KLM1"}}"#;
        let StreamEvent::FlightPlan(plan, _) = StreamEvent::decode(text).unwrap() else {
            panic!("expected flight plan");
        };
        assert_eq!(plan.route, "");
        assert!(FlightPlanFilter::default().filter(plan, FlightPlanSource::Event).is_none());
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let text = r#"{"t":"CONTROLLERS","d":[{"holder":"someone"}]}"#;
        assert_eq!(
            StreamEvent::decode(text).unwrap(),
            StreamEvent::Unknown("CONTROLLERS".to_string())
        );
    }

    #[test]
    fn test_malformed_messages() {
        assert!(StreamEvent::decode("not json").is_err());
        assert!(StreamEvent::decode(r#"{"d":{}}"#).is_err());
        assert!(StreamEvent::decode(r#"{"t":"ATIS","d":{"lines":[]}}"#).is_err());
        assert!(StreamEvent::decode(r#"{"t":"ATIS","d":{"airport":"X1","lines":[]}}"#).is_err());
    }
}
