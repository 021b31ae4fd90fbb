use std::fmt::Write;

use indexmap::IndexMap;
use ptfs_feed::{
    AirportCode, FilteredFlightPlan, Notification, NotificationSink, Recommendation, field_text,
};
use tracing::info;

/// Renders notifications into chat-ready text and publishes them as log events.
pub(crate) struct LogSink {
    airport_names: IndexMap<String, String>,
    marker: String,
}

impl LogSink {
    pub fn new(airport_names: IndexMap<String, String>, marker: impl Into<String>) -> Self {
        Self {
            airport_names,
            marker: marker.into(),
        }
    }

    fn airport_name<'a>(&'a self, icao: &'a AirportCode) -> &'a str {
        self.airport_names
            .get(icao.as_str())
            .map(String::as_str)
            .unwrap_or(icao.as_str())
    }

    /// Ready to paste `/createflightplan` command for a recommendation.
    pub fn flight_plan_command(&self, rec: &Recommendation) -> String {
        format!(
            "/createflightplan ingamecallsign: callsign:KLM### aircraft:A/Bxxx flightrules:IFR \
             departing:{} arriving:{} flightlevel:{} route:{}/{} {} {}/{} {}",
            self.airport_name(&rec.departure),
            self.airport_name(&rec.arrival),
            rec.route.flightlevel,
            rec.departure,
            rec.departure_runway,
            rec.route.route,
            rec.arrival,
            rec.arrival_runway,
            self.marker,
        )
    }

    pub fn render_recommendation(&self, rec: &Recommendation) -> String {
        format!(
            "KLM Route Recommendation - {} to {}\n\
             Active departure runway: {}\n\
             Create Flight Plan Command: {}",
            rec.departure,
            rec.arrival,
            rec.departure_runway,
            self.flight_plan_command(rec),
        )
    }

    pub fn render_flight_plan(fp: &FilteredFlightPlan) -> String {
        fn or_na(value: Option<&str>) -> &str {
            value.filter(|v| !v.trim().is_empty()).unwrap_or("N/A")
        }

        let plan = &fp.plan;
        let fields = [
            ("Username", field_text(&plan.roblox_name)),
            ("Callsign", field_text(&plan.callsign)),
            ("Aircraft", field_text(&plan.aircraft)),
            ("Flight Rules", field_text(&plan.flightrules)),
            ("From", field_text(&plan.departing)),
            ("To", field_text(&plan.arriving)),
            ("Flight Level", field_text(&plan.flightlevel)),
            ("Route", Some(fp.route.as_str().into())),
        ];

        let mut text = String::from("KLM VA Flight Plan Filed\n");
        for (name, value) in fields {
            let _ = writeln!(text, "{name}: {}", or_na(value.as_deref()));
        }
        let _ = write!(text, "Server: {}", fp.source);
        text
    }
}

impl NotificationSink for LogSink {
    async fn deliver(&mut self, notification: Notification) {
        match notification {
            Notification::Recommendation(rec) => {
                let message = self.render_recommendation(&rec);
                info!(
                    departure = %rec.departure,
                    arrival = %rec.arrival,
                    "Publishing route recommendation\n{message}"
                );
            }
            Notification::FlightPlan(fp) => {
                let message = Self::render_flight_plan(&fp);
                info!(source = %fp.source, "Publishing flight plan\n{message}");
            }
        }
    }
}
