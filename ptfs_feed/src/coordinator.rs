use tracing::{debug, info};

use crate::{
    atis_parser::find_runways_in_atis,
    envelope::{Advisory, StreamEvent},
    evaluator::{RouteEvaluator, RoutePair},
    flight_plan::{FlightPlan, FlightPlanFilter, FlightPlanSource, field_text},
    route_table::RouteTable,
    runway_state::RunwayState,
    sink::Notification,
};

/// Owns all mutable feed state. Every advisory, whether from the startup
/// fetch or the live stream, goes through [`Coordinator::handle_advisory`].
#[derive(Debug)]
pub struct Coordinator<T> {
    runways: RunwayState,
    evaluator: RouteEvaluator,
    routes: T,
    flight_plans: FlightPlanFilter,
}

impl<T: RouteTable> Coordinator<T> {
    pub fn new(pairs: Vec<RoutePair>, routes: T, flight_plans: FlightPlanFilter) -> Self {
        Self {
            runways: RunwayState::new(),
            evaluator: RouteEvaluator::new(pairs),
            routes,
            flight_plans,
        }
    }

    pub fn runways(&self) -> &RunwayState {
        &self.runways
    }

    pub fn set_routing_enabled(&mut self, enabled: bool) {
        info!(enabled, "Route recommendations toggled");
        self.evaluator.set_enabled(enabled);
    }

    pub fn handle_event(&mut self, event: StreamEvent) -> Vec<Notification> {
        match event {
            StreamEvent::Atis(advisory) => self.handle_advisory(&advisory),
            StreamEvent::FlightPlan(plan, source) => {
                self.handle_flight_plan(plan, source).into_iter().collect()
            }
            StreamEvent::Unknown(kind) => {
                debug!(kind, "Ignoring event");
                Vec::new()
            }
        }
    }

    pub fn handle_advisory(&mut self, advisory: &Advisory) -> Vec<Notification> {
        let runways = find_runways_in_atis(&advisory.lines);
        info!(
            airport = %advisory.airport,
            departure = ?runways.departure.as_ref().map(|r| r.as_str()),
            arrival = ?runways.arrival.as_ref().map(|r| r.as_str()),
            "ATIS received"
        );
        self.runways
            .apply_advisory(&advisory.airport, runways.departure, runways.arrival);
        self.evaluator
            .reevaluate(&self.runways, &self.routes)
            .into_iter()
            .map(Notification::Recommendation)
            .collect()
    }

    pub fn handle_flight_plan(
        &self,
        plan: FlightPlan,
        source: FlightPlanSource,
    ) -> Option<Notification> {
        let filtered = self.flight_plans.filter(plan, source)?;
        let callsign = field_text(&filtered.plan.callsign);
        info!(
            callsign = callsign.as_deref().unwrap_or("N/A"),
            %source,
            "Flight plan with marker filed"
        );
        Some(Notification::FlightPlan(filtered))
    }
}
