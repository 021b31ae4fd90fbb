//! Ingestion core for the PTFS 24data event stream.
//!
//! Advisories (ATIS) update the per-airport runway state, which drives route
//! recommendations for the monitored airport pairs. Flight plans carrying the
//! operator marker are filtered out of the stream and forwarded.

pub mod airport;
pub mod atis_parser;
pub mod coordinator;
pub mod envelope;
pub mod error;
pub mod evaluator;
pub mod flight_plan;
pub mod route_table;
pub mod runway;
pub mod runway_state;
pub mod sink;
pub mod stream;

pub use airport::AirportCode;
pub use coordinator::Coordinator;
pub use envelope::{Advisory, StreamEvent};
pub use error::{FeedError, FeedResult};
pub use evaluator::{Recommendation, RoutePair};
pub use flight_plan::{
    FilteredFlightPlan, FlightPlan, FlightPlanFilter, FlightPlanSource, field_text,
};
pub use route_table::{NestedRouteTable, RouteConfig, RouteTable};
pub use runway::{RunwayDesignator, RunwayRole};
pub use sink::{Notification, NotificationSink};
pub use stream::{StreamClient, WebSocketConnector};
