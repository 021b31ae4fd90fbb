use std::future::Future;

use crate::{evaluator::Recommendation, flight_plan::FilteredFlightPlan};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Recommendation(Recommendation),
    FlightPlan(FilteredFlightPlan),
}

/// Destination for everything the feed decides to publish.
///
/// Delivery problems stay inside the sink: log them and return. Nothing is
/// queued for a later retry, the next evaluation works from current state.
pub trait NotificationSink {
    fn deliver(&mut self, notification: Notification) -> impl Future<Output = ()> + Send;
}

/// Collects notifications in memory.
impl NotificationSink for Vec<Notification> {
    async fn deliver(&mut self, notification: Notification) {
        self.push(notification);
    }
}
