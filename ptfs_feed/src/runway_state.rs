use indexmap::IndexMap;

use crate::{airport::AirportCode, runway::RunwayDesignator};

/// Last known departure and arrival runway per airport.
///
/// Values are sticky: an advisory without runway information for a role
/// leaves whatever was known before in place.
#[derive(Debug, Default)]
pub struct RunwayState {
    departures: IndexMap<AirportCode, RunwayDesignator>,
    arrivals: IndexMap<AirportCode, RunwayDesignator>,
}

impl RunwayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_advisory(
        &mut self,
        airport: &AirportCode,
        departure: Option<RunwayDesignator>,
        arrival: Option<RunwayDesignator>,
    ) {
        if let Some(runway) = departure {
            self.departures.insert(airport.clone(), runway);
        }
        if let Some(runway) = arrival {
            self.arrivals.insert(airport.clone(), runway);
        }
    }

    pub fn current_departure(&self, airport: &AirportCode) -> Option<&RunwayDesignator> {
        self.departures.get(airport)
    }

    pub fn current_arrival(&self, airport: &AirportCode) -> Option<&RunwayDesignator> {
        self.arrivals.get(airport)
    }
}
