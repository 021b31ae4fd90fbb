use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    airport::AirportCode,
    route_table::{RouteConfig, RouteTable},
    runway::RunwayDesignator,
    runway_state::RunwayState,
};

/// A monitored departure/arrival airport combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePair {
    pub departure: AirportCode,
    pub arrival: AirportCode,
}

impl RoutePair {
    pub fn new(departure: AirportCode, arrival: AirportCode) -> Self {
        Self { departure, arrival }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub departure: AirportCode,
    pub departure_runway: RunwayDesignator,
    pub arrival: AirportCode,
    pub arrival_runway: RunwayDesignator,
    pub route: RouteConfig,
}

type RunwayCombination = (RunwayDesignator, RunwayDesignator);

/// Decides when a route recommendation has to be (re)published.
///
/// A pair is only announced again once its runway combination differs from
/// the last one announced. A table miss does not mark the combination as
/// announced, so a route added later for it can still fire.
#[derive(Debug)]
pub struct RouteEvaluator {
    pairs: Vec<RoutePair>,
    announced: IndexMap<RoutePair, RunwayCombination>,
    enabled: bool,
}

impl RouteEvaluator {
    pub fn new(pairs: Vec<RoutePair>) -> Self {
        Self {
            pairs,
            announced: IndexMap::new(),
            enabled: true,
        }
    }

    pub fn pairs(&self) -> &[RoutePair] {
        &self.pairs
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling forgets everything announced so far, the destination is
    /// expected to be cleared while routing is off.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.announced.clear();
        }
        self.enabled = enabled;
    }

    pub fn announced(&self, pair: &RoutePair) -> Option<&RunwayCombination> {
        self.announced.get(pair)
    }

    pub fn reevaluate<T: RouteTable + ?Sized>(
        &mut self,
        runways: &RunwayState,
        table: &T,
    ) -> Vec<Recommendation> {
        if !self.enabled {
            return Vec::new();
        }

        let mut recommendations = Vec::new();
        for pair in &self.pairs {
            let (Some(dep_rwy), Some(arr_rwy)) = (
                runways.current_departure(&pair.departure),
                runways.current_arrival(&pair.arrival),
            ) else {
                continue;
            };

            if let Some((last_dep, last_arr)) = self.announced.get(pair)
                && last_dep == dep_rwy
                && last_arr == arr_rwy
            {
                continue;
            }

            let Some(route) = table.lookup(&pair.departure, dep_rwy, &pair.arrival, arr_rwy) else {
                debug!(
                    departure = %pair.departure, %dep_rwy,
                    arrival = %pair.arrival, %arr_rwy,
                    "No route configured for runway combination"
                );
                continue;
            };

            self.announced
                .insert(pair.clone(), (dep_rwy.clone(), arr_rwy.clone()));
            recommendations.push(Recommendation {
                departure: pair.departure.clone(),
                departure_runway: dep_rwy.clone(),
                arrival: pair.arrival.clone(),
                arrival_runway: arr_rwy.clone(),
                route: route.clone(),
            });
        }
        recommendations
    }
}
