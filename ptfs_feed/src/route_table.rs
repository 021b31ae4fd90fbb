use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{airport::AirportCode, error::FeedResult, runway::RunwayDesignator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub route: String,
    pub flightlevel: FlightLevel,
}

/// Route files write the level both as `"350"` and `350`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlightLevel {
    Number(u32),
    Text(String),
}

impl fmt::Display for FlightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

pub trait RouteTable {
    fn lookup(
        &self,
        departure: &AirportCode,
        departure_runway: &RunwayDesignator,
        arrival: &AirportCode,
        arrival_runway: &RunwayDesignator,
    ) -> Option<&RouteConfig>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    departure: AirportCode,
    departure_runway: RunwayDesignator,
    arrival: AirportCode,
    arrival_runway: RunwayDesignator,
}

/// Leaves that are not a full route (typically `{}`) count as "no route".
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLeaf {
    Route(RouteConfig),
    #[allow(dead_code)]
    Other(serde_json::Value),
}

type RawRoutes = IndexMap<String, IndexMap<String, IndexMap<String, IndexMap<String, RawLeaf>>>>;

/// Route table in the `routes.json` layout:
/// departure -> departure runway -> arrival -> arrival runway -> route.
#[derive(Debug, Default)]
pub struct NestedRouteTable {
    routes: IndexMap<RouteKey, RouteConfig>,
}

impl NestedRouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> FeedResult<Self> {
        let raw: RawRoutes = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (departure, by_dep_rwy) in raw {
            let departure: AirportCode = departure.parse()?;
            for (departure_runway, by_arrival) in by_dep_rwy {
                let departure_runway: RunwayDesignator = departure_runway.parse()?;
                for (arrival, by_arr_rwy) in by_arrival {
                    let arrival: AirportCode = arrival.parse()?;
                    for (arrival_runway, leaf) in by_arr_rwy {
                        let arrival_runway: RunwayDesignator = arrival_runway.parse()?;
                        if let RawLeaf::Route(route) = leaf {
                            table.insert(
                                departure.clone(),
                                departure_runway.clone(),
                                arrival.clone(),
                                arrival_runway,
                                route,
                            );
                        }
                    }
                }
            }
        }
        Ok(table)
    }

    pub fn insert(
        &mut self,
        departure: AirportCode,
        departure_runway: RunwayDesignator,
        arrival: AirportCode,
        arrival_runway: RunwayDesignator,
        route: RouteConfig,
    ) {
        let key = RouteKey {
            departure,
            departure_runway,
            arrival,
            arrival_runway,
        };
        self.routes.insert(key, route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteTable for NestedRouteTable {
    fn lookup(
        &self,
        departure: &AirportCode,
        departure_runway: &RunwayDesignator,
        arrival: &AirportCode,
        arrival_runway: &RunwayDesignator,
    ) -> Option<&RouteConfig> {
        let key = RouteKey {
            departure: departure.clone(),
            departure_runway: departure_runway.clone(),
            arrival: arrival.clone(),
            arrival_runway: arrival_runway.clone(),
        };
        self.routes.get(&key)
    }
}
