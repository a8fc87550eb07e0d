//! Route catalog
//!
//! The fixed set of predefined Nairobi commuter routes plus the current
//! traffic updates. The catalog is loaded once at startup and is never
//! mutated; every lookup path (USSD, SMS, REST) reads from the same
//! instance.

mod data;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Traffic condition on a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficStatus {
    Light,
    Moderate,
    Heavy,
}

impl std::fmt::Display for TrafficStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrafficStatus::Light => write!(f, "light"),
            TrafficStatus::Moderate => write!(f, "moderate"),
            TrafficStatus::Heavy => write!(f, "heavy"),
        }
    }
}

/// Fare range in Kenyan shillings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRange {
    pub min: u32,
    pub max: u32,
}

impl FareRange {
    /// Human-readable label, e.g. "KES 50-80"
    pub fn label(&self) -> String {
        format!("KES {}-{}", self.min, self.max)
    }
}

/// Estimated travel time range in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: u32,
    pub max: u32,
}

impl TimeRange {
    /// Human-readable label, e.g. "20-30 mins"
    pub fn label(&self) -> String {
        format!("{}-{} mins", self.min, self.max)
    }
}

/// A predefined commuter route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Stable 1-based identifier, dense over the catalog
    pub id: u32,
    pub name: String,
    pub from: String,
    pub to: String,
    pub fare: FareRange,
    pub estimated_time: TimeRange,
    pub distance: String,
    pub vehicles: Vec<String>,
    pub saccos: Vec<String>,
    pub landmarks: Vec<String>,
    pub peak_hours: Vec<String>,
    pub traffic_status: TrafficStatus,
    pub last_updated: DateTime<Utc>,
}

/// A traffic update, cross-referenced to routes by label only
///
/// `route` is free text rather than a catalog id; see
/// [`RouteCatalog::traffic_for`] for the join rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficUpdate {
    pub id: u32,
    pub route: String,
    pub status: TrafficStatus,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Read-only catalog of routes and traffic updates
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    updates: Vec<TrafficUpdate>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<Route>, updates: Vec<TrafficUpdate>) -> Self {
        Self { routes, updates }
    }

    /// The built-in Nairobi catalog
    pub fn nairobi() -> Self {
        Self::new(data::nairobi_routes(), data::traffic_updates())
    }

    /// All routes in catalog order
    pub fn all(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route at the given 1-based catalog position
    pub fn by_position(&self, position: usize) -> Option<&Route> {
        if position == 0 {
            return None;
        }
        self.routes.get(position - 1)
    }

    /// Route with the given stable id
    pub fn by_id(&self, id: u32) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// First route whose name, origin, or destination contains the phrase
    /// (case-insensitive). Catalog order decides ties; there is no ranking.
    pub fn search(&self, phrase: &str) -> Option<&Route> {
        let phrase = phrase.to_lowercase();
        self.routes.iter().find(|r| {
            r.name.to_lowercase().contains(&phrase)
                || r.from.to_lowercase().contains(&phrase)
                || r.to.to_lowercase().contains(&phrase)
        })
    }

    /// All routes matching the phrase, in catalog order
    pub fn search_all(&self, phrase: &str) -> Vec<&Route> {
        let phrase = phrase.to_lowercase();
        self.routes
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&phrase)
                    || r.from.to_lowercase().contains(&phrase)
                    || r.to.to_lowercase().contains(&phrase)
            })
            .collect()
    }

    /// Resolve a user-supplied term to a route.
    ///
    /// An all-digit term is read as a 1-based catalog position; anything
    /// else falls back to [`search`](Self::search). Both the SMS route and
    /// traffic lookups use this one rule.
    pub fn find(&self, term: &str) -> Option<&Route> {
        let term = term.trim();
        if !term.is_empty() && term.bytes().all(|b| b.is_ascii_digit()) {
            return term.parse::<usize>().ok().and_then(|n| self.by_position(n));
        }
        self.search(term)
    }

    /// Exact origin/destination match (case-insensitive)
    pub fn by_endpoints(&self, from: &str, to: &str) -> Option<&Route> {
        self.routes.iter().find(|r| {
            r.from.eq_ignore_ascii_case(from.trim()) && r.to.eq_ignore_ascii_case(to.trim())
        })
    }

    /// Traffic update for a route.
    ///
    /// Fuzzy join by label containment: the first update whose free-text
    /// route label contains the route name (case-insensitive) wins. Kept
    /// behind this function so an exact-match scheme can replace it without
    /// touching callers.
    pub fn traffic_for(&self, route: &Route) -> Option<&TrafficUpdate> {
        let name = route.name.to_lowercase();
        self.updates
            .iter()
            .find(|u| u.route.to_lowercase().contains(&name) || name.contains(&u.route.to_lowercase()))
    }

    /// All current traffic updates
    pub fn updates(&self) -> &[TrafficUpdate] {
        &self.updates
    }
}
