//! Seed data for the Nairobi route catalog

use chrono::Utc;

use super::{FareRange, Route, TimeRange, TrafficStatus, TrafficUpdate};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn route(
    id: u32,
    name: &str,
    to: &str,
    fare: (u32, u32),
    time: (u32, u32),
    distance: &str,
    vehicles: &[&str],
    saccos: &[&str],
    landmarks: &[&str],
    peak_hours: &[&str],
    traffic_status: TrafficStatus,
) -> Route {
    Route {
        id,
        name: name.to_string(),
        from: "CBD".to_string(),
        to: to.to_string(),
        fare: FareRange {
            min: fare.0,
            max: fare.1,
        },
        estimated_time: TimeRange {
            min: time.0,
            max: time.1,
        },
        distance: distance.to_string(),
        vehicles: strings(vehicles),
        saccos: strings(saccos),
        landmarks: strings(landmarks),
        peak_hours: strings(peak_hours),
        traffic_status,
        last_updated: Utc::now(),
    }
}

/// The predefined Nairobi commuter routes, in catalog order
pub(super) fn nairobi_routes() -> Vec<Route> {
    vec![
        route(
            1,
            "CBD - Westlands",
            "Westlands",
            (50, 80),
            (20, 30),
            "8 km",
            &["Matatu", "Bus", "Uber"],
            &["City Hoppa", "Citi Shuttle", "Double M"],
            &["Kencom", "Museum Hill", "ABC Place", "Westlands Roundabout"],
            &["7:00-9:00", "17:00-19:00"],
            TrafficStatus::Moderate,
        ),
        route(
            2,
            "CBD - Eastlands",
            "Eastlands",
            (50, 70),
            (30, 45),
            "12 km",
            &["Matatu", "Bus"],
            &["Super Metro", "Citi Hoppa", "KBS"],
            &["Kencom", "Globe Roundabout", "Donholm", "Buruburu"],
            &["6:30-9:00", "17:00-19:30"],
            TrafficStatus::Heavy,
        ),
        route(
            3,
            "CBD - South B/C",
            "South B/C",
            (60, 100),
            (25, 40),
            "10 km",
            &["Matatu", "Bus", "Uber"],
            &["Compliant", "Rembo", "Embassava"],
            &["Kencom", "Bunyala Road", "Industrial Area", "Bellevue"],
            &["7:00-9:00", "17:00-19:00"],
            TrafficStatus::Light,
        ),
        route(
            4,
            "CBD - Ngong Road",
            "Ngong Road",
            (50, 80),
            (20, 35),
            "7 km",
            &["Matatu", "Bus"],
            &["Forward Travellers", "Prestige", "Ngong Road Matatus"],
            &["Kencom", "Railways", "Ngong Road", "Dagoretti Corner"],
            &["7:00-9:00", "17:00-19:00"],
            TrafficStatus::Moderate,
        ),
        route(
            5,
            "CBD - Thika Road",
            "Thika Road",
            (50, 100),
            (30, 60),
            "15 km",
            &["Matatu", "Bus"],
            &["Super Metro", "Double M", "Thika Road Matatus"],
            &["Kencom", "Kenyatta University", "Kasarani", "Thika"],
            &["6:30-9:00", "17:00-19:30"],
            TrafficStatus::Heavy,
        ),
        route(
            6,
            "CBD - Kibera",
            "Kibera",
            (30, 50),
            (15, 25),
            "5 km",
            &["Matatu"],
            &["Kibera Shuttle", "Forward"],
            &["Kencom", "Railways", "Kibera Drive", "Olympic"],
            &["7:00-9:00", "17:00-19:00"],
            TrafficStatus::Light,
        ),
        route(
            7,
            "CBD - Rongai",
            "Rongai",
            (80, 120),
            (40, 70),
            "20 km",
            &["Matatu", "Bus"],
            &["Super Metro", "Prestige", "Rongai Shuttle"],
            &["Kencom", "Bomas", "Magadi Road", "Rongai"],
            &["6:00-9:00", "17:00-20:00"],
            TrafficStatus::Heavy,
        ),
        route(
            8,
            "CBD - Kasarani",
            "Kasarani",
            (60, 90),
            (30, 50),
            "12 km",
            &["Matatu", "Bus"],
            &["Super Metro", "Double M", "Mwiki Sacco"],
            &["Kencom", "Pangani", "Mwiki Road", "Kasarani"],
            &["7:00-9:00", "17:00-19:00"],
            TrafficStatus::Moderate,
        ),
    ]
}

/// Current traffic updates; route labels are free text, not catalog ids
pub(super) fn traffic_updates() -> Vec<TrafficUpdate> {
    let now = Utc::now();
    vec![
        TrafficUpdate {
            id: 1,
            route: "Thika Road".to_string(),
            status: TrafficStatus::Heavy,
            description: "Heavy traffic at Kasarani area".to_string(),
            timestamp: now,
        },
        TrafficUpdate {
            id: 2,
            route: "Mombasa Road".to_string(),
            status: TrafficStatus::Moderate,
            description: "Slow moving traffic near Industrial Area".to_string(),
            timestamp: now,
        },
        TrafficUpdate {
            id: 3,
            route: "Ngong Road".to_string(),
            status: TrafficStatus::Light,
            description: "Traffic flowing smoothly".to_string(),
            timestamp: now,
        },
    ]
}
