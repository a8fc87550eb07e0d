//! SMS command interpreter
//!
//! Stateless parser for inbound text messages. One message in, one reply
//! out; the only side effect is an occasional report creation. The
//! interpreter never fails outward: anything unrecognized degrades to the
//! help text, and internal problems are the webhook layer's to absorb.

use std::sync::Arc;

use crate::catalog::{Route, RouteCatalog};
use crate::store::{NewReport, ReportStore};

/// Maximum routes listed in a bare ROUTE reply
const ROUTE_LIST_LIMIT: usize = 5;

/// Maximum updates listed in a bare TRAFFIC reply
const TRAFFIC_LIST_LIMIT: usize = 3;

/// Recognized SMS commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Route,
    Fare,
    Traffic,
    Report,
    Help,
}

/// Resolve a lowercased token through the synonym table
fn resolve_command(token: &str) -> Option<Command> {
    match token {
        "route" | "routes" | "r" => Some(Command::Route),
        "fare" | "fares" | "f" => Some(Command::Fare),
        "traffic" | "jam" | "t" => Some(Command::Traffic),
        "report" | "complaint" | "rep" => Some(Command::Report),
        "help" | "h" | "info" => Some(Command::Help),
        _ => None,
    }
}

/// Interprets one SMS and produces the reply text
pub struct SmsInterpreter {
    catalog: Arc<RouteCatalog>,
    reports: Arc<ReportStore>,
}

impl SmsInterpreter {
    pub fn new(catalog: Arc<RouteCatalog>, reports: Arc<ReportStore>) -> Self {
        Self { catalog, reports }
    }

    /// Classify and execute one message, returning the reply to deliver.
    pub fn interpret(&self, text: &str, from: &str) -> String {
        let message = text.trim().to_lowercase();
        let mut parts = message.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        tracing::debug!(command = %command, args = ?args, "SMS command parsed");

        match resolve_command(command) {
            Some(Command::Route) => self.handle_route(&args),
            Some(Command::Fare) => self.handle_fare(&args),
            Some(Command::Traffic) => self.handle_traffic(&args),
            Some(Command::Report) => self.handle_report(&args, from),
            Some(Command::Help) => help_message(),
            None => format!("Unknown command: \"{}\"\n\n{}", command, help_message()),
        }
    }

    fn handle_route(&self, args: &[&str]) -> String {
        if args.is_empty() {
            let mut message = "NAIROBI ROUTES:\n\n".to_string();
            for (index, route) in self.catalog.all().iter().take(ROUTE_LIST_LIMIT).enumerate() {
                message.push_str(&format!("{}. {}\n", index + 1, route.name));
            }
            message.push_str("\nSend: ROUTE <number> for details");
            return message;
        }

        let term = args.join(" ");
        match self.catalog.find(&term) {
            Some(route) => format_route_info(route),
            None => format!(
                "Route not found: \"{}\"\n\nSend ROUTE to see all routes.",
                term
            ),
        }
    }

    fn handle_fare(&self, args: &[&str]) -> String {
        let Some(first) = args.first() else {
            return "Send: FARE <route number> to get fare estimates.\n\nExample: FARE 1"
                .to_string();
        };

        let route = first
            .parse::<usize>()
            .ok()
            .and_then(|n| self.catalog.by_position(n));

        match route {
            Some(route) => format!(
                "FARE ESTIMATE\n\n\
                 Route: {}\n\
                 Fare Range: {}\n\
                 Peak Hours: Higher fares may apply\n\
                 Off-Peak: Lower end of range\n\n\
                 Note: Fares vary by vehicle type and time.",
                route.name,
                route.fare.label(),
            ),
            None => "Invalid route number. Send ROUTE to see all routes.".to_string(),
        }
    }

    fn handle_traffic(&self, args: &[&str]) -> String {
        if args.is_empty() {
            let mut message = "TRAFFIC STATUS:\n\n".to_string();
            let updates = self.catalog.updates();
            if updates.is_empty() {
                message.push_str("No current traffic updates.\n\n");
            } else {
                for update in updates.iter().take(TRAFFIC_LIST_LIMIT) {
                    message.push_str(&format!("{}: {}\n", update.route, update.status));
                }
                message.push('\n');
            }
            message.push_str("Send: TRAFFIC <route> for specific route");
            return message;
        }

        let term = args.join(" ");
        let Some(route) = self.catalog.find(&term) else {
            return "Route not found. Send ROUTE to see all routes.".to_string();
        };

        match self.catalog.traffic_for(route) {
            Some(update) => format!(
                "TRAFFIC UPDATE\n\n\
                 Route: {}\n\
                 Status: {}\n\
                 Updated: {}\n\
                 Estimated Time: {}",
                route.name,
                update.status,
                update.timestamp.format("%H:%M:%S"),
                route.estimated_time.label(),
            ),
            None => format!(
                "Route: {}\n\nNo traffic data available.\nEstimated Time: {}",
                route.name,
                route.estimated_time.label(),
            ),
        }
    }

    fn handle_report(&self, args: &[&str], from: &str) -> String {
        if args.len() < 3 {
            return "REPORT FORMAT:\n\n\
                    REPORT <vehicle> <route> <issue>\n\n\
                    Example:\n\
                    REPORT KCA123A 46 overcharging\n\n\
                    Issues: overcharging, reckless, unsafe, delay"
                .to_string();
        }

        let report = self.reports.create(NewReport {
            vehicle: args[0].to_string(),
            route: args[1].to_string(),
            issue: args[2..].join(" "),
            reporter: from.to_string(),
        });

        format!(
            "REPORT SUBMITTED\n\n\
             ID: #{}\n\
             Vehicle: {}\n\
             Route: {}\n\
             Issue: {}\n\n\
             Thank you for helping improve commuter safety!",
            report.id, report.vehicle, report.route, report.issue,
        )
    }
}

fn help_message() -> String {
    "NAIROBI COMMUTER INFO\n\n\
     Commands:\n\
     - ROUTE - View all routes\n\
     - ROUTE <num> - Route details\n\
     - FARE <num> - Fare estimate\n\
     - TRAFFIC - Traffic status\n\
     - REPORT <vehicle> <route> <issue>\n\
     - HELP - Show this message\n\n\
     Example: ROUTE 1"
        .to_string()
}

fn format_route_info(route: &Route) -> String {
    format!(
        "ROUTE INFO\n\n\
         {}\n\
         From: {}\n\
         To: {}\n\
         Fare: {}\n\
         Time: {}\n\
         Distance: {}",
        route.name,
        route.from,
        route.to,
        route.fare.label(),
        route.estimated_time.label(),
        route.distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> (SmsInterpreter, Arc<ReportStore>) {
        let reports = Arc::new(ReportStore::new());
        let interpreter = SmsInterpreter::new(
            Arc::new(RouteCatalog::nairobi()),
            Arc::clone(&reports),
        );
        (interpreter, reports)
    }

    #[test]
    fn test_route_without_args_lists_first_five() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("route", "+254700000001");
        assert!(reply.starts_with("NAIROBI ROUTES:"));
        assert!(reply.contains("1. CBD - Westlands"));
        assert!(reply.contains("5. CBD - Thika Road"));
        assert!(!reply.contains("CBD - Rongai"));
        assert!(reply.contains("Send: ROUTE <number> for details"));
    }

    #[test]
    fn test_route_by_number_matches_catalog_position() {
        let (interpreter, _) = interpreter();
        let catalog = RouteCatalog::nairobi();

        for position in 1..=catalog.len() {
            let route = catalog.by_position(position).unwrap();
            let reply = interpreter.interpret(&format!("route {position}"), "+254700000001");
            assert!(reply.contains(&route.name), "position {position}");
            assert!(reply.contains(&route.distance));
        }
    }

    #[test]
    fn test_route_by_search_phrase() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("route ngong", "+254700000001");
        assert!(reply.contains("CBD - Ngong Road"));
        assert!(reply.contains("Fare: KES 50-80"));
    }

    #[test]
    fn test_route_not_found_echoes_term() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("route karen estate", "+254700000001");
        assert!(reply.contains("Route not found: \"karen estate\""));
    }

    #[test]
    fn test_command_synonyms() {
        let (interpreter, _) = interpreter();
        let full = interpreter.interpret("route 1", "+254700000001");
        assert_eq!(interpreter.interpret("r 1", "+254700000001"), full);
        assert_eq!(interpreter.interpret("routes 1", "+254700000001"), full);
        assert_eq!(interpreter.interpret("ROUTE 1", "+254700000001"), full);
    }

    #[test]
    fn test_fare_returns_only_requested_route() {
        let (interpreter, _) = interpreter();
        let catalog = RouteCatalog::nairobi();
        let second = catalog.by_position(2).unwrap();

        let reply = interpreter.interpret("fare 2", "+254700000001");
        assert!(reply.contains(&second.fare.label()));
        assert!(reply.contains(&second.name));
        for route in catalog.all().iter().filter(|r| r.id != second.id) {
            assert!(!reply.contains(&route.name));
        }
    }

    #[test]
    fn test_fare_without_args_shows_usage() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("fare", "+254700000001");
        assert!(reply.contains("Send: FARE <route number>"));
    }

    #[test]
    fn test_fare_out_of_range_is_invalid() {
        let (interpreter, _) = interpreter();
        assert_eq!(
            interpreter.interpret("fare 99", "+254700000001"),
            "Invalid route number. Send ROUTE to see all routes."
        );
        assert_eq!(
            interpreter.interpret("fare westlands", "+254700000001"),
            "Invalid route number. Send ROUTE to see all routes."
        );
    }

    #[test]
    fn test_traffic_without_args_lists_updates() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("traffic", "+254700000001");
        assert!(reply.starts_with("TRAFFIC STATUS:"));
        assert!(reply.contains("Thika Road: heavy"));
        assert!(reply.contains("Ngong Road: light"));
        assert!(reply.contains("Send: TRAFFIC <route> for specific route"));
    }

    #[test]
    fn test_traffic_for_route_with_update() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("traffic thika", "+254700000001");
        assert!(reply.starts_with("TRAFFIC UPDATE"));
        assert!(reply.contains("Route: CBD - Thika Road"));
        assert!(reply.contains("Status: heavy"));
    }

    #[test]
    fn test_traffic_numeric_term_is_a_catalog_position() {
        let (interpreter, _) = interpreter();
        // Position 5 is CBD - Thika Road, which has a live update.
        let reply = interpreter.interpret("traffic 5", "+254700000001");
        assert!(reply.contains("Route: CBD - Thika Road"));
        assert!(reply.contains("Status: heavy"));
    }

    #[test]
    fn test_traffic_for_route_without_update() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("traffic westlands", "+254700000001");
        assert!(reply.contains("No traffic data available."));
        assert!(reply.contains("Estimated Time: 20-30 mins"));
    }

    #[test]
    fn test_traffic_unknown_route() {
        let (interpreter, _) = interpreter();
        assert_eq!(
            interpreter.interpret("traffic lavington", "+254700000001"),
            "Route not found. Send ROUTE to see all routes."
        );
    }

    #[test]
    fn test_report_with_too_few_args_shows_format_and_creates_nothing() {
        let (interpreter, reports) = interpreter();
        let reply = interpreter.interpret("report KCA999Z 5", "+254700000001");
        assert!(reply.starts_with("REPORT FORMAT:"));
        assert_eq!(reports.count(), 0);
    }

    #[test]
    fn test_report_creates_report_with_uppercased_vehicle() {
        let (interpreter, reports) = interpreter();
        let reply = interpreter.interpret("report kca999z 5 overcharging", "+254712345678");

        assert!(reply.starts_with("REPORT SUBMITTED"));
        assert!(reply.contains("ID: #1"));
        assert!(reply.contains("Vehicle: KCA999Z"));

        let all = reports.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].vehicle, "KCA999Z");
        assert_eq!(all[0].route, "5");
        assert_eq!(all[0].issue, "overcharging");
        assert_eq!(all[0].reporter, "+254712345678");
    }

    #[test]
    fn test_report_joins_multi_word_issue() {
        let (interpreter, reports) = interpreter();
        interpreter.interpret("report KBX001C 46 very reckless driving", "+254700000001");
        assert_eq!(reports.list()[0].issue, "very reckless driving");
    }

    #[test]
    fn test_unknown_command_echoes_token_and_appends_help() {
        let (interpreter, reports) = interpreter();
        let reply = interpreter.interpret("xyz", "+254700000001");
        assert!(reply.contains("Unknown command: \"xyz\""));
        assert!(reply.contains("NAIROBI COMMUTER INFO"));
        assert!(reply.contains("REPORT <vehicle> <route> <issue>"));
        assert_eq!(reports.count(), 0);
    }

    #[test]
    fn test_help_command() {
        let (interpreter, _) = interpreter();
        let reply = interpreter.interpret("help", "+254700000001");
        assert!(reply.starts_with("NAIROBI COMMUTER INFO"));
        assert_eq!(reply, interpreter.interpret("info", "+254700000001"));
    }
}
