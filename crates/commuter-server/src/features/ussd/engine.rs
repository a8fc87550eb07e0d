//! USSD session state machine
//!
//! The telecom gateway is stateless per HTTP call: every step re-sends the
//! full `*`-delimited history of the caller's inputs. The engine is a pure
//! function of `(session_id, phone_number, accumulated_text)` plus the
//! session store, which only has to remember the one value that cannot be
//! derived from the text alone, the vehicle registration captured mid-dialog.
//!
//! Dialog depth equals the number of tokens in the accumulated text; the
//! branch chosen at depth 1 dispatches to independent subflows. "Back to
//! main menu" is handled by canonicalizing the token list: each `3*0`/`4*0`
//! detour prefix is stripped, so a dialog that returns to the root behaves
//! exactly like a fresh one even though the gateway keeps growing the text.

use std::sync::Arc;

use crate::catalog::RouteCatalog;
use crate::store::{NewReport, ReportStore, SessionStore};

/// Number of routes offered on the USSD selection menus
const MENU_ROUTE_COUNT: usize = 5;

/// One step's reply to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UssdResponse {
    /// Dialog continues; the caller is prompted for more input
    Continue(String),
    /// Dialog terminates with a final message
    End(String),
}

impl UssdResponse {
    /// Render with the `CON `/`END ` prefix the gateway protocol expects
    pub fn render(&self) -> String {
        match self {
            UssdResponse::Continue(msg) => format!("CON {msg}"),
            UssdResponse::End(msg) => format!("END {msg}"),
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, UssdResponse::End(_))
    }
}

/// Per-session USSD menu engine
pub struct UssdEngine {
    catalog: Arc<RouteCatalog>,
    sessions: Arc<SessionStore>,
    reports: Arc<ReportStore>,
}

impl UssdEngine {
    pub fn new(
        catalog: Arc<RouteCatalog>,
        sessions: Arc<SessionStore>,
        reports: Arc<ReportStore>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            reports,
        }
    }

    /// Advance the dialog one step.
    ///
    /// Terminal responses discard whatever state the session had; invalid
    /// input at any depth terminates immediately (the caller re-dials, there
    /// is no retry loop).
    pub fn step(&self, session_id: &str, phone_number: &str, text: &str) -> UssdResponse {
        let response = self.dispatch(session_id, phone_number, text);
        if response.is_end() {
            self.sessions.end(session_id);
        }
        response
    }

    fn dispatch(&self, session_id: &str, phone_number: &str, text: &str) -> UssdResponse {
        let tokens = canonicalize(text);

        let Some(input) = tokens.last() else {
            return UssdResponse::Continue(self.root_menu());
        };

        match (tokens.len(), tokens[0].as_str()) {
            (1, "1") => UssdResponse::Continue(self.route_menu("Select a route:")),
            (1, "2") => UssdResponse::Continue(self.route_menu("Select route for fare estimate:")),
            (1, "3") => UssdResponse::Continue(self.traffic_menu()),
            (1, "4") => UssdResponse::Continue(self.report_menu()),
            (1, _) => UssdResponse::End("Invalid option. Please try again.".to_string()),

            (2, branch @ ("1" | "2")) => self.route_leaf(branch, input),
            (2, "3") => {
                UssdResponse::End("Thank you for checking traffic status.".to_string())
            },
            (2, "4") => {
                // Any input other than 0 counts as a chosen category.
                UssdResponse::Continue("Enter vehicle registration number:".to_string())
            },

            (3, "4") => {
                self.sessions.put_vehicle(session_id, input);
                UssdResponse::Continue("Enter route number (e.g., 46):".to_string())
            },

            (4, "4") => self.submit_report(session_id, phone_number, &tokens[1], input),

            _ => UssdResponse::End("Invalid option. Please try again.".to_string()),
        }
    }

    fn root_menu(&self) -> String {
        "Welcome to Nairobi Commuter Info\n\
         1. Route Information\n\
         2. Fare Estimates\n\
         3. Traffic Updates\n\
         4. Report Issue"
            .to_string()
    }

    fn route_menu(&self, heading: &str) -> String {
        let mut menu = heading.to_string();
        for (index, route) in self.catalog.all().iter().take(MENU_ROUTE_COUNT).enumerate() {
            menu.push_str(&format!("\n{}. {}", index + 1, route.name));
        }
        menu
    }

    fn traffic_menu(&self) -> String {
        let mut menu = "Current Traffic Status:".to_string();
        for update in self.catalog.updates() {
            menu.push_str(&format!("\n{}. {} - {}", update.id, update.route, update.status));
        }
        menu.push_str("\n0. Back to Main Menu");
        menu
    }

    fn report_menu(&self) -> String {
        "Report an issue:\n\
         1. Overcharging\n\
         2. Reckless Driving\n\
         3. Route Change\n\
         4. Vehicle Condition\n\
         0. Back to Main Menu"
            .to_string()
    }

    /// Terminal route/fare detail for branches 1 and 2
    fn route_leaf(&self, branch: &str, input: &str) -> UssdResponse {
        let route = input
            .parse::<usize>()
            .ok()
            .filter(|&n| (1..=MENU_ROUTE_COUNT).contains(&n))
            .and_then(|n| self.catalog.by_position(n));

        let Some(route) = route else {
            return UssdResponse::End("Invalid route selection.".to_string());
        };

        let message = if branch == "1" {
            format!(
                "Route: {}\nEstimated Time: {}\nTypical Fare: {}\n\nSafe travels!",
                route.name,
                route.estimated_time.label(),
                route.fare.label(),
            )
        } else {
            format!(
                "Fare Estimate\nRoute: {}\nFare Range: {}\n\nNote: Fares may vary by time of day",
                route.name,
                route.fare.label(),
            )
        };
        UssdResponse::End(message)
    }

    fn submit_report(
        &self,
        session_id: &str,
        phone_number: &str,
        category: &str,
        route_number: &str,
    ) -> UssdResponse {
        let Some(vehicle) = self.sessions.take_vehicle(session_id) else {
            // Session expired or this step arrived without the earlier ones.
            return UssdResponse::End("Session expired. Please dial again.".to_string());
        };

        let report = self.reports.create(NewReport {
            vehicle,
            route: route_number.to_string(),
            issue: category_label(category).to_string(),
            reporter: phone_number.to_string(),
        });

        UssdResponse::End(format!(
            "Report submitted successfully!\nVehicle: {}\nRoute: {}\n\n\
             Thank you for helping improve commuter safety.",
            report.vehicle, report.route,
        ))
    }
}

/// Split the accumulated text and strip `3*0`/`4*0` back-to-menu detours
/// from the front so depth reflects the dialog the caller actually sees.
fn canonicalize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = if text.trim().is_empty() {
        Vec::new()
    } else {
        text.split('*').map(|t| t.trim().to_string()).collect()
    };

    while tokens.len() >= 2 && matches!(tokens[0].as_str(), "3" | "4") && tokens[1] == "0" {
        tokens.drain(0..2);
    }

    tokens
}

fn category_label(category: &str) -> &'static str {
    match category {
        "1" => "Overcharging",
        "2" => "Reckless Driving",
        "3" => "Route Change",
        "4" => "Vehicle Condition",
        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn engine() -> (UssdEngine, Arc<ReportStore>, Arc<SessionStore>) {
        let reports = Arc::new(ReportStore::new());
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(60)));
        let engine = UssdEngine::new(
            Arc::new(RouteCatalog::nairobi()),
            Arc::clone(&sessions),
            Arc::clone(&reports),
        );
        (engine, reports, sessions)
    }

    fn step(engine: &UssdEngine, text: &str) -> UssdResponse {
        engine.step("sess-1", "+254711000111", text)
    }

    #[test]
    fn test_empty_text_shows_root_menu() {
        let (engine, _, _) = engine();
        let response = step(&engine, "");
        let UssdResponse::Continue(menu) = response else {
            panic!("expected Continue");
        };
        assert!(menu.contains("Welcome to Nairobi Commuter Info"));
        assert!(menu.contains("1. Route Information"));
        assert!(menu.contains("4. Report Issue"));
        assert_eq!(menu.matches('\n').count(), 4);
    }

    #[test]
    fn test_render_prefixes() {
        assert_eq!(UssdResponse::Continue("hi".into()).render(), "CON hi");
        assert_eq!(UssdResponse::End("bye".into()).render(), "END bye");
    }

    #[test]
    fn test_invalid_top_level_choice_terminates() {
        let (engine, _, _) = engine();
        assert_eq!(
            step(&engine, "9"),
            UssdResponse::End("Invalid option. Please try again.".to_string())
        );
    }

    #[test]
    fn test_route_menu_lists_first_five_routes() {
        let (engine, _, _) = engine();
        let UssdResponse::Continue(menu) = step(&engine, "1") else {
            panic!("expected Continue");
        };
        assert!(menu.starts_with("Select a route:"));
        assert!(menu.contains("1. CBD - Westlands"));
        assert!(menu.contains("5. CBD - Thika Road"));
        assert!(!menu.contains("CBD - Kibera"));
    }

    #[test]
    fn test_route_detail_matches_catalog_position() {
        let (engine, _, _) = engine();
        let catalog = RouteCatalog::nairobi();
        let second = catalog.by_position(2).unwrap();

        let UssdResponse::End(detail) = step(&engine, "1*2") else {
            panic!("expected End");
        };
        assert!(detail.contains(&second.name));
        assert!(detail.contains(&second.fare.label()));
        assert!(detail.contains(&second.estimated_time.label()));
    }

    #[test]
    fn test_fare_detail() {
        let (engine, _, _) = engine();
        let UssdResponse::End(detail) = step(&engine, "2*1") else {
            panic!("expected End");
        };
        assert!(detail.starts_with("Fare Estimate"));
        assert!(detail.contains("CBD - Westlands"));
        assert!(detail.contains("KES 50-80"));
    }

    #[test]
    fn test_invalid_route_selection_terminates() {
        let (engine, _, _) = engine();
        assert_eq!(
            step(&engine, "1*6"),
            UssdResponse::End("Invalid route selection.".to_string())
        );
        assert_eq!(
            step(&engine, "2*x"),
            UssdResponse::End("Invalid route selection.".to_string())
        );
    }

    #[test]
    fn test_traffic_acknowledgment_terminates() {
        let (engine, _, _) = engine();
        let UssdResponse::Continue(menu) = step(&engine, "3") else {
            panic!("expected Continue");
        };
        assert!(menu.contains("0. Back to Main Menu"));

        assert_eq!(
            step(&engine, "3*1"),
            UssdResponse::End("Thank you for checking traffic status.".to_string())
        );
    }

    #[test]
    fn test_back_to_main_menu_resets_dialog() {
        let (engine, _, _) = engine();
        // 3*0 returns to the root menu...
        let UssdResponse::Continue(menu) = step(&engine, "3*0") else {
            panic!("expected Continue");
        };
        assert!(menu.contains("Welcome to Nairobi Commuter Info"));

        // ...and subsequent inputs behave as a fresh dialog.
        let UssdResponse::Continue(menu) = step(&engine, "3*0*1") else {
            panic!("expected Continue");
        };
        assert!(menu.starts_with("Select a route:"));

        // Repeated detours are stripped as well.
        let UssdResponse::Continue(menu) = step(&engine, "4*0*3*0*2") else {
            panic!("expected Continue");
        };
        assert!(menu.starts_with("Select route for fare estimate:"));
    }

    #[test]
    fn test_full_report_flow_creates_report() {
        let (engine, reports, sessions) = engine();

        let UssdResponse::Continue(menu) = step(&engine, "4") else {
            panic!("expected Continue");
        };
        assert!(menu.starts_with("Report an issue:"));

        assert_eq!(
            step(&engine, "4*1"),
            UssdResponse::Continue("Enter vehicle registration number:".to_string())
        );
        assert_eq!(
            step(&engine, "4*1*KCA123A"),
            UssdResponse::Continue("Enter route number (e.g., 46):".to_string())
        );

        let UssdResponse::End(confirmation) = step(&engine, "4*1*KCA123A*46") else {
            panic!("expected End");
        };
        assert!(confirmation.contains("Report submitted successfully!"));
        assert!(confirmation.contains("Vehicle: KCA123A"));
        assert!(confirmation.contains("Route: 46"));

        let all = reports.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].vehicle, "KCA123A");
        assert_eq!(all[0].route, "46");
        assert_eq!(all[0].issue, "Overcharging");
        assert_eq!(all[0].reporter, "+254711000111");

        // Terminal response discarded the session.
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_expired_session_degrades_gracefully() {
        let (engine, reports, sessions) = engine();
        step(&engine, "4*1*KCA123A");
        sessions.end("sess-1");

        assert_eq!(
            step(&engine, "4*1*KCA123A*46"),
            UssdResponse::End("Session expired. Please dial again.".to_string())
        );
        assert_eq!(reports.count(), 0);
    }

    #[test]
    fn test_sessions_do_not_interfere() {
        let (engine, reports, _) = engine();
        engine.step("sess-a", "+254700000001", "4*1*KAA111A");
        engine.step("sess-b", "+254700000002", "4*2*KBB222B");

        engine.step("sess-a", "+254700000001", "4*1*KAA111A*8");
        engine.step("sess-b", "+254700000002", "4*2*KBB222B*111");

        let all = reports.list();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].vehicle, "KAA111A");
        assert_eq!(all[0].route, "8");
        assert_eq!(all[1].vehicle, "KBB222B");
        assert_eq!(all[1].issue, "Reckless Driving");
    }
}
