//! View content producers called by the router after a view is shown.
//!
//! Each render hook fills exactly one view from the current session. None of them
//! influence routing.

mod dashboard;
mod sensors;
mod history;
mod forms;

pub use dashboard::{DashboardHook, DashboardPage, ProfileBanner, StatCard, ComplianceItem, ComplianceStatus, ChartBar, employee_id};
pub use sensors::{SensorBoard, SensorSimulator, SensorSnapshot, ApproachReading, ObstructionReading, DepartureReading, SensorsHook, SharedSensors};
pub use history::{HistoryLog, HistoryEntry, HistoryRow, HistoryHook, SharedHistory};
pub use forms::{AuthFormHook, AuthFormView, FormKind, FormMessage, MessageKind, RoleSelection, SharedRoleSelection};

use crate::identity::Session;

/// What a view currently displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewContent {
    /// Static markup; nothing generated.
    #[default]
    Static,
    AuthForm(AuthFormView),
    Dashboard(Box<DashboardPage>),
    Sensors(SensorSnapshot),
    History(Vec<HistoryRow>),
}

/// Populates a view that has just been made visible.
pub trait RenderHook {
    fn render(&mut self, session: Option<&Session>) -> ViewContent;
}

/// Local time in the portal's display format, e.g. `3/14/2026, 9:05:00 AM`.
pub fn display_timestamp() -> String {
    chrono::Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
