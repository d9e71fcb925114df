use chrono::Datelike;
use rand::rngs::StdRng;
use rand::Rng;

use crate::identity::{Identity, Role, Session};

use super::{RenderHook, ViewContent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBanner {
    pub initial: char,
    pub name: String,
    pub email: String,
    pub badge: String,
    pub employee_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    Compliant,
    Attention,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::Attention => "Attention",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Attention => "attention",
            ComplianceStatus::NonCompliant => "non-compliant",
        }
    }

    pub fn check_mark(&self) -> char {
        if *self == ComplianceStatus::Compliant { '✓' } else { '!' }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceItem {
    pub label: &'static str,
    pub status: ComplianceStatus,
}

/// Bar of the incident placeholder chart (government dashboard only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub month: &'static str,
    pub height: u32,
}

/// Role-themed dashboard content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPage {
    pub theme_class: &'static str,
    pub header: &'static str,
    pub profile: ProfileBanner,
    pub stats: Vec<StatCard>,
    pub compliance_title: &'static str,
    pub compliance: Vec<ComplianceItem>,
    pub chart: Option<Vec<ChartBar>>,
}

const COMPLIANCE_CHECKS: [(&str, ComplianceStatus); 12] = [
    ("Gate Mechanism Operational", ComplianceStatus::Compliant),
    ("Sensor Calibration Current", ComplianceStatus::Compliant),
    ("Warning Systems Functional", ComplianceStatus::Compliant),
    ("Track Maintenance Scheduled", ComplianceStatus::Attention),
    ("Emergency Protocols Updated", ComplianceStatus::Compliant),
    ("Backup Power Systems", ComplianceStatus::Compliant),
    ("Communication Links Active", ComplianceStatus::Compliant),
    ("Data Logging Verified", ComplianceStatus::Compliant),
    ("Obstruction Detection Test", ComplianceStatus::Attention),
    ("Staff Training Compliance", ComplianceStatus::NonCompliant),
    ("Equipment Inspection Due", ComplianceStatus::Attention),
    ("Signal Light Brightness Check", ComplianceStatus::Compliant),
];

fn digits(rng: &mut StdRng, n: usize) -> String {
    // base-9 digits, so never a '9'
    (0..n).map(|_| char::from(b'0' + rng.gen_range(0..9u8))).collect()
}

/// `GOV-XXXXXX` for government officers, `RSM-<year>-XXXX` for railway officers.
pub fn employee_id(role: Role, year: i32, rng: &mut StdRng) -> String {
    match role {
        Role::GovernmentOfficer => format!("GOV-{}", digits(rng, 6)),
        Role::RailwayOfficer => format!("RSM-{}-{}", year, digits(rng, 4)),
    }
}

fn stat(value: &str, label: &str) -> StatCard {
    StatCard { value: value.into(), label: label.into() }
}

impl DashboardPage {
    pub fn for_identity(identity: &Identity, employee_id: String) -> Self {
        let compliance = COMPLIANCE_CHECKS
            .iter()
            .map(|&(label, status)| ComplianceItem { label, status })
            .collect();
        let (fallback_initial, fallback_name) = match identity.role {
            Role::GovernmentOfficer => ('G', "Government Official"),
            Role::RailwayOfficer => ('R', "Railway Officer"),
        };
        let name = identity.name.trim();
        let profile = ProfileBanner {
            initial: identity.initial().unwrap_or(fallback_initial),
            name: if name.is_empty() { fallback_name.to_string() } else { name.to_string() },
            email: if identity.email.is_empty() { "N/A".to_string() } else { identity.email.clone() },
            badge: match identity.role {
                Role::GovernmentOfficer => "Government Official".to_string(),
                Role::RailwayOfficer => "Railway Officer".to_string(),
            },
            employee_id,
        };
        match identity.role {
            Role::GovernmentOfficer => Self {
                theme_class: identity.role.theme_class(),
                header: "Government Official Portal",
                profile,
                stats: vec![
                    stat("45", "Total Active Crossings"),
                    stat("2", "Monthly Incidents"),
                    stat("98.5%", "Safety Compliance (%)"),
                    stat("120", "Active Safety Officers"),
                ],
                compliance_title: "Regional Safety Overview",
                compliance,
                chart: Some(vec![
                    ChartBar { month: "Jan", height: 150 },
                    ChartBar { month: "Feb", height: 100 },
                    ChartBar { month: "Mar", height: 190 },
                ]),
            },
            Role::RailwayOfficer => Self {
                theme_class: identity.role.theme_class(),
                header: "Railway Officer Portal",
                profile,
                stats: vec![
                    stat("3", "Crossings Assigned"),
                    stat("0", "Incidents This Month"),
                    stat("100%", "Local Safety Compliance"),
                ],
                compliance_title: "Compliance Monitoring",
                compliance,
                chart: None,
            },
        }
    }
}

/// Builds the dashboard for the session's role. A fresh employee id is drawn per render.
pub struct DashboardHook {
    rng: StdRng,
}

impl DashboardHook {
    pub fn new(rng: StdRng) -> Self { Self { rng } }
}

impl RenderHook for DashboardHook {
    fn render(&mut self, session: Option<&Session>) -> ViewContent {
        let Some(session) = session else { return ViewContent::Static; };
        let year = chrono::Local::now().year();
        let id = employee_id(session.identity.role, year, &mut self.rng);
        ViewContent::Dashboard(Box::new(DashboardPage::for_identity(&session.identity, id)))
    }
}
