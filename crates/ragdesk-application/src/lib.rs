//! Application layer for Ragdesk.
//!
//! This crate holds the view-state orchestration of the client shell: the
//! route gate, the refresh bus shared by upload and document views, the
//! configuration tab controller, the health aggregator, the per-route error
//! boundary, the page view-models and the [`AppShell`] composing them.

pub mod auth_gate;
pub mod boundary;
pub mod config_tab;
pub mod generation;
pub mod health;
pub mod pages;
pub mod refresh_bus;
pub mod screen;
pub mod shell;
pub mod sidebar;

pub use auth_gate::{AuthGate, GateDecision};
pub use boundary::ErrorBoundary;
pub use config_tab::{ConfigChange, ConfigTab, ConfigTabController, PanelSource, TabPanel};
pub use generation::{FetchOutcome, Generation};
pub use health::{HealthAggregator, HealthDisplay, HealthState, Indicator, SubsystemPanel};
pub use refresh_bus::{RefreshBus, RefreshListener};
pub use screen::{Screen, ScreenBody};
pub use shell::{AppShell, Rendered};
pub use sidebar::{AccountAffordance, NavItem, Sidebar};
