//! # Studyplan
//!
//! Academic planner client: courses, assignments and class schedules managed
//! against a REST backend, a dashboard that summarizes the workload, and a
//! chat panel for the study assistant.
//!
//! ## Modules
//!
//! - [`models`]: wire types shared by client and dev server
//! - [`client`]: typed REST client with bearer-token sessions
//! - [`views`]: list, form, dashboard and chat view state
//! - [`render`]: plain-text rendering of view state
//! - [`server`]: in-memory development backend
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studyplan::client::{ApiClient, Session};
//! use studyplan::views::Dashboard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:8000", Session::bearer("token"))?;
//!
//!     let mut dashboard = Dashboard::new();
//!     if dashboard.load(&client).await {
//!         let stats = dashboard.snapshot().map(|s| s.stats).unwrap_or_default();
//!         println!("{} pending assignments", stats.pending_assignments);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod views;

// Re-export top-level types for convenience
pub use client::{ApiClient, ClientError, ClientResult, Session, TokenStore, TokenStoreError};

pub use models::{
    AccessToken, Assignment, AssignmentInput, ChatMessage, ChatReply, CompletionStatus, Course,
    CourseInput, DayOfWeek, Entity, NewUser, Priority, Role, Schedule, ScheduleInput,
    UserProfile,
};

pub use views::{
    AssignmentListView, ChatPanel, CourseListView, Dashboard, DashboardSnapshot, EntityForm,
    FormError, Notifications, ScheduleListView, Urgency,
};

pub use server::{build_router, AppState, ServerError};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, ServerConfig, SessionConfig};
