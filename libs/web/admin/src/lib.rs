//! Server-rendered admin pages for users and groups.
//!
//! ## Architecture
//!
//! ```text
//! handlers (axum, HTML)
//!     ↓
//! AdminUsersScreen  ← ScreenState::apply(ScreenEvent)
//!     ↓
//! DataGateway (HttpGateway | ServiceGateway)
//!     ↓
//! /api/users, /api/groups  or  domain_users::UserService
//! ```
//!
//! The screen never talks to storage directly: every read and write goes
//! through a [`DataGateway`], and every state change is an event applied to an
//! immutable [`ScreenState`]. Views are pure functions of the state and the
//! viewer's [`Access`].

pub mod config;
pub mod draft;
pub mod gateway;
pub mod handlers;
pub mod permission;
pub mod screen;
pub mod views;

pub use config::AdminConfig;
pub use draft::{Draft, DraftField};
pub use gateway::{DataGateway, GatewayError, HttpGateway, Operation, ServiceGateway};
pub use handlers::{AdminState, router};
pub use permission::{Access, MANAGE_USERS, gate, with_permission};
pub use screen::{AdminUsersScreen, LoadingPolicy, ScreenEvent, ScreenState};
pub use views::{AdminViews, PageView};
