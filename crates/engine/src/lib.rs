//! Herobook Engine library.
//!
//! Server-side code for the character backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Character, monster and account operations behind the ownership gate
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
