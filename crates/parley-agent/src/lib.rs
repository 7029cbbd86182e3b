//! Static agent catalog: the conversational personas a user can pick,
//! together with their visual themes.
//!
//! The catalog is defined at build time and never mutated; screens receive
//! descriptors by reference.

pub mod catalog;
pub mod theme;

pub use catalog::{agent_by_id, agent_by_name, agents, AgentDescriptor};
pub use theme::{theme_for, AgentTheme};
