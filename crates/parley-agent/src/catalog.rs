//! The built-in agent personas.

use serde::{Deserialize, Serialize};

/// A named conversational persona with its backend identifier and
/// presentation metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Backend identifier used when starting a realtime session.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short marketing line shown on the picker card.
    pub tagline: &'static str,
    /// Longer description of what the agent does.
    pub description: &'static str,
    /// Accent color as a hex string (e.g. `#00CFE8`).
    pub accent_color: &'static str,
    /// Emoji badge shown on the picker card.
    pub icon: &'static str,
}

/// All agents available in the picker, in display order.
pub const AGENTS: &[AgentDescriptor] = &[
    AgentDescriptor {
        id: "TkvOiYUSHLZyVnFgBnJr",
        name: "Support Agent",
        tagline: "Technical solutions, simplified.",
        description: "Expert technical support and customer assistance.",
        accent_color: "#00CFE8",
        icon: "💻",
    },
    AgentDescriptor {
        id: "oYxMlLkXbNtZDS3zCikc",
        name: "Mindfulness Coach",
        tagline: "Find peace within yourself.",
        description: "Guided meditation and stress reduction techniques.",
        accent_color: "#28A745",
        icon: "🧘",
    },
    AgentDescriptor {
        id: "obmk35jYzsvmFDtgiIfk",
        name: "Game Master",
        tagline: "Embark on an epic adventure.",
        description: "Your companion through digital realms and quests.",
        accent_color: "#FFD700",
        icon: "🎮",
    },
    AgentDescriptor {
        id: "USji2hEbVPYimRif3His",
        name: "Travel Guide",
        tagline: "Discover the world with me.",
        description: "Explore destinations and create memorable journeys.",
        accent_color: "#FF6B6B",
        icon: "✈️",
    },
];

/// Returns the full catalog in display order.
pub fn agents() -> &'static [AgentDescriptor] {
    AGENTS
}

/// Look up an agent by its backend identifier.
pub fn agent_by_id(id: &str) -> Option<&'static AgentDescriptor> {
    AGENTS.iter().find(|a| a.id == id)
}

/// Look up an agent by display name.
pub fn agent_by_name(name: &str) -> Option<&'static AgentDescriptor> {
    AGENTS.iter().find(|a| a.name == name)
}
