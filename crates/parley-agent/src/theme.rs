//! Per-agent visual themes for the conversation screen.
//!
//! Colors are carried as hex/rgba strings; actual rendering belongs to the
//! presentation layer, which is out of scope here.

/// Visual theme applied to the conversation screen for one agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentTheme {
    /// Two-stop gradient laid over the background, as rgba strings.
    pub gradient: [&'static str; 2],
    /// Three-stop gradient used for the central orb.
    pub orb_gradient: [&'static str; 3],
    /// Subtitle shown under the agent name.
    pub subtitle: &'static str,
}

const SUPPORT: AgentTheme = AgentTheme {
    gradient: ["rgba(66, 133, 244, 0.7)", "rgba(15, 157, 88, 0.7)"],
    orb_gradient: ["#64B5F6", "#2196F3", "#1976D2"],
    subtitle: "Technical support at your service",
};

const MINDFULNESS: AgentTheme = AgentTheme {
    gradient: ["rgba(52, 168, 83, 0.7)", "rgba(30, 94, 32, 0.7)"],
    orb_gradient: ["#81C784", "#4CAF50", "#388E3C"],
    subtitle: "Find your inner peace",
};

const GAME_MASTER: AgentTheme = AgentTheme {
    gradient: ["rgba(79, 45, 127, 0.7)", "rgba(45, 10, 79, 0.7)"],
    orb_gradient: ["#7E57C2", "#673AB7", "#512DA8"],
    subtitle: "Your adventure awaits",
};

const TRAVEL: AgentTheme = AgentTheme {
    gradient: ["rgba(234, 67, 53, 0.7)", "rgba(183, 28, 28, 0.7)"],
    orb_gradient: ["#FF8A65", "#FF5722", "#E64A19"],
    subtitle: "Discover the world with me",
};

/// Returns the theme for the named agent.
///
/// Unknown names fall back to the Support Agent theme.
pub fn theme_for(agent_name: &str) -> &'static AgentTheme {
    match agent_name {
        "Support Agent" => &SUPPORT,
        "Mindfulness Coach" => &MINDFULNESS,
        "Game Master" => &GAME_MASTER,
        "Travel Guide" => &TRAVEL,
        _ => &SUPPORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::agents;

    #[test]
    fn test_every_agent_has_a_theme() {
        for agent in agents() {
            let theme = theme_for(agent.name);
            assert!(!theme.subtitle.is_empty());
        }
    }

    #[test]
    fn test_known_theme() {
        let theme = theme_for("Game Master");
        assert_eq!(theme.subtitle, "Your adventure awaits");
        assert_eq!(theme.orb_gradient[1], "#673AB7");
    }

    #[test]
    fn test_unknown_name_falls_back_to_support() {
        let theme = theme_for("Pirate Captain");
        assert_eq!(theme, theme_for("Support Agent"));
    }
}
