//! Parley application binary - composition root.
//!
//! Ties together the Parley crates into a single executable:
//! 1. Parse CLI arguments
//! 2. Initialize tracing
//! 3. Load configuration from TOML
//! 4. Dispatch to the selected subcommand
//!
//! The `simulate` subcommand drives the conversation controller through a
//! full session cycle against a mock transport, printing the status line the
//! way a UI would render it. It exists for manual inspection of the state
//! machine; the real realtime SDK binding plugs into the same
//! `RealtimeTransport` trait.

mod cli;

use clap::Parser;

use parley_agent::catalog::{agent_by_id, agent_by_name, agents, AgentDescriptor};
use parley_audio::AlwaysGranted;
use parley_core::config::ParleyConfig;
use parley_session::feedback::RIPPLE_PERIOD;
use parley_session::{
    ConversationController, MockTransport, RippleFeedback, SessionState, TransportEvent,
};

use cli::{CliArgs, Command};

/// Resolve an agent from a name or backend id, defaulting sensibly.
fn resolve_agent(selector: &str) -> Result<&'static AgentDescriptor, String> {
    agent_by_name(selector)
        .or_else(|| agent_by_id(selector))
        .ok_or_else(|| {
            let names: Vec<&str> = agents().iter().map(|a| a.name).collect();
            format!(
                "Unknown agent '{}'. Available: {}",
                selector,
                names.join(", ")
            )
        })
}

fn print_agents() {
    for agent in agents() {
        println!("{}  {}", agent.icon, agent.name);
        println!("    id:      {}", agent.id);
        println!("    tagline: {}", agent.tagline);
        println!("    {}", agent.description);
        println!();
    }
}

fn print_config(config: &ParleyConfig, path: &std::path::Path) {
    println!("Config file: {}", path.display());
    println!("API base URL: {}", config.api.resolve_base_url());
    println!("Request timeout: {}s", config.api.timeout_secs);
    println!("Websocket only: {}", config.session.websocket_only);
    match &config.session.voice_id {
        Some(voice) => println!("Voice override: {}", voice),
        None => println!("Voice override: (agent default)"),
    }
    println!(
        "Speech: {} pitch={} rate={}",
        config.speech.language, config.speech.pitch, config.speech.rate
    );
    println!("Max recording: {}s", config.audio.max_recording_secs);
}

/// Drain and print any queued notices the way a UI would alert them.
fn show_notices(controller: &mut ConversationController) {
    for notice in controller.take_notices() {
        println!("  [alert] {}: {}", notice.title, notice.message);
    }
}

fn print_status(controller: &ConversationController) {
    println!("  status: {}", controller.status_text());
}

/// Run a scripted conversation cycle against the mock transport.
async fn simulate(config: &ParleyConfig, agent: &AgentDescriptor, fail_first: bool) {
    println!("Conversation with {} ({})", agent.name, agent.id);

    let transport = MockTransport::new();
    if fail_first {
        transport.script_start_failure("native transport unavailable");
    }

    let mut controller = ConversationController::new(
        agent.id,
        config.session.clone(),
        Box::new(transport.clone()),
        Box::new(RippleFeedback::new(RIPPLE_PERIOD)),
    );
    controller.request_microphone(&AlwaysGranted).await;
    print_status(&controller);

    println!("> tap");
    controller.tap().await;
    print_status(&controller);
    show_notices(&mut controller);

    if fail_first {
        // The first attempt failed on the native transport; tap again to
        // retry on the fallback.
        println!("> tap (retry in {} mode)", controller.transport_mode());
        controller.tap().await;
        print_status(&controller);
    }

    println!("> sdk connected");
    controller
        .handle_transport_event(TransportEvent::Connected)
        .await;
    print_status(&controller);

    // Hold the session open long enough for the ambient feedback loop to
    // pulse at least once.
    tokio::time::sleep(RIPPLE_PERIOD + std::time::Duration::from_millis(100)).await;

    println!("> tap");
    controller.tap().await;
    print_status(&controller);

    println!("> sdk disconnected");
    controller
        .handle_transport_event(TransportEvent::Disconnected)
        .await;
    print_status(&controller);

    if controller.state() == SessionState::Idle {
        println!("Session cycle complete.");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first: the log level may come from it.
    let config_path = args.resolve_config_path();
    let config = ParleyConfig::load_or_default(&config_path);

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Parley v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Agents => print_agents(),
        Command::Config => print_config(&config, &config_path),
        Command::Simulate { agent, fail_first } => {
            let agent = resolve_agent(&agent).map_err(std::io::Error::other)?;
            simulate(&config, agent, fail_first).await;
        }
    }

    Ok(())
}
