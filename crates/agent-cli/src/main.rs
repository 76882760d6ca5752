//! Command-line interface for agent-rs

use agent_core::Agent;
use agent_plugins::DEFAULT_NAMESPACE;
use agent_runtime::{AgentFactory, AgentKind, AgentOptions, AnyAgent, CoreAccess, Document};
use agent_utils::{Config, LogFormat};
use anyhow::{Context as _, bail};
use clap::Parser;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "agent-cli")]
#[command(about = "Run a pluggable agent over a list of inputs", long_about = None)]
struct Args {
    /// Agent type: conversational, task or retrieval
    #[arg(short = 't', long = "type", default_value_t = AgentKind::default().to_string())]
    agent_type: String,

    /// Agent name (defaults to the variant's name)
    #[arg(short, long)]
    name: Option<String>,

    /// Maximum number of memory records kept
    #[arg(long)]
    max_memory: Option<usize>,

    /// Capability to load before processing (repeatable)
    #[arg(short, long = "plugin")]
    plugins: Vec<String>,

    /// Namespace capabilities are resolved in
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// JSON array of documents to load into a retrieval agent
    #[arg(long)]
    documents: Option<PathBuf>,

    /// Print the last N memory records when done
    #[arg(long)]
    show_memory: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Inputs to process in order; task agents take `{"type", "data"}` JSON
    inputs: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if args.json_logs {
        config.log_format = LogFormat::Json;
    }
    agent_utils::init_tracing_with(&config);

    info!(environment = %config.environment, "Starting agent-cli");

    if args.inputs.is_empty() {
        return run_demo();
    }

    let mut agent = build_agent(&args)?;
    for input in &args.inputs {
        let value = parse_input(agent.kind(), input)?;
        let output = agent.process(value)?;
        match output {
            Value::String(text) => println!("{text}"),
            other => println!("{}", serde_json::to_string_pretty(&other)?),
        }
    }

    if let Some(limit) = args.show_memory {
        for entry in agent.recall(limit) {
            println!("{entry}");
        }
    }

    Ok(())
}

/// Reproduces the original walkthrough: greet a conversational agent
fn run_demo() -> anyhow::Result<()> {
    println!("agent-rs - pluggable agent runtime");
    println!("{}", "=".repeat(40));

    let mut agent = AgentFactory::new().create(
        AgentKind::Conversational.as_str(),
        AgentOptions::new().name("MyAgent"),
    )?;
    println!("Created agent: {}", agent.name());

    let response = agent.process(Value::String("Hello!".to_string()))?;
    println!("Agent: {}", response.as_str().unwrap_or_default());
    Ok(())
}

fn build_agent(args: &Args) -> anyhow::Result<AnyAgent> {
    let mut options = AgentOptions::new();
    if let Some(name) = &args.name {
        options = options.name(name);
    }
    if let Some(max_memory) = args.max_memory {
        options = options.max_memory(max_memory);
    }

    let mut agent = AgentFactory::new().create(&args.agent_type, options)?;

    for plugin in &args.plugins {
        if !agent.load_capability(plugin, &args.namespace) {
            warn!(capability = %plugin, "Continuing without capability");
        }
    }

    if let Some(path) = &args.documents {
        let Some(retrieval) = agent.as_retrieval_mut() else {
            bail!("--documents requires a retrieval agent");
        };
        let documents = read_documents(path)?;
        info!(count = documents.len(), "Loaded documents");
        retrieval.load_documents(documents);
    }

    Ok(agent)
}

fn read_documents(path: &Path) -> anyhow::Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid documents in {}", path.display()))
}

fn parse_input(kind: AgentKind, input: &str) -> anyhow::Result<Value> {
    match kind {
        AgentKind::Task => serde_json::from_str(input)
            .with_context(|| format!("task input is not valid JSON: {input}")),
        AgentKind::Conversational | AgentKind::Retrieval => Ok(Value::String(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["agent-cli", "hello"]);
        assert_eq!(args.agent_type, "conversational");
        assert_eq!(args.namespace, DEFAULT_NAMESPACE);
        assert_eq!(args.inputs, vec!["hello"]);
        assert!(args.plugins.is_empty());
    }

    #[test]
    fn test_build_agent_with_plugins() {
        let args = Args::parse_from([
            "agent-cli", "-t", "TASK", "-n", "cli", "--max-memory", "4", "-p", "echo", "-p",
            "missing", "{}",
        ]);
        let agent = build_agent(&args).unwrap();

        assert_eq!(agent.kind(), AgentKind::Task);
        assert_eq!(agent.name(), "cli");
        assert_eq!(agent.config().max_memory, 4);
        assert_eq!(agent.core().capabilities().names(), vec!["echo"]);
    }

    #[test]
    fn test_documents_need_retrieval_agent() {
        let args = Args::parse_from(["agent-cli", "--documents", "docs.json", "hi"]);
        let err = build_agent(&args).unwrap_err();
        assert!(err.to_string().contains("retrieval"));
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(
            parse_input(AgentKind::Retrieval, "cat").unwrap(),
            Value::String("cat".to_string())
        );
        let task = parse_input(AgentKind::Task, r#"{"type": "echo", "data": 1}"#).unwrap();
        assert_eq!(task["type"], "echo");
        assert!(parse_input(AgentKind::Task, "not json").is_err());
    }

    #[test]
    fn test_unknown_agent_type() {
        let args = Args::parse_from(["agent-cli", "-t", "planner", "hi"]);
        let err = build_agent(&args).unwrap_err();
        assert!(err.to_string().contains("Unknown agent type"));
    }
}
