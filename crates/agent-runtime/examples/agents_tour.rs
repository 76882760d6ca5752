//! Example walking through the three agent variants
//!
//! ## To run this example:
//! ```bash
//! RUST_LOG=debug cargo run -p agent-runtime --example agents_tour
//! ```

use agent_core::{Agent, Result};
use agent_plugins::DEFAULT_NAMESPACE;
use agent_runtime::{
    AgentOptions, ConversationalAgent, CoreAccess, Document, RetrievalAgent, Task, TaskAgent,
};
use serde_json::json;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Conversational ===");
    let mut chat = ConversationalAgent::with_options(AgentOptions::new().name("Guide"));
    for input in ["Hello!", "search the docs", "what next?"] {
        println!("> {input}\n{}", chat.process(input.to_string())?);
    }

    println!("\n=== Task queue ===");
    let mut worker = TaskAgent::new("Worker");
    worker.load_capability("word_count", DEFAULT_NAMESPACE);
    worker.add_task(Task::new("word_count", json!("count these four words")));
    worker.add_task(Task::new("word_count", json!(12)));
    worker.add_task(Task::new("resize_image", json!({"width": 640})));
    for result in worker.process_queue() {
        println!("{}", serde_json::to_string(&result)?);
    }

    println!("\n=== Retrieval ===");
    let mut librarian = RetrievalAgent::new("Librarian");
    librarian.load_documents([
        Document::new("Ownership rules in Rust").with_field("chapter", json!(4)),
        Document::new("Fearless concurrency").with_field("chapter", json!(16)),
    ]);
    let response = librarian.process("rust concurrency".to_string())?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    println!("\nLibrarian memory holds {} record(s)", librarian.recall(10).len());
    Ok(())
}
