//! Retrieval agent implementation (keyword lookup over a knowledge base)

use crate::base::{AgentCore, AgentOptions, CoreAccess};
use agent_core::context::keys;
use agent_core::{Agent, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

/// Name used when the options do not carry one
pub const DEFAULT_NAME: &str = "RetrievalAgent";

const CONTENT_KEY: &str = "content";

/// A knowledge-base entry: searchable `content` plus arbitrary fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub content: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            fields: Map::new(),
        }
    }

    /// Attach an extra field
    ///
    /// A `content` key sets the searchable content when the value is a
    /// string and is dropped otherwise, so it never lands in `fields`.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key == CONTENT_KEY {
            if let Value::String(content) = value {
                self.content = content;
            }
        } else {
            self.fields.insert(key, value);
        }
        self
    }

    fn matches(&self, tokens: &[String]) -> bool {
        let content = self.content.to_lowercase();
        tokens.iter().any(|token| content.contains(token.as_str()))
    }
}

/// Answer to a retrieval query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResponse {
    pub query: String,
    pub results: Vec<Document>,
    pub count: usize,
}

/// An agent that finds documents sharing any word with the query
///
/// The query is lower-cased and split on whitespace; a document matches when
/// any token occurs inside its lower-cased content. Matches come back in
/// insertion order, without ranking, and each response is recorded in
/// memory.
///
/// # Example
///
/// ```
/// use agent_core::Agent;
/// use agent_runtime::{Document, RetrievalAgent};
///
/// let mut agent = RetrievalAgent::default();
/// agent.add_document(Document::new("The cat sat on the mat"));
///
/// let response = agent.process("CAT".to_string()).unwrap();
/// assert_eq!(response.count, 1);
/// ```
#[derive(Debug)]
pub struct RetrievalAgent {
    core: AgentCore,
    knowledge_base: Vec<Document>,
}

impl Default for RetrievalAgent {
    fn default() -> Self {
        Self::with_options(AgentOptions::default())
    }
}

impl RetrievalAgent {
    /// Create a retrieval agent with the given name and default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(AgentOptions::new().name(name))
    }

    /// Create a retrieval agent from construction options
    pub fn with_options(options: AgentOptions) -> Self {
        Self {
            core: AgentCore::from_options(options, DEFAULT_NAME),
            knowledge_base: Vec::new(),
        }
    }

    /// Add a single document
    pub fn add_document(&mut self, document: Document) {
        self.knowledge_base.push(document);
    }

    /// Add several documents, keeping their order
    pub fn load_documents(&mut self, documents: impl IntoIterator<Item = Document>) {
        self.knowledge_base.extend(documents);
    }

    pub fn knowledge_base(&self) -> &[Document] {
        &self.knowledge_base
    }

    /// Documents matching `query`, without touching memory
    pub fn retrieve(&self, query: &str) -> Vec<Document> {
        let tokens: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        self.knowledge_base
            .iter()
            .filter(|doc| doc.matches(&tokens))
            .cloned()
            .collect()
    }
}

impl Agent for RetrievalAgent {
    type Input = String;
    type Output = RetrievalResponse;

    fn process(&mut self, query: String) -> Result<RetrievalResponse> {
        let results = self.retrieve(&query);
        debug!(
            agent = %self.core.name(),
            query = %query,
            matches = results.len(),
            "Retrieved documents"
        );

        let response = RetrievalResponse {
            count: results.len(),
            query,
            results,
        };

        self.core
            .context_mut()
            .insert(keys::LAST_QUERY, json!(response.query));
        self.core.remember(serde_json::to_value(&response)?);

        Ok(response)
    }

    fn name(&self) -> &str {
        self.core.name()
    }
}

impl CoreAccess for RetrievalAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }
}
