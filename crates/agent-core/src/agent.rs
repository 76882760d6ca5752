//! Core Agent trait definition

use crate::Result;

/// Core trait that all agents must implement
///
/// Each variant picks its own input and output shapes: a conversational agent
/// maps text to text, a task agent maps tasks to task results, and so on.
/// `process` runs to completion before returning; there is no suspension
/// point and no background work.
pub trait Agent {
    /// What a single interaction accepts
    type Input;

    /// What a single interaction produces
    type Output;

    /// Process input and return output
    fn process(&mut self, input: Self::Input) -> Result<Self::Output>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemoryLog};
    use serde_json::json;

    struct Counter {
        name: String,
        memory: MemoryLog,
    }

    impl Agent for Counter {
        type Input = u32;
        type Output = u32;

        fn process(&mut self, input: u32) -> Result<u32> {
            if input == 0 {
                return Err(Error::InvalidInput("zero".to_string()));
            }
            self.memory.append(json!(input));
            Ok(self.memory.len() as u32)
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_custom_agent() {
        let mut agent = Counter {
            name: "counter".to_string(),
            memory: MemoryLog::new(2),
        };

        assert_eq!(agent.name(), "counter");
        assert_eq!(agent.process(7).unwrap(), 1);
        assert_eq!(agent.process(8).unwrap(), 2);
        assert_eq!(agent.process(9).unwrap(), 2);
        assert!(agent.process(0).is_err());
    }
}
