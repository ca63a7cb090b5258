//! Mock generation adapter for testing without API calls.
//!
//! Routes each request by its system prompt and answers with scripted replies.

use crate::domain::{ChatRole, ChatTurn, DomainError, Persona};
use crate::ports::GenerationPort;
use crate::usecases::unit_resolver::UNIT_CONVERSION_PROMPT;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Which kind of request the mock is answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockRoute {
    UnitConversion,
    Critic,
    Stylist,
    Other,
}

impl MockRoute {
    fn of(messages: &[ChatTurn]) -> Self {
        let system = messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str());
        match system {
            Some(p) if p == UNIT_CONVERSION_PROMPT => MockRoute::UnitConversion,
            Some(p) if p == Persona::Critic.system_prompt() => MockRoute::Critic,
            Some(p) if p == Persona::Stylist.system_prompt() => MockRoute::Stylist,
            _ => MockRoute::Other,
        }
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock generation adapter.
///
/// Replies queued for a route are served in order; the last one repeats.
/// Unscripted commentary routes get a canned line, unscripted conversions fail.
pub struct MockGenerationAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    scripts: Mutex<HashMap<MockRoute, VecDeque<Scripted>>>,
    requests: Mutex<Vec<(String, Vec<ChatTurn>)>>,
}

impl MockGenerationAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            scripts: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, route: MockRoute, text: impl Into<String>) -> Self {
        self.push(route, Scripted::Reply(text.into()));
        self
    }

    pub fn with_failure(self, route: MockRoute, message: impl Into<String>) -> Self {
        self.push(route, Scripted::Fail(message.into()));
        self
    }

    /// Every request seen so far as `(model, messages)`.
    pub fn requests(&self) -> Vec<(String, Vec<ChatTurn>)> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn push(&self, route: MockRoute, scripted: Scripted) {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(route)
            .or_default()
            .push_back(scripted);
    }

    fn next_scripted(&self, route: MockRoute) -> Option<Scripted> {
        let mut scripts = self.scripts.lock().unwrap_or_else(|e| e.into_inner());
        let queue = scripts.get_mut(&route)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn canned(route: MockRoute, messages: &[ChatTurn]) -> Result<String, DomainError> {
        let user = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        match route {
            MockRoute::Critic => Ok(format!(
                "[MOCK] Critic says: \"{}\" Configure a real API key for the full roast.",
                user
            )),
            MockRoute::Stylist => Ok(format!(
                "[MOCK] Stylist says: \"{}\" Configure a real API key for actual fashion advice.",
                user
            )),
            MockRoute::UnitConversion | MockRoute::Other => Err(DomainError::Generation(
                "[MOCK] no scripted reply for this request".to_string(),
            )),
        }
    }
}

impl Default for MockGenerationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationPort for MockGenerationAdapter {
    async fn complete(&self, model: &str, messages: &[ChatTurn]) -> Result<String, DomainError> {
        let route = MockRoute::of(messages);
        info!(
            model,
            ?route,
            messages = messages.len(),
            "[MOCK] Simulating completion"
        );
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((model.to_string(), messages.to_vec()));

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match self.next_scripted(route) {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Fail(message)) => Err(DomainError::Generation(message)),
            None => Self::canned(route, messages),
        }
    }
}
