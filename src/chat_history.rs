use serde::{Deserialize, Serialize};

/// One successful prompt/response exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub prompt: String,
    pub response: String,
    pub model: String,
    pub timestamp: String, // local "HH:MM:SS"
}

impl ConversationTurn {
    /// Stamp a new turn with the current local wall-clock time.
    pub fn new(prompt: String, response: String, model: String) -> Self {
        Self {
            prompt,
            response,
            model,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// Short label for the collapsed history entry.
    pub fn summary(&self) -> String {
        let head: String = self.prompt.chars().take(50).collect();
        format!("{} - {}...", self.timestamp, head)
    }
}

/// Conversation log owned by a single interactive session.
///
/// Turns are kept in creation order and never edited in place; the only
/// way to remove them is [`SessionLog::clear`]. Nothing here touches disk.
#[derive(Debug, Default)]
pub struct SessionLog {
    turns: Vec<ConversationTurn>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        tracing::debug!("Appending turn for model {} ({} total)", turn.model, self.turns.len() + 1);
        self.turns.push(turn);
    }

    /// All turns, oldest first.
    pub fn all(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Display order: newest first. Storage order is left alone.
    pub fn recent_first(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.all().iter().rev()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
