//! Natural-language chat agent
//!
//! One turn: classify the input, run the matching tool, and wrap the result
//! in a short conversational reply.

use crate::agent::context::ConversationContext;
use crate::core::config::AgentConfig;
use crate::intent::{EntityKind, Intent, IntentAction, IntentClassifier};
use crate::tools::dispatcher::ToolDispatcher;
use crate::tools::result::ToolResult;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shown when the input was not understood
pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't quite get that.\n\
Try something like:\n  \
- \"read file README.md\" or \"2 더하기 3\"\n  \
- \"show folder src\" or \"what time is it\"";

/// Reply to one chat turn
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub intent: Intent,
    /// False when the intent fell below the confidence threshold
    pub understood: bool,
    pub result: Option<ToolResult>,
    pub text: String,
}

pub struct ChatAgent {
    classifier: IntentClassifier,
    dispatcher: ToolDispatcher,
    context: ConversationContext,
    min_confidence: f32,
    rng: ChaCha8Rng,
}

impl ChatAgent {
    pub fn new(dispatcher: ToolDispatcher, min_confidence: f32) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            dispatcher,
            context: ConversationContext::new(),
            min_confidence,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(ToolDispatcher::from_config(config), config.min_confidence)
    }

    /// Fix the phrase selection for reproducible output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn respond(&mut self, input: &str) -> ChatReply {
        let input = input.trim();
        self.context.record_user(input);

        let intent = self.classifier.classify(input);
        if !intent.is_actionable(self.min_confidence) {
            tracing::debug!("Not acting on {:?} (confidence {})", input, intent.confidence);
            return ChatReply {
                intent,
                understood: false,
                result: None,
                text: NOT_UNDERSTOOD.to_string(),
            };
        }

        let result = self.dispatcher.invoke(&intent.tool, &intent.args);
        self.context.observe(&intent, &result);

        let text = format!("{}\n\n{}", self.phrase(&intent, &result), result.display_text());
        self.context.record_agent(&text);

        ChatReply {
            intent,
            understood: true,
            result: Some(result),
            text,
        }
    }

    fn phrase(&mut self, intent: &Intent, result: &ToolResult) -> String {
        if !result.success {
            return "That didn't work out.".to_string();
        }
        let file = intent.entity(EntityKind::ReadFileName).unwrap_or("the file");
        let candidates: Vec<String> = match intent.action {
            IntentAction::ReadFile => vec![
                format!("Here is {}.", file),
                "I checked the file contents.".into(),
                "Opened the file you asked for.".into(),
            ],
            IntentAction::WriteFile => vec![
                format!("Created {}.", file),
                "The file was saved.".into(),
                "Wrote a new file for you.".into(),
            ],
            IntentAction::ListDirectory => vec![
                "Here is what the directory holds.".into(),
                "Fetched the folder listing.".into(),
                "Listed the files and folders.".into(),
            ],
            IntentAction::SearchFiles => vec![
                "Search finished.".into(),
                "I looked for matching files.".into(),
                "Here are the search results.".into(),
            ],
            IntentAction::Calculate => vec![
                "Calculated it.".into(),
                "Worked out the math.".into(),
                "Here is the answer.".into(),
            ],
            _ => vec!["Done.".into()],
        };
        candidates
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "Done.".into())
    }
}
