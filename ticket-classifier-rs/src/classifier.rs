// ticket-classifier-rs/src/classifier.rs
// Keyword scoring and the two fixed routing templates

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ticket::{Classification, Ticket, TicketMetadata};

/// Keywords that point at an engineering fix.
pub const AI_PATCH_KEYWORDS: [&str; 11] = [
    "crash",
    "error",
    "exception",
    "bug",
    "failure",
    "update issue",
    "backend",
    "api",
    "database",
    "timeout",
    "code",
];

/// Keywords that point at a guided procedural workflow.
pub const VIBE_SCRIPT_KEYWORDS: [&str; 9] = [
    "reset",
    "configuration",
    "access issue",
    "workflow",
    "instructions",
    "payment delay",
    "verification",
    "customer onboarding",
    "ui navigation",
];

/// Substrings that force `AiCodePatch` whatever the scores say.
const OVERRIDE_KEYWORDS: [&str; 2] = ["crash", "bug"];

const AI_PATCH_REASONING: &str = "Detected system crash or code-related failure. \
     Likely requires AI-generated code remediation.";

const VIBE_SCRIPT_REASONING: &str = "Ticket describes a procedural or configuration issue, \
     suitable for a guided troubleshooting workflow.";

const AI_PATCH_ACTIONS: [&str; 4] = [
    "Reproduce issue in a controlled environment",
    "Generate patch suggestion using AI code assistant",
    "Run automated unit and integration tests",
    "Deploy patch to staging for QA verification",
];

const VIBE_SCRIPT_ACTIONS: [&str; 4] = [
    "Identify affected module or user flow",
    "Select appropriate Vibe-coded script template",
    "Customize workflow based on severity",
    "Deploy guided steps to customer support dashboard",
];

/// Routing bucket for a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    AiCodePatch,
    VibeScript,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::AiCodePatch => "AI_CODE_PATCH",
            Decision::VibeScript => "VIBE_SCRIPT",
        }
    }

    pub fn reasoning(&self) -> &'static str {
        match self {
            Decision::AiCodePatch => AI_PATCH_REASONING,
            Decision::VibeScript => VIBE_SCRIPT_REASONING,
        }
    }

    pub fn next_actions(&self) -> &'static [&'static str; 4] {
        match self {
            Decision::AiCodePatch => &AI_PATCH_ACTIONS,
            Decision::VibeScript => &VIBE_SCRIPT_ACTIONS,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword hit counts for a summary. Each keyword counts once at most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordScore {
    pub ai_patch: usize,
    pub vibe_script: usize,
}

impl KeywordScore {
    /// Score an already lower-cased summary
    pub fn of(summary: &str) -> Self {
        Self {
            ai_patch: count_hits(summary, &AI_PATCH_KEYWORDS),
            vibe_script: count_hits(summary, &VIBE_SCRIPT_KEYWORDS),
        }
    }
}

fn count_hits(summary: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| summary.contains(*kw)).count()
}

fn decide(summary: &str, score: KeywordScore) -> Decision {
    let overridden = OVERRIDE_KEYWORDS.iter().any(|kw| summary.contains(kw));

    if score.ai_patch > score.vibe_script || overridden {
        Decision::AiCodePatch
    } else {
        Decision::VibeScript
    }
}

/// Stateless ticket classifier. Cheap to copy and safe to share across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketClassifier;

impl TicketClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, ticket: &Ticket) -> Classification {
        let summary = ticket.summary.to_lowercase();
        let score = KeywordScore::of(&summary);
        let decision = decide(&summary, score);

        tracing::debug!(
            "Classified ticket: decision={}, ai_score={}, vibe_score={}",
            decision,
            score.ai_patch,
            score.vibe_script
        );

        Classification {
            decision,
            reasoning: decision.reasoning().to_string(),
            next_actions: decision
                .next_actions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            metadata: TicketMetadata {
                channel: ticket.channel.to_lowercase(),
                severity: ticket.severity.to_lowercase(),
            },
        }
    }

    /// Classify every ticket, preserving input order.
    pub fn classify_batch(&self, tickets: &[Ticket]) -> Vec<Classification> {
        tickets.iter().map(|t| self.classify(t)).collect()
    }
}

/// Convenience wrapper around [`TicketClassifier::classify`].
pub fn classify(ticket: &Ticket) -> Classification {
    TicketClassifier.classify(ticket)
}
