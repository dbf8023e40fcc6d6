// classifier-gateway-rs/src/samples.rs
// Built-in ticket datasets offered by the web console

use serde::Serialize;
use std::collections::BTreeMap;
use ticket_classifier::Ticket;

/// A named batch in the same shape the classify endpoint accepts
#[derive(Debug, Clone, Serialize)]
pub struct SampleDataset {
    pub tickets: Vec<Ticket>,
}

/// All sample datasets keyed by name
pub fn sample_datasets() -> BTreeMap<&'static str, SampleDataset> {
    let mut datasets = BTreeMap::new();

    datasets.insert(
        "basic",
        SampleDataset {
            tickets: vec![
                Ticket::new("App crash on fund transfer after update", "High", "Email"),
                Ticket::new("Unable to reset login PIN", "Medium", "Chat"),
                Ticket::new("User asking how to enable biometric login", "Low", "Phone"),
            ],
        },
    );

    datasets.insert(
        "crash_mix",
        SampleDataset {
            tickets: vec![
                Ticket::new("Crash when user uploads ID proof", "High", "App"),
                Ticket::new("How to activate netbanking?", "Low", "Chat"),
                Ticket::new("Timeout error in API when checking balance", "Medium", "Email"),
            ],
        },
    );

    datasets
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_classifier::{Decision, TicketClassifier};

    #[test]
    fn test_sample_names() {
        let names: Vec<_> = sample_datasets().keys().copied().collect();
        assert_eq!(names, vec!["basic", "crash_mix"]);
    }

    #[test]
    fn test_samples_classify_as_expected() {
        let classifier = TicketClassifier::new();
        let datasets = sample_datasets();

        let decisions = |name: &str| -> Vec<Decision> {
            classifier
                .classify_batch(&datasets[name].tickets)
                .into_iter()
                .map(|c| c.decision)
                .collect()
        };

        assert_eq!(
            decisions("basic"),
            vec![Decision::AiCodePatch, Decision::VibeScript, Decision::VibeScript]
        );
        assert_eq!(
            decisions("crash_mix"),
            vec![Decision::AiCodePatch, Decision::VibeScript, Decision::AiCodePatch]
        );
    }
}
