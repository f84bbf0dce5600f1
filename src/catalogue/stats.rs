//! Catalogue completion statistics.
//!
//! Counts finished, unfinished and vanished messages the way the release
//! tool summarizes a catalogue, both in total and per context.

use crate::catalogue::{Catalogue, Context, TranslationStatus};
use serde::Serialize;

/// Message counts for one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextStats {
    pub name: String,
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,

    /// Finished share of live (non-vanished) messages as a percentage (0-100)
    pub completion_rate: f64,
}

impl ContextStats {
    fn collect(context: &Context) -> Self {
        let mut stats = ContextStats {
            name: context.name.clone(),
            finished: 0,
            unfinished: 0,
            vanished: 0,
            completion_rate: 0.0,
        };

        for message in &context.messages {
            match message.status {
                TranslationStatus::Finished => stats.finished += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Vanished => stats.vanished += 1,
            }
        }

        stats.completion_rate = completion_rate(stats.finished, stats.unfinished);
        stats
    }

    /// Messages that can still reach the UI.
    pub fn live(&self) -> usize {
        self.finished + self.unfinished
    }
}

/// Statistics report for a whole catalogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueStats {
    /// Declared target language
    pub language: String,

    /// Number of contexts
    pub contexts: usize,

    /// Total number of messages, vanished included
    pub messages: usize,

    /// Number of messages with a current translation
    pub finished: usize,

    /// Number of live messages without a usable translation
    pub unfinished: usize,

    /// Number of historical messages
    pub vanished: usize,

    /// Finished share of live messages as a percentage (0-100)
    pub completion_rate: f64,

    /// Per-context breakdown in file order
    pub per_context: Vec<ContextStats>,
}

impl CatalogueStats {
    /// Collect statistics for a catalogue.
    pub fn collect(catalogue: &Catalogue) -> Self {
        let per_context: Vec<ContextStats> = catalogue
            .contexts()
            .iter()
            .map(ContextStats::collect)
            .collect();

        let finished = per_context.iter().map(|c| c.finished).sum();
        let unfinished = per_context.iter().map(|c| c.unfinished).sum();
        let vanished = per_context.iter().map(|c| c.vanished).sum();

        CatalogueStats {
            language: catalogue.language().to_string(),
            contexts: per_context.len(),
            messages: finished + unfinished + vanished,
            finished,
            unfinished,
            vanished,
            completion_rate: completion_rate(finished, unfinished),
            per_context,
        }
    }

    /// One-line summary in the style of the release tool.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} translation(s) ({} finished and {} unfinished), ignored {} vanished",
            self.language,
            self.finished + self.unfinished,
            self.finished,
            self.unfinished,
            self.vanished
        )
    }
}

fn completion_rate(finished: usize, unfinished: usize) -> f64 {
    let live = finished + unfinished;
    if live > 0 {
        (finished as f64 / live as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Message, Translation};

    fn message(status: TranslationStatus) -> Message {
        Message {
            source: "source".to_string(),
            comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
            translation: Translation::Single("译文".to_string()),
            status,
            numerus: false,
        }
    }

    fn context(name: &str, statuses: &[TranslationStatus]) -> Context {
        Context {
            name: name.to_string(),
            messages: statuses.iter().map(|&status| message(status)).collect(),
        }
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_collect_empty() {
        let stats = CatalogueStats::collect(&Catalogue::empty("zh_CN"));

        assert_eq!(stats.contexts, 0);
        assert_eq!(stats.messages, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert!(stats.per_context.is_empty());
    }

    #[test]
    fn test_collect_counts() {
        use TranslationStatus::*;
        let catalogue = Catalogue::new(
            "zh_HK",
            None,
            None,
            vec![
                context("SettingInterface", &[Finished, Finished, Vanished, Unfinished]),
                context("Window", &[Finished, Finished]),
            ],
        );

        let stats = CatalogueStats::collect(&catalogue);
        assert_eq!(stats.language, "zh_HK");
        assert_eq!(stats.contexts, 2);
        assert_eq!(stats.messages, 6);
        assert_eq!(stats.finished, 4);
        assert_eq!(stats.unfinished, 1);
        assert_eq!(stats.vanished, 1);
        assert_eq!(stats.completion_rate, 80.0);
    }

    #[test]
    fn test_collect_per_context() {
        use TranslationStatus::*;
        let catalogue = Catalogue::new(
            "zh_CN",
            None,
            None,
            vec![context("ModelParameterWidget", &[Finished, Unfinished, Unfinished, Unfinished])],
        );

        let stats = CatalogueStats::collect(&catalogue);
        let model = &stats.per_context[0];
        assert_eq!(model.name, "ModelParameterWidget");
        assert_eq!(model.live(), 4);
        assert_eq!(model.completion_rate, 25.0);
    }

    #[test]
    fn test_only_vanished_has_zero_rate() {
        let catalogue = Catalogue::new(
            "zh_CN",
            None,
            None,
            vec![context("Old", &[TranslationStatus::Vanished])],
        );

        let stats = CatalogueStats::collect(&catalogue);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.per_context[0].live(), 0);
    }

    #[test]
    fn test_summary() {
        use TranslationStatus::*;
        let catalogue = Catalogue::new(
            "zh_CN",
            None,
            None,
            vec![context("A", &[Finished, Unfinished, Vanished])],
        );

        let summary = CatalogueStats::collect(&catalogue).summary();
        assert_eq!(
            summary,
            "zh_CN: 2 translation(s) (1 finished and 1 unfinished), ignored 1 vanished"
        );
    }

    #[test]
    fn test_serializes_to_json() {
        let stats = CatalogueStats::collect(&Catalogue::empty("zh_CN"));
        let json = serde_json::to_string(&stats).expect("Should serialize");
        assert!(json.contains("\"completion_rate\":0.0"));
        assert!(json.contains("\"language\":\"zh_CN\""));
    }
}
