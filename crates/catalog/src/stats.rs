//! Translation coverage per context.

use serde::Serialize;

use crate::model::{Catalog, Context, TranslationStatus};

/// Message counts by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
}

impl Counts {
    fn add(&mut self, status: TranslationStatus) {
        match status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Vanished | TranslationStatus::Obsolete => self.vanished += 1,
        }
    }

    /// Messages whose source still exists.
    pub fn current(&self) -> usize {
        self.finished + self.unfinished
    }

    pub fn total(&self) -> usize {
        self.current() + self.vanished
    }

    /// Percentage of current messages that are finished (100 when empty).
    pub fn completion(&self) -> f64 {
        match self.current() {
            0 => 100.0,
            current => self.finished as f64 * 100.0 / current as f64,
        }
    }
}

impl std::ops::AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.vanished += other.vanished;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextStats {
    pub name: String,
    #[serde(flatten)]
    pub counts: Counts,
    pub completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub language: Option<String>,
    pub contexts: Vec<ContextStats>,
    pub total: Counts,
    pub completion: f64,
}

pub fn context_counts(context: &Context) -> Counts {
    let mut counts = Counts::default();
    for message in &context.messages {
        counts.add(message.status);
    }
    counts
}

pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut total = Counts::default();
    let contexts = catalog
        .contexts
        .iter()
        .map(|context| {
            let counts = context_counts(context);
            total += counts;
            ContextStats {
                name: context.name.clone(),
                counts,
                completion: counts.completion(),
            }
        })
        .collect();

    CatalogStats {
        language: catalog.language.clone(),
        contexts,
        total,
        completion: total.completion(),
    }
}
