use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;

use stylescout_core::fallback::build_fallback;
use stylescout_core::{AnalysisResult, Product, Result};

use crate::analyzer::analyze_image;
use crate::backend::GenerativeBackend;
use crate::discovery::discover_products;

/// Step-level progress. Discovery events are keyed by item name and emitted
/// in completion order, which is unordered with respect to item index.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ProgressEvent {
    AnalyzingImage,
    SearchingStores {
        total: usize,
    },
    ItemCompleted {
        name: String,
        completed: usize,
        total: usize,
    },
}

/// The pipeline entry point: one vision call, then a concurrent discovery
/// fan-out over every detected item.
#[derive(Clone)]
pub struct Pipeline {
    backend: Arc<dyn GenerativeBackend>,
}

impl Pipeline {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Fails only for the vision stage; after that the batch always
    /// completes. The returned `items` order matches the vision output
    /// regardless of which discovery task finishes first.
    pub async fn run<F>(
        &self,
        image: &[u8],
        mime_type: &str,
        on_progress: F,
    ) -> Result<AnalysisResult>
    where
        F: Fn(ProgressEvent),
    {
        on_progress(ProgressEvent::AnalyzingImage);
        let mut analysis = analyze_image(self.backend.as_ref(), image, mime_type).await?;

        // detecting nothing is a valid terminal state, not an error
        if analysis.items.is_empty() {
            return Ok(analysis);
        }

        let total = analysis.items.len();
        on_progress(ProgressEvent::SearchingStores { total });

        let mut join_set = JoinSet::new();
        for (idx, item) in analysis.items.iter().enumerate() {
            let backend = Arc::clone(&self.backend);
            let item = item.clone();
            join_set.spawn(async move {
                let products = discover_products(backend.as_ref(), &item).await;
                (idx, item.name, products)
            });
        }

        let mut slots: Vec<Option<Vec<Product>>> = (0..total).map(|_| None).collect();
        let mut completed = 0usize;
        while let Some(joined) = join_set.join_next().await {
            // a panicked task leaves its slot empty; the merge fills it below
            let Ok((idx, name, products)) = joined else {
                continue;
            };
            completed += 1;
            on_progress(ProgressEvent::ItemCompleted {
                name,
                completed,
                total,
            });
            slots[idx] = Some(products);
        }

        for (item, slot) in analysis.items.iter_mut().zip(slots) {
            item.products = slot.unwrap_or_else(|| build_fallback(&item.search_terms));
        }

        Ok(analysis)
    }
}
