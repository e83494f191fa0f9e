use std::sync::Arc;

use summeval::catalog::VideoCatalog;
use summeval::constants::DEFAULT_MAX_BATCH_SIZE;
use summeval::evaluation::SummaryEvaluator;

#[derive(Clone)]
pub struct HandlerState {
    pub evaluator: Arc<SummaryEvaluator>,

    pub catalog: Arc<VideoCatalog>,

    pub max_batch_size: usize,
}

impl HandlerState {
    pub fn new(
        evaluator: Arc<SummaryEvaluator>,
        catalog: Arc<VideoCatalog>,
        max_batch_size: usize,
    ) -> Self {
        Self {
            evaluator,
            catalog,
            max_batch_size,
        }
    }

    /// Stub embedder, built-in catalog, default batch limit.
    pub fn stub() -> Self {
        Self::new(
            Arc::new(SummaryEvaluator::stub()),
            Arc::new(VideoCatalog::default()),
            DEFAULT_MAX_BATCH_SIZE,
        )
    }
}
