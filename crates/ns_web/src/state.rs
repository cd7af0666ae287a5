use std::sync::Arc;

use ns_analysis::AnalysisChain;

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<AnalysisChain>,
}

impl AppState {
    pub fn new(chain: AnalysisChain) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }
}
