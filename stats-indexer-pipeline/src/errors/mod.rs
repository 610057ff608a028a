mod block_time;
mod enrichment;
mod fetcher;
mod ledger;
mod orchestrator;

pub use block_time::BlockTimeError;
pub use enrichment::EnrichmentError;
pub use fetcher::DecodeError;
pub use ledger::LedgerError;
pub use orchestrator::PipelineError;
