mod worker_service;

pub use worker_service::{CompletionOutcome, WorkerService};
