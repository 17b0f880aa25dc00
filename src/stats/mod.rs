// Statistics engine: classification, rate stats, per-batter aggregation.

pub mod aggregate;
pub mod classify;
pub mod rates;
