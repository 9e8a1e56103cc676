mod accumulator;
mod errors;
mod sales_aggregator;
#[cfg(test)]
mod tests;
mod views;

pub use errors::AnalysisError;
pub use sales_aggregator::SalesAggregator;
