// Card enrichment: normalization and the pattern-driven derivations

pub mod activation;
pub mod clauses;
pub mod cost;
pub mod enrich;
pub mod keywords;
pub mod normalize;

pub use enrich::CardEnricher;
