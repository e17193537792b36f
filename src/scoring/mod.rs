pub mod composite;
pub mod weighted;

pub use composite::{CompositeConfig, CompositeScorer};
pub use weighted::{EngagementWeights, WeightedScorer};
