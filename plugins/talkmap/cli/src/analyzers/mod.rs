pub mod classifier;
pub mod transition;

pub use classifier::{classifier_from_config, EventClassifier, PatternClassifier, PrefixClassifier};
pub use transition::{build_flow_graph, build_flow_graph_from_records, TransitionAggregator};
