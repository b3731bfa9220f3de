pub mod preview;
pub mod schemas;

pub use preview::{PreviewState, PreviewStore, SubscriptionId};
pub use schemas::SchemaRepository;
