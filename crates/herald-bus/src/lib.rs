pub mod bus;
pub mod notifier;
pub mod subscription;

pub use bus::{DynamicBus, DynamicEvent, EventBus, EventData, Listener};
pub use notifier::Notifier;
pub use subscription::Subscription;
