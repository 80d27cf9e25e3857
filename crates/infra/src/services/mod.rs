mod notifier;

pub use notifier::{GatewayNotifier, INotifier, InMemoryNotifier, Notification};
