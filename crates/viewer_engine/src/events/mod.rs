//! Event delivery
//!
//! Key principles:
//! - Synchronous fan-out (no queues, no deferred delivery)
//! - Subscribers are notified in subscription order
//! - A channel keeps only its latest value

pub mod channel;

pub use channel::{Channel, WeakChannel, Subscription, SubscriberKey};
