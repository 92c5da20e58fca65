//! Synchronous change notification with ownership-scoped subscriptions.
//!
//! Notifiers hold their subscribers weakly; the [`Subscription`] returned on
//! subscribe owns the callback. Dropping the handle cancels delivery, including
//! the remaining deliveries of a notification that is already in flight.
//!
//! Callbacks run on the notifying thread, in registration order, while no
//! internal storage is borrowed.

pub(crate) mod notifier;
