//! Single-value broadcast channel
//!
//! A channel holds exactly one current value and an ordered list of
//! subscribers. Publishing stores the value and then calls every subscriber
//! synchronously, in the order they subscribed. A replaying channel also
//! hands its current value to each new subscriber before `subscribe`
//! returns.
//!
//! Everything runs on one thread: state lives behind `Rc<RefCell<_>>` and
//! the state borrow is always released before a callback runs, so callbacks
//! may subscribe, unsubscribe or publish without tripping the borrow checker.
//! A publish made from inside a callback is queued and delivered once the
//! outer round has reached every subscriber.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Generational key identifying one subscriber of one channel
    pub struct SubscriberKey;
}

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct ChannelState<T> {
    name: String,
    current: T,
    replay: bool,
    subscribers: SlotMap<SubscriberKey, Callback<T>>,
    order: Vec<SubscriberKey>,
    delivering: bool,
    queued: VecDeque<T>,
}

/// Detaches a subscriber without knowing the channel's value type
trait Detach {
    fn detach(&self, key: SubscriberKey) -> bool;
    fn is_attached(&self, key: SubscriberKey) -> bool;
}

impl<T> Detach for RefCell<ChannelState<T>> {
    fn detach(&self, key: SubscriberKey) -> bool {
        let mut state = self.borrow_mut();
        if state.subscribers.remove(key).is_some() {
            state.order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    fn is_attached(&self, key: SubscriberKey) -> bool {
        self.borrow().subscribers.contains_key(key)
    }
}

/// Handle returned by [`Channel::subscribe`]
///
/// Dropping the handle does not detach the subscriber; call
/// [`Subscription::unsubscribe`] for that. Unsubscribing is idempotent.
pub struct Subscription {
    key: SubscriberKey,
    channel: Weak<dyn Detach>,
}

impl Subscription {
    /// Stop future deliveries to this subscriber
    ///
    /// Returns `true` when this call detached the subscriber and `false` when
    /// it was already detached or the channel no longer exists.
    pub fn unsubscribe(&self) -> bool {
        match self.channel.upgrade() {
            Some(channel) => channel.detach(self.key),
            None => false,
        }
    }

    /// Whether the subscriber still receives values
    pub fn is_active(&self) -> bool {
        self.channel
            .upgrade()
            .is_some_and(|channel| channel.is_attached(self.key))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Broadcast channel carrying the latest value of type `T`
pub struct Channel<T> {
    state: Rc<RefCell<ChannelState<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> Channel<T> {
    /// Create a channel that replays its current value to new subscribers
    pub fn new(name: impl Into<String>, initial: T) -> Self {
        Self::with_replay(name, initial, true)
    }

    /// Create a channel that only delivers values published after subscribing
    pub fn without_replay(name: impl Into<String>, initial: T) -> Self {
        Self::with_replay(name, initial, false)
    }

    fn with_replay(name: impl Into<String>, initial: T, replay: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(ChannelState {
                name: name.into(),
                current: initial,
                replay,
                subscribers: SlotMap::with_key(),
                order: Vec::new(),
                delivering: false,
                queued: VecDeque::new(),
            })),
        }
    }

    /// Channel name
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Current value
    pub fn current(&self) -> T {
        self.state.borrow().current.clone()
    }

    /// Number of attached subscribers
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().order.len()
    }

    /// Store `value` as the current value and notify every subscriber in order
    ///
    /// Subscribers are snapshotted before each round starts. A subscriber that
    /// is detached while the round is in progress is skipped if it has not
    /// been reached yet.
    ///
    /// Publishing from inside a callback updates the current value at once but
    /// delivers the nested value only after the running round has finished,
    /// so every subscriber sees values in publish order and ends on the
    /// current one.
    pub fn publish(&self, value: T) {
        {
            let mut state = self.state.borrow_mut();
            state.current = value.clone();
            if state.delivering {
                log::trace!("Channel '{}' queued nested publish {:?}", state.name, value);
                state.queued.push_back(value);
                return;
            }
            state.delivering = true;
        }

        let mut value = value;
        loop {
            self.deliver(&value);
            let mut state = self.state.borrow_mut();
            match state.queued.pop_front() {
                Some(next) => value = next,
                None => {
                    state.delivering = false;
                    break;
                }
            }
        }
    }

    fn deliver(&self, value: &T) {
        let targets: Vec<(SubscriberKey, Callback<T>)> = {
            let state = self.state.borrow();
            log::trace!("Channel '{}' delivering {:?}", state.name, value);
            state
                .order
                .iter()
                .filter_map(|key| state.subscribers.get(*key).map(|cb| (*key, Rc::clone(cb))))
                .collect()
        };

        for (key, callback) in targets {
            if !self.state.is_attached(key) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(value),
                Err(_) => log::warn!(
                    "Skipping re-entrant delivery of {:?} on channel '{}'",
                    value,
                    self.state.borrow().name
                ),
            }
        }
    }

    /// Attach `callback`
    ///
    /// On a replaying channel the current value is delivered to `callback`
    /// before this returns.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(RefCell::new(callback));

        let (key, replay_value) = {
            let mut state = self.state.borrow_mut();
            let key = state.subscribers.insert(Rc::clone(&callback));
            state.order.push(key);
            log::trace!("Channel '{}' gained subscriber {:?}", state.name, key);
            let replay_value = state.replay.then(|| state.current.clone());
            (key, replay_value)
        };

        if let Some(value) = replay_value {
            (&mut *callback.borrow_mut())(&value);
        }

        let detach: Rc<dyn Detach> = self.state.clone();
        Subscription {
            key,
            channel: Rc::downgrade(&detach),
        }
    }

    /// Detach a subscriber; a no-op for handles that are already detached
    ///
    /// Handles from other channels are ignored.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        if !self.owns(subscription) {
            return false;
        }
        subscription.unsubscribe()
    }

    fn owns(&self, subscription: &Subscription) -> bool {
        subscription.channel.upgrade().is_some_and(|channel| {
            std::ptr::addr_eq(Rc::as_ptr(&channel), Rc::as_ptr(&self.state))
        })
    }

    /// Weak handle that does not keep the channel alive
    pub fn downgrade(&self) -> WeakChannel<T> {
        WeakChannel {
            state: Rc::downgrade(&self.state),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Channel")
            .field("name", &state.name)
            .field("current", &state.current)
            .field("subscribers", &state.order.len())
            .finish()
    }
}

/// Non-owning channel handle
pub struct WeakChannel<T> {
    state: Weak<RefCell<ChannelState<T>>>,
}

impl<T> Clone for WeakChannel<T> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
        }
    }
}

impl<T> WeakChannel<T> {
    /// Recover the channel if it is still alive
    pub fn upgrade(&self) -> Option<Channel<T>> {
        self.state.upgrade().map(|state| Channel { state })
    }
}
