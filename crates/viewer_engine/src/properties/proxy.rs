//! Generic read/write view over one named property

use super::{PropertyError, PropertyKind, PropertyTarget, PropertyValue};
use crate::events::{Channel, WeakChannel};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

enum ProxyTarget {
    Object(Weak<RefCell<dyn PropertyTarget>>),
    Channel(WeakChannel<f32>),
}

/// Uniform `get`/`set` accessor for a named property of some target
///
/// The proxy only holds a weak reference and the property name. It never
/// keeps the target alive; once the target is gone every access fails with
/// [`PropertyError::TargetDropped`].
pub struct PropertyProxy {
    target: ProxyTarget,
    name: String,
    kind: PropertyKind,
}

impl PropertyProxy {
    /// Bind to the property `name` of `target`
    ///
    /// Fails with [`PropertyError::UnknownProperty`] when the target does not
    /// expose `name`.
    pub fn new<T: PropertyTarget + 'static>(target: &Rc<RefCell<T>>, name: &str) -> Result<Self, PropertyError> {
        let kind = {
            let borrowed = target.borrow();
            borrowed.property_kind(name).ok_or_else(|| PropertyError::UnknownProperty {
                target: borrowed.type_name().to_string(),
                name: name.to_string(),
            })?
        };

        let shared: Rc<RefCell<dyn PropertyTarget>> = target.clone();
        Ok(Self {
            target: ProxyTarget::Object(Rc::downgrade(&shared)),
            name: name.to_string(),
            kind,
        })
    }

    /// Bind to the value of a scalar broadcast channel
    ///
    /// Reading returns the channel's current value; writing publishes.
    pub fn for_channel(channel: &Channel<f32>) -> Self {
        Self {
            target: ProxyTarget::Channel(channel.downgrade()),
            name: channel.name(),
            kind: PropertyKind::Scalar,
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the proxied property
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Whether the target is still alive
    pub fn is_bound(&self) -> bool {
        match &self.target {
            ProxyTarget::Object(target) => target.strong_count() > 0,
            ProxyTarget::Channel(channel) => channel.upgrade().is_some(),
        }
    }

    /// Read the current value in widget form
    pub fn get(&self) -> Result<PropertyValue, PropertyError> {
        match &self.target {
            ProxyTarget::Object(target) => {
                let target = target.upgrade().ok_or_else(|| self.dropped())?;
                let borrowed = target.borrow();
                let raw = borrowed.read_attribute(&self.name).ok_or_else(|| PropertyError::UnknownProperty {
                    target: borrowed.type_name().to_string(),
                    name: self.name.clone(),
                })?;
                self.kind.encode(&self.name, raw)
            }
            ProxyTarget::Channel(channel) => {
                let channel = channel.upgrade().ok_or_else(|| self.dropped())?;
                Ok(PropertyValue::Scalar(channel.current()))
            }
        }
    }

    /// Write a value in widget form through to the target
    pub fn set(&self, value: PropertyValue) -> Result<(), PropertyError> {
        let raw = self.kind.decode(&self.name, value)?;
        match &self.target {
            ProxyTarget::Object(target) => {
                let target = target.upgrade().ok_or_else(|| self.dropped())?;
                log::trace!("Setting property '{}' to {:?}", self.name, value);
                let result = target.borrow_mut().write_attribute(&self.name, raw);
                result
            }
            ProxyTarget::Channel(channel) => {
                let channel = channel.upgrade().ok_or_else(|| self.dropped())?;
                if let PropertyValue::Scalar(scalar) = value {
                    channel.publish(scalar);
                }
                Ok(())
            }
        }
    }

    fn dropped(&self) -> PropertyError {
        PropertyError::TargetDropped(self.name.clone())
    }
}

impl fmt::Debug for PropertyProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            ProxyTarget::Object(_) => "object",
            ProxyTarget::Channel(_) => "channel",
        };
        f.debug_struct("PropertyProxy")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("target", &target)
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::color::Color;
    use crate::properties::AttributeValue;

    #[derive(Default)]
    struct Lamp {
        tint: Color,
        brightness: f32,
    }

    impl PropertyTarget for Lamp {
        fn type_name(&self) -> &'static str {
            "Lamp"
        }

        fn property_names(&self) -> Vec<&'static str> {
            vec!["tint", "brightness"]
        }

        fn read_attribute(&self, name: &str) -> Option<AttributeValue> {
            match name {
                "tint" => Some(AttributeValue::Color(self.tint)),
                "brightness" => Some(AttributeValue::Scalar(self.brightness)),
                _ => None,
            }
        }

        fn write_attribute(&mut self, name: &str, value: AttributeValue) -> Result<(), PropertyError> {
            match (name, value) {
                ("tint", AttributeValue::Color(color)) => self.tint = color,
                ("brightness", AttributeValue::Scalar(value)) => self.brightness = value,
                _ => {
                    return Err(PropertyError::UnknownProperty {
                        target: "Lamp".to_string(),
                        name: name.to_string(),
                    })
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_scalar_round_trip_is_exact() {
        let lamp = Rc::new(RefCell::new(Lamp::default()));
        let proxy = PropertyProxy::new(&lamp, "brightness").expect("brightness exists");

        proxy.set(PropertyValue::Scalar(0.42)).expect("write scalar");
        assert_eq!(proxy.get(), Ok(PropertyValue::Scalar(0.42)));
        assert_eq!(lamp.borrow().brightness, 0.42);
    }

    #[test]
    fn test_color_round_trip_is_canonical() {
        let lamp = Rc::new(RefCell::new(Lamp::default()));
        let proxy = PropertyProxy::new(&lamp, "tint").expect("tint exists");
        assert_eq!(proxy.kind(), PropertyKind::Color);

        let picked = PropertyValue::parse_color("#3a3030").expect("valid color");
        proxy.set(picked).expect("write color");

        assert_eq!(proxy.get(), Ok(PropertyValue::Color(0x3a3030)));
        assert!(lamp.borrow().tint.canonical_eq(&Color::from_hex(0x3a3030)));
    }

    #[test]
    fn test_unknown_property_fails_at_construction() {
        let lamp = Rc::new(RefCell::new(Lamp::default()));
        let error = PropertyProxy::new(&lamp, "wattage").expect_err("wattage is not a property");
        assert_eq!(
            error,
            PropertyError::UnknownProperty {
                target: "Lamp".to_string(),
                name: "wattage".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_kind_is_rejected_without_writing() {
        let lamp = Rc::new(RefCell::new(Lamp::default()));
        let proxy = PropertyProxy::new(&lamp, "brightness").expect("brightness exists");

        assert!(matches!(
            proxy.set(PropertyValue::Color(0xffffff)),
            Err(PropertyError::KindMismatch { .. })
        ));
        assert_eq!(lamp.borrow().brightness, 0.0);
    }

    #[test]
    fn test_proxy_does_not_own_target() {
        let lamp = Rc::new(RefCell::new(Lamp::default()));
        let proxy = PropertyProxy::new(&lamp, "brightness").expect("brightness exists");
        assert_eq!(Rc::strong_count(&lamp), 1);
        assert!(proxy.is_bound());

        drop(lamp);
        assert!(!proxy.is_bound());
        assert_eq!(proxy.get(), Err(PropertyError::TargetDropped("brightness".to_string())));
        assert!(proxy.set(PropertyValue::Scalar(1.0)).is_err());
    }

    #[test]
    fn test_channel_proxy_publishes() {
        let channel = Channel::new("roughness", 0.1_f32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = channel.subscribe(move |value: &f32| sink.borrow_mut().push(*value));

        let proxy = PropertyProxy::for_channel(&channel);
        assert_eq!(proxy.name(), "roughness");
        assert_eq!(proxy.get(), Ok(PropertyValue::Scalar(0.1)));

        proxy.set(PropertyValue::Scalar(0.6)).expect("publish through proxy");
        assert_eq!(channel.current(), 0.6);
        assert_eq!(*seen.borrow(), vec![0.1, 0.6]);
    }
}
