//! Debug control panel
//!
//! A panel is a list of labelled controls. Each control owns one
//! [`PropertyProxy`], so the panel works on any target without knowing its
//! type. The host feeds user input in through [`ControlPanel::set_value`].

use crate::properties::{PropertyError, PropertyKind, PropertyProxy, PropertyValue};

/// Widget a control is shown as
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlWidget {
    /// Numeric slider; input is clamped to `[min, max]`
    Slider {
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },
    /// Color picker working in packed `0xRRGGBB`
    Color,
}

impl ControlWidget {
    fn accepts(&self) -> PropertyKind {
        match self {
            Self::Slider { .. } => PropertyKind::Scalar,
            Self::Color => PropertyKind::Color,
        }
    }
}

/// One labelled control bound to a property
#[derive(Debug)]
pub struct Control {
    label: String,
    widget: ControlWidget,
    proxy: PropertyProxy,
}

impl Control {
    /// Rename the control; the label defaults to the property name
    pub fn name(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    /// Label shown next to the widget
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Widget kind
    pub fn widget(&self) -> ControlWidget {
        self.widget
    }

    /// Current value of the bound property
    pub fn value(&self) -> Result<PropertyValue, PropertyError> {
        self.proxy.get()
    }

    /// Apply user input and return the value that was written
    pub fn set_value(&self, value: PropertyValue) -> Result<PropertyValue, PropertyError> {
        let value = match (self.widget, value) {
            (ControlWidget::Slider { min, max }, PropertyValue::Scalar(v)) => PropertyValue::Scalar(v.clamp(min, max)),
            (_, value) => value,
        };
        self.proxy.set(value)?;
        Ok(value)
    }
}

/// Collection of controls for one demo
#[derive(Debug, Default)]
pub struct ControlPanel {
    title: String,
    controls: Vec<Control>,
}

impl ControlPanel {
    /// Create an empty panel
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            controls: Vec::new(),
        }
    }

    /// Panel title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Add a slider over a scalar property
    ///
    /// Fails with [`PropertyError::KindMismatch`] when the proxy is not
    /// scalar and with [`PropertyError::InvalidRange`] when either bound is
    /// not finite. Reversed bounds are swapped.
    pub fn add(&mut self, proxy: PropertyProxy, min: f32, max: f32) -> Result<&mut Control, PropertyError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PropertyError::InvalidRange {
                name: proxy.name().to_string(),
                min,
                max,
            });
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.push(proxy, ControlWidget::Slider { min, max })
    }

    /// Add a color picker over a color property
    pub fn add_color(&mut self, proxy: PropertyProxy) -> Result<&mut Control, PropertyError> {
        self.push(proxy, ControlWidget::Color)
    }

    fn push(&mut self, proxy: PropertyProxy, widget: ControlWidget) -> Result<&mut Control, PropertyError> {
        if proxy.kind() != widget.accepts() {
            return Err(PropertyError::KindMismatch {
                name: proxy.name().to_string(),
                expected: widget.accepts(),
                found: proxy.kind(),
            });
        }

        log::debug!("Panel '{}' gained control '{}'", self.title, proxy.name());
        self.controls.push(Control {
            label: proxy.name().to_string(),
            widget,
            proxy,
        });
        let index = self.controls.len() - 1;
        Ok(&mut self.controls[index])
    }

    /// Controls in insertion order
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Number of controls
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the panel has no controls
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// First control with `label`
    pub fn control(&self, label: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.label == label)
    }

    /// Simulate user input on the first control labelled `label`
    pub fn set_value(&self, label: &str, value: PropertyValue) -> Result<PropertyValue, PropertyError> {
        self.control(label)
            .ok_or_else(|| PropertyError::UnknownControl(label.to_string()))?
            .set_value(value)
    }

    /// Current value of every control whose target is still alive
    pub fn values(&self) -> Vec<(String, PropertyValue)> {
        self.controls
            .iter()
            .filter_map(|control| match control.value() {
                Ok(value) => Some((control.label.clone(), value)),
                Err(e) => {
                    log::debug!("Skipping control '{}': {}", control.label, e);
                    None
                }
            })
            .collect()
    }

    /// Drop every control and its binding
    pub fn destroy(&mut self) {
        if !self.controls.is_empty() {
            log::debug!("Destroying panel '{}' with {} control(s)", self.title, self.controls.len());
        }
        self.controls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Material;
    use crate::scene::Light;

    #[test]
    fn test_slider_clamps_input() {
        let material = Material::standard().into_ref();
        let mut panel = ControlPanel::new("colour");
        panel
            .add(PropertyProxy::new(&material, "roughness").expect("roughness"), 0.0, 1.0)
            .expect("scalar slider");

        assert_eq!(panel.set_value("roughness", PropertyValue::Scalar(3.0)), Ok(PropertyValue::Scalar(1.0)));
        assert_eq!(material.borrow().roughness, 1.0);
        panel.set_value("roughness", PropertyValue::Scalar(0.42)).expect("in range");
        assert_eq!(material.borrow().roughness, 0.42);
    }

    #[test]
    fn test_color_control_is_renamed() {
        let light = Light::ambient(0xffffff, 1.0).into_ref();
        let mut panel = ControlPanel::new("skybox");
        panel
            .add_color(PropertyProxy::new(&light, "color").expect("color"))
            .expect("color picker")
            .name("ambient");

        let picked = PropertyValue::parse_color("#336699").expect("valid");
        panel.set_value("ambient", picked).expect("set color");
        assert_eq!(light.borrow().color.to_hex(), 0x336699);
        assert!(matches!(
            panel.set_value("color", picked),
            Err(PropertyError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_widget_must_match_property_kind() {
        let material = Material::basic().into_ref();
        let mut panel = ControlPanel::new("mismatch");
        let proxy = PropertyProxy::new(&material, "color").expect("color");
        assert!(matches!(panel.add(proxy, 0.0, 1.0), Err(PropertyError::KindMismatch { .. })));
        assert!(panel.is_empty());
    }

    #[test]
    fn test_slider_rejects_non_finite_bounds() {
        let material = Material::standard().into_ref();
        let mut panel = ControlPanel::new("bounds");
        for (min, max) in [(f32::NAN, 1.0), (0.0, f32::NAN), (f32::NEG_INFINITY, 1.0), (0.0, f32::INFINITY)] {
            let proxy = PropertyProxy::new(&material, "roughness").expect("roughness");
            assert!(matches!(
                panel.add(proxy, min, max),
                Err(PropertyError::InvalidRange { .. })
            ));
        }
        assert!(panel.is_empty());
        assert!(matches!(
            panel.set_value("roughness", PropertyValue::Scalar(0.5)),
            Err(PropertyError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let material = Material::standard().into_ref();
        let mut panel = ControlPanel::new("bounds");
        panel
            .add(PropertyProxy::new(&material, "metalness").expect("metalness"), 1.0, 0.0)
            .expect("slider");

        assert_eq!(panel.controls()[0].widget(), ControlWidget::Slider { min: 0.0, max: 1.0 });
        assert_eq!(panel.set_value("metalness", PropertyValue::Scalar(-2.0)), Ok(PropertyValue::Scalar(0.0)));
    }

    #[test]
    fn test_values_skip_dropped_targets() {
        let kept = Material::standard().into_ref();
        let dropped = Material::standard().into_ref();
        let mut panel = ControlPanel::new("values");
        panel.add(PropertyProxy::new(&kept, "metalness").expect("metalness"), 0.0, 1.0).expect("slider");
        panel.add(PropertyProxy::new(&dropped, "metalness").expect("metalness"), 0.0, 1.0).expect("slider");
        drop(dropped);

        assert_eq!(panel.values(), vec![("metalness".to_string(), PropertyValue::Scalar(0.0))]);

        panel.destroy();
        assert!(panel.is_empty());
    }
}
