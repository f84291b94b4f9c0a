/*! Synthetic native window records. */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::platform::{PropertyKey, WindowProperties};
use crate::types::{DecodeError, Rect};

/// A raw property value, typed loosely the way native dictionaries are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
  Integer(i64),
  Float(f64),
  Text(String),
  Bounds(Rect),
}

impl From<i64> for PropertyValue {
  fn from(value: i64) -> Self {
    Self::Integer(value)
  }
}

impl From<i32> for PropertyValue {
  fn from(value: i32) -> Self {
    Self::Integer(i64::from(value))
  }
}

impl From<u32> for PropertyValue {
  fn from(value: u32) -> Self {
    Self::Integer(i64::from(value))
  }
}

impl From<f64> for PropertyValue {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl From<&str> for PropertyValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_owned())
  }
}

impl From<String> for PropertyValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<Rect> for PropertyValue {
  fn from(value: Rect) -> Self {
    Self::Bounds(value)
  }
}

const fn default_on_screen() -> bool {
  true
}

/// One synthetic window as a window server would list it.
///
/// Properties may be missing or carry the wrong type on purpose; decoding
/// treats them exactly like native records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeRecord {
  #[serde(default)]
  pub properties: BTreeMap<PropertyKey, PropertyValue>,
  #[serde(default = "default_on_screen")]
  pub on_screen: bool,
  #[serde(default)]
  pub desktop_element: bool,
}

impl Default for NativeRecord {
  fn default() -> Self {
    Self::new()
  }
}

impl NativeRecord {
  /// An on-screen record with no properties.
  pub const fn new() -> Self {
    Self {
      properties: BTreeMap::new(),
      on_screen: true,
      desktop_element: false,
    }
  }

  /// An on-screen record with a window number and layer.
  pub fn window(number: u32, layer: i32) -> Self {
    Self::new()
      .with(PropertyKey::WindowNumber, number)
      .with(PropertyKey::Layer, layer)
  }

  /// Set a property.
  #[must_use]
  pub fn with(mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
    self.properties.insert(key, value.into());
    self
  }

  /// Drop a property.
  #[must_use]
  pub fn without(mut self, key: PropertyKey) -> Self {
    self.properties.remove(&key);
    self
  }

  #[must_use]
  pub fn named(self, name: &str) -> Self {
    self.with(PropertyKey::Name, name)
  }

  #[must_use]
  pub fn owned_by(self, owner: &str) -> Self {
    self.with(PropertyKey::OwnerName, owner)
  }

  #[must_use]
  pub fn bounded(self, rect: Rect) -> Self {
    self.with(PropertyKey::Bounds, rect)
  }

  #[must_use]
  pub const fn off_screen(mut self) -> Self {
    self.on_screen = false;
    self
  }

  #[must_use]
  pub const fn desktop_element(mut self) -> Self {
    self.desktop_element = true;
    self
  }

  fn get(&self, key: PropertyKey) -> Result<&PropertyValue, DecodeError> {
    self.properties.get(&key).ok_or(DecodeError::Missing(key))
  }
}

impl WindowProperties for NativeRecord {
  #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
  fn integer(&self, key: PropertyKey) -> Result<i64, DecodeError> {
    match self.get(key)? {
      PropertyValue::Integer(value) => Ok(*value),
      // Whole floats convert, like a lossless CFNumberGetValue.
      PropertyValue::Float(value) if value.fract() == 0.0 && value.abs() < 9.0e18 => {
        Ok(*value as i64)
      }
      PropertyValue::Float(_) | PropertyValue::Text(_) | PropertyValue::Bounds(_) => {
        Err(DecodeError::TypeMismatch {
          key,
          expected: "integer",
        })
      }
    }
  }

  fn text(&self, key: PropertyKey) -> Result<String, DecodeError> {
    match self.get(key)? {
      PropertyValue::Text(value) => Ok(value.clone()),
      PropertyValue::Integer(_) | PropertyValue::Float(_) | PropertyValue::Bounds(_) => {
        Err(DecodeError::TypeMismatch {
          key,
          expected: "string",
        })
      }
    }
  }

  fn bounds(&self, key: PropertyKey) -> Result<Rect, DecodeError> {
    match self.get(key)? {
      PropertyValue::Bounds(rect) => Ok(*rect),
      PropertyValue::Integer(_) | PropertyValue::Float(_) | PropertyValue::Text(_) => {
        Err(DecodeError::TypeMismatch {
          key,
          expected: "bounds record",
        })
      }
    }
  }
}
