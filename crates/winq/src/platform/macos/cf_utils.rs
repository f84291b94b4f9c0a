/*! Core Foundation utilities for macOS.

Type-checked reads from the `CFDictionary` describing one window. A value of the
wrong CF type is reported as a mismatch rather than reinterpreted.
*/

#![allow(unsafe_code)]

use objc2_core_foundation::{
  CFDictionary, CFNumber, CFNumberType, CFRetained, CFString, CFType, CGRect,
};
use objc2_core_graphics::CGRectMakeWithDictionaryRepresentation;
use std::ffi::c_void;

use crate::platform::PropertyKey;
use crate::types::DecodeError;

/// Window-list dictionary key for a property.
pub(super) const fn cg_key(key: PropertyKey) -> &'static str {
  match key {
    PropertyKey::WindowNumber => "kCGWindowNumber",
    PropertyKey::Layer => "kCGWindowLayer",
    PropertyKey::Bounds => "kCGWindowBounds",
    PropertyKey::Name => "kCGWindowName",
    PropertyKey::OwnerName => "kCGWindowOwnerName",
  }
}

/// Get a value from a `CFDictionary` by property key.
fn get_cf_value(dict: &CFDictionary, key: PropertyKey) -> Result<&CFType, DecodeError> {
  let cf_key = CFString::from_str(cg_key(key));
  let key_ref = cf_key.as_ref() as *const CFString;
  let value = unsafe { CFDictionary::value(dict, key_ref.cast()) };
  unsafe { value.cast::<CFType>().as_ref() }.ok_or(DecodeError::Missing(key))
}

/// Extract a signed 64-bit integer. Lossy conversions count as mismatches.
pub(super) fn get_cf_integer(dict: &CFDictionary, key: PropertyKey) -> Result<i64, DecodeError> {
  let number = get_cf_value(dict, key)?
    .downcast_ref::<CFNumber>()
    .ok_or(DecodeError::TypeMismatch {
      key,
      expected: "number",
    })?;

  let mut value: i64 = 0;
  let exact = unsafe {
    CFNumber::value(
      number,
      CFNumberType::SInt64Type,
      (&raw mut value).cast::<c_void>(),
    )
  };

  if exact {
    Ok(value)
  } else {
    Err(DecodeError::TypeMismatch {
      key,
      expected: "integer",
    })
  }
}

/// Extract a string.
pub(super) fn get_cf_string(dict: &CFDictionary, key: PropertyKey) -> Result<String, DecodeError> {
  get_cf_value(dict, key)?
    .downcast_ref::<CFString>()
    .map(ToString::to_string)
    .ok_or(DecodeError::TypeMismatch {
      key,
      expected: "string",
    })
}

/// Extract a nested bounds dictionary as a `CGRect`.
pub(super) fn get_cf_bounds(dict: &CFDictionary, key: PropertyKey) -> Result<CGRect, DecodeError> {
  let mismatch = DecodeError::TypeMismatch {
    key,
    expected: "bounds record",
  };
  let Some(bounds) = get_cf_value(dict, key)?.downcast_ref::<CFDictionary>() else {
    return Err(mismatch);
  };

  let mut cg_rect = CGRect::default();
  if unsafe { CGRectMakeWithDictionaryRepresentation(Some(bounds), &raw mut cg_rect) } {
    Ok(cg_rect)
  } else {
    Err(mismatch)
  }
}

/// Retain a `CFDictionary` from a raw pointer.
pub(super) fn retain_cf_dictionary(ptr: *const CFDictionary) -> Option<CFRetained<CFDictionary>> {
  if ptr.is_null() {
    None
  } else {
    Some(unsafe { CFRetained::retain(std::ptr::NonNull::from(&*ptr)) })
  }
}
