//! Open-ended annotation values and the typed-key bookkeeping shared by
//! tokens, sentences and documents.

use std::collections::BTreeMap;

/// A value stored under an extension key.
///
/// Extension keys are annotations an upstream component attached that this
/// crate has no wire slot for. They survive in memory but are never written.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<AnnotationValue>),
}

impl From<&str> for AnnotationValue {
    fn from(v: &str) -> Self {
        AnnotationValue::Text(v.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(v: String) -> Self {
        AnnotationValue::Text(v)
    }
}

impl From<i64> for AnnotationValue {
    fn from(v: i64) -> Self {
        AnnotationValue::Int(v)
    }
}

impl From<f64> for AnnotationValue {
    fn from(v: f64) -> Self {
        AnnotationValue::Float(v)
    }
}

impl From<bool> for AnnotationValue {
    fn from(v: bool) -> Self {
        AnnotationValue::Bool(v)
    }
}

/// Extension annotations keyed by name.
pub type Extensions = BTreeMap<String, AnnotationValue>;

/// A value whose annotations are a mix of typed fields and extensions.
pub trait Annotated {
    /// Entity kind used in error messages and logs ("token", "sentence", ...).
    const ENTITY: &'static str;

    /// Keys of the typed fields that are currently set.
    fn set_field_keys(&self) -> Vec<&'static str>;

    /// Extension annotations.
    fn extensions(&self) -> &Extensions;
}

/// A half-open range `[begin, end)` of token or character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub begin: u32,
    pub end: u32,
}

impl Span {
    pub fn new(begin: u32, end: u32) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

/// Implements the typed-key bookkeeping for a struct whose optional fields
/// each map to one annotation key and which has an `extensions` field.
macro_rules! annotation_keys {
    ($ty:ident, $entity:literal { $($field:ident => $key:literal,)* }) => {
        impl $ty {
            /// Annotation keys that have a typed field, in declaration order.
            pub const ANNOTATION_KEYS: &'static [&'static str] = &[$($key),*];

            /// Returns every populated annotation key, typed fields first and
            /// extension keys after.
            pub fn populated_keys(&self) -> Vec<&str> {
                let mut keys: Vec<&str> = $crate::model::Annotated::set_field_keys(self);
                keys.extend(self.extensions.keys().map(String::as_str));
                keys
            }

            /// Unsets the annotation stored under `key`, returning whether
            /// anything was set. Typed keys win over extensions of the same name.
            pub fn clear_annotation(&mut self, key: &str) -> bool {
                match key {
                    $( $key => self.$field.take().is_some() | self.extensions.remove(key).is_some(), )*
                    _ => self.extensions.remove(key).is_some(),
                }
            }
        }

        impl $crate::model::Annotated for $ty {
            const ENTITY: &'static str = $entity;

            fn set_field_keys(&self) -> Vec<&'static str> {
                let mut keys = Vec::new();
                $( if self.$field.is_some() { keys.push($key); } )*
                keys
            }

            fn extensions(&self) -> &$crate::model::Extensions {
                &self.extensions
            }
        }
    };
}

pub(crate) use annotation_keys;
