//! Field-keyed records on top of the primitives.
//!
//! Every wire record is a flat sequence of `(key, payload)` pairs where
//! `key = field_number << 3 | kind`. Fields are either optional (`Option<T>`,
//! written only when set) or repeated (`Vec<T>`, one key per element).
//! Nested records are length-delimited, so a record never needs an end marker:
//! it simply ends where its enclosing slice ends.
//!
//! The concrete records are declared with [`wire_messages!`] in
//! [`crate::wire`].

use crate::codec::primitives::{Reader, WireKind, Writer};
use crate::error::DecodeError;
use crate::limits::{MAX_MESSAGE_LEN, MAX_STRING_LEN};

/// A complete wire record.
pub trait Message: Default {
    /// Writes every set field of this record.
    fn encode_fields(&self, w: &mut Writer);

    /// Decodes the payload of field `number` into `self`.
    fn merge_field(
        &mut self,
        number: u32,
        kind: WireKind,
        r: &mut Reader<'_>,
    ) -> Result<(), DecodeError>;

    /// Encodes this record into a fresh buffer.
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut w = Writer::new();
        self.encode_fields(&mut w);
        w.into_bytes()
    }

    /// Decodes a record that spans all of `bytes`.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(bytes);
        Self::decode_from(&mut r)
    }

    /// Decodes a record from the rest of the reader.
    fn decode_from(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut message = Self::default();
        while !r.is_empty() {
            let (number, kind) = r.read_key()?;
            message.merge_field(number, kind, r)?;
        }
        Ok(message)
    }
}

/// A single value that can sit in a field.
pub trait WireValue: Sized {
    const KIND: WireKind;

    fn write_value(&self, w: &mut Writer);

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError>;
}

/// A field slot: optional or repeated.
pub trait Field {
    fn encode_field(&self, number: u32, w: &mut Writer);

    fn merge_field(
        &mut self,
        kind: WireKind,
        r: &mut Reader<'_>,
        field: &'static str,
    ) -> Result<(), DecodeError>;
}

fn check_kind<T: WireValue>(kind: WireKind, field: &'static str) -> Result<(), DecodeError> {
    if kind != T::KIND {
        return Err(DecodeError::WireKindMismatch {
            field,
            expected: T::KIND as u8,
            found: kind as u8,
        });
    }
    Ok(())
}

impl<T: WireValue> Field for Option<T> {
    fn encode_field(&self, number: u32, w: &mut Writer) {
        if let Some(value) = self {
            w.write_key(number, T::KIND);
            value.write_value(w);
        }
    }

    fn merge_field(
        &mut self,
        kind: WireKind,
        r: &mut Reader<'_>,
        field: &'static str,
    ) -> Result<(), DecodeError> {
        check_kind::<T>(kind, field)?;
        *self = Some(T::read_value(r, field)?);
        Ok(())
    }
}

impl<T: WireValue> Field for Vec<T> {
    fn encode_field(&self, number: u32, w: &mut Writer) {
        for value in self {
            w.write_key(number, T::KIND);
            value.write_value(w);
        }
    }

    fn merge_field(
        &mut self,
        kind: WireKind,
        r: &mut Reader<'_>,
        field: &'static str,
    ) -> Result<(), DecodeError> {
        check_kind::<T>(kind, field)?;
        self.push(T::read_value(r, field)?);
        Ok(())
    }
}

/// Skips a field number the record does not declare.
pub fn skip_unknown(
    record: &'static str,
    number: u32,
    kind: WireKind,
    r: &mut Reader<'_>,
) -> Result<(), DecodeError> {
    tracing::trace!(record, number, ?kind, "skipping unknown wire field");
    r.skip_field(kind)
}

/// Writes a nested record as a length-delimited value.
pub fn write_nested<M: Message>(message: &M, w: &mut Writer) {
    let bytes = message.encode_to_vec();
    w.write_bytes_prefixed(&bytes);
}

/// Reads a length-delimited nested record.
pub fn read_nested<M: Message>(r: &mut Reader<'_>, field: &'static str) -> Result<M, DecodeError> {
    let bytes = r.read_len_prefixed(MAX_MESSAGE_LEN, field)?;
    M::decode(bytes)
}

impl WireValue for String {
    const KIND: WireKind = WireKind::Len;

    fn write_value(&self, w: &mut Writer) {
        w.write_string(self);
    }

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError> {
        r.read_string(MAX_STRING_LEN, field)
    }
}

impl WireValue for u32 {
    const KIND: WireKind = WireKind::Varint;

    fn write_value(&self, w: &mut Writer) {
        w.write_varint(*self as u64);
    }

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError> {
        r.read_u32(field)
    }
}

impl WireValue for i32 {
    const KIND: WireKind = WireKind::Varint;

    fn write_value(&self, w: &mut Writer) {
        w.write_signed_varint(*self as i64);
    }

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError> {
        let value = r.read_signed_varint(field)?;
        i32::try_from(value).map_err(|_| DecodeError::IntegerOutOfRange {
            field,
            value: value.unsigned_abs(),
            target: "i32",
        })
    }
}

impl WireValue for i64 {
    const KIND: WireKind = WireKind::Varint;

    fn write_value(&self, w: &mut Writer) {
        w.write_signed_varint(*self);
    }

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError> {
        r.read_signed_varint(field)
    }
}

impl WireValue for bool {
    const KIND: WireKind = WireKind::Varint;

    fn write_value(&self, w: &mut Writer) {
        w.write_varint(*self as u64);
    }

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError> {
        match r.read_varint(field)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { field, value }),
        }
    }
}

impl WireValue for f64 {
    const KIND: WireKind = WireKind::Fixed64;

    fn write_value(&self, w: &mut Writer) {
        w.write_f64(*self);
    }

    fn read_value(r: &mut Reader<'_>, field: &'static str) -> Result<Self, DecodeError> {
        r.read_f64(field)
    }
}

/// Declares wire records from a field table.
///
/// Each field is `name: Option<T> = N,` or `name: Vec<T> = N,` where `T` is a
/// [`WireValue`] and `N` is the field number. The macro derives the struct and
/// implements [`Message`] and [`WireValue`] (as a nested record) for it.
macro_rules! wire_messages {
    ($(
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $number:literal,
            )*
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::codec::message::Message for $name {
            fn encode_fields(&self, w: &mut $crate::codec::primitives::Writer) {
                $( $crate::codec::message::Field::encode_field(&self.$field, $number, w); )*
            }

            fn merge_field(
                &mut self,
                number: u32,
                kind: $crate::codec::primitives::WireKind,
                r: &mut $crate::codec::primitives::Reader<'_>,
            ) -> Result<(), $crate::error::DecodeError> {
                match number {
                    $(
                        $number => $crate::codec::message::Field::merge_field(
                            &mut self.$field,
                            kind,
                            r,
                            concat!(stringify!($name), ".", stringify!($field)),
                        ),
                    )*
                    _ => $crate::codec::message::skip_unknown(stringify!($name), number, kind, r),
                }
            }
        }

        impl $crate::codec::message::WireValue for $name {
            const KIND: $crate::codec::primitives::WireKind =
                $crate::codec::primitives::WireKind::Len;

            fn write_value(&self, w: &mut $crate::codec::primitives::Writer) {
                $crate::codec::message::write_nested(self, w);
            }

            fn read_value(
                r: &mut $crate::codec::primitives::Reader<'_>,
                field: &'static str,
            ) -> Result<Self, $crate::error::DecodeError> {
                $crate::codec::message::read_nested(r, field)
            }
        }
    )*};
}

pub(crate) use wire_messages;
