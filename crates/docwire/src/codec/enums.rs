//! Wire codes for closed vocabularies.
//!
//! Codes start at 1; 0 is the placeholder a zeroed field would carry and is
//! never a valid value. Encoding is total. Decoding an unmapped code is
//! [`DecodeError::UnknownEnumCode`], except for quantifiers, whose table is
//! keyed by name and best-effort.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::error::DecodeError;
use crate::model::{Language, NaturalLogicRelation, Quantifier, SentimentClass};

/// An enum with a fixed wire code per variant.
pub trait WireEnum: Copy + PartialEq + 'static {
    /// Table name used in error messages.
    const TABLE: &'static str;

    /// Every variant, in code order: `VALUES[i]` has code `i + 1`.
    const VALUES: &'static [Self];

    fn code(self) -> u32 {
        Self::VALUES
            .iter()
            .position(|v| *v == self)
            .map_or(0, |i| i as u32 + 1)
    }

    fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(1)?;
        Self::VALUES.get(index as usize).copied()
    }
}

/// Decodes a required enum field.
pub fn decode_enum<E: WireEnum>(code: u32) -> Result<E, DecodeError> {
    E::from_code(code).ok_or(DecodeError::UnknownEnumCode {
        table: E::TABLE,
        code,
    })
}

impl WireEnum for Language {
    const TABLE: &'static str = "language";
    const VALUES: &'static [Self] = &Language::ALL;
}

impl WireEnum for SentimentClass {
    const TABLE: &'static str = "sentiment class";
    const VALUES: &'static [Self] = &SentimentClass::ALL;
}

impl WireEnum for NaturalLogicRelation {
    const TABLE: &'static str = "natural logic relation";
    const VALUES: &'static [Self] = &NaturalLogicRelation::ALL;
}

lazy_static! {
    static ref QUANTIFIERS_BY_NAME: FxHashMap<&'static str, Quantifier> =
        Quantifier::ALL.iter().map(|q| (q.name(), *q)).collect();
}

/// Looks up an operator by name. Unknown names yield `None`.
pub fn quantifier_from_name(name: &str) -> Option<Quantifier> {
    let found = QUANTIFIERS_BY_NAME.get(name).copied();
    if found.is_none() {
        tracing::trace!(name, "operator name has no quantifier mapping");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijective<E: WireEnum + std::fmt::Debug>() {
        for (i, value) in E::VALUES.iter().enumerate() {
            let code = value.code();
            assert_eq!(code, i as u32 + 1);
            assert_eq!(decode_enum::<E>(code).unwrap(), *value);
        }
    }

    #[test]
    fn test_tables_are_bijective() {
        assert_bijective::<Language>();
        assert_bijective::<SentimentClass>();
        assert_bijective::<NaturalLogicRelation>();
    }

    #[test]
    fn test_placeholder_and_unknown_codes_rejected() {
        assert_eq!(
            decode_enum::<Language>(0),
            Err(DecodeError::UnknownEnumCode { table: "language", code: 0 })
        );
        assert!(matches!(
            decode_enum::<NaturalLogicRelation>(8),
            Err(DecodeError::UnknownEnumCode { code: 8, .. })
        ));
        let err = decode_enum::<SentimentClass>(42).unwrap_err();
        assert_eq!(err.to_string(), "[E004] unknown sentiment class code 42");
    }

    #[test]
    fn test_quantifier_lookup_is_best_effort() {
        for q in Quantifier::ALL {
            assert_eq!(quantifier_from_name(q.name()), Some(q));
        }
        assert_eq!(quantifier_from_name("umpteen"), None);
    }
}
