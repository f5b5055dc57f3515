//! # Value Coercion
//!
//! The two-way conversion between raw storage scalars and materialized
//! enum instances, plus validation of caller-supplied write values.
//!
//! Both paths are pure, single-shot conversions with no intermediate
//! state. This is the trust boundary of the crate: arbitrary raw values
//! enter and leave the typed domain here, and every mismatch fails
//! loudly with full context.

use crate::enumerable::{EnumType, Variant};
use crate::types::{CastError, Scalar, StorageRepr, Value};

/// The Coercer consolidates both conversion paths.
///
/// It holds no state; the enum type, storage representation, and
/// diagnostic context all arrive per call from the resolution and
/// interception layers.
pub struct Coercer;

impl Coercer {
    /// Read path: reconstitute the instance named by a stored raw scalar.
    ///
    /// This is the only place raw-to-typed conversion occurs. Fails with
    /// `CastError::NoMatchingVariant` if the scalar names no variant of
    /// `ty`.
    pub fn materialize(ty: EnumType, raw: &Scalar) -> Result<Variant, CastError> {
        ty.make(raw)
    }

    /// Write path: validate caller input and reduce it to the raw scalar
    /// to persist.
    ///
    /// Raw ordinals and labels are materialized through the factory
    /// first. The identity check then runs after materialization on
    /// every path, so a factory-produced instance and a caller-supplied
    /// one are treated alike; factory-produced instances pass it
    /// trivially.
    pub fn normalize(
        ty: EnumType,
        entity: &str,
        key: &str,
        input: Value,
        repr: StorageRepr,
    ) -> Result<Scalar, CastError> {
        let variant = match input {
            Value::Int(i) => Self::materialize(ty, &Scalar::Int(i))?,
            Value::Text(s) => Self::materialize(ty, &Scalar::Text(s))?,
            Value::Variant(v) => v,
            Value::Bool(b) => {
                return Err(CastError::TypeMismatch {
                    entity: entity.to_string(),
                    key: key.to_string(),
                    expected: ty.name(),
                    actual: format!("bool scalar {b}"),
                });
            }
        };

        if variant.type_name() != ty.name() {
            return Err(CastError::TypeMismatch {
                entity: entity.to_string(),
                key: key.to_string(),
                expected: ty.name(),
                actual: variant.type_name().to_string(),
            });
        }

        Ok(Self::strip(&variant, repr))
    }

    /// Reduce a validated instance to its raw form per the storage
    /// representation choice.
    #[must_use]
    pub fn strip(variant: &Variant, repr: StorageRepr) -> Scalar {
        match repr {
            StorageRepr::Ordinal => Scalar::Int(variant.ordinal()),
            StorageRepr::Label => Scalar::Text(variant.label().to_string()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enumerable::Enumerable;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Status {
        Active,
        Inactive,
    }

    impl Enumerable for Status {
        const NAME: &'static str = "Status";

        fn from_ordinal(ordinal: i64) -> Option<Self> {
            match ordinal {
                0 => Some(Self::Active),
                1 => Some(Self::Inactive),
                _ => None,
            }
        }

        fn from_label(label: &str) -> Option<Self> {
            match label {
                "active" => Some(Self::Active),
                "inactive" => Some(Self::Inactive),
                _ => None,
            }
        }

        fn ordinal(&self) -> i64 {
            match self {
                Self::Active => 0,
                Self::Inactive => 1,
            }
        }

        fn label(&self) -> &'static str {
            match self {
                Self::Active => "active",
                Self::Inactive => "inactive",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Priority {
        Low,
        High,
    }

    impl Enumerable for Priority {
        const NAME: &'static str = "Priority";

        fn from_ordinal(ordinal: i64) -> Option<Self> {
            match ordinal {
                0 => Some(Self::Low),
                1 => Some(Self::High),
                _ => None,
            }
        }

        fn from_label(label: &str) -> Option<Self> {
            match label {
                "low" => Some(Self::Low),
                "high" => Some(Self::High),
                _ => None,
            }
        }

        fn ordinal(&self) -> i64 {
            match self {
                Self::Low => 0,
                Self::High => 1,
            }
        }

        fn label(&self) -> &'static str {
            match self {
                Self::Low => "low",
                Self::High => "high",
            }
        }
    }

    fn status() -> EnumType {
        EnumType::of::<Status>()
    }

    #[test]
    fn materialize_from_both_raw_forms() {
        let by_ordinal = Coercer::materialize(status(), &Scalar::Int(1)).unwrap();
        let by_label = Coercer::materialize(status(), &Scalar::text("inactive")).unwrap();
        assert_eq!(by_ordinal, by_label);
        assert_eq!(by_ordinal.label(), "inactive");
    }

    #[test]
    fn materialize_rejects_unknown_raw() {
        assert!(matches!(
            Coercer::materialize(status(), &Scalar::Int(7)),
            Err(CastError::NoMatchingVariant { .. })
        ));
        assert!(matches!(
            Coercer::materialize(status(), &Scalar::Bool(true)),
            Err(CastError::NoMatchingVariant { .. })
        ));
    }

    #[test]
    fn normalize_raw_label_to_ordinal_storage() {
        let raw = Coercer::normalize(
            status(),
            "user",
            "status",
            Value::from("active"),
            StorageRepr::Ordinal,
        )
        .unwrap();
        assert_eq!(raw, Scalar::Int(0));
    }

    #[test]
    fn normalize_raw_ordinal_to_label_storage() {
        let raw = Coercer::normalize(
            status(),
            "user",
            "status",
            Value::from(1),
            StorageRepr::Label,
        )
        .unwrap();
        assert_eq!(raw, Scalar::text("inactive"));
    }

    #[test]
    fn normalize_accepts_same_type_instance() {
        let input = Value::from(Status::Active.to_variant());
        let raw = Coercer::normalize(status(), "user", "status", input, StorageRepr::Ordinal)
            .unwrap();
        assert_eq!(raw, Scalar::Int(0));
    }

    #[test]
    fn normalize_rejects_foreign_instance() {
        let input = Value::from(Priority::High.to_variant());
        let err = Coercer::normalize(status(), "user", "status", input, StorageRepr::Ordinal)
            .unwrap_err();
        assert!(matches!(
            err,
            CastError::TypeMismatch {
                ref entity,
                ref key,
                expected: "Status",
                ref actual,
            } if entity == "user" && key == "status" && actual == "Priority"
        ));
    }

    #[test]
    fn normalize_rejects_bool_input() {
        let err = Coercer::normalize(
            status(),
            "user",
            "status",
            Value::from(true),
            StorageRepr::Label,
        )
        .unwrap_err();
        assert!(matches!(err, CastError::TypeMismatch { .. }));
    }

    #[test]
    fn normalize_rejects_unknown_raw() {
        let err = Coercer::normalize(
            status(),
            "user",
            "status",
            Value::from(7),
            StorageRepr::Ordinal,
        )
        .unwrap_err();
        assert!(matches!(err, CastError::NoMatchingVariant { .. }));
    }

    #[test]
    fn strip_honors_representation_choice() {
        let variant = Status::Inactive.to_variant();
        assert_eq!(Coercer::strip(&variant, StorageRepr::Ordinal), Scalar::Int(1));
        assert_eq!(
            Coercer::strip(&variant, StorageRepr::Label),
            Scalar::text("inactive")
        );
    }
}
