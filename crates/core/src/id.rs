//! Strongly-typed numeric identifiers.
//!
//! Stores hand out positive 64-bit keys; the newtypes keep them from being
//! mixed up across entities.

/// Declare a numeric identifier newtype.
///
/// The calling crate must depend on `serde`. The newtype serializes as a bare
/// integer and deserializing goes through `TryFrom<i64>`, so non-positive keys
/// are rejected there too.
#[macro_export]
macro_rules! numeric_id {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $t(i64);

        impl $t {
            /// Wrap a raw key. Keys must be positive.
            pub fn new(raw: i64) -> $crate::DomainResult<Self> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err($crate::DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, raw
                    )))
                }
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $t {
            type Error = $crate::DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| $crate::DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(raw)
            }
        }
    };
}
