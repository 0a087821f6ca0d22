//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs reach the client
//! as marker attribute values (`data-product-id="42"`), so every ID can be
//! parsed from one.

/// Errors that can occur when reading an ID from a marker attribute.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The marker attribute is absent or blank.
    #[error("missing {0}")]
    Missing(&'static str),
    /// The marker attribute is not an integer.
    #[error("invalid {name}: {value:?}")]
    Invalid {
        /// Name of the marker attribute.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`, `from_marker()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use xcommerce_core::define_id;
/// define_id!(ProductId, "product id");
/// define_id!(VariantId, "variant id");
///
/// let product_id = ProductId::new(1);
/// let variant_id = VariantId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = variant_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// Parse the ID from an optional marker attribute value.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Missing` for an absent or blank value and
            /// `IdError::Invalid` for anything that is not an integer.
            pub fn from_marker(value: Option<&str>) -> Result<Self, $crate::IdError> {
                let raw = value
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .ok_or($crate::IdError::Missing($label))?;
                raw.parse()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i32>()
                    .map(Self)
                    .map_err(|_| $crate::IdError::Invalid {
                        name: $label,
                        value: s.to_owned(),
                    })
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define storefront entity IDs
define_id!(ProductId, "product id");
define_id!(VariantId, "variant id");
define_id!(CartItemId, "cart item id");
