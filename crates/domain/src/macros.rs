//! Macro for wire-string enums
//!
//! The API exchanges small enumerations (action item priority and status) as
//! lowercase strings. This macro gives such an enum `as_str`, `Display` and a
//! case-insensitive `FromStr` from a single variant table.
//!
//! # Example
//!
//! ```rust
//! use minutes_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Color {
//!     Red,
//!     Green,
//! }
//!
//! impl_wire_enum_conversions!(Color {
//!     Red => "red",
//!     Green => "green",
//! });
//!
//! assert_eq!(Color::Red.as_str(), "red");
//! assert_eq!("GREEN".parse::<Color>().unwrap(), Color::Green);
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a wire-string enum.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of the variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::MinutesError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::MinutesError::InvalidInput(format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
