//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Roles, account statuses and notification severities travel as lowercase
//! strings (both on the wire and on the command line). This macro gives each
//! of those enums a single source of truth for that mapping.
//!
//! # Example
//!
//! ```rust
//! use adminhub_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Plan {
//!     Free,
//!     Team,
//! }
//!
//! impl_domain_status_conversions!(Plan {
//!     Free => "free",
//!     Team => "team",
//! });
//!
//! assert_eq!(Plan::Team.to_string(), "team");
//! assert_eq!("FREE".parse::<Plan>().unwrap(), Plan::Free);
//! ```

/// Implements Display and FromStr traits for lowercase string enums
///
/// - Display writes the mapped string
/// - FromStr parses case-insensitively and names the enum in its error
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
