//! An ordered ALLOW/DENY rule engine over positional dimensions.
//!
//! [`Definitions`] pairs an ordered rule list with the dimensions its
//! conditions range over. [`Definitions::check()`] decides whether a query is
//! allowed (first matching rule wins, default deny) and
//! [`Definitions::closest()`] searches for the nearest allowed query by
//! changing one dimension's value.
//!
//! ```
//! use rulegrid::Definitions;
//!
//! let defs = Definitions::from_dsl(
//!     r"
//! dimension size: S, M, L
//! dimension color: Black, White
//!
//! DENY  * Black
//! ALLOW * *
//! ",
//! )
//! .unwrap();
//!
//! assert!(!defs.check(&["M", "Black"]).unwrap());
//! assert_eq!(
//!     defs.closest_in(&["M", "Black"], Some(1)).unwrap(),
//!     Some(vec!["M".into(), "White".into()])
//! );
//! ```

mod closest;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use closest::{find_alternative_conditions, find_alternative_value, find_alternative_verbose};
pub use error::RulegridError;
pub use evaluate::{evaluate, evaluate_detailed};
pub use types::{
    Action, Alternative, Condition, ConfigurationError, Definitions, DefinitionsBuilder, Dimension,
    Rule, RuleRow, UnknownActionToken, Value, Verdict, WILDCARD, any, is, one_of,
};
