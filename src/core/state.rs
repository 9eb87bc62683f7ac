//! Core State trait for transducer states.
//!
//! Every machine is keyed by a state type. States are plain values with a
//! stable name used in diagnostics and fatal errors.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for transducer states.
///
/// States are immutable values used as keys into a machine's transition
/// tables, so they must be hashable and comparable by value.
///
/// # Required Traits
///
/// - `Clone`: the current state is copied into output records and traces
/// - `Eq` + `Hash`: states key the transition tables
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: output records carry their state as a tag
///
/// # Example
///
/// ```rust
/// use braille_fsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Mode {
///     Letters,
///     Digits,
/// }
///
/// impl State for Mode {
///     fn name(&self) -> &str {
///         match self {
///             Self::Letters => "Letters",
///             Self::Digits => "Digits",
///         }
///     }
/// }
///
/// assert_eq!(Mode::Digits.name(), "Digits");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Free-form named states, handy for machines assembled at runtime.
impl State for String {
    fn name(&self) -> &str {
        self
    }
}
