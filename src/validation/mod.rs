//! Validation-based linting of machine tables.
//!
//! Uses Stillwater's `Validation` type to report every table defect in one
//! pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use braille_fsm::builder::MachineBuilder;
//! use braille_fsm::core::Transition;
//! use braille_fsm::validation::MachineViolation;
//! use stillwater::validation::Validation;
//!
//! let start = "start".to_string();
//! let machine = MachineBuilder::<String, ()>::new()
//!     .start(start.clone())
//!     .state(start, vec![("x".to_string(), Transition::to("gone".to_string()))])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! match machine.validate() {
//!     Validation::Failure(errors) => assert!(matches!(
//!         errors.iter().next(),
//!         Some(MachineViolation::UndefinedTarget { .. })
//!     )),
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::{MachineValidation, ValidationCheck, ValidationRules};
pub use violations::MachineViolation;
