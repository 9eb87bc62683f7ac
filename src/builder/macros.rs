//! Macros for ergonomic machine construction.

/// Generate a state enum and its `State` implementation.
///
/// Every variant is named after its identifier. The enum derives everything
/// a state needs, including `Copy`.
///
/// # Example
///
/// ```
/// use braille_fsm::core::State;
/// use braille_fsm::state_enum;
///
/// state_enum! {
///     pub enum Scanner {
///         Idle,
///         InWord,
///     }
/// }
///
/// assert_eq!(Scanner::InWord.name(), "InWord");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn state_enum_lists_all_variants() {
        assert_eq!(
            TestState::ALL,
            &[
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn state_enum_supports_visibility_and_attributes() {
        state_enum! {
            /// Documented state.
            #[serde(rename_all = "snake_case")]
            pub enum PublicState {
                FirstStep,
                B,
            }
        }

        let json = serde_json::to_string(&PublicState::FirstStep).unwrap();
        assert_eq!(json, "\"first_step\"");
    }
}
