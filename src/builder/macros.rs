//! Macros for ergonomic engine construction.

/// Declare a fieldless enum and implement [`State`](crate::core::State) for it.
///
/// # Example
///
/// ```
/// use statecraft::state_enum;
/// use statecraft::core::State;
///
/// state_enum! {
///     pub enum GhostState {
///         Locked,
///         Scattering,
///         Chasing,
///     }
/// }
///
/// assert_eq!(GhostState::Scattering.name(), "Scattering");
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
        $(#[$meta])*
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
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
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
            Running,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Running.name(), "Running");
    }

    #[test]
    fn state_enum_supports_visibility_and_attributes() {
        state_enum! {
            /// Documented
            pub enum PublicState {
                A,
                #[allow(dead_code)]
                B,
            }
        }

        let state = PublicState::A;
        let copy = state;
        assert_eq!(state, copy);
        assert_ne!(state, PublicState::B);
    }

    #[test]
    fn generated_enum_serializes() {
        let json = serde_json::to_string(&TestState::Running).unwrap();
        assert_eq!(json, "\"Running\"");
    }
}
