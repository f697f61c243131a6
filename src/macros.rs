//! Macros for declaring outcome codes.

/// Generate an outcome enum together with its `Outcome` implementation.
///
/// Each variant carries a severity literal. Exactly one variant of every
/// outcome enum should have severity `0`; that variant is the success code.
///
/// ```ignore
/// outcome_enum! {
///     pub enum DoorOutcome {
///         Success = 0,
///         Jammed = 1,
///     }
/// }
/// ```
macro_rules! outcome_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $severity:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Outcome for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn severity(&self) -> u8 {
                match self {
                    $(Self::$variant => $severity),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::Outcome::name(self))
            }
        }
    };
}
