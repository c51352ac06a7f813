//! Macros for declaring state and event enums.

/// Generate a `State` implementation for a fieldless enum.
///
/// Variant names are used as state names unless a label is given with
/// `Variant = "label"`.
///
/// # Example
///
/// ```
/// use tinyfsm::core::State;
/// use tinyfsm::state_enum;
///
/// state_enum! {
///     pub enum Pose {
///         Standing = "standing",
///         Walking = "walking",
///         Airborne,
///     }
/// }
///
/// assert_eq!(Pose::Standing.name(), "standing");
/// assert_eq!(Pose::Airborne.name(), "Airborne");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
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

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__variant_name!($variant $(, $label)?)),*
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a fieldless enum.
///
/// Same syntax as [`state_enum!`].
///
/// # Example
///
/// ```
/// use tinyfsm::core::Event;
/// use tinyfsm::event_enum;
///
/// event_enum! {
///     enum Move {
///         Walk = "walk",
///         Run = "run",
///     }
/// }
///
/// assert_eq!(Move::Run.name(), "run");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
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

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__variant_name!($variant $(, $label)?)),*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_name {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}
