//! Macros for ergonomic vocabulary definitions.

/// Generate a closed state enumeration implementing [`State`].
///
/// The enum derives everything the machine needs (`Copy`, `Eq`, `Hash`,
/// `Debug`, serde) and gets an `ALL` constant listing its variants in
/// declaration order.
///
/// [`State`]: crate::core::State
///
/// # Example
///
/// ```
/// use holster::core::State;
/// use holster::state_enum;
///
/// state_enum! {
///     pub enum Holster {
///         Empty,
///         Loaded,
///     }
/// }
///
/// assert_eq!(Holster::Loaded.name(), "Loaded");
/// assert_eq!(Holster::ALL, &[Holster::Empty, Holster::Loaded]);
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis const ALL: &'static [$name] = &[$(Self::$variant),*];
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

/// Generate a closed event enumeration implementing [`Event`].
///
/// [`Event`]: crate::core::Event
///
/// # Example
///
/// ```
/// use holster::core::Event;
/// use holster::event_enum;
///
/// event_enum! {
///     pub enum Trigger {
///         Pressed,
///         Released,
///     }
/// }
///
/// assert_eq!(Trigger::Released.name(), "Released");
/// ```
#[macro_export]
macro_rules! event_enum {
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl $crate::core::Event for $name {
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
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_enum! {
        enum TestEvent {
            Start,
            /// documented variant
            Finish,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(TestState::ALL.len(), 3);
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Start.name(), "Start");
        assert_eq!(TestEvent::ALL, &[TestEvent::Start, TestEvent::Finish]);
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        let state = PublicState::A;
        assert_eq!(state.name(), "A");
    }

    #[test]
    fn generated_enums_serialize() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
        let back: TestEvent = serde_json::from_str("\"Finish\"").unwrap();
        assert_eq!(back, TestEvent::Finish);
    }
}
