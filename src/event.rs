pub mod event {

    /// Debounced contact state of a button.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum ButtonPosition {
        Pressed,
        Released,
    }

    impl ButtonPosition {
        /// Buttons are wired active-low: a low level means the contact is closed.
        pub fn from_level(is_low: bool) -> Self {
            if is_low {
                ButtonPosition::Pressed
            } else {
                ButtonPosition::Released
            }
        }

        pub fn is_pressed(self) -> bool {
            self == ButtonPosition::Pressed
        }
    }

    /// An accepted edge, stamped with the sampler's clock.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct ButtonEvent {
        timestamp: u32,
        position: ButtonPosition,
    }

    impl ButtonEvent {
        pub const fn new(timestamp: u32, position: ButtonPosition) -> Self {
            ButtonEvent {
                timestamp,
                position,
            }
        }

        pub fn timestamp(&self) -> u32 {
            self.timestamp
        }

        pub fn position(&self) -> ButtonPosition {
            self.position
        }
    }

    /// Gestures reported to the application.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Press {
        Single,
        Double,
        Triple,
        Long,
    }

    impl Press {
        /// Gesture for a number of completed clicks; three or more count as triple.
        pub fn from_count(count: u8) -> Option<Self> {
            match count {
                0 => None,
                1 => Some(Press::Single),
                2 => Some(Press::Double),
                _ => Some(Press::Triple),
            }
        }

        pub fn name(self) -> &'static str {
            match self {
                Press::Single => "single",
                Press::Double => "double",
                Press::Triple => "triple",
                Press::Long => "long",
            }
        }
    }

}
