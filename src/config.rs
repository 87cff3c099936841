pub mod config {

    pub const POLL_INTERVAL_MS: u32 = 10; // sampling period of the timer interrupt
    pub const DEFAULT_DEBOUNCE_MS: u32 = 50;
    pub const DEFAULT_LONG_PRESS_MS: u32 = 1_000;
    pub const DEFAULT_MULTI_PRESS_WINDOW_MS: u32 = 1_000;

    /// Slots per button queue. Must be a power of two; one slot is always
    /// kept free, so a queue holds at most `EVENT_QUEUE_SIZE - 1` events.
    pub const EVENT_QUEUE_SIZE: usize = 32;

    const _: () = assert!(EVENT_QUEUE_SIZE.is_power_of_two());

    /// Timing of a single button, fixed when the button is created.
    ///
    /// No value is validated: a zero debounce simply forwards every raw
    /// transition, a zero window resolves a click on the next `process` call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct ButtonConfig {
        pub debounce_ms: u32,           // minimum time between accepted edges
        pub long_press_ms: u32,         // hold time for a long press
        pub multi_press_window_ms: u32, // max gap between clicks of one gesture
    }

    impl ButtonConfig {
        pub const fn new(debounce_ms: u32, long_press_ms: u32, multi_press_window_ms: u32) -> Self {
            ButtonConfig {
                debounce_ms,
                long_press_ms,
                multi_press_window_ms,
            }
        }

        pub const fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
            self.debounce_ms = debounce_ms;
            self
        }

        pub const fn with_long_press_ms(mut self, long_press_ms: u32) -> Self {
            self.long_press_ms = long_press_ms;
            self
        }

        pub const fn with_multi_press_window_ms(mut self, multi_press_window_ms: u32) -> Self {
            self.multi_press_window_ms = multi_press_window_ms;
            self
        }
    }

    impl Default for ButtonConfig {
        fn default() -> Self {
            ButtonConfig::new(
                DEFAULT_DEBOUNCE_MS,
                DEFAULT_LONG_PRESS_MS,
                DEFAULT_MULTI_PRESS_WINDOW_MS,
            )
        }
    }

}
