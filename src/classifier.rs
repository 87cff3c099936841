pub mod classifier {

    use crate::clock::clock::elapsed_ms;
    use crate::config::config::ButtonConfig;
    use crate::event::event::{ButtonEvent, ButtonPosition, Press};

    //   IDLE ──press──> PRESSING ──release──> WAITING_MULTIPRESS ──window over──> IDLE
    //                     │  │                   │   (report 1/2/3 clicks)
    //                     │  └─release, handled─┼──────────────────────────────> IDLE
    //                     │        at once      └──press──> PRESSING
    //                     └─held──> LONG_PRESSED ──release──> IDLE

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum ClassifierState {
        Idle,
        Pressing,
        LongPressed,
        WaitingMultiPress,
    }

    /// Optional handler per gesture.
    ///
    /// A gesture without a handler is reported through its poll flag instead.
    /// Registering handlers also enables immediate dispatch: a click is handled
    /// as soon as no longer gesture could still claim it.
    #[derive(Default)]
    pub struct Actions<'a> {
        single: Option<&'a dyn Fn()>,
        double: Option<&'a dyn Fn()>,
        triple: Option<&'a dyn Fn()>,
        long: Option<&'a dyn Fn()>,
    }

    impl<'a> Actions<'a> {
        pub const fn new() -> Self {
            Actions {
                single: None,
                double: None,
                triple: None,
                long: None,
            }
        }

        pub fn on_single(mut self, action: &'a dyn Fn()) -> Self {
            self.single = Some(action);
            self
        }

        pub fn on_double(mut self, action: &'a dyn Fn()) -> Self {
            self.double = Some(action);
            self
        }

        pub fn on_triple(mut self, action: &'a dyn Fn()) -> Self {
            self.triple = Some(action);
            self
        }

        pub fn on_long(mut self, action: &'a dyn Fn()) -> Self {
            self.long = Some(action);
            self
        }

        pub fn has(&self, press: Press) -> bool {
            self.get(press).is_some()
        }

        fn get(&self, press: Press) -> Option<&'a dyn Fn()> {
            match press {
                Press::Single => self.single,
                Press::Double => self.double,
                Press::Triple => self.triple,
                Press::Long => self.long,
            }
        }

        // Calls the handler for `press`; `false` if there is none.
        fn run(&self, press: Press) -> bool {
            match self.get(press) {
                Some(action) => {
                    action();
                    true
                }
                None => false,
            }
        }
    }

    #[derive(Default)]
    struct PressFlags {
        single: bool,
        double: bool,
        triple: bool,
        long: bool,
    }

    impl PressFlags {
        fn slot(&mut self, press: Press) -> &mut bool {
            match press {
                Press::Single => &mut self.single,
                Press::Double => &mut self.double,
                Press::Triple => &mut self.triple,
                Press::Long => &mut self.long,
            }
        }

        fn clear_multi(&mut self) {
            self.single = false;
            self.double = false;
            self.triple = false;
        }

        fn take(&mut self, press: Press) -> bool {
            core::mem::take(self.slot(press))
        }
    }

    /// Press state machine of one button. Fed one event at a time, real or
    /// synthetic, in timestamp order.
    pub struct PressClassifier<'a> {
        config: ButtonConfig,
        actions: Actions<'a>,
        state: ClassifierState,
        press_count: u8,      // completed clicks in the current sequence
        press_start: u32,     // timestamp of the current press
        last_press_time: u32, // timestamp of the last release
        flags: PressFlags,
    }

    impl<'a> PressClassifier<'a> {
        pub fn new(config: ButtonConfig) -> Self {
            PressClassifier {
                config,
                actions: Actions::new(),
                state: ClassifierState::Idle,
                press_count: 0,
                press_start: 0,
                last_press_time: 0,
                flags: PressFlags::default(),
            }
        }

        /// Replace all four handlers at once.
        pub fn set_actions(&mut self, actions: Actions<'a>) {
            self.actions = actions;
        }

        pub fn handle(&mut self, event: ButtonEvent) {
            match self.state {
                ClassifierState::Idle | ClassifierState::WaitingMultiPress => self.on_released_state(event),
                ClassifierState::Pressing => self.on_pressing(event),
                ClassifierState::LongPressed => {
                    if event.position() == ButtonPosition::Released {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("long press ended, back to idle");
                        self.press_count = 0;
                        self.state = ClassifierState::Idle;
                    }
                }
            }
        }

        fn on_released_state(&mut self, event: ButtonEvent) {
            if event.position().is_pressed() {
                #[cfg(feature = "defmt")]
                defmt::debug!("press at {=u32} ms in {}", event.timestamp(), self.state);
                self.flags.long = false;
                self.press_start = event.timestamp();
                self.state = ClassifierState::Pressing;
            }

            if self.state == ClassifierState::WaitingMultiPress
                && elapsed_ms(event.timestamp(), self.last_press_time) > self.config.multi_press_window_ms
            {
                self.resolve_window();
            }
        }

        fn resolve_window(&mut self) {
            #[cfg(feature = "defmt")]
            defmt::debug!("multi-press window over with {=u8} presses", self.press_count);

            if let Some(press) = Press::from_count(self.press_count) {
                self.flags.clear_multi();
                if self.actions.run(press) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("ran delayed {} press action", press);
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("latched {} press flag", press);
                    *self.flags.slot(press) = true;
                }
            }
            self.press_count = 0;
            self.state = ClassifierState::Idle;
        }

        fn on_pressing(&mut self, event: ButtonEvent) {
            match event.position() {
                ButtonPosition::Pressed => {
                    let held_ms = elapsed_ms(event.timestamp(), self.press_start);
                    if !self.flags.long && self.press_count == 0 && held_ms >= self.config.long_press_ms {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("long press after {=u32} ms", held_ms);
                        self.flags.long = true;
                        if self.actions.run(Press::Long) {
                            self.flags.long = false;
                        }
                        self.state = ClassifierState::LongPressed;
                    }
                }
                ButtonPosition::Released => {
                    self.press_count = self.press_count.saturating_add(1);
                    self.last_press_time = event.timestamp();
                    #[cfg(feature = "defmt")]
                    defmt::debug!("click {=u8} complete", self.press_count);

                    match self.immediate_press() {
                        Some(press) => {
                            #[cfg(feature = "defmt")]
                            defmt::debug!("ran immediate {} press action", press);
                            self.actions.run(press);
                            self.press_count = 0;
                            self.state = ClassifierState::Idle;
                        }
                        None => self.state = ClassifierState::WaitingMultiPress,
                    }
                }
            }
        }

        // A gesture that no further click could turn into a longer one.
        fn immediate_press(&self) -> Option<Press> {
            let actions = &self.actions;
            match self.press_count {
                1 if actions.has(Press::Single)
                    && !actions.has(Press::Double)
                    && !actions.has(Press::Triple) =>
                {
                    Some(Press::Single)
                }
                2 if actions.has(Press::Double) && !actions.has(Press::Triple) => Some(Press::Double),
                n if n >= 3 && actions.has(Press::Triple) => Some(Press::Triple),
                _ => None,
            }
        }

        /// Read and clear the latched flag of `press`.
        pub fn take(&mut self, press: Press) -> bool {
            self.flags.take(press)
        }

        pub fn state(&self) -> ClassifierState {
            self.state
        }

        pub fn press_count(&self) -> u8 {
            self.press_count
        }

        pub fn config(&self) -> &ButtonConfig {
            &self.config
        }
    }

}
