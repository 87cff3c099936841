pub mod button {

    use crate::classifier::classifier::{Actions, ClassifierState, PressClassifier};
    use crate::clock::clock::elapsed_ms;
    use crate::config::config::ButtonConfig;
    use crate::event::event::{ButtonEvent, Press};
    use crate::queue::queue::EventReader;

    /// Main-loop half of a button.
    ///
    /// Use either callbacks ([`set_actions`](Self::set_actions)) or the poll
    /// accessors on one button, not both: registered handlers dispatch
    /// immediately wherever they can, which can keep a polled flag from ever
    /// being set.
    ///
    /// ```ignore
    /// let (writer, reader) = queue.split();
    /// registry.register(EdgeSampler::new(pin, writer, config.debounce_ms))?;
    /// let mut button = MultiPressButton::new(reader, config);
    /// loop {
    ///     button.process(clock.now_ms());
    ///     if button.double_press() {
    ///         // ...
    ///     }
    /// }
    /// ```
    pub struct MultiPressButton<'a> {
        reader: EventReader<'a>,
        classifier: PressClassifier<'a>,
        latest_ms: u32, // newest timestamp fed to the classifier
    }

    impl<'a> MultiPressButton<'a> {
        pub fn new(reader: EventReader<'a>, config: ButtonConfig) -> Self {
            MultiPressButton {
                reader,
                classifier: PressClassifier::new(config),
                latest_ms: 0,
            }
        }

        /// Drain queued edges through the state machine, then re-check the
        /// timing windows at `now_ms`. Call once per main-loop iteration.
        ///
        /// The interrupt may stamp an edge after `now_ms` was read. The
        /// timeout check then runs at that edge's time instead, so time never
        /// appears to go backwards.
        pub fn process(&mut self, now_ms: u32) {
            while let Some(event) = self.reader.peek() {
                #[cfg(feature = "defmt")]
                defmt::debug!("event: {} at {=u32} ms", event.position(), event.timestamp());
                self.classifier.handle(event);
                self.latest_ms = event.timestamp();
                self.reader.advance();
            }

            if elapsed_ms(now_ms, self.latest_ms) <= u32::MAX / 2 {
                self.latest_ms = now_ms;
            }

            // synthetic event, not taken from the queue
            self.classifier
                .handle(ButtonEvent::new(self.latest_ms, self.reader.position()));
        }

        /// Replace the handlers. Gestures left out of `actions` go back to
        /// their poll flags.
        pub fn set_actions(&mut self, actions: Actions<'a>) {
            self.classifier.set_actions(actions);
        }

        pub fn single_press(&mut self) -> bool {
            self.classifier.take(Press::Single)
        }

        pub fn double_press(&mut self) -> bool {
            self.classifier.take(Press::Double)
        }

        pub fn triple_press(&mut self) -> bool {
            self.classifier.take(Press::Triple)
        }

        pub fn long_press(&mut self) -> bool {
            self.classifier.take(Press::Long)
        }

        pub fn state(&self) -> ClassifierState {
            self.classifier.state()
        }

        pub fn press_count(&self) -> u8 {
            self.classifier.press_count()
        }

        pub fn config(&self) -> &ButtonConfig {
            self.classifier.config()
        }

        pub fn pending_events(&self) -> usize {
            self.reader.len()
        }
    }

}
