pub mod registry {

    use core::cell::RefCell;

    use critical_section::Mutex;
    use embedded_hal::digital::InputPin;
    use heapless::Vec;

    use crate::config::config::POLL_INTERVAL_MS;
    use crate::error::error::{Error, Result};
    use crate::sampler::sampler::EdgeSampler;
    use crate::scheduler::scheduler::PeriodicTimer;

    /// Every sampled button plus the timer that drives them.
    ///
    /// The timer is started by the first [`register`](Self::register) call and
    /// stays running for all later buttons. Register every button before the
    /// timer interrupt is unmasked.
    pub struct ButtonRegistry<'a, P, T, const MAX: usize> {
        samplers: Vec<EdgeSampler<'a, P>, MAX>,
        timer: T,
        interval_ms: u32,
        running: bool,
    }

    impl<'a, P, T, const MAX: usize> ButtonRegistry<'a, P, T, MAX>
    where
        P: InputPin,
        T: PeriodicTimer,
    {
        pub fn new(timer: T) -> Self {
            Self::with_interval(timer, POLL_INTERVAL_MS)
        }

        pub fn with_interval(timer: T, interval_ms: u32) -> Self {
            ButtonRegistry {
                samplers: Vec::new(),
                timer,
                interval_ms,
                running: false,
            }
        }

        /// Add a button. On error the sampler is dropped and the registry is
        /// left as it was, so a later call retries starting the timer.
        pub fn register(&mut self, sampler: EdgeSampler<'a, P>) -> Result<()> {
            if self.samplers.is_full() {
                return Err(Error::RegistryFull);
            }
            if !self.running {
                #[cfg(feature = "defmt")]
                defmt::info!("starting button sampling every {=u32} ms", self.interval_ms);
                self.timer.start(self.interval_ms)?;
                self.running = true;
            }
            self.samplers.push(sampler).map_err(|_| Error::RegistryFull)
        }

        /// One sampling pass, run from the timer interrupt. All buttons see
        /// the same timestamp.
        pub fn tick(&mut self) {
            let now_ms = self.timer.now_ms();
            if self.timer.rearm().is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("could not rearm button timer at {=u32} ms", now_ms);
            }
            for sampler in self.samplers.iter_mut() {
                sampler.sample(now_ms);
            }
        }

        /// Stop the timer and hand back everything the registry owned.
        pub fn shutdown(mut self) -> (T, Vec<EdgeSampler<'a, P>, MAX>) {
            if self.running {
                self.timer.stop();
            }
            (self.timer, self.samplers)
        }

        pub fn is_running(&self) -> bool {
            self.running
        }

        pub fn len(&self) -> usize {
            self.samplers.len()
        }

        pub fn is_empty(&self) -> bool {
            self.samplers.is_empty()
        }

        pub fn timer(&self) -> &T {
            &self.timer
        }
    }

    /// A registry reachable from an interrupt handler.
    ///
    /// ```ignore
    /// static BUTTONS: SharedRegistry<Registry> = SharedRegistry::new();
    ///
    /// #[interrupt]
    /// fn TIMER_IRQ_0() {
    ///     BUTTONS.tick();
    /// }
    /// ```
    pub struct SharedRegistry<R> {
        registry: Mutex<RefCell<Option<R>>>,
    }

    impl<R> SharedRegistry<R> {
        pub const fn new() -> Self {
            SharedRegistry {
                registry: Mutex::new(RefCell::new(None)),
            }
        }

        /// Hand a registry to the interrupt side, returning any previous one.
        pub fn install(&self, registry: R) -> Option<R> {
            critical_section::with(|cs| self.registry.borrow(cs).replace(Some(registry)))
        }

        pub fn uninstall(&self) -> Option<R> {
            critical_section::with(|cs| self.registry.borrow(cs).take())
        }

        /// Run `f` on the installed registry; `None` if nothing is installed.
        pub fn with<O>(&self, f: impl FnOnce(&mut R) -> O) -> Option<O> {
            critical_section::with(|cs| self.registry.borrow(cs).borrow_mut().as_mut().map(f))
        }
    }

    impl<'a, P, T, const MAX: usize> SharedRegistry<ButtonRegistry<'a, P, T, MAX>>
    where
        P: InputPin,
        T: PeriodicTimer,
    {
        /// Entry point for the timer interrupt.
        pub fn tick(&self) {
            self.with(|registry| registry.tick());
        }
    }

    impl<R> Default for SharedRegistry<R> {
        fn default() -> Self {
            SharedRegistry::new()
        }
    }

    #[cfg(test)]
    mod tests {
        use core::cell::Cell;
        use core::convert::Infallible;

        use embedded_hal::digital::ErrorType;

        use super::*;
        use crate::clock::clock::Clock;
        use crate::event::event::{ButtonEvent, ButtonPosition};
        use crate::queue::queue::EventQueue;

        struct FakePin<'c> {
            low: &'c Cell<bool>,
        }

        impl ErrorType for FakePin<'_> {
            type Error = Infallible;
        }

        impl InputPin for FakePin<'_> {
            fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
                Ok(!self.low.get())
            }

            fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
                Ok(self.low.get())
            }
        }

        #[derive(Default)]
        struct FakeTimer {
            now: u32,
            start_failures: u32, // calls to `start` that fail before one succeeds
            starts: u32,
            rearms: u32,
            stopped: bool,
            interval_ms: u32,
        }

        impl Clock for FakeTimer {
            fn now_ms(&self) -> u32 {
                self.now
            }
        }

        impl PeriodicTimer for FakeTimer {
            fn start(&mut self, interval_ms: u32) -> Result<()> {
                if self.start_failures > 0 {
                    self.start_failures -= 1;
                    return Err(Error::TimerSchedule);
                }
                self.starts += 1;
                self.interval_ms = interval_ms;
                Ok(())
            }

            fn rearm(&mut self) -> Result<()> {
                self.rearms += 1;
                self.now += self.interval_ms;
                Ok(())
            }

            fn stop(&mut self) {
                self.stopped = true;
            }
        }

        #[test]
        fn timer_starts_once_for_many_buttons() {
            let level = Cell::new(false);
            let mut queues = [EventQueue::new(), EventQueue::new(), EventQueue::new()];
            let mut registry: ButtonRegistry<'_, FakePin<'_>, FakeTimer, 3> =
                ButtonRegistry::new(FakeTimer::default());
            assert!(!registry.is_running());

            for queue in queues.iter_mut() {
                let (writer, _reader) = queue.split();
                registry
                    .register(EdgeSampler::new(FakePin { low: &level }, writer, 50))
                    .unwrap();
            }
            assert!(registry.is_running());
            assert_eq!(registry.len(), 3);
            assert_eq!(registry.timer().starts, 1);
            assert_eq!(registry.timer().interval_ms, POLL_INTERVAL_MS);
        }

        #[test]
        fn registering_past_capacity_fails() {
            let level = Cell::new(false);
            let mut first = EventQueue::new();
            let mut second = EventQueue::new();
            let mut registry: ButtonRegistry<'_, FakePin<'_>, FakeTimer, 1> =
                ButtonRegistry::new(FakeTimer::default());

            let (writer, _reader) = first.split();
            assert_eq!(registry.register(EdgeSampler::new(FakePin { low: &level }, writer, 50)), Ok(()));
            let (writer, _reader) = second.split();
            assert_eq!(
                registry.register(EdgeSampler::new(FakePin { low: &level }, writer, 50)),
                Err(Error::RegistryFull)
            );
            assert_eq!(registry.len(), 1);
        }

        #[test]
        fn failed_timer_start_leaves_registry_unchanged() {
            let level = Cell::new(false);
            let mut first = EventQueue::new();
            let mut second = EventQueue::new();
            let timer = FakeTimer {
                start_failures: 1,
                ..FakeTimer::default()
            };
            let mut registry: ButtonRegistry<'_, FakePin<'_>, FakeTimer, 1> = ButtonRegistry::new(timer);

            let (writer, _reader) = first.split();
            assert_eq!(
                registry.register(EdgeSampler::new(FakePin { low: &level }, writer, 50)),
                Err(Error::TimerSchedule)
            );
            assert!(registry.is_empty());
            assert!(!registry.is_running());

            let (writer, _reader) = second.split();
            assert_eq!(registry.register(EdgeSampler::new(FakePin { low: &level }, writer, 50)), Ok(()));
            assert_eq!(registry.len(), 1);
            assert!(registry.is_running());
            assert_eq!(registry.timer().starts, 1);
        }

        #[test]
        fn tick_samples_every_button_with_one_timestamp() {
            let left = Cell::new(false);
            let right = Cell::new(false);
            let mut left_queue = EventQueue::new();
            let mut right_queue = EventQueue::new();
            let (left_writer, mut left_reader) = left_queue.split();
            let (right_writer, mut right_reader) = right_queue.split();

            let timer = FakeTimer {
                now: 1_000,
                ..FakeTimer::default()
            };
            let mut registry: ButtonRegistry<'_, FakePin<'_>, FakeTimer, 2> = ButtonRegistry::new(timer);
            registry.register(EdgeSampler::new(FakePin { low: &left }, left_writer, 50)).unwrap();
            registry.register(EdgeSampler::new(FakePin { low: &right }, right_writer, 50)).unwrap();

            left.set(true);
            right.set(true);
            registry.tick();

            let pressed = ButtonEvent::new(1_000, ButtonPosition::Pressed);
            assert_eq!(left_reader.peek(), Some(pressed));
            assert_eq!(right_reader.peek(), Some(pressed));
            left_reader.advance();
            right_reader.advance();
            assert_eq!(registry.timer().rearms, 1);

            // held level: no new edges
            registry.tick();
            assert!(left_reader.is_empty());
            assert!(right_reader.is_empty());
        }

        #[test]
        fn shutdown_stops_the_timer() {
            let level = Cell::new(false);
            let mut queue = EventQueue::new();
            let (writer, _reader) = queue.split();
            let mut registry: ButtonRegistry<'_, FakePin<'_>, FakeTimer, 1> =
                ButtonRegistry::new(FakeTimer::default());
            registry.register(EdgeSampler::new(FakePin { low: &level }, writer, 50)).unwrap();

            let (timer, samplers) = registry.shutdown();
            assert!(timer.stopped);
            assert_eq!(samplers.len(), 1);
        }

        #[test]
        fn shared_registry_ticks_only_when_installed() {
            let level = Cell::new(true);
            let mut queue = EventQueue::new();
            let (writer, reader) = queue.split();
            let timer = FakeTimer {
                now: 500,
                ..FakeTimer::default()
            };
            let mut registry: ButtonRegistry<'_, FakePin<'_>, FakeTimer, 1> = ButtonRegistry::new(timer);
            registry.register(EdgeSampler::new(FakePin { low: &level }, writer, 50)).unwrap();

            let shared: SharedRegistry<ButtonRegistry<'_, FakePin<'_>, FakeTimer, 1>> = SharedRegistry::new();
            shared.tick();
            assert!(shared.install(registry).is_none());
            shared.tick();
            assert_eq!(reader.len(), 1);
            assert_eq!(shared.with(|registry| registry.timer().rearms), Some(1));

            let registry = shared.uninstall().unwrap();
            assert_eq!(registry.len(), 1);
            assert_eq!(shared.with(|registry| registry.len()), None);
        }
    }
}
