pub mod sampler {

    use embedded_hal::digital::InputPin;

    use crate::clock::clock::elapsed_ms;
    use crate::event::event::{ButtonEvent, ButtonPosition};
    use crate::queue::queue::EventWriter;

    /// Interrupt-side half of a button: reads the pin, filters bounce and
    /// queues accepted edges.
    pub struct EdgeSampler<'a, P> {
        pin: P,
        writer: EventWriter<'a>,
        debounce_ms: u32,
        last_debounce_ms: u32, // time of the last accepted transition
    }

    impl<'a, P> EdgeSampler<'a, P>
    where
        P: InputPin,
    {
        /// Read the pin once and feed the level to [`observe`](Self::observe).
        /// A failed read counts as no sample.
        pub fn sample(&mut self, now_ms: u32) {
            match self.pin.is_low() {
                Ok(is_low) => {
                    self.observe(now_ms, ButtonPosition::from_level(is_low));
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("button pin read failed at {=u32} ms", now_ms);
                }
            }
        }
    }

    impl<'a, P> EdgeSampler<'a, P> {
        pub fn new(pin: P, writer: EventWriter<'a>, debounce_ms: u32) -> Self {
            EdgeSampler {
                pin,
                writer,
                debounce_ms,
                last_debounce_ms: 0,
            }
        }

        /// Debounce one raw position. Returns `true` when the transition was
        /// accepted, even if the queue had to drop its event.
        pub fn observe(&mut self, now_ms: u32, position: ButtonPosition) -> bool {
            if position == self.writer.position() {
                return false;
            }
            // Bounce: the steady position stays as it was so the next tick
            // compares against it again.
            if elapsed_ms(now_ms, self.last_debounce_ms) < self.debounce_ms {
                return false;
            }
            self.writer.push(ButtonEvent::new(now_ms, position));
            self.last_debounce_ms = now_ms;
            self.writer.set_position(position);
            true
        }

        pub fn position(&self) -> ButtonPosition {
            self.writer.position()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::event::event::ButtonPosition::{Pressed, Released};
        use crate::queue::queue::EventQueue;

        #[test]
        fn bounce_inside_interval_is_ignored() {
            let mut queue = EventQueue::new();
            let (writer, mut reader) = queue.split();
            let mut sampler = EdgeSampler::new((), writer, 50);

            assert!(sampler.observe(1_000, Pressed));
            assert!(!sampler.observe(1_010, Released));
            assert!(!sampler.observe(1_020, Pressed));
            assert!(!sampler.observe(1_040, Released));
            assert!(sampler.observe(1_050, Released));

            assert_eq!(reader.peek(), Some(ButtonEvent::new(1_000, Pressed)));
            reader.advance();
            assert_eq!(reader.peek(), Some(ButtonEvent::new(1_050, Released)));
            reader.advance();
            assert!(reader.is_empty());
        }

        #[test]
        fn rejected_edge_leaves_position_untouched() {
            let mut queue = EventQueue::new();
            let (writer, reader) = queue.split();
            let mut sampler = EdgeSampler::new((), writer, 50);

            sampler.observe(1_000, Pressed);
            sampler.observe(1_020, Released);
            assert_eq!(sampler.position(), Pressed);
            assert_eq!(reader.position(), Pressed);
        }

        #[test]
        fn steady_level_produces_nothing() {
            let mut queue = EventQueue::new();
            let (writer, reader) = queue.split();
            let mut sampler = EdgeSampler::new((), writer, 50);

            for t in (0..500).step_by(10) {
                assert!(!sampler.observe(t, Released));
            }
            assert!(reader.is_empty());
        }

        #[test]
        fn zero_debounce_accepts_every_transition() {
            let mut queue = EventQueue::new();
            let (writer, reader) = queue.split();
            let mut sampler = EdgeSampler::new((), writer, 0);

            for t in 0..6 {
                let position = if t % 2 == 0 { Pressed } else { Released };
                assert!(sampler.observe(t, position));
            }
            assert_eq!(reader.len(), 6);
        }

        #[test]
        fn first_edge_waits_for_debounce_after_boot() {
            let mut queue = EventQueue::new();
            let (writer, _reader) = queue.split();
            let mut sampler = EdgeSampler::new((), writer, 50);

            assert!(!sampler.observe(10, Pressed));
            assert!(sampler.observe(50, Pressed));
        }

        #[test]
        fn debounce_is_wraparound_safe() {
            let mut queue = EventQueue::new();
            let (writer, _reader) = queue.split();
            let mut sampler = EdgeSampler::new((), writer, 50);

            assert!(sampler.observe(u32::MAX - 20, Pressed));
            assert!(!sampler.observe(10, Released));
            assert!(sampler.observe(29, Released));
        }
    }
}
