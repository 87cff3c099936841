pub mod queue {
    //! Per-button event queue shared by the timer interrupt and the main loop.
    //!
    //! ```text
    //!   timer interrupt                      main loop
    //!   EdgeSampler ── EventWriter ──> [ spsc ring ] ──> EventReader ── MultiPressButton
    //!                       └── stores ──> pressed <── loads ──┘
    //! ```
    //!
    //! The writer owns the ring's tail index and the `pressed` cell, the reader
    //! owns the head index. Each half only ever stores to the fields it owns,
    //! so neither side needs a lock.

    use core::sync::atomic::{AtomicBool, Ordering};

    use heapless::spsc::{Consumer, Producer, Queue};

    use crate::config::config::EVENT_QUEUE_SIZE;
    use crate::event::event::{ButtonEvent, ButtonPosition};

    pub struct EventQueue {
        events: Queue<ButtonEvent, EVENT_QUEUE_SIZE>, // tail: writer-owned, head: reader-owned
        pressed: AtomicBool,                          // writer-owned: last accepted raw position
    }

    impl EventQueue {
        pub const fn new() -> Self {
            EventQueue {
                events: Queue::new(),
                pressed: AtomicBool::new(false),
            }
        }

        /// Split into the interrupt-side writer and the main-loop reader.
        pub fn split(&mut self) -> (EventWriter<'_>, EventReader<'_>) {
            let (producer, consumer) = self.events.split();
            let pressed: &AtomicBool = &self.pressed;
            (
                EventWriter { producer, pressed },
                EventReader { consumer, pressed },
            )
        }
    }

    impl Default for EventQueue {
        fn default() -> Self {
            EventQueue::new()
        }
    }

    /// Producer half. Lives with the [`EdgeSampler`](crate::EdgeSampler).
    pub struct EventWriter<'a> {
        producer: Producer<'a, ButtonEvent, EVENT_QUEUE_SIZE>,
        pressed: &'a AtomicBool,
    }

    impl<'a> EventWriter<'a> {
        /// Append an event. A full queue drops the new event and returns `false`.
        pub fn push(&mut self, event: ButtonEvent) -> bool {
            match self.producer.enqueue(event) {
                Ok(()) => true,
                Err(_dropped) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("button queue full, dropped {}", _dropped);
                    false
                }
            }
        }

        pub fn is_full(&self) -> bool {
            !self.producer.ready()
        }

        pub fn position(&self) -> ButtonPosition {
            ButtonPosition::from_level(self.pressed.load(Ordering::Acquire))
        }

        pub fn set_position(&self, position: ButtonPosition) {
            self.pressed.store(position.is_pressed(), Ordering::Release);
        }
    }

    /// Consumer half. Lives with the [`MultiPressButton`](crate::MultiPressButton).
    pub struct EventReader<'a> {
        consumer: Consumer<'a, ButtonEvent, EVENT_QUEUE_SIZE>,
        pressed: &'a AtomicBool,
    }

    impl<'a> EventReader<'a> {
        /// Oldest queued event, left in place until [`advance`](Self::advance).
        pub fn peek(&self) -> Option<ButtonEvent> {
            self.consumer.peek().copied()
        }

        /// Release the oldest event's slot back to the writer.
        pub fn advance(&mut self) {
            self.consumer.dequeue();
        }

        pub fn len(&self) -> usize {
            self.consumer.len()
        }

        pub fn is_empty(&self) -> bool {
            !self.consumer.ready()
        }

        /// Last raw position accepted by the sampler, whether or not its event
        /// made it into the queue.
        pub fn position(&self) -> ButtonPosition {
            ButtonPosition::from_level(self.pressed.load(Ordering::Acquire))
        }
    }

}
