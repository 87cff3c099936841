pub mod scheduler {

    use crate::clock::clock::Clock;
    use crate::error::error::Result;

    /// Hardware timer that raises the sampling interrupt at a fixed period.
    ///
    /// It is also the clock used to stamp sampled edges, so the interrupt
    /// handler needs nothing besides the registry that owns the timer.
    pub trait PeriodicTimer: Clock {
        /// Arm the first tick, `interval_ms` from now.
        fn start(&mut self, interval_ms: u32) -> Result<()>;

        /// Acknowledge the tick being handled and arm the next one.
        fn rearm(&mut self) -> Result<()>;

        fn stop(&mut self);
    }
}
