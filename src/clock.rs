pub mod clock {

    /// Monotonic millisecond clock. The counter may wrap; compare times with
    /// [`elapsed_ms`] only.
    pub trait Clock {
        fn now_ms(&self) -> u32;
    }

    /// Milliseconds from `since_ms` to `now_ms`, correct across one counter wrap.
    pub fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
        now_ms.wrapping_sub(since_ms)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn elapsed_survives_wraparound() {
            assert_eq!(elapsed_ms(150, 100), 50);
            assert_eq!(elapsed_ms(20, u32::MAX - 9), 30);
        }
    }
}
