//! RP2040 timer glue: the 1 MHz system timer as [`Clock`] and `ALARM0` as the
//! periodic sampling interrupt (`TIMER_IRQ_0`).

use fugit::MicrosDurationU32;
use rp2040_hal::timer::{Alarm, Alarm0, Timer};

use crate::clock::clock::Clock;
use crate::error::error::{Error, Result};
use crate::scheduler::scheduler::PeriodicTimer;

impl Clock for Timer {
    fn now_ms(&self) -> u32 {
        // the millisecond counter wraps after ~49 days
        (self.get_counter().ticks() / 1_000) as u32
    }
}

pub struct AlarmTimer {
    timer: Timer,
    alarm: Alarm0,
    interval: MicrosDurationU32,
}

impl AlarmTimer {
    pub fn new(timer: Timer, alarm: Alarm0) -> Self {
        AlarmTimer {
            timer,
            alarm,
            interval: MicrosDurationU32::millis(crate::POLL_INTERVAL_MS),
        }
    }
}

impl Clock for AlarmTimer {
    fn now_ms(&self) -> u32 {
        self.timer.now_ms()
    }
}

impl PeriodicTimer for AlarmTimer {
    fn start(&mut self, interval_ms: u32) -> Result<()> {
        self.interval = MicrosDurationU32::millis(interval_ms);
        self.alarm
            .schedule(self.interval)
            .map_err(|_| Error::TimerSchedule)?;
        self.alarm.enable_interrupt();
        Ok(())
    }

    fn rearm(&mut self) -> Result<()> {
        // the interrupt keeps firing until it is cleared
        self.alarm.clear_interrupt();
        self.alarm
            .schedule(self.interval)
            .map_err(|_| Error::TimerSchedule)
    }

    fn stop(&mut self) {
        self.alarm.disable_interrupt();
        self.alarm.clear_interrupt();
        if self.alarm.cancel().is_err() {
            defmt::warn!("could not cancel button alarm");
        }
    }
}
