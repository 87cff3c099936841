pub mod error {
    use derive_more::derive::{Display, Error};

    /// A specialized `Result` where the error is this crate's `Error` type.
    pub type Result<T, E = Error> = core::result::Result<T, E>;

    /// Setup-time failures. Sampling and classification never return errors;
    /// they drop events instead.
    #[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Error {
        #[display("button registry is full")]
        RegistryFull,

        #[display("periodic timer could not be scheduled")]
        TimerSchedule,
    }
}
