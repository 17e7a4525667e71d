//! Error type for the bootloader as a whole.
//!
//! Nothing in the control core propagates an error to a caller: recoverable
//! conditions are resolved locally by continuing the relevant loop. These
//! values exist so the condition can be logged, and so the external command
//! layer can relay a textual description to the host.
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Error {
    /// Error caused by a low level peripheral driver
    DriverError(&'static str),
    /// The data channel did not report Ready within the configured bound
    TransportTimeout,
    /// Watchdog reload value does not fit the 12 bit reload register
    WatchdogReloadOutOfRange,
}

impl Error {
    /// Reports the error through an abstract text sink, with newline.
    pub fn report<W: uWrite + ?Sized>(&self, sink: &mut W) -> Result<(), W::Error> {
        uwrite!(sink, "{}\n", self)
    }
}

impl uDisplay for Error {
    fn fmt<W: uWrite + ?Sized>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error> {
        match self {
            Error::DriverError(text) => uwrite!(f, "[Driver Error] -> {}", *text),
            Error::TransportTimeout => {
                uwrite!(f, "[Transport Error] -> Channel did not become ready in time")
            }
            Error::WatchdogReloadOutOfRange => {
                uwrite!(f, "[Configuration Error] -> Watchdog reload exceeds 12 bits")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{convert::Infallible, string::String};

    #[derive(Default)]
    struct TextSink {
        text: String,
    }

    impl uWrite for TextSink {
        type Error = Infallible;
        fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
            self.text.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn errors_report_a_single_descriptive_line() {
        // Given
        let mut sink = TextSink::default();

        // When
        Error::DriverError("USB peripheral stalled").report(&mut sink).unwrap();
        Error::TransportTimeout.report(&mut sink).unwrap();

        // Then
        assert_eq!(
            "[Driver Error] -> USB peripheral stalled\n\
             [Transport Error] -> Channel did not become ready in time\n",
            sink.text
        );
    }

    #[test]
    fn driver_errors_convert_into_the_crate_error() {
        use crate::hal::doubles::error::FakeError;
        let error: Error = FakeError.into();
        assert!(matches!(error, Error::DriverError(_)));
    }
}
