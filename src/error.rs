use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{digital, spi};

/// Epd error type
///
/// Only the bus and the control lines can fail. A panel that stays busy past
/// its timeout is logged and reported through [`Refresh`](crate::traits::Refresh),
/// never as an error.
pub enum ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    /// Encountered an SPI error
    SpiError(SPI::Error),

    /// Encountered an error on Busy GPIO
    BusyError(BUSY::Error),

    /// Encountered an error on DC GPIO
    DcError(DC::Error),

    /// Encountered an error on RST GPIO
    RstError(RST::Error),
}

impl<SPI, BUSY, DC, RST> Clone for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    SPI::Error: Clone,
    BUSY: digital::ErrorType,
    BUSY::Error: Clone,
    DC: digital::ErrorType,
    DC::Error: Clone,
    RST: digital::ErrorType,
    RST::Error: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::SpiError(err) => Self::SpiError(err.clone()),
            Self::BusyError(err) => Self::BusyError(err.clone()),
            Self::DcError(err) => Self::DcError(err.clone()),
            Self::RstError(err) => Self::RstError(err.clone()),
        }
    }
}

impl<SPI, BUSY, DC, RST> PartialEq for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    SPI::Error: PartialEq,
    BUSY: digital::ErrorType,
    BUSY::Error: PartialEq,
    DC: digital::ErrorType,
    DC::Error: PartialEq,
    RST: digital::ErrorType,
    RST::Error: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SpiError(a), Self::SpiError(b)) => a == b,
            (Self::BusyError(a), Self::BusyError(b)) => a == b,
            (Self::DcError(a), Self::DcError(b)) => a == b,
            (Self::RstError(a), Self::RstError(b)) => a == b,
            _ => false,
        }
    }
}

impl<SPI, BUSY, DC, RST> Display for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "spi error: {:?}", spi::Error::kind(err)),
            Self::BusyError(err) => {
                write!(f, "busy pin error: {:?}", digital::Error::kind(err))
            }
            Self::DcError(err) => write!(f, "dc pin error: {:?}", digital::Error::kind(err)),
            Self::RstError(err) => {
                write!(f, "reset pin error: {:?}", digital::Error::kind(err))
            }
        }
    }
}

impl<SPI, BUSY, DC, RST> Debug for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => f.debug_tuple("SpiError").field(err).finish(),
            Self::BusyError(err) => f.debug_tuple("BusyError").field(err).finish(),
            Self::DcError(err) => f.debug_tuple("DcError").field(err).finish(),
            Self::RstError(err) => f.debug_tuple("RstError").field(err).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::{digital::Mock as PinMock, spi::Mock as SpiMock, MockError};
    use std::format;
    use std::io::ErrorKind::Other;

    type Error = ErrorKind<SpiMock<u8>, PinMock, PinMock, PinMock>;

    #[test]
    fn display_names_the_failing_line() {
        let err: Error = ErrorKind::DcError(MockError::Io(Other));
        assert_eq!(format!("{}", err), "dc pin error: Other");

        let err: Error = ErrorKind::SpiError(spi::ErrorKind::Other);
        assert_eq!(format!("{}", err), "spi error: Other");
    }

    #[test]
    fn equality_is_per_line() {
        let a: Error = ErrorKind::RstError(MockError::Io(Other));
        let b: Error = ErrorKind::BusyError(MockError::Io(Other));
        assert_eq!(a.clone(), a);
        assert_ne!(a, b);
    }
}
