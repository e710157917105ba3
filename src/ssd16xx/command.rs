//! SPI Commands of the SSD1608, SSD1675, SSD1680 and SSD1681 controllers

use crate::traits;

/// Commands shared by the SSD16xx controllers
///
/// Older parts (SSD1608) only know a subset, the opcodes never clash.
///
/// For more infos about the addresses and what they are doing look into the pdfs
#[allow(dead_code)]
#[derive(Copy, Clone, Debug)]
pub(crate) enum Command {
    /// Driver Output control
    ///     3 Databytes:
    ///     A[7:0]
    ///     0.. A[8]
    ///     0.. B[2:0]
    ///     Default: Set A[8:0] = 0x127 and B[2:0] = 0x0
    DriverOutputControl = 0x01,
    /// VGH, last but one byte of a 159 byte waveform
    GateDrivingVoltage = 0x03,
    /// VSH1, VSH2, VSL
    SourceDrivingVoltage = 0x04,
    /// Booster Soft start control
    ///     3 Databytes:
    ///     1.. A[6:0]
    ///     1.. B[6:0]
    ///     1.. C[6:0]
    ///     Default: A[7:0] = 0xCF, B[7:0] = 0xCE, C[7:0] = 0x8D
    BoosterSoftStartControl = 0x0C,
    GateScanStartPosition = 0x0F,
    /// Deep Sleep Mode Control
    ///     1 Databyte:
    ///     0.. A[0]
    ///     Values:
    ///         A[0] = 0: Normal Mode (POR)
    ///         A[0] = 1: Enter Deep Sleep Mode
    DeepSleepMode = 0x10,
    /// Data Entry mode setting
    DataEntryModeSetting = 0x11,
    SwReset = 0x12,
    HvReadyDetection = 0x14,
    VciDetection = 0x15,
    /// 0x80 selects the internal sensor
    TemperatureSensorSelection = 0x18,
    TemperatureSensorWrite = 0x1A,
    TemperatureSensorRead = 0x1B,
    MasterActivation = 0x20,
    DisplayUpdateControl1 = 0x21,
    DisplayUpdateControl2 = 0x22,
    /// Black/white RAM
    WriteRam = 0x24,
    /// Red RAM, or the old frame for the differential waveform
    WriteRam2 = 0x26,
    ReadRam = 0x27,
    VcomSense = 0x28,
    VcomSenseDuration = 0x29,
    ProgramVcomOtp = 0x2A,
    WriteVcomRegister = 0x2C,
    OtpRegisterRead = 0x2D,
    UserIdRead = 0x2E,
    StatusBitRead = 0x2F,
    ProgramWsOtp = 0x30,
    LoadWsOtp = 0x31,
    /// 30 bytes on SSD1608, 153 bytes on SSD1680/SSD1681
    WriteLutRegister = 0x32,
    CrcCalculation = 0x34,
    CrcStatusRead = 0x35,
    ProgramOtpSelection = 0x36,
    /// Display option, selects the ping-pong mode for partial refreshes
    WriteOtpSelection = 0x37,
    WriteUserId = 0x38,
    OtpProgramMode = 0x39,
    SetDummyLinePeriod = 0x3A,
    SetGateLineWidth = 0x3B,
    BorderWaveformControl = 0x3C,
    /// EOPT, first byte after the waveform
    WriteLutRegisterEnd = 0x3F,
    ReadRamOption = 0x41,
    SetRamXAddressStartEndPosition = 0x44,
    SetRamYAddressStartEndPosition = 0x45,
    AutoWriteRedRamRegularPattern = 0x46,
    AutoWriteBwRamRegularPattern = 0x47,
    SetRamXAddressCounter = 0x4E,
    SetRamYAddressCounter = 0x4F,
    /// Terminates a frame write on the SSD1608
    Nop = 0xFF,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// These are not directly documented, but the bitfield is easily reversed from
/// documentation and sample code
/// [7|6|5|4|3|2|1|0]
///  | | | | | | | `--- disable clock
///  | | | | | | `----- disable analog
///  | | | | | `------- display
///  | | | | `--------- display mode 2 (partial waveform of the OTP)
///  | | | `----------- load LUT
///  | | `------------- load temp
///  | `--------------- enable clock
///  `----------------- enable analog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DisplayUpdateControl2(pub u8);

#[allow(dead_code)]
impl DisplayUpdateControl2 {
    pub const fn new() -> DisplayUpdateControl2 {
        DisplayUpdateControl2(0x00)
    }

    pub const fn disable_clock(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 0)
    }

    pub const fn disable_analog(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 1)
    }

    pub const fn display(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 2)
    }

    pub const fn mode_2(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 3)
    }

    pub const fn load_lut(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 4)
    }

    pub const fn load_temp(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 5)
    }

    pub const fn enable_clock(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 6)
    }

    pub const fn enable_analog(self) -> Self {
        DisplayUpdateControl2(self.0 | 1 << 7)
    }
}
