//! SPI Commands of the UC81xx style controllers (UC8151, UC8159, UC8176, UC8179,
//! IL0373, IL91874, JD79653A)

use crate::traits;

/// Commands of the controllers driven by power on, data transmission and refresh
///
/// Not every controller knows every command, the opcodes agree where they exist.
///
/// The description of the single commands is mostly taken from IL0398.pdf
#[allow(dead_code)]
#[derive(Copy, Clone, Debug)]
pub(crate) enum Command {
    /// Set Resolution, LUT selection, BWR pixels, gate scan direction, source shift direction, booster switch, soft reset
    /// One Byte of Data:
    ///     0x0F Red Mode, LUT from OTP
    ///     0x1F B/W Mode, LUT from OTP
    ///     0x2F Red Mode, LUT set by registers
    ///     0x3F B/W Mode, LUT set by registers
    PanelSetting = 0x00,
    /// selecting internal and external power
    PowerSetting = 0x01,
    /// After the Power Off command, the driver will power off following the Power Off Sequence. This command will turn off charge
    /// pump, T-con, source driver, gate driver, VCOM, and temperature sensor, but register data will be kept until VDD becomes OFF.
    PowerOff = 0x02,
    /// Setting Power OFF sequence
    PowerOffSequenceSetting = 0x03,
    /// Turning On the Power
    PowerOn = 0x04,
    /// This command enables the internal bandgap, which will be cleared by the next POF.
    PowerOnMeasure = 0x05,
    /// Starting data transmission
    BoosterSoftStart = 0x06,
    /// After this command is transmitted, the chip would enter the deep-sleep mode to save power.
    ///
    /// The only one parameter is a check code, the command would be excuted if check code = 0xA5.
    DeepSleep = 0x07,
    /// Old frame, or the black/white plane on tri-color panels
    DataStartTransmission1 = 0x10,
    DataStop = 0x11,
    /// While user sent this command, driver will refresh display (data/VCOM) according to SRAM data and LUT.
    DisplayRefresh = 0x12,
    /// New frame, or the accent plane on tri-color panels
    DataStartTransmission2 = 0x13,
    DualSpi = 0x15,
    /// IL91874 partial display refresh switch
    PartialDisplayRefresh = 0x16,
    /// Power on, refresh, power off and deep sleep in one go (JD79653A)
    AutoSequence = 0x17,
    LutForVcom = 0x20,
    LutWhiteToWhite = 0x21,
    LutBlackToWhite = 0x22,
    LutWhiteToBlack = 0x23,
    LutBlackToBlack = 0x24,
    /// The command controls the PLL clock frequency.
    PllControl = 0x30,
    TemperatureSensorCommand = 0x40,
    TemperatureSensorSelection = 0x41,
    TemperatureSensorWrite = 0x42,
    TemperatureSensorRead = 0x43,
    /// Undocumented, part of the JD79653A vendor init
    Jd79653Unknown4d = 0x4D,
    /// This command indicates the interval of Vcom and data output. When setting the vertical back porch, the total blanking will
    /// be kept (20 Hsync).
    VcomAndDataIntervalSetting = 0x50,
    LowPowerDetection = 0x51,
    /// This command defines non-overlap period of Gate and Source.
    TconSetting = 0x60,
    /// This command defines alternative resolution and this setting is of higher priority than the RES\[1:0\] in R00H (PSR).
    ResolutionSetting = 0x61,
    SpiFlashControl = 0x65,
    Revision = 0x70,
    /// Read the flags, some controllers only update their busy line after this
    GetStatus = 0x71,
    AutoMeasurementVcom = 0x80,
    ReadVcomValue = 0x81,
    /// This command sets VCOM_DC value.
    VcmDcSetting = 0x82,
    PartialWindow = 0x90,
    PartialIn = 0x91,
    PartialOut = 0x92,
    ProgramMode = 0xA0,
    ActiveProgramming = 0xA1,
    ReadOtp = 0xA2,
    /// Undocumented, part of the JD79653A vendor init
    Jd79653UnknownAa = 0xAA,
    /// Undocumented, part of the JD79653A vendor init
    Jd79653UnknownB6 = 0xB6,
    /// This command is set for saving power during fresh period. If the output voltage of VCOM / Source is from negative to positive or
    /// from positive to negative, the power saving mechanism will be activated.
    PowerSaving = 0xE3,
    /// Flash mode of the UC8159
    FlashMode = 0xE5,
    /// Undocumented, part of the JD79653A vendor init
    Jd79653UnknownE9 = 0xE9,
    /// Undocumented, part of the JD79653A vendor init
    Jd79653UnknownF3 = 0xF3,
    /// Register patch of the IL91874, two data bytes: address and value
    Il91874RegisterPatch = 0xF8,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::PanelSetting.address(), 0x00);

        assert_eq!(Command::DisplayRefresh.address(), 0x12);

        assert_eq!(Command::GetStatus.address(), 0x71);

        assert_eq!(Command::Il91874RegisterPatch.address(), 0xF8);
    }
}
