pub struct Cmd;
impl Cmd {
    // Configuration
    pub const PSR: u8 = 0x00; // Panel setting
    pub const PWR: u8 = 0x01; // Power setting
    pub const BTST: u8 = 0x06; // Booster soft start
    pub const PLL: u8 = 0x30; // PLL / frame rate
    pub const VCOM_CDI: u8 = 0x50; // VCOM and data interval
    pub const TCON: u8 = 0x60; // Gate/source non-overlap timing
    pub const TRES: u8 = 0x61; // Resolution setting
    pub const GSST: u8 = 0x65; // Gate start position
    pub const VDCS: u8 = 0x82; // VCOM DC level
    pub const DUAL_SPI: u8 = 0x15;

    // Power states
    pub const POWER_ON: u8 = 0x04;
    pub const POWER_OFF: u8 = 0x02;
    pub const DEEP_SLEEP: u8 = 0x07;

    // Waveform LUT registers
    pub const LUT_VCOM: u8 = 0x20;
    pub const LUT_WW: u8 = 0x21;
    pub const LUT_BW: u8 = 0x22;
    pub const LUT_WB: u8 = 0x23;
    pub const LUT_BB: u8 = 0x24;
    pub const LUT_BD: u8 = 0x25;

    // Frame transmission
    pub const DTM1: u8 = 0x10; // Data start transmission 1 ("old" plane)
    pub const DTM2: u8 = 0x13; // Data start transmission 2 ("new" plane)
    pub const REFRESH: u8 = 0x12;
}

/*
UC8176/IL0373-class command set; the LUT registers 0x20-0x25 are documented
in the IL0373 datasheet rather than the GDEW075T7's own:
https://www.smart-prototyping.com/image/data/9_Modules/EinkDisplay/GDEW0154T8/IL0373.pdf
*/
