/// Data byte values used by the GDEW075T7 register writes.
///
/// Most of these are Waveshare's reference defaults for this panel; they are
/// sent verbatim during wakeup.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Power setting (0x01)
    pub const PWR_BD_VSR_VS_VG_EN: u8 = 0x17; // BD_EN=1, VSR_EN=1, VS_EN=1, VG_EN=1
    pub const PWR_VCOM_SLEW_VGH20_VGL20: u8 = 0x17; // VPP_EN=0, VCOM_SLEW=1, VGH=20v, VGL=-20v
    pub const PWR_VDH_15V: u8 = 0x3F;
    pub const PWR_VDL_NEG_15V: u8 = 0x3F;
    pub const PWR_VDHR_5V8: u8 = 0x11;

    // VCOM DC setting (0x82), min 0x00 = -0.1v, max 0x4F = -4.05v
    pub const VDCS_NEG_1V8: u8 = 0x22;

    // Booster soft start (0x06)
    pub const BTST_PHASE_A: u8 = 0x27;
    pub const BTST_PHASE_B: u8 = 0x27;
    pub const BTST_PHASE_C1: u8 = 0x2F;
    pub const BTST_PHASE_C2: u8 = 0x17;

    // PLL control (0x30)
    pub const PLL_150HZ: u8 = 0x06;

    // Panel setting (0x00)
    pub const PSR_CUSTOM_LUT_KW: u8 = 0x3F; // Custom LUT, KW mode, UD=1, SHL=1, SHD_N=1, RST_N=1

    // Dual SPI mode (0x15)
    pub const DUAL_SPI_DISABLED: u8 = 0x00;

    // VCOM and data interval (0x50)
    pub const CDI_BDZ_BDV_N2OCP_DDX_OFF: u8 = 0x00; // BDZ=0, BDV=00, N2OCP=0, DDX=00
    pub const CDI_INTERVAL_10: u8 = 0x07;

    // TCON setting (0x60)
    pub const TCON_S2G_G2S_DEFAULT: u8 = 0x22;

    // Deep sleep (0x07) requires this check byte
    pub const DEEP_SLEEP_CHECK: u8 = 0xA5;
}
