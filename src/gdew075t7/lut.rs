//! Waveform look-up tables for 4-level greyscale on the GDEW075T7.
//!
//! Each LUT is 42 bytes: seven rows of one voltage-select byte (four 2-bit
//! level codes), four frame counts, and a repeat count. The greyscale set
//! comes from the GxEPD2_4G project (waveforms provided by GoodDisplay for
//! a related panel), with the second waveform repeated twice to reduce
//! ghosting:
//! <https://github.com/ZinggJM/GxEPD2_4G/blob/master/src/epd/GxEPD2_750_T7.cpp>
//!
//! These byte tables are validated against real panels, not derived from a
//! datasheet. Do not edit them; any change alters the physical drive
//! waveform and shows up as ghosting or contrast shifts.

// Voltage levels selectable in a LUT row
const GND: u8 = 0b00;
const VDH: u8 = 0b01;
const VDL: u8 = 0b10;
const VCOM_VCMDC: u8 = 0b00;

/// Builds a 42-byte LUT from seven `[l0, t0, l1, t1, l2, t2, l3, t3; r]`
/// rows, where `l*` are the voltages applied at each step, `t*` the number
/// of frames each is held, and `r` how often the row repeats. Preserves
/// some readability over raw hex.
macro_rules! lut {
    ($([$l0:expr, $t0:expr, $l1:expr, $t1:expr, $l2:expr, $t2:expr, $l3:expr, $t3:expr; $r:expr]),* $(,)?) => {
        [$(
            ($l0 << 6) | ($l1 << 4) | ($l2 << 2) | $l3, $t0, $t1, $t2, $t3, $r
        ),*]
    };
}

// Greyscale waveform tuning
const T1: u8 = 10;
const T2: u8 = 20;
const R2: u8 = 2;
const T3_1: u8 = 20;
const T3_2: u8 = 10;

pub const LUT_VCOM_2BIT: [u8; 42] = lut![
    [VCOM_VCMDC, T1, 0, 0, 0, 0, 0, 0; 1],
    [VDH, T2, VDL, T2, 0, 0, 0, 0; R2],
    [VCOM_VCMDC, T3_1, 0, 0, 0, 0, 0, 0; 1],
    [VCOM_VCMDC, 19, VCOM_VCMDC, 10, VCOM_VCMDC, 1, 0, 0; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

pub const LUT_WHITE_2BIT: [u8; 42] = lut![
    [VDH, T1, 0, 0, 0, 0, 0, 0; 1],
    [VDL, T2, VDH, T2, 0, 0, 0, 0; R2],
    [GND, T3_1, VDH, T3_2, 0, 0, 0, 0; 1],
    [VDL, 19, VDL, 1, 0, 0, 0, 0; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

pub const LUT_DGREY_2BIT: [u8; 42] = lut![
    [VDH, T1, 0, 0, 0, 0, 0, 0; 1],
    [VDL, T2, VDH, T2, 0, 0, 0, 0; R2],
    [GND, T3_1, GND, T3_2, 0, 0, 0, 0; 1],
    [VDL, 12, VDH, 1, VDL, 3, VDH, 4; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

pub const LUT_LGREY_2BIT: [u8; 42] = lut![
    [VDH, T1, 0, 0, 0, 0, 0, 0; 1],
    [VDL, T2, VDH, T2, 0, 0, 0, 0; R2],
    [GND, T3_1, GND, T3_2, 0, 0, 0, 0; 1],
    [VDL, 11, VDH, 4, VDL, 4, VDH, 1; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

pub const LUT_BLACK_2BIT: [u8; 42] = lut![
    [VDL, T1, 0, 0, 0, 0, 0, 0; 1],
    [VDL, T2, VDH, T2, 0, 0, 0, 0; R2],
    [GND, T3_1, VDL, T3_2, 0, 0, 0, 0; 1],
    [VDH, 19, VDH, 1, 0, 0, 0, 0; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

// Single-step waveforms for blanking the screen quickly

pub const LUT_VCOM_FAST_CLEAR: [u8; 42] = lut![
    [VCOM_VCMDC, 15, VCOM_VCMDC, 15, 0, 0, 0, 0; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

pub const LUT_WHITE_FAST_CLEAR: [u8; 42] = lut![
    [GND, 15, VDL, 15, 0, 0, 0, 0; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

pub const LUT_BLACK_FAST_CLEAR: [u8; 42] = lut![
    [GND, 15, VDH, 15, 0, 0, 0, 0; 1],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
    [0, 0, 0, 0, 0, 0, 0, 0; 0],
];

/// Not waveforms: these map each 2-bit greyscale value (white, light grey,
/// dark grey, black) to the "old" (DTM1) and "new" (DTM2) data bit sent to
/// the panel. Together the two planes select which waveform LUT drives each
/// pixel.
pub const LUT_DTM1: [u8; 4] = [0, 0, 1, 1];
pub const LUT_DTM2: [u8; 4] = [0, 1, 0, 1];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_lut_rows_pack_levels_and_timings() {
        // Row layout: voltage-select byte, four frame counts, repeat count.
        assert_eq!(&LUT_WHITE_2BIT[0..6], &[0x40, 10, 0, 0, 0, 1]);
        assert_eq!(&LUT_WHITE_2BIT[6..12], &[0x90, 20, 20, 0, 0, 2]);
        assert_eq!(&LUT_WHITE_2BIT[12..18], &[0x10, 20, 10, 0, 0, 1]);
        assert_eq!(&LUT_WHITE_2BIT[18..24], &[0xA0, 19, 1, 0, 0, 1]);
        assert_eq!(&LUT_WHITE_2BIT[24..], &[0; 18]);
    }

    #[test]
    fn vcom_lut_keeps_vcom_at_dc_outside_the_balanced_phase() {
        assert_eq!(&LUT_VCOM_2BIT[0..6], &[0x00, 10, 0, 0, 0, 1]);
        assert_eq!(&LUT_VCOM_2BIT[6..12], &[0x60, 20, 20, 0, 0, 2]);
    }

    #[test]
    fn fast_clear_luts_are_single_step() {
        assert_eq!(&LUT_WHITE_FAST_CLEAR[0..6], &[0x20, 15, 15, 0, 0, 1]);
        assert_eq!(&LUT_BLACK_FAST_CLEAR[0..6], &[0x10, 15, 15, 0, 0, 1]);
        assert_eq!(&LUT_WHITE_FAST_CLEAR[6..], &[0; 36]);
    }

    #[test]
    fn dtm_maps_split_grey_levels_across_planes() {
        // White and black agree across planes; the greys differ, which is
        // what selects the intermediate waveforms.
        assert_eq!(LUT_DTM1, [0, 0, 1, 1]);
        assert_eq!(LUT_DTM2, [0, 1, 0, 1]);
    }
}
