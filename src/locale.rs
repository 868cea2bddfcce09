//! Locale string tables for the calendar face.
//!
//! Name sets are uppercase because the shipped fonts only carry capitals.

/// Month and day names for one language.
#[derive(Debug, Clone, Copy)]
pub struct Locale<'a> {
    pub months: [&'a str; 12],
    /// Full day names, Sunday first.
    pub days: [&'a str; 7],
    /// Short day names used in the forecast row, Sunday first.
    pub day_abbreviations: [&'a str; 7],
}

pub const EN_US: Locale<'static> = Locale {
    months: [
        "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE", "JULY", "AUGUST", "SEPTEMBER",
        "OCTOBER", "NOVEMBER", "DECEMBER",
    ],
    days: [
        "SUNDAY", "MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY", "SATURDAY",
    ],
    day_abbreviations: ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
};

pub const DE_DE: Locale<'static> = Locale {
    months: [
        "JANUAR", "FEBRUAR", "MÄRZ", "APRIL", "MAI", "JUNI", "JULI", "AUGUST", "SEPTEMBER",
        "OKTOBER", "NOVEMBER", "DEZEMBER",
    ],
    days: [
        "SONNTAG", "MONTAG", "DIENSTAG", "MITTWOCH", "DONNERSTAG", "FREITAG", "SAMSTAG",
    ],
    day_abbreviations: ["SO", "MO", "DI", "MI", "DO", "FR", "SA"],
};
