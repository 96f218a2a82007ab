pub mod hebrew;
pub mod julian;

pub use hebrew::{
    HebrewYearType, HEBREW_MONTH_LENGTHS, HEBREW_MONTH_NAMES, METONIC_LEAP, is_leap_year,
    metonic_position, tishri_julian_day, year_length, year_type,
};
pub use julian::{to_civil_date, to_julian_day, weekday_number, weekday_of, year_after_creation};
