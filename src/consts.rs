use crate::CalendarDate;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

pub(crate) const MONTHS_PER_YEAR: i64 = 12;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Day suffix appended to a `YYYY-MM` month input to obtain a stored date
pub const MONTH_INPUT_DAY_SUFFIX: &str = "-01";

/// Earliest date with review data
pub const MIN_DATE: CalendarDate = CalendarDate::from_ymd_const(2024, 1, 1);
/// Latest date with review data
pub const MAX_DATE: CalendarDate = CalendarDate::from_ymd_const(2025, 5, 31);

/// Primary period shown when a page is opened
pub const DEFAULT_PRIMARY_START: &str = "2025-03-01";
pub const DEFAULT_PRIMARY_END: &str = "2025-05-31";
/// Comparison period shown when a page is opened
pub const DEFAULT_SECONDARY_START: &str = "2024-12-01";
pub const DEFAULT_SECONDARY_END: &str = "2025-02-28";

/// Environment variable overriding the lower calendar bound
pub const MIN_DATE_ENV: &str = "REVIEW_PERIOD_MIN_DATE";
/// Environment variable overriding the upper calendar bound
pub const MAX_DATE_ENV: &str = "REVIEW_PERIOD_MAX_DATE";
