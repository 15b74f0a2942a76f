use num_complex::Complex64;

pub type Float = f64;
pub type Complex = Complex64;

/// Half-open integer range the upper random gain bound is drawn from.
pub const MAX_BOUND_RANGE: std::ops::Range<u32> = 2..150;

pub const SECONDS_PER_DAY: Float = 86_400.0;

pub const POL_XX: i64 = -5;
pub const POL_YY: i64 = -6;

pub const CAL_STYLE: &str = "redundant";
pub const CAL_TYPE: &str = "gain";
pub const GAIN_CONVENTION: &str = "multiply";
pub const X_ORIENTATION: &str = "east";

pub const CALFILE_SUFFIX: &str = ".cal.npz";
