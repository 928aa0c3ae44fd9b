pub const J2000_JD: f64 = 2451545.0;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const SQRT2: f64 = 1.4142135623730950488;

/// Astronomical Unit in kilometers (derived from IAU 2012 definition)
pub const AU_KM: f64 = 149_597_870.7;

/// Obliquity of the VSOP87 ecliptic relative to the J2000 equator, in degrees.
#[allow(clippy::excessive_precision)]
pub const VSOP87_OBLIQUITY_DEG: f64 = 23.4392803055555555556;

/// Rotation of the VSOP87 x-axis in the J2000 ecliptic plane, in degrees.
pub const VSOP87_FRAME_ROTATION_DEG: f64 = 0.0000275;

/// Rows of the J2000 equatorial to galactic rotation.
#[allow(clippy::excessive_precision)]
pub const J2000_TO_GALACTIC: [[f64; 3]; 3] = [
    [-0.054875539726, -0.873437108010, -0.483834985808],
    [0.494109453312, -0.444829589425, 0.746982251810],
    [-0.867666135858, -0.198076386122, 0.455983795705],
];
