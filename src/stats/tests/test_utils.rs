use crate::stats::band::Band;

/// Builds a band from row slices
pub fn band_from_rows(rows: &[&[f64]]) -> Band {
    let height = rows.len();
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Band::new(width, height, data).unwrap()
}

/// Builds a uniform band
pub fn uniform_band(width: usize, height: usize, value: f64) -> Band {
    Band::filled(width, height, value)
}

/// The 3x3 foreground of the reference scenario: value 5 everywhere,
/// the four corners no-data
pub fn reference_foreground() -> Band {
    let nan = f64::NAN;
    band_from_rows(&[
        &[nan, 5.0, nan],
        &[5.0, 5.0, 5.0],
        &[nan, 5.0, nan],
    ])
}

/// The 5x5 background of the reference scenario: value 10 everywhere,
/// a 3x3 no-data hole in the center
pub fn reference_background() -> Band {
    let mut band = Band::filled(5, 5, 10.0);
    for y in 1..4 {
        for x in 1..4 {
            band.set(x, y, f64::NAN);
        }
    }
    band
}
