use serde::{Serialize, Deserialize};

use crate::error::{PlaylinkError, PlaylinkResult};

/// Center frequencies of the node's 15 equalizer bands, in Hz. Band commands
/// accept either a 1-based band number or one of these literal frequencies.
pub const HZ_BANDS: [u32; 15] = [
    20, 40, 63, 100, 150, 250, 400, 450, 630, 1000, 1600, 2500, 4000, 10000, 16000,
];

/// A single band adjustment as the node expects it: band index 0-14 and a
/// gain multiplier between -0.25 (muted) and 1.0.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub band: u8,
    pub gain: f64,
}

/// Converts a session's gain array into the per-band list sent to the node.
pub fn bands_from_levels(levels: &[f64; 15]) -> Vec<Band> {
    levels.iter().enumerate().map(|(index, gain)| {
        Band {
            band: index as u8,
            gain: *gain,
        }
    }).collect()
}

/// Resolves a user-supplied band reference to a 0-based index. Accepts the
/// band number (1-15) or the band's center frequency from [`HZ_BANDS`].
pub fn resolve_band(band: u32) -> PlaylinkResult<usize> {
    if (1..=15).contains(&band) {
        return Ok(band as usize - 1);
    }

    HZ_BANDS.iter()
        .position(|hz| *hz == band)
        .ok_or(PlaylinkError::NonExistentEqBand)
}

/// Scales a user-supplied gain (-10 to 10) down to the node's multiplier
/// range. Out-of-bounds input is a usage error, not clamped.
pub fn scale_gain(gain: f64) -> PlaylinkResult<f64> {
    if gain.abs() > 10.0 {
        return Err(PlaylinkError::EqGainOutOfBounds);
    }

    Ok(gain / 10.0)
}

/// Named preset gain curves. `flat` doubles as the reset state.
pub fn preset(name: &str) -> PlaylinkResult<[f64; 15]> {
    match name.to_lowercase().as_str() {
        "flat" => Ok([0.0; 15]),
        "boost" => Ok([
            -0.075, 0.125, 0.125, 0.1, 0.1, 0.05, 0.075, 0.0, 0.0, 0.0, 0.0, 0.0, 0.125, 0.15,
            0.05,
        ]),
        "metal" => Ok([
            0.0, 0.1, 0.1, 0.15, 0.13, 0.1, 0.0, 0.125, 0.175, 0.175, 0.125, 0.125, 0.1, 0.075,
            0.0,
        ]),
        "piano" => Ok([
            -0.25, -0.25, -0.125, 0.0, 0.25, 0.25, 0.0, -0.25, -0.25, 0.0, 0.0, 0.5, 0.25,
            -0.025, 0.0,
        ]),
        _ => Err(PlaylinkError::InvalidEqPreset),
    }
}
