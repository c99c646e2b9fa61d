//! Slider position to color temperature mapping.
//!
//! A [`KelvinScale`] is an ordered table of [`KelvinStop`]s spanning slider
//! positions 0 to 100. [`map_to_color`] finds the pair of stops bracketing a
//! position and interpolates the color channels and the Kelvin value
//! linearly between them.
//!
//! The default table runs from a warm 2700K incandescent tone through a
//! 4000K neutral white to a 6500K daylight tone:
//!
//! | Position | Color     | Kelvin |
//! |----------|-----------|--------|
//! | 0        | `#FFDAB3` | 2700   |
//! | 40       | `#F2E6D8` | 4000   |
//! | 100      | `#D6E4FF` | 6500   |

use crate::error::LampError;
use crate::utils::color::LampColor;
use serde::{Deserialize, Serialize};

pub const SLIDER_MIN: f32 = 0.0;
pub const SLIDER_MAX: f32 = 100.0;

/// One point on the temperature curve.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KelvinStop {
    pub position: f32,
    pub color: LampColor,
    pub kelvin: u32,
}

impl KelvinStop {
    #[must_use]
    pub const fn new(position: f32, color: LampColor, kelvin: u32) -> Self {
        Self {
            position,
            color,
            kelvin,
        }
    }
}

pub const DEFAULT_STOPS: [KelvinStop; 3] = [
    KelvinStop::new(0.0, LampColor::from_u32(0xFFDAB3), 2700),
    KelvinStop::new(40.0, LampColor::from_u32(0xF2E6D8), 4000),
    KelvinStop::new(100.0, LampColor::from_u32(0xD6E4FF), 6500),
];

/// A validated stop table.
///
/// Positions are strictly increasing, the first stop sits at [`SLIDER_MIN`]
/// and the last at [`SLIDER_MAX`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<KelvinStop>", into = "Vec<KelvinStop>")]
pub struct KelvinScale {
    stops: Vec<KelvinStop>,
}

impl KelvinScale {
    pub fn new(stops: Vec<KelvinStop>) -> Result<Self, LampError> {
        if stops.len() < 2 {
            return Err(LampError::InvalidScale(format!(
                "need at least 2 stops, got {}",
                stops.len()
            )));
        }

        if stops.iter().any(|stop| !stop.position.is_finite()) {
            return Err(LampError::InvalidScale(
                "stop positions must be finite".to_string(),
            ));
        }

        if stops.windows(2).any(|pair| pair[0].position >= pair[1].position) {
            return Err(LampError::InvalidScale(
                "stop positions must be strictly increasing".to_string(),
            ));
        }

        let first = stops[0].position;
        let last = stops[stops.len() - 1].position;
        if first != SLIDER_MIN || last != SLIDER_MAX {
            return Err(LampError::InvalidScale(format!(
                "stops must span {SLIDER_MIN}..={SLIDER_MAX}, got {first}..={last}"
            )));
        }

        Ok(Self { stops })
    }

    #[must_use]
    pub fn stops(&self) -> &[KelvinStop] {
        &self.stops
    }

    #[must_use]
    pub fn first(&self) -> &KelvinStop {
        &self.stops[0]
    }

    #[must_use]
    pub fn last(&self) -> &KelvinStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Clamps a slider position into the range covered by the stops.
    #[must_use]
    pub fn clamp_position(&self, position: f32) -> f32 {
        if position.is_nan() {
            return self.first().position;
        }
        position.clamp(self.first().position, self.last().position)
    }

    /// The bracketing pair for an in-range position.
    ///
    /// An interior stop position resolves to the pair that starts at that
    /// stop. Only the final pair includes its upper bound.
    fn bracket(&self, position: f32) -> (&KelvinStop, &KelvinStop) {
        let last_pair = self.stops.len() - 2;
        self.stops
            .windows(2)
            .enumerate()
            .find(|(index, pair)| {
                pair[0].position <= position
                    && (position < pair[1].position
                        || (*index == last_pair && position <= pair[1].position))
            })
            .map(|(_, pair)| (&pair[0], &pair[1]))
            .unwrap_or((&self.stops[last_pair], &self.stops[last_pair + 1]))
    }
}

impl Default for KelvinScale {
    fn default() -> Self {
        Self {
            stops: DEFAULT_STOPS.to_vec(),
        }
    }
}

impl TryFrom<Vec<KelvinStop>> for KelvinScale {
    type Error = LampError;

    fn try_from(stops: Vec<KelvinStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<KelvinScale> for Vec<KelvinStop> {
    fn from(scale: KelvinScale) -> Self {
        scale.stops
    }
}

/// Color and approximate color temperature for a slider position.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TemperatureSample {
    pub color: LampColor,
    pub kelvin: u32,
}

/// Maps a slider position onto the temperature curve.
///
/// Positions outside the scale are clamped to the nearest end stop.
#[must_use]
pub fn map_to_color(position: f32, scale: &KelvinScale) -> TemperatureSample {
    let position = scale.clamp_position(position);
    let (lower, upper) = scale.bracket(position);
    let t = (position - lower.position) / (upper.position - lower.position);

    let lower_channels = lower.color.channels();
    let upper_channels = upper.color.channels();
    let mut channels = [0u8; 3];
    for (channel, (from, to)) in channels
        .iter_mut()
        .zip(lower_channels.into_iter().zip(upper_channels))
    {
        *channel = lerp(f32::from(from), f32::from(to), t).round().clamp(0.0, 255.0) as u8;
    }

    let kelvin = lerp(lower.kelvin as f32, upper.kelvin as f32, t)
        .round()
        .max(0.0) as u32;

    TemperatureSample {
        color: LampColor::from_channels(channels),
        kelvin,
    }
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> KelvinScale {
        KelvinScale::default()
    }

    #[test]
    fn test_endpoints_match_end_stops_exactly() {
        let scale = scale();

        let start = map_to_color(0.0, &scale);
        assert_eq!(start.color, scale.first().color);
        assert_eq!(start.kelvin, 2700);

        let end = map_to_color(100.0, &scale);
        assert_eq!(end.color, scale.last().color);
        assert_eq!(end.kelvin, 6500);
    }

    #[test]
    fn test_interior_stop_is_exact() {
        let sample = map_to_color(40.0, &scale());
        assert_eq!(sample.color, LampColor::from_u32(0xF2E6D8));
        assert_eq!(sample.kelvin, 4000);
    }

    #[test]
    fn test_midpoint_of_first_segment() {
        // (255 + 242) / 2 = 248.5, (218 + 230) / 2 = 224, (179 + 216) / 2 = 197.5
        let sample = map_to_color(20.0, &scale());
        assert_eq!(sample.color, LampColor::rgb(249, 224, 198));
        assert_eq!(sample.kelvin, 3350);
    }

    #[test]
    fn test_second_segment_interpolation() {
        // t = 0.5 between 40 and 100
        let sample = map_to_color(70.0, &scale());
        assert_eq!(sample.color, LampColor::rgb(228, 229, 236));
        assert_eq!(sample.kelvin, 5250);
    }

    #[test]
    fn test_out_of_range_positions_clamp() {
        let scale = scale();
        assert_eq!(map_to_color(-25.0, &scale), map_to_color(0.0, &scale));
        assert_eq!(map_to_color(250.0, &scale), map_to_color(100.0, &scale));
        assert_eq!(map_to_color(f32::NAN, &scale), map_to_color(0.0, &scale));
        assert_eq!(
            map_to_color(f32::INFINITY, &scale),
            map_to_color(100.0, &scale)
        );
    }

    #[test]
    fn test_channels_monotonic_without_overshoot() {
        let scale = scale();

        for pair in scale.stops().windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            let mut previous = lower.color.channels();
            let steps = 200;

            for step in 0..=steps {
                let position =
                    lower.position + (upper.position - lower.position) * step as f32 / steps as f32;
                let channels = map_to_color(position, &scale).color.channels();

                for index in 0..3 {
                    let from = lower.color.channels()[index];
                    let to = upper.color.channels()[index];
                    let (low, high) = (from.min(to), from.max(to));
                    assert!(
                        (low..=high).contains(&channels[index]),
                        "channel {index} overshoots at {position}: {}",
                        channels[index]
                    );
                    if to >= from {
                        assert!(channels[index] >= previous[index]);
                    } else {
                        assert!(channels[index] <= previous[index]);
                    }
                }
                previous = channels;
            }
        }
    }

    #[test]
    fn test_kelvin_increases_with_position() {
        let scale = scale();
        let mut previous = 0;
        for position in 0..=100 {
            let kelvin = map_to_color(position as f32, &scale).kelvin;
            assert!(kelvin >= previous, "kelvin dropped at {position}");
            previous = kelvin;
        }
    }

    #[test]
    fn test_scale_validation() {
        let warm = LampColor::from_u32(0xFFDAB3);
        let cool = LampColor::from_u32(0xD6E4FF);

        assert!(KelvinScale::new(vec![KelvinStop::new(0.0, warm, 2700)]).is_err());
        assert!(
            KelvinScale::new(vec![
                KelvinStop::new(0.0, warm, 2700),
                KelvinStop::new(50.0, warm, 3000),
                KelvinStop::new(50.0, cool, 5000),
                KelvinStop::new(100.0, cool, 6500),
            ])
            .is_err()
        );
        assert!(
            KelvinScale::new(vec![
                KelvinStop::new(10.0, warm, 2700),
                KelvinStop::new(100.0, cool, 6500),
            ])
            .is_err()
        );
        assert!(
            KelvinScale::new(vec![
                KelvinStop::new(0.0, warm, 2700),
                KelvinStop::new(100.0, cool, 6500),
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_two_stop_scale_includes_upper_bound() {
        let warm = LampColor::rgb(200, 100, 0);
        let cool = LampColor::rgb(100, 200, 255);
        let scale = KelvinScale::new(vec![
            KelvinStop::new(0.0, warm, 2000),
            KelvinStop::new(100.0, cool, 8000),
        ])
        .unwrap();

        assert_eq!(map_to_color(100.0, &scale).color, cool);
        assert_eq!(map_to_color(25.0, &scale).kelvin, 3500);
    }
}
