//! Offline synthesis of the two demo tracks used to seed the audio pair.
//!
//! Chain per variant: sawtooth -> waveshaper -> biquad -> fixed gain. The
//! result is mono upmixed to two identical channels.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use biquad::{Biquad, Coefficients, DirectForm1, ToHertz, Type};
use log::debug;

use crate::error::{Result, ShowcaseError};

pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: usize = 2;
pub const DURATION_SECS: f32 = 4.0;
/// Number of points the distortion curve is sampled at.
pub const CURVE_POINTS: usize = 44_100;

/// Planar float samples, one `Vec` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    pub sample_rate: u32,
    pub channels: Vec<Vec<f32>>,
}

impl StereoBuffer {
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneFilter {
    BandPass { center_hz: f32, q: f32 },
    LowShelf { corner_hz: f32, gain_db: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneVariant {
    Before,
    After,
}

impl ToneVariant {
    pub fn frequency(self) -> f32 {
        match self {
            ToneVariant::Before => 180.0,
            ToneVariant::After => 200.0,
        }
    }

    pub fn distortion(self) -> f32 {
        match self {
            ToneVariant::Before => 30.0,
            ToneVariant::After => 12.0,
        }
    }

    pub fn filter(self) -> ToneFilter {
        match self {
            ToneVariant::Before => ToneFilter::BandPass {
                center_hz: 1100.0,
                q: 0.8,
            },
            ToneVariant::After => ToneFilter::LowShelf {
                corner_hz: 120.0,
                gain_db: 3.5,
            },
        }
    }

    pub fn gain(self) -> f32 {
        match self {
            ToneVariant::Before => 0.22,
            ToneVariant::After => 0.33,
        }
    }
}

/// `y = (3 + k) * x * 20deg / (pi + k * |x|)` sampled at `points` positions
/// over `x` in [-1, 1).
pub fn distortion_curve(amount: f32, points: usize) -> Vec<f32> {
    let deg = PI / 180.0;
    (0..points)
        .map(|i| {
            let x = i as f32 * 2.0 / points as f32 - 1.0;
            (3.0 + amount) * x * 20.0 * deg / (PI + amount * x.abs())
        })
        .collect()
}

pub struct Waveshaper {
    curve: Vec<f32>,
}

impl Waveshaper {
    pub fn new(curve: Vec<f32>) -> Self {
        Self { curve }
    }

    /// Linear interpolation into the curve; inputs outside [-1, 1] take the
    /// end values.
    pub fn process(&self, x: f32) -> f32 {
        let n = self.curve.len();
        match n {
            0 => return x,
            1 => return self.curve[0],
            _ => {}
        }
        let v = (n - 1) as f32 * (x.clamp(-1.0, 1.0) + 1.0) * 0.5;
        let k = (v.floor() as usize).min(n - 1);
        if k + 1 >= n {
            return self.curve[n - 1];
        }
        let frac = v - k as f32;
        (1.0 - frac) * self.curve[k] + frac * self.curve[k + 1]
    }
}

/// Band-limited sawtooth using a polyBLEP correction at the wrap.
struct Sawtooth {
    phase: f32,
    step: f32,
}

impl Sawtooth {
    fn new(freq: f32, sample_rate: f32) -> Self {
        // Half a cycle in, so the first sample is zero and rising.
        Self {
            phase: 0.5,
            step: freq / sample_rate,
        }
    }

    fn tick(&mut self) -> f32 {
        let t = self.phase;
        let dt = self.step;
        let mut y = 2.0 * t - 1.0;
        if t < dt {
            let u = t / dt;
            y -= u + u - u * u - 1.0;
        } else if t > 1.0 - dt {
            let u = (t - 1.0) / dt;
            y -= u * u + u + u + 1.0;
        }
        self.phase += dt;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        y
    }
}

/// Band-pass with unity gain at the center frequency. `biquad`'s own
/// `BandPass` peaks at `q` instead.
fn band_pass(center_hz: f32, q: f32, sample_rate: f32) -> Result<Coefficients<f32>> {
    if !(center_hz > 0.0 && center_hz * 2.0 < sample_rate && q > 0.0) {
        return Err(ShowcaseError::Filter(format!(
            "band-pass at {center_hz} Hz, Q {q}, fs {sample_rate}"
        )));
    }
    let omega = 2.0 * PI * center_hz / sample_rate;
    let alpha = omega.sin() / (2.0 * q);
    let a0 = 1.0 + alpha;
    Ok(Coefficients {
        a1: -2.0 * omega.cos() / a0,
        a2: (1.0 - alpha) / a0,
        b0: alpha / a0,
        b1: 0.0,
        b2: -alpha / a0,
    })
}

fn build_filter(filter: ToneFilter, sample_rate: f32) -> Result<DirectForm1<f32>> {
    let coeffs = match filter {
        ToneFilter::BandPass { center_hz, q } => band_pass(center_hz, q, sample_rate)?,
        ToneFilter::LowShelf { corner_hz, gain_db } => Coefficients::<f32>::from_params(
            Type::LowShelf(gain_db),
            sample_rate.hz(),
            corner_hz.hz(),
            FRAC_1_SQRT_2,
        )
        .map_err(|e| ShowcaseError::Filter(format!("{filter:?}: {e:?}")))?,
    };
    Ok(DirectForm1::<f32>::new(coeffs))
}

/// Render one variant offline at the fixed demo format.
pub fn render(variant: ToneVariant) -> Result<StereoBuffer> {
    let sr = SAMPLE_RATE as f32;
    let frames = (DURATION_SECS * sr) as usize;

    let mut osc = Sawtooth::new(variant.frequency(), sr);
    let shaper = Waveshaper::new(distortion_curve(variant.distortion(), CURVE_POINTS));
    let mut filter = build_filter(variant.filter(), sr)?;
    let gain = variant.gain();

    let mono: Vec<f32> = (0..frames)
        .map(|_| gain * filter.run(shaper.process(osc.tick())))
        .collect();

    let buffer = StereoBuffer {
        sample_rate: SAMPLE_RATE,
        channels: vec![mono; CHANNELS],
    };
    debug!("rendered {variant:?}: {:.1}s", buffer.duration_secs());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_odd_and_bounded() {
        let curve = distortion_curve(30.0, CURVE_POINTS);
        assert_eq!(curve.len(), CURVE_POINTS);
        // x = -1 at index 0, x = 0 at the midpoint
        assert!(curve[0] < 0.0);
        assert!(curve[CURVE_POINTS / 2].abs() < 1e-6);
        let expected_low = (3.0 + 30.0) * -1.0 * 20.0 * (PI / 180.0) / (PI + 30.0);
        assert!((curve[0] - expected_low).abs() < 1e-6);
    }

    #[test]
    fn waveshaper_interpolates_and_clamps() {
        let shaper = Waveshaper::new(vec![-1.0, 0.0, 1.0]);
        assert_eq!(shaper.process(0.0), 0.0);
        assert!((shaper.process(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(shaper.process(4.0), 1.0);
        assert_eq!(shaper.process(-4.0), -1.0);
    }

    #[test]
    fn sawtooth_stays_in_range() {
        let mut osc = Sawtooth::new(180.0, 44_100.0);
        assert!(osc.tick().abs() < 0.01);
        for _ in 0..10_000 {
            let y = osc.tick();
            assert!((-1.1..=1.1).contains(&y));
        }
    }

    #[test]
    fn render_produces_four_second_stereo() {
        for variant in [ToneVariant::Before, ToneVariant::After] {
            let buf = render(variant).unwrap();
            assert_eq!(buf.sample_rate, 44_100);
            assert_eq!(buf.channels.len(), 2);
            assert_eq!(buf.frames(), 176_400);
            assert_eq!(buf.channels[0], buf.channels[1]);
            assert!(buf.channels[0].iter().all(|s| s.is_finite()));
            assert!(buf.channels[0].iter().any(|s| s.abs() > 1e-3));
        }
    }

    /// Steady-state peak of a sine at `freq` after the filter settles.
    fn response_at(filter: ToneFilter, freq: f32) -> f32 {
        let sr = SAMPLE_RATE as f32;
        let mut f = build_filter(filter, sr).unwrap();
        let settle = SAMPLE_RATE as usize;
        (0..settle * 2)
            .map(|n| f.run((2.0 * PI * freq * n as f32 / sr).sin()))
            .skip(settle)
            .fold(0.0f32, |peak, y| peak.max(y.abs()))
    }

    #[test]
    fn band_pass_is_unity_at_center() {
        let filter = ToneVariant::Before.filter();
        let center = response_at(filter, 1100.0);
        assert!((center - 1.0).abs() < 0.01, "gain at center = {center}");
        assert!(response_at(filter, 100.0) < 0.3);
        assert!(response_at(filter, 10_000.0) < 0.3);
    }

    #[test]
    fn low_shelf_boosts_lows_only() {
        let filter = ToneVariant::After.filter();
        // +3.5 dB is about 1.5x
        let low = response_at(filter, 20.0);
        assert!((1.35..1.6).contains(&low), "gain at 20 Hz = {low}");
        let high = response_at(filter, 5_000.0);
        assert!((high - 1.0).abs() < 0.02, "gain at 5 kHz = {high}");
    }

    #[test]
    fn band_pass_rejects_invalid_center() {
        assert!(band_pass(30_000.0, 0.8, 44_100.0).is_err());
        assert!(band_pass(1_000.0, 0.0, 44_100.0).is_err());
    }

    #[test]
    fn variants_differ() {
        let before = render(ToneVariant::Before).unwrap();
        let after = render(ToneVariant::After).unwrap();
        assert_ne!(before.channels[0], after.channels[0]);
    }
}
