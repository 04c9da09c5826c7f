//! Easing curves для scripted motion
//!
//! Все кривые определены на [0, 1] и проходят через (0, 0) и (1, 1),
//! кроме `Keyframes` (произвольная кусочно-линейная кривая).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum EaseCurve {
    Linear,
    /// 3t² − 2t³ (ease-in-out с нулевыми касательными)
    #[default]
    SmoothStep,
    QuadIn,
    QuadOut,
    CubicInOut,
    /// Ключи (time, value), отсортированные по time; между ними: линейно
    Keyframes(Vec<(f32, f32)>),
}

impl EaseCurve {
    /// Значение кривой в t (t зажимается в [0, 1])
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EaseCurve::Linear => t,
            EaseCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
            EaseCurve::QuadIn => t * t,
            EaseCurve::QuadOut => t * (2.0 - t),
            EaseCurve::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            EaseCurve::Keyframes(keys) => evaluate_keyframes(keys, t),
        }
    }
}

fn evaluate_keyframes(keys: &[(f32, f32)], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return t;
    };
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }

    for pair in keys.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * (t - t0) / span;
        }
    }
    last.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_hit_endpoints() {
        let curves = [
            EaseCurve::Linear,
            EaseCurve::SmoothStep,
            EaseCurve::QuadIn,
            EaseCurve::QuadOut,
            EaseCurve::CubicInOut,
        ];
        for curve in curves {
            assert_eq!(curve.evaluate(0.0), 0.0, "{:?}", curve);
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-6, "{:?}", curve);
            assert!((curve.evaluate(0.5) - 0.5).abs() < 0.26, "{:?}", curve);
        }
        assert_eq!(EaseCurve::SmoothStep.evaluate(0.5), 0.5);
    }

    #[test]
    fn test_keyframes_interpolate_and_clamp() {
        let curve = EaseCurve::Keyframes(vec![(0.0, 0.0), (0.5, 0.8), (1.0, 1.0)]);
        assert!((curve.evaluate(0.25) - 0.4).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.9).abs() < 1e-6);
        assert_eq!(curve.evaluate(2.0), 1.0);
        assert_eq!(EaseCurve::Keyframes(Vec::new()).evaluate(0.3), 0.3);
    }
}
