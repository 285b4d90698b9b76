use std::f64::consts::E;

/// Logistic sigmoid `1 / (1 + e^-x)`, bounded in `(0, 1)` mathematically.
///
/// No saturation handling: in `f64` the result rounds to exactly `1.0` above
/// `x ~ 37` and reaches `0.0` once `e^-x` overflows (`x < ~-709`), where the
/// derivative then vanishes.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Sigmoid derivative expressed through an already-activated value `y = sigmoid(x)`.
pub fn dsigmoid(y: f64) -> f64 {
    y * (1.0 - y)
}
