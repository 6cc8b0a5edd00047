use std::f64::consts::E;

/// Logistic sigmoid, `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Sigmoid derivative expressed through an already-activated value `y = sigmoid(x)`.
pub fn sigmoid_slope(y: f64) -> f64 {
    y * (1.0 - y)
}
