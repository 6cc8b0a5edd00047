use serde::{Deserialize, Serialize};

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub inputs: Vec<f64>,
    pub expected: Vec<f64>,
}

impl Example {
    pub fn new(inputs: Vec<f64>, expected: Vec<f64>) -> Self {
        Example { inputs, expected }
    }
}

/// The four boolean XOR cases, in truth-table order.
pub fn xor() -> Vec<Example> {
    vec![
        Example::new(vec![0.0, 0.0], vec![0.0]),
        Example::new(vec![0.0, 1.0], vec![1.0]),
        Example::new(vec![1.0, 0.0], vec![1.0]),
        Example::new(vec![1.0, 1.0], vec![0.0]),
    ]
}
