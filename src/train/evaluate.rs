use crate::error::{NetworkError, VectorKind};
use crate::network::network::Network;
use crate::train::example::Example;

/// Rounds an activation to a class label: anything below 0.5 is 0, the rest 1.
pub fn round_output(value: f64) -> u8 {
    if value < 0.5 {
        0
    } else {
        1
    }
}

/// Fraction of `examples` whose rounded outputs all match their rounded
/// labels. Runs forward passes only; weights are never touched.
pub fn evaluate(network: &mut Network, examples: &[Example]) -> Result<f64, NetworkError> {
    if examples.is_empty() {
        return Ok(0.0);
    }

    let mut success = 0;
    for example in examples {
        network.load_inputs(&example.inputs)?;
        network.activate();
        let out = network.results();

        if out.len() != example.expected.len() {
            return Err(NetworkError::ShapeMismatch {
                vector: VectorKind::Expected,
                expected: out.len(),
                actual: example.expected.len(),
            });
        }

        let correct = out
            .iter()
            .zip(&example.expected)
            .all(|(&o, &e)| round_output(o) == round_output(e));
        if correct {
            success += 1;
        }
    }

    Ok(success as f64 / examples.len() as f64)
}
