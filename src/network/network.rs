use log::{debug, warn};
use rand::Rng;

use crate::activation::{sigmoid, sigmoid_slope};
use crate::error::{NetworkError, VectorKind};
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

pub const DEFAULT_LEARNING_RATE: f64 = 0.2;

/// Which hidden→output weight feeds the hidden-layer gradient during `train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientOrder {
    /// The weight as it stands after this example's update. Reproduces the
    /// reference arithmetic exactly.
    #[default]
    PostUpdate,
    /// The weight captured before this example's update (textbook backprop).
    PreUpdate,
}

/// A fully-connected network with one sigmoid hidden layer.
///
/// Usage follows a fixed sequence per example: `load_inputs`, then
/// `activate`, then `train` or `results`. Nothing enforces the order;
/// skipping `activate` leaves the previous example's activations in place.
#[derive(Debug, Clone)]
pub struct Network {
    inputs: Vec<f64>,
    input_weights: Matrix,

    hidden: Vec<f64>,
    hidden_thresholds: Vec<f64>,
    hidden_weights: Matrix,

    outputs: Vec<f64>,
    output_thresholds: Vec<f64>,

    learning_rate: f64,
    gradient_order: GradientOrder,
}

impl Network {
    /// Builds a network and draws its initial weights and thresholds from `rng`.
    ///
    /// Weights are uniform in [0, 1). Thresholds are the ratio of two uniform
    /// draws, which skews them towards small values with a long upper tail.
    pub fn new<R: Rng + ?Sized>(
        input_count: usize,
        hidden_count: usize,
        output_count: usize,
        rng: &mut R,
    ) -> Network {
        let mut net = Network {
            inputs: vec![0.0; input_count],
            input_weights: Matrix::zeros(input_count, hidden_count),
            hidden: vec![0.0; hidden_count],
            hidden_thresholds: vec![0.0; hidden_count],
            hidden_weights: Matrix::zeros(hidden_count, output_count),
            outputs: vec![0.0; output_count],
            output_thresholds: vec![0.0; output_count],
            learning_rate: DEFAULT_LEARNING_RATE,
            gradient_order: GradientOrder::default(),
        };
        net.connect(rng);
        debug!("{} network initialised", net.topology());
        net
    }

    pub fn with_topology<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Network {
        Network::new(topology.inputs, topology.hidden, topology.outputs, rng)
    }

    // Draw order matters for seeded reproducibility: output thresholds are
    // redrawn once per hidden unit and the last draw wins.
    fn connect<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.input_weights = Matrix::random(self.input_count(), self.hidden_count(), rng);

        for h in 0..self.hidden_count() {
            for o in 0..self.output_count() {
                self.hidden_weights[(h, o)] = rng.gen::<f64>();
                self.output_thresholds[o] = rng.gen::<f64>() / rng.gen::<f64>();
            }
            self.hidden_thresholds[h] = rng.gen::<f64>() / rng.gen::<f64>();
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Sets the learning rate if `rate` lies strictly inside (0, 1) and
    /// returns the rate that was in effect before the call.
    pub fn set_learning_rate(&mut self, rate: f64) -> f64 {
        let current = self.learning_rate;
        if rate > 0.0 && rate < 1.0 {
            self.learning_rate = rate;
            debug!("learning rate {current} -> {rate}");
        } else {
            warn!("ignoring learning rate {rate}, must lie in (0, 1)");
        }
        current
    }

    pub fn gradient_order(&self) -> GradientOrder {
        self.gradient_order
    }

    pub fn set_gradient_order(&mut self, order: GradientOrder) {
        self.gradient_order = order;
    }

    /// Copies `values` into the input buffer.
    pub fn load_inputs(&mut self, values: &[f64]) -> Result<(), NetworkError> {
        if values.len() != self.inputs.len() {
            return Err(NetworkError::ShapeMismatch {
                vector: VectorKind::Inputs,
                expected: self.inputs.len(),
                actual: values.len(),
            });
        }

        self.inputs.copy_from_slice(values);
        Ok(())
    }

    /// Forward pass over the currently loaded inputs.
    pub fn activate(&mut self) {
        for h in 0..self.hidden.len() {
            let mut weighted = 0.0;
            for i in 0..self.inputs.len() {
                weighted += self.input_weights[(i, h)] * self.inputs[i];
            }

            weighted -= self.hidden_thresholds[h];
            self.hidden[h] = sigmoid(weighted);
        }

        for o in 0..self.outputs.len() {
            let mut weighted = 0.0;
            for h in 0..self.hidden.len() {
                weighted += self.hidden_weights[(h, o)] * self.hidden[h];
            }

            weighted -= self.output_thresholds[o];
            self.outputs[o] = sigmoid(weighted);
        }
    }

    /// Backpropagates `expected` against the last activation and updates
    /// every weight and threshold in place. Returns the example's
    /// sum-of-squares error.
    pub fn train(&mut self, expected: &[f64]) -> Result<f64, NetworkError> {
        if expected.len() != self.outputs.len() {
            return Err(NetworkError::ShapeMismatch {
                vector: VectorKind::Expected,
                expected: self.outputs.len(),
                actual: expected.len(),
            });
        }

        let rate = self.learning_rate;
        let mut sos_error = 0.0;

        for o in 0..self.outputs.len() {
            let abs_error = expected[o] - self.outputs[o];
            sos_error += abs_error.powi(2);
            let o_gradient = sigmoid_slope(self.outputs[o]) * abs_error;

            for h in 0..self.hidden.len() {
                let previous = self.hidden_weights[(h, o)];
                self.hidden_weights[(h, o)] += rate * self.hidden[h] * o_gradient;

                let link = match self.gradient_order {
                    GradientOrder::PostUpdate => self.hidden_weights[(h, o)],
                    GradientOrder::PreUpdate => previous,
                };
                let h_gradient = sigmoid_slope(self.hidden[h]) * o_gradient * link;

                for i in 0..self.inputs.len() {
                    self.input_weights[(i, h)] += rate * self.inputs[i] * h_gradient;
                }

                self.hidden_thresholds[h] += rate * h_gradient * -1.0;
            }

            self.output_thresholds[o] += rate * o_gradient * -1.0;
        }

        Ok(sos_error)
    }

    /// Copy of the output activations.
    pub fn results(&self) -> Vec<f64> {
        self.outputs.clone()
    }

    /// One-line view of the input and output units, e.g.
    /// `" IN1: 0.0000 |  IN2: 1.0000 | ON1: 0.9731"`.
    pub fn state_line(&self) -> String {
        let inputs = self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, v)| format!(" IN{}: {:2.4}", i + 1, v));
        let outputs = self
            .outputs
            .iter()
            .enumerate()
            .map(|(o, v)| format!("ON{}: {:2.4}", o + 1, v));

        inputs.chain(outputs).collect::<Vec<_>>().join(" | ")
    }

    pub fn topology(&self) -> Topology {
        Topology::new(self.input_count(), self.hidden_count(), self.output_count())
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn hidden(&self) -> &[f64] {
        &self.hidden
    }

    pub fn input_weights(&self) -> &Matrix {
        &self.input_weights
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden_weights
    }

    pub fn hidden_thresholds(&self) -> &[f64] {
        &self.hidden_thresholds
    }

    pub fn output_thresholds(&self) -> &[f64] {
        &self.output_thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng;
    use rstest::rstest;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    /// 1-1-1 network with hand-picked parameters.
    fn tiny(w_in: f64, t_h: f64, w_h: f64, t_o: f64) -> Network {
        let mut net = Network::new(1, 1, 1, &mut rng::seeded(0));
        net.input_weights = Matrix::from_data(vec![vec![w_in]]);
        net.hidden_thresholds = vec![t_h];
        net.hidden_weights = Matrix::from_data(vec![vec![w_h]]);
        net.output_thresholds = vec![t_o];
        net
    }

    #[rstest]
    #[case(1, 1, 1)]
    #[case(2, 2, 1)]
    #[case(3, 5, 2)]
    #[case(4, 1, 3)]
    fn buffers_match_topology(#[case] i: usize, #[case] h: usize, #[case] o: usize) {
        let net = Network::new(i, h, o, &mut rng::seeded(1));
        assert_eq!(net.topology(), Topology::new(i, h, o));
        assert_eq!((net.input_weights.rows, net.input_weights.cols), (i, h));
        assert_eq!((net.hidden_weights.rows, net.hidden_weights.cols), (h, o));
        assert_eq!(net.hidden_thresholds().len(), h);
        assert_eq!(net.output_thresholds().len(), o);
        assert_eq!(net.results(), vec![0.0; o]);
    }

    #[test]
    fn initial_weights_are_unit_interval_and_thresholds_positive() {
        let net = Network::new(3, 4, 2, &mut rng::seeded(5));
        let weights = net.input_weights.data.iter().chain(&net.hidden_weights.data);
        assert!(weights.flatten().all(|&w| (0.0..1.0).contains(&w)));
        let thresholds = net.hidden_thresholds().iter().chain(net.output_thresholds());
        assert!(thresholds.copied().all(|t| t >= 0.0 && t.is_finite()));
    }

    #[test]
    fn construction_consumes_draws_in_reference_order() {
        let mut draws = rng::seeded(9);
        let mut next = || draws.gen::<f64>();
        let w_in = [[next(), next()], [next(), next()]];
        let (w_h0, t_o_first) = (next(), next() / next());
        let t_h0 = next() / next();
        let (w_h1, t_o_last) = (next(), next() / next());
        let t_h1 = next() / next();

        let net = Network::new(2, 2, 1, &mut rng::seeded(9));
        assert_eq!(net.input_weights.data, vec![w_in[0].to_vec(), w_in[1].to_vec()]);
        assert_eq!(net.hidden_weights.column(0), vec![w_h0, w_h1]);
        assert_eq!(net.hidden_thresholds(), &[t_h0, t_h1]);
        assert_eq!(net.output_thresholds(), &[t_o_last]);
        assert_ne!(t_o_first, t_o_last);
    }

    #[test]
    fn zero_hidden_units_leave_output_thresholds_unset() {
        let net = Network::new(2, 0, 3, &mut rng::seeded(2));
        assert_eq!(net.output_thresholds(), &[0.0, 0.0, 0.0]);
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(0.01, 0.01)]
    #[case(0.99, 0.99)]
    #[case(0.0, DEFAULT_LEARNING_RATE)]
    #[case(1.0, DEFAULT_LEARNING_RATE)]
    #[case(-0.3, DEFAULT_LEARNING_RATE)]
    #[case(f64::NAN, DEFAULT_LEARNING_RATE)]
    fn learning_rate_setter_only_accepts_open_unit_interval(
        #[case] requested: f64,
        #[case] after: f64,
    ) {
        let mut net = Network::new(2, 2, 1, &mut rng::seeded(3));
        assert_eq!(net.set_learning_rate(requested), DEFAULT_LEARNING_RATE);
        assert_eq!(net.learning_rate(), after);
    }

    #[test]
    fn load_inputs_rejects_wrong_length_without_side_effect() {
        let mut net = Network::new(2, 2, 1, &mut rng::seeded(4));
        net.load_inputs(&[0.25, 0.75]).unwrap();
        let err = net.load_inputs(&[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::ShapeMismatch { vector: VectorKind::Inputs, expected: 2, actual: 3 }
        );
        assert_eq!(net.inputs(), &[0.25, 0.75]);
    }

    #[test]
    fn train_rejects_wrong_length_without_mutation() {
        let mut net = Network::new(2, 2, 1, &mut rng::seeded(4));
        net.load_inputs(&[1.0, 0.0]).unwrap();
        net.activate();
        let before = net.clone();
        let err = net.train(&[]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::ShapeMismatch { vector: VectorKind::Expected, expected: 1, actual: 0 }
        );
        assert_eq!(net.input_weights, before.input_weights);
        assert_eq!(net.hidden_weights, before.hidden_weights);
        assert_eq!(net.output_thresholds, before.output_thresholds);
    }

    #[test]
    fn activate_matches_hand_computation() {
        let mut net = tiny(0.5, 0.1, 0.8, 0.3);
        net.load_inputs(&[1.0]).unwrap();
        net.activate();

        let hidden = sigmoid(0.5 * 1.0 - 0.1);
        let output = sigmoid(0.8 * hidden - 0.3);
        assert!(approx_eq(net.hidden()[0], hidden));
        assert!(approx_eq(net.results()[0], output));
    }

    #[test]
    fn train_applies_post_update_weight_to_hidden_gradient() {
        let mut net = tiny(0.5, 0.1, 0.8, 0.3);
        net.load_inputs(&[1.0]).unwrap();
        net.activate();
        let (h, y) = (net.hidden()[0], net.results()[0]);

        let sos = net.train(&[1.0]).unwrap();

        let rate = DEFAULT_LEARNING_RATE;
        let o_grad = y * (1.0 - y) * (1.0 - y);
        let w_h = 0.8 + rate * h * o_grad;
        let h_grad = h * (1.0 - h) * o_grad * w_h;
        assert!(approx_eq(sos, (1.0 - y).powi(2)));
        assert!(approx_eq(net.hidden_weights[(0, 0)], w_h));
        assert!(approx_eq(net.input_weights[(0, 0)], 0.5 + rate * h_grad));
        assert!(approx_eq(net.hidden_thresholds()[0], 0.1 - rate * h_grad));
        assert!(approx_eq(net.output_thresholds()[0], 0.3 - rate * o_grad));
    }

    #[test]
    fn pre_update_order_uses_original_weight() {
        let mut post = tiny(0.5, 0.1, 0.8, 0.3);
        let mut pre = post.clone();
        pre.set_gradient_order(GradientOrder::PreUpdate);
        for net in [&mut post, &mut pre] {
            net.load_inputs(&[1.0]).unwrap();
            net.activate();
        }
        let (h, y) = (pre.hidden()[0], pre.results()[0]);

        post.train(&[1.0]).unwrap();
        pre.train(&[1.0]).unwrap();

        let o_grad = y * (1.0 - y) * (1.0 - y);
        let h_grad = h * (1.0 - h) * o_grad * 0.8;
        assert!(approx_eq(pre.input_weights[(0, 0)], 0.5 + DEFAULT_LEARNING_RATE * h_grad));
        assert_eq!(pre.hidden_weights, post.hidden_weights);
        assert_ne!(pre.input_weights, post.input_weights);
    }

    #[test]
    fn repeated_activation_is_deterministic() {
        let mut net = Network::new(3, 4, 2, &mut rng::seeded(8));
        net.load_inputs(&[0.2, 0.9, 0.4]).unwrap();
        net.activate();
        let first = net.results();
        for _ in 0..5 {
            net.activate();
            assert_eq!(net.results(), first);
        }
    }

    #[test]
    fn results_is_a_detached_copy() {
        let mut net = Network::new(2, 2, 1, &mut rng::seeded(6));
        net.load_inputs(&[1.0, 1.0]).unwrap();
        net.activate();
        let mut out = net.results();
        out[0] = 42.0;
        assert_ne!(net.results()[0], 42.0);
    }

    #[test]
    fn state_line_lists_inputs_then_outputs() {
        let mut net = tiny(0.0, 0.0, 0.0, 0.0);
        net.load_inputs(&[1.0]).unwrap();
        net.activate();
        assert_eq!(net.state_line(), " IN1: 1.0000 | ON1: 0.5000");
    }
}
