use shallow_nn::train::{self, Snapshot};
use shallow_nn::{rng, Network};

fn main() {
    let mut network = Network::new(2, 4, 1, &mut rng::seeded(2024));
    network.set_learning_rate(0.2);

    let examples = train::xor();
    let epochs = 10000;

    let summary = train::run_epoch_set(&mut network, &examples, epochs, 1000, |s: &Snapshot| {
        println!("{:5}> {} | err: {:2.3}", s.iteration, s.state, s.error);
    })
    .expect("XOR examples match a 2-input, 1-output network");
    println!("Final mean error after {} epochs: {:.6}", summary.iterations, summary.mean_error);

    for example in &examples {
        network.load_inputs(&example.inputs).expect("two inputs");
        network.activate();
        println!("Input: {:?} -> Output: {:.4}", example.inputs, network.results()[0]);
    }

    let score = train::evaluate(&mut network, &examples).expect("shapes checked above");
    println!("Success rate: {score:.2}");
}
