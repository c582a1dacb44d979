use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Based on https://towardsdatascience.com/math-neural-network-from-scratch-in-python-d6da9f29ce65
use self::activation::Activation;
use self::layers::{ActivationLayer, DenseLayer, Layer, NetworkLayer};
use self::loss::{mse, mse_prime};

pub mod activation;
pub mod layers;
pub mod loss;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    learning_rate: f32,
    layers: Vec<NetworkLayer>,
}

impl Network {
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            layers: vec![],
        }
    }

    // add layer to network
    pub fn add(&mut self, layer: NetworkLayer) {
        self.layers.push(layer)
    }

    // predict output for given input
    pub fn predict(&mut self, input: ndarray::Array2<f32>) -> ndarray::Array2<f32> {
        // forward propagation
        let mut output = input;
        for layer in &mut self.layers {
            output = layer.forward_propagation(output);
        }
        output
    }

    // train the network on one batch, returns the loss before the update
    pub fn fit(&mut self, x_train: ndarray::Array2<f32>, y_train: ndarray::Array2<f32>) -> f32 {
        // forward propagation
        let mut output = x_train;
        for layer in &mut self.layers {
            output = layer.forward_propagation(output);
        }

        // backward propagation
        let mut error = mse_prime(&y_train, &output);
        for layer in self.layers.iter_mut().rev() {
            error = layer.backward_propagation(error, self.learning_rate)
        }

        mse(&y_train, &output).unwrap_or(0.0)
    }

    /// Writes the whole network as JSON, creating the parent directory if
    /// it does not exist yet. Overwrites without versioning.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Network> {
        let file = File::open(path)?;
        let network = serde_json::from_reader(BufReader::new(file))?;
        Ok(network)
    }
}

/// The value network shape used for driving: two dense layers with a ReLU
/// between them and a linear output.
pub fn q_network(
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    learning_rate: f32,
) -> Network {
    let mut network = Network::new(learning_rate);
    network.add(NetworkLayer::from(DenseLayer::new(input_size, hidden_size)));
    network.add(NetworkLayer::from(ActivationLayer::new(Activation::Relu)));
    network.add(NetworkLayer::from(DenseLayer::new(
        hidden_size,
        output_size,
    )));
    network
}
