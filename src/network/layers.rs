use enum_dispatch::enum_dispatch;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

use super::activation::Activation;

#[enum_dispatch]
pub trait Layer {
    // computes the output Y of a layer for a given input X
    fn forward_propagation(&mut self, input: ndarray::Array2<f32>) -> ndarray::Array2<f32>;
    // computes dE/dX for a given dE/dY (and update parameters if any)
    fn backward_propagation(
        &mut self,
        output_error: ndarray::Array2<f32>,
        learning_rate: f32,
    ) -> ndarray::Array2<f32>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    #[serde(skip)]
    input: ndarray::Array2<f32>,
    weights: ndarray::Array2<f32>,
    bias: ndarray::Array2<f32>,
}

impl DenseLayer {
    pub fn new(input_size: usize, output_size: usize) -> Self {
        let bound = 1.0 / (input_size as f32).sqrt();
        let input = ndarray::Array2::zeros((0, 0));
        let weights =
            ndarray::Array::random((input_size, output_size), Uniform::new(-bound, bound));
        let bias = ndarray::Array::random((1, output_size), Uniform::new(-bound, bound));
        Self {
            input,
            weights,
            bias,
        }
    }
}

impl Layer for DenseLayer {
    fn forward_propagation(&mut self, input: ndarray::Array2<f32>) -> ndarray::Array2<f32> {
        self.input = input;
        self.input.dot(&self.weights) + &self.bias
    }

    fn backward_propagation(
        &mut self,
        output_error: ndarray::Array2<f32>,
        learning_rate: f32,
    ) -> ndarray::Array2<f32> {
        let input_error = output_error.dot(&self.weights.t());
        let weights_error = self.input.t().dot(&output_error);
        // collapse the batch axis so the bias keeps its (1, output) shape
        let bias_error = output_error
            .sum_axis(ndarray::Axis(0))
            .insert_axis(ndarray::Axis(0));
        self.weights = &self.weights - learning_rate * weights_error;
        self.bias = &self.bias - learning_rate * bias_error;
        input_error
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationLayer {
    #[serde(skip)]
    input: ndarray::Array2<f32>,
    activation: Activation,
}

impl ActivationLayer {
    pub fn new(activation: Activation) -> Self {
        let input = ndarray::Array2::zeros((0, 0));
        Self { input, activation }
    }
}

impl Layer for ActivationLayer {
    fn forward_propagation(&mut self, input: ndarray::Array2<f32>) -> ndarray::Array2<f32> {
        self.input = input;
        self.activation.apply(&self.input)
    }

    fn backward_propagation(
        &mut self,
        output_error: ndarray::Array2<f32>,
        _learning_rate: f32,
    ) -> ndarray::Array2<f32> {
        self.activation.derivative(&self.input) * output_error
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[enum_dispatch(Layer)]
pub enum NetworkLayer {
    Dense(DenseLayer),
    Activation(ActivationLayer),
}
