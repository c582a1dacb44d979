use serde::{Deserialize, Serialize};

pub fn relu(x: &ndarray::Array2<f32>) -> ndarray::Array2<f32> {
    x.map(|v| v.max(0.0))
}

pub fn relu_prime(x: &ndarray::Array2<f32>) -> ndarray::Array2<f32> {
    x.map(|v| if *v > 0.0 { 1.0 } else { 0.0 })
}

pub fn tanh(x: &ndarray::Array2<f32>) -> ndarray::Array2<f32> {
    x.map(|v| v.tanh())
}

pub fn tanh_prime(x: &ndarray::Array2<f32>) -> ndarray::Array2<f32> {
    x.map(|v| 1.0 - v.tanh().powf(2.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Tanh,
}

impl Activation {
    pub fn apply(&self, x: &ndarray::Array2<f32>) -> ndarray::Array2<f32> {
        match self {
            Activation::Relu => relu(x),
            Activation::Tanh => tanh(x),
        }
    }

    pub fn derivative(&self, x: &ndarray::Array2<f32>) -> ndarray::Array2<f32> {
        match self {
            Activation::Relu => relu_prime(x),
            Activation::Tanh => tanh_prime(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn relu_zeroes_negatives() {
        let x = arr2(&[[-1.0, 0.0, 2.5]]);
        assert_eq!(relu(&x), arr2(&[[0.0, 0.0, 2.5]]));
        assert_eq!(relu_prime(&x), arr2(&[[0.0, 0.0, 1.0]]));
    }

    #[test]
    fn enum_matches_free_functions() {
        let x = arr2(&[[-0.5, 1.5]]);
        assert_eq!(Activation::Relu.apply(&x), relu(&x));
        assert_eq!(Activation::Tanh.apply(&x), tanh(&x));
        assert_eq!(Activation::Tanh.derivative(&x), tanh_prime(&x));
    }
}
