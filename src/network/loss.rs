pub fn mse(y_true: &ndarray::Array2<f32>, y_pred: &ndarray::Array2<f32>) -> Option<f32> {
    (y_true - y_pred).map(|v| v.powf(2.0)).mean()
}

pub fn mse_prime(
    y_true: &ndarray::Array2<f32>,
    y_pred: &ndarray::Array2<f32>,
) -> ndarray::Array2<f32> {
    2.0 * (y_pred - y_true) / (y_true.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn perfect_prediction_has_zero_loss() {
        let y = arr2(&[[1.0, -2.0, 0.5]]);
        assert_eq!(mse(&y, &y), Some(0.0));
    }

    #[test]
    fn mse_averages_squared_error() {
        let y_true = arr2(&[[0.0, 0.0]]);
        let y_pred = arr2(&[[1.0, 3.0]]);
        assert_eq!(mse(&y_true, &y_pred), Some(5.0));
        assert_eq!(mse_prime(&y_true, &y_pred), arr2(&[[1.0, 3.0]]));
    }
}
