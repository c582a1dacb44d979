use plotters::prelude::*;

#[inline(always)]
pub fn argmax<T: PartialOrd>(values: &[T]) -> usize {
    let mut max: &T = &values[0];
    let mut result: usize = 0;
    for (i, v) in values.iter().enumerate() {
        if v > max {
            max = v;
            result = i;
        }
    }
    result
}

#[inline(always)]
pub fn max(values: &[f32]) -> f32 {
    let mut result: f32 = values[0];
    for v in values {
        if *v > result {
            result = *v;
        }
    }
    result
}

pub fn moving_average(window: usize, vector: &[f32]) -> Vec<f32> {
    let window = window.max(1);
    let mut aux: usize = 0;
    let mut result: Vec<f32> = vec![];
    while aux < vector.len() {
        let end: usize = if aux + window < vector.len() {
            aux + window
        } else {
            vector.len()
        };
        let slice: &[f32] = &vector[aux..end];
        let r: f32 = slice.iter().sum();
        result.push(r / window as f32);
        aux = end;
    }
    result
}

pub fn plot_moving_average(
    moving_averages: &[Vec<f32>],
    colors: &[&RGBColor],
    legends: &[&str],
    title: &str,
) {
    let filename = format!("{}.png", title.to_lowercase().replace(' ', "_"));
    let mut min_value: f32 = f32::INFINITY;
    let mut max_value: f32 = f32::NEG_INFINITY;
    let mut max_len: usize = 0;
    for curve in moving_averages {
        max_len = max_len.max(curve.len());
        for v in curve {
            min_value = min_value.min(*v);
            max_value = max_value.max(*v);
        }
    }
    if max_len == 0 {
        return;
    }
    let pad = ((max_value - min_value) * 0.05).max(0.1);

    let root = BitMapBackend::new(&filename, (1080, 720)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            0f32..max_len as f32,
            (min_value - pad)..(max_value + pad),
        )
        .unwrap();
    chart.configure_mesh().draw().unwrap();

    for (i, curve) in moving_averages.iter().enumerate() {
        let color = *colors[i];
        chart
            .draw_series(LineSeries::new(
                curve.iter().enumerate().map(|(x, y)| (x as f32, *y)),
                colors[i],
            ))
            .unwrap()
            .label(legends[i])
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();
    root.present().unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_first_on_ties() {
        assert_eq!(argmax(&[1.0, 1.0, 0.5]), 0);
        assert_eq!(argmax(&[0.0, 2.0, 2.0]), 1);
        assert_eq!(argmax(&[-1.0, -3.0, -2.0]), 0);
    }

    #[test]
    fn max_of_slice() {
        assert_eq!(max(&[1.0, 8.0, -2.0]), 8.0);
        assert_eq!(max(&[-5.0, -3.0, -4.0]), -3.0);
    }

    #[test]
    fn moving_average_chunks() {
        let values = vec![1.0, 1.0, 3.0, 3.0];
        assert_eq!(moving_average(2, &values), vec![1.0, 3.0]);
    }

    #[test]
    fn moving_average_treats_zero_window_as_one() {
        let values = vec![2.0, 4.0, 6.0];
        assert_eq!(moving_average(0, &values), values);
        assert_eq!(moving_average(0, &values), moving_average(1, &values));
    }
}
