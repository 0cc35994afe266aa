pub mod json;
pub mod text;

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

/// Score as shown in the winners panel: three decimals, shortest form.
pub fn format_score(v: f64) -> String {
    format!("{}", round_to(v, 3))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn place_label(place: usize) -> &'static str {
    match place {
        0 => "1st",
        1 => "2nd",
        2 => "3rd",
        _ => "",
    }
}
