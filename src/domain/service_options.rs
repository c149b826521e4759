use super::entities::ServiceOption;

/// Sum of `percentage_increase` over active options.
pub fn total_percentage(options: &[ServiceOption]) -> f64 {
    options
        .iter()
        .filter(|option| option.is_active)
        .map(|option| option.percentage_increase)
        .sum()
}

/// Applies the active surcharges to `base_price`, rounded to currency precision.
pub fn calculate_final_price(base_price: f64, options: &[ServiceOption]) -> f64 {
    round_currency(base_price * (1.0 + total_percentage(options) / 100.0))
}

pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
