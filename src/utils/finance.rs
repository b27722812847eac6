/// Profit as a percentage of cost. Zero cost yields a zero margin instead of
/// NaN or infinity.
pub fn profit_margin(profit: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    let margin = profit / cost * 100.0;
    if margin.is_finite() { margin } else { 0.0 }
}
