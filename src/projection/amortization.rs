//! Loan amortization helper
//!
//! Turns a financed major expense into a constant annual payment. Used by the
//! plan editor to preview a loan and by callers preparing installment amounts
//! before projection.

/// Constant annual payment that fully amortizes `principal` over the
/// inclusive `[start_year, end_year]` window at the given annual rate.
///
/// A zero rate degrades to straight-line repayment. With `r = rate / 100`
/// and `n` years the payment is the standard annuity
/// `P * r * (1+r)^n / ((1+r)^n - 1)`.
///
/// No input is guarded: a negative principal, a negative rate, or a window
/// with `end_year < start_year` propagates into the result (possibly as NaN
/// or a negative payment). Callers validate before invoking.
pub fn annual_installment(
    principal: f64,
    annual_interest_pct: f64,
    start_year: i32,
    end_year: i32,
) -> f64 {
    let years = (end_year - start_year + 1) as f64;
    let rate = annual_interest_pct / 100.0;

    if rate == 0.0 {
        return principal / years;
    }

    let compound = (1.0 + rate).powf(years);
    principal * (rate * compound) / (compound - 1.0)
}
