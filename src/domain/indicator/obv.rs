//! OBV (On-Balance Volume).

/// OBV[0] = 0
/// If close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
/// If close[i] < close[i-1]: OBV[i] = OBV[i-1] - volume[i]
/// If close[i] == close[i-1]: OBV[i] = OBV[i-1]
///
/// `closes` and `volumes` are paired by index; extra entries in the longer
/// slice are ignored.
pub fn calculate_obv(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let n = closes.len().min(volumes.len());
    let mut values = Vec::with_capacity(n);
    let mut obv = 0.0_f64;

    for i in 0..n {
        if i > 0 {
            if closes[i] > closes[i - 1] {
                obv += volumes[i];
            } else if closes[i] < closes[i - 1] {
                obv -= volumes[i];
            }
        }
        values.push(obv);
    }

    values
}
