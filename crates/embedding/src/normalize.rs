/// In-place L2 normalization. A zero vector is divided by 1, i.e. left as is.
pub(crate) fn l2_normalize_in_place(v: &mut [f64]) {
    let magnitude = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let divisor = if magnitude == 0.0 { 1.0 } else { magnitude };
    for x in v.iter_mut() {
        *x /= divisor;
    }
}
