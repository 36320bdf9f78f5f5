/// Aggregate of a resampled metric: one value per fold in, mean and
/// spread out.
///
/// The standard error is the sample standard deviation divided by
/// `sqrt(n)`; it is what the model selector uses to break ties between
/// grid points with equal means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    /// Arithmetic mean of the values.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator; 0 for a single value).
    pub std_dev: f64,
    /// Standard error of the mean (`std_dev / sqrt(n)`).
    pub std_err: f64,
    /// Number of values aggregated.
    pub n: usize,
}

impl MetricSummary {
    /// Computes a summary from metric values.
    ///
    /// # Returns
    ///
    /// * `Some(MetricSummary)` - if there is at least one value
    /// * `None` - if the iterator is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use plyfold_stats::summary::MetricSummary;
    /// let summary = MetricSummary::new([0.5, 0.7]).unwrap();
    /// assert!((summary.mean - 0.6).abs() < 1e-12);
    /// assert_eq!(summary.n, 2);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let std_err = std_dev / (n as f64).sqrt();

        Some(Self {
            mean,
            std_dev,
            std_err,
            n,
        })
    }
}
