use crate::domain::model::{DistributionBar, Population};

impl Population {
    /// Buckets from PSA 10 down to "6 and lower".
    pub fn buckets(&self) -> [(&'static str, u64); 5] {
        [
            ("10", self.psa10),
            ("9", self.psa9),
            ("8", self.psa8),
            ("7", self.psa7),
            ("6", self.psa6_lower),
        ]
    }

    /// Bar lengths relative to the largest bucket; all zero when every bucket is empty.
    pub fn distribution(&self) -> Vec<DistributionBar> {
        let buckets = self.buckets();
        let max = buckets.iter().map(|(_, count)| *count).max().unwrap_or(0);

        buckets
            .into_iter()
            .map(|(label, count)| DistributionBar {
                label,
                count,
                ratio: if max > 0 {
                    count as f64 / max as f64
                } else {
                    0.0
                },
            })
            .collect()
    }
}
