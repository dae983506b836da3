/// Running sum and count of percentages for one label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelTotal {
    pub total_score: f64,
    pub count: usize,
}

impl LabelTotal {
    pub fn push(&mut self, value: f64) {
        self.total_score += value;
        self.count += 1;
    }

    /// Arithmetic mean of the pushed values. Returns 0.0 when empty.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_score / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(LabelTotal::default().average(), 0.0);
    }

    #[test]
    fn test_average_is_unweighted_mean() {
        let mut t = LabelTotal::default();
        t.push(75.0);
        t.push(50.0);
        t.push(100.0);

        assert_eq!(t.count, 3);
        assert_eq!(t.average(), 75.0);
    }
}
