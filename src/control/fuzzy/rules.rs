//! Fixed rule bases.
//!
//! Rows are error terms and columns are error-rate terms, both ordered
//! NB, NS, ZE, PS, PB. Each cell holds the index of the consequent output
//! term. Error is `setpoint − speed`, so a positive error means the vehicle
//! is too slow.

/// Number of terms on each input variable.
pub const INPUT_TERMS: usize = 5;

pub const INPUT_LABELS: [&str; INPUT_TERMS] = ["NB", "NS", "ZE", "PS", "PB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleBase {
    table: [[usize; INPUT_TERMS]; INPUT_TERMS],
    output_labels: &'static [&'static str],
}

impl RuleBase {
    /// Absolute throttle rules over four output terms. Negative or zero error
    /// coasts; only a clear speed deficit asks for real throttle.
    pub const CRUISE: RuleBase = RuleBase {
        table: [
            //  NB NS ZE PS PB    (error rate)
            [0, 0, 0, 0, 0], // e = NB
            [0, 0, 0, 0, 1], // e = NS
            [0, 0, 0, 1, 1], // e = ZE
            [1, 1, 2, 2, 3], // e = PS
            [2, 3, 3, 3, 3], // e = PB
        ],
        output_labels: &["Zero", "Low", "Medium", "High"],
    };

    /// Throttle-increment rules over five output terms. The table is
    /// antisymmetric: `out(i, j) = clamp(i + j − 2, 0, 4)`.
    pub const INCREMENTAL: RuleBase = RuleBase {
        table: [
            [0, 0, 0, 1, 2],
            [0, 0, 1, 2, 3],
            [0, 1, 2, 3, 4],
            [1, 2, 3, 4, 4],
            [2, 3, 4, 4, 4],
        ],
        output_labels: &["NB", "NS", "ZE", "PS", "PB"],
    };

    /// Consequent term index for `(error_term, rate_term)`.
    pub fn consequent(&self, error_term: usize, rate_term: usize) -> usize {
        self.table[error_term][rate_term]
    }

    pub fn output_terms(&self) -> usize {
        self.output_labels.len()
    }

    pub fn output_labels(&self) -> &'static [&'static str] {
        self.output_labels
    }

    /// Iterate `(error_term, rate_term, output_term)` triples.
    pub fn rules(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..INPUT_TERMS).flat_map(move |i| (0..INPUT_TERMS).map(move |j| (i, j, self.table[i][j])))
    }

    /// True if mirroring both inputs mirrors the consequent.
    pub fn is_antisymmetric(&self) -> bool {
        let last_out = self.output_terms() - 1;
        let last_in = INPUT_TERMS - 1;
        self.rules()
            .all(|(i, j, k)| self.table[last_in - i][last_in - j] == last_out - k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consequents_are_in_range() {
        for rb in [RuleBase::CRUISE, RuleBase::INCREMENTAL] {
            assert_eq!(rb.rules().count(), INPUT_TERMS * INPUT_TERMS);
            assert!(rb.rules().all(|(_, _, k)| k < rb.output_terms()));
        }
    }

    #[test]
    fn incremental_follows_index_sum() {
        for (i, j, k) in RuleBase::INCREMENTAL.rules() {
            let expected = (i + j).saturating_sub(2).min(4);
            assert_eq!(k, expected, "cell ({}, {})", i, j);
        }
        assert!(RuleBase::INCREMENTAL.is_antisymmetric());
    }

    #[test]
    fn cruise_table_is_not_antisymmetric() {
        // ZE/ZE maps to Zero, whose mirror would be High.
        assert_eq!(RuleBase::CRUISE.consequent(2, 2), 0);
        assert!(!RuleBase::CRUISE.is_antisymmetric());
    }

    #[test]
    fn cruise_is_monotone_in_error() {
        let rb = RuleBase::CRUISE;
        for j in 0..INPUT_TERMS {
            for i in 1..INPUT_TERMS {
                assert!(rb.consequent(i, j) >= rb.consequent(i - 1, j));
            }
        }
    }
}
