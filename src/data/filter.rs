use std::collections::BTreeSet;

use super::model::{AccidentRecord, CategoricalField, NumericField};

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// One condition on a single field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `lo <= value <= hi`; an inverted range or an absent value matches
    /// nothing.
    Range {
        field: NumericField,
        lo: i64,
        hi: i64,
    },
    /// Value must be one of `values`. An empty set matches nothing.
    OneOf {
        field: CategoricalField,
        values: BTreeSet<String>,
    },
    Equals {
        field: CategoricalField,
        value: String,
    },
    EqualsNumber {
        field: NumericField,
        value: i64,
    },
}

impl Predicate {
    pub fn matches(&self, record: &AccidentRecord) -> bool {
        match self {
            Predicate::Range { field, lo, hi } => record
                .numeric(*field)
                .is_some_and(|v| *lo <= v && v <= *hi),
            Predicate::OneOf { field, values } => values.contains(record.category(*field)),
            Predicate::Equals { field, value } => record.category(*field) == value,
            Predicate::EqualsNumber { field, value } => record.numeric(*field) == Some(*value),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter: a conjunction of predicates
// ---------------------------------------------------------------------------

/// All predicates must hold. No implicit defaulting happens here: callers
/// that mean "all values" pass the full observed domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, field: NumericField, (lo, hi): (i64, i64)) -> Self {
        self.predicates.push(Predicate::Range { field, lo, hi });
        self
    }

    pub fn one_of<I, S>(mut self, field: CategoricalField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predicates.push(Predicate::OneOf {
            field,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn equals(mut self, field: CategoricalField, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Equals {
            field,
            value: value.into(),
        });
        self
    }

    pub fn equals_number(mut self, field: NumericField, value: i64) -> Self {
        self.predicates.push(Predicate::EqualsNumber { field, value });
        self
    }

    /// Conjunction of `self` and `other`.
    pub fn and(mut self, other: Filter) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, record: &AccidentRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

/// Return the records that pass `filter`, in input order.
///
/// `rows` is either the full table ([`AccidentDataset::rows`]) or the
/// output of a previous call, so filters can be chained.
///
/// [`AccidentDataset::rows`]: super::model::AccidentDataset::rows
pub fn apply<'a>(rows: &[&'a AccidentRecord], filter: &Filter) -> Vec<&'a AccidentRecord> {
    rows.iter()
        .copied()
        .filter(|r| filter.matches(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, ten_records};

    fn positions(all: &[AccidentRecord], subset: &[&AccidentRecord]) -> Vec<usize> {
        subset
            .iter()
            .map(|s| {
                all.iter()
                    .position(|r| std::ptr::eq(r, *s))
                    .expect("subset row comes from the table")
            })
            .collect()
    }

    #[test]
    fn year_and_motive_select_the_2010_commutes() {
        let table = ten_records();
        let rows: Vec<&AccidentRecord> = table.iter().collect();
        let filter = Filter::new()
            .range(NumericField::Year, (2010, 2010))
            .one_of(CategoricalField::Motive, ["commute"]);

        let subset = apply(&rows, &filter);
        assert_eq!(positions(&table, &subset), vec![1, 4, 8]);
    }

    #[test]
    fn range_is_sound_and_complete() {
        let table = ten_records();
        let rows: Vec<&AccidentRecord> = table.iter().collect();
        for (lo, hi) in [(0, 23), (7, 8), (12, 12), (15, 19), (20, 23)] {
            let subset = apply(&rows, &Filter::new().range(NumericField::Hour, (lo, hi)));
            assert!(subset.iter().all(|r| (lo..=hi).contains(&i64::from(r.hour))));
            let expected = table
                .iter()
                .filter(|r| (lo..=hi).contains(&i64::from(r.hour)))
                .count();
            assert_eq!(subset.len(), expected, "hour range {lo}..={hi}");
        }
    }

    #[test]
    fn filtering_is_idempotent_and_chainable() {
        let table = ten_records();
        let rows: Vec<&AccidentRecord> = table.iter().collect();
        let filter = Filter::new()
            .range(NumericField::Hour, (7, 12))
            .one_of(CategoricalField::Severity, ["Indemne", "Blessé léger"]);

        let once = apply(&rows, &filter);
        let twice = apply(&once, &filter);
        assert_eq!(positions(&table, &once), positions(&table, &twice));

        let chained = apply(
            &apply(&rows, &Filter::new().range(NumericField::Hour, (7, 12))),
            &Filter::new().one_of(CategoricalField::Severity, ["Indemne", "Blessé léger"]),
        );
        assert_eq!(positions(&table, &once), positions(&table, &chained));
    }

    #[test]
    fn empty_list_and_out_of_domain_range_yield_empty_subsets() {
        let table = ten_records();
        let rows: Vec<&AccidentRecord> = table.iter().collect();

        let none: [&str; 0] = [];
        assert!(apply(&rows, &Filter::new().one_of(CategoricalField::Motive, none)).is_empty());
        assert!(apply(&rows, &Filter::new().range(NumericField::Year, (2030, 2040))).is_empty());
        assert!(apply(&rows, &Filter::new().range(NumericField::Hour, (12, 8))).is_empty());
        assert!(apply(&[], &Filter::new()).is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let table = ten_records();
        let rows: Vec<&AccidentRecord> = table.iter().collect();
        let subset = apply(&rows, &Filter::new());
        assert_eq!(positions(&table, &subset), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn equality_predicates() {
        let rec = AccidentRecord {
            sex: "F".into(),
            month: 3,
            ..record()
        };
        assert!(Filter::new()
            .equals(CategoricalField::Sex, "F")
            .equals_number(NumericField::Month, 3)
            .matches(&rec));
        assert!(!Filter::new().equals(CategoricalField::Sex, "M").matches(&rec));
        assert!(!Filter::new()
            .equals_number(NumericField::Month, 4)
            .matches(&rec));
    }

    #[test]
    fn unknown_age_never_matches_age_predicates() {
        let rec = AccidentRecord {
            age: None,
            ..record()
        };
        assert!(!Filter::new().range(NumericField::Age, (0, 120)).matches(&rec));
        assert!(!Filter::new().equals_number(NumericField::Age, 30).matches(&rec));
        assert!(Filter::new().range(NumericField::Hour, (0, 23)).matches(&rec));
    }

    #[test]
    fn and_concatenates_predicates() {
        let f = Filter::new()
            .range(NumericField::Age, (0, 17))
            .and(Filter::new().equals(CategoricalField::Sex, "F"));
        assert_eq!(f.predicates().len(), 2);
    }
}
