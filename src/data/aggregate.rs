use super::model::{FacultyRecord, Rank};

// ---------------------------------------------------------------------------
// Accumulate – incremental reduce / un-reduce
// ---------------------------------------------------------------------------

/// A running aggregate maintained incrementally as records enter and leave
/// a filtered view.
///
/// `remove` must be the exact per-record inverse of `add`:
/// `remove(add(acc, r), r) == acc` for every accumulator state and record.
/// The engine adds and removes individual records as filters change rather
/// than recomputing groups from scratch, so an accumulator that is only
/// invertible in aggregate would drift.  Every shape below is built from
/// plain counts and sums, which also makes the final value independent of
/// the order adds and removes arrive in.
pub trait Accumulate: Default + Clone + 'static {
    fn add(&mut self, record: &FacultyRecord);
    fn remove(&mut self, record: &FacultyRecord);
}

// ---------------------------------------------------------------------------
// RecordCount – plain record count
// ---------------------------------------------------------------------------

/// Counts records.  Used for the selector entries, the gender-balance bars,
/// and the singleton groups behind the scatter plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCount {
    pub count: u64,
}

impl Accumulate for RecordCount {
    fn add(&mut self, _record: &FacultyRecord) {
        self.count += 1;
    }

    fn remove(&mut self, _record: &FacultyRecord) {
        self.count -= 1;
    }
}

// ---------------------------------------------------------------------------
// ProfessorShare – count-with-predicate
// ---------------------------------------------------------------------------

/// Counts records and, among them, those holding full professorship.
/// Grouped by sex this yields the percent-of-professors readouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfessorShare {
    pub count: u64,
    pub are_prof: u64,
}

impl ProfessorShare {
    /// Fraction of counted records that are full professors.  Pure
    /// projection over the current state; 0 when the group is empty.
    pub fn fraction_professors(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.are_prof as f64 / self.count as f64
        }
    }
}

impl Accumulate for ProfessorShare {
    fn add(&mut self, record: &FacultyRecord) {
        self.count += 1;
        if record.rank == Rank::Prof {
            self.are_prof += 1;
        }
    }

    fn remove(&mut self, record: &FacultyRecord) {
        self.count -= 1;
        if record.rank == Rank::Prof {
            self.are_prof -= 1;
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryAverage – running average
// ---------------------------------------------------------------------------

/// Running average of salary.  Count and total are the authoritative state;
/// `average` is refreshed after every mutation with an explicit zero-count
/// guard so an emptied group reads 0 rather than NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SalaryAverage {
    pub count: u64,
    pub total: i64,
    pub average: f64,
}

impl Accumulate for SalaryAverage {
    fn add(&mut self, record: &FacultyRecord) {
        self.count += 1;
        self.total += record.salary;
        self.average = self.total as f64 / self.count as f64;
    }

    fn remove(&mut self, record: &FacultyRecord) {
        self.count -= 1;
        if self.count == 0 {
            self.total = 0;
            self.average = 0.0;
        } else {
            self.total -= record.salary;
            self.average = self.total as f64 / self.count as f64;
        }
    }
}

// ---------------------------------------------------------------------------
// RankBreakdown – multi-category total / match
// ---------------------------------------------------------------------------

/// Total record count plus a match count per rank category.  The `other`
/// bucket absorbs ranks outside the three observed categories, so
/// `prof + assoc_prof + asst_prof + other == total` holds unconditionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankBreakdown {
    pub total: u64,
    pub prof: u64,
    pub assoc_prof: u64,
    pub asst_prof: u64,
    pub other: u64,
}

impl RankBreakdown {
    fn slot(&mut self, rank: &Rank) -> &mut u64 {
        match rank {
            Rank::Prof => &mut self.prof,
            Rank::AssocProf => &mut self.assoc_prof,
            Rank::AsstProf => &mut self.asst_prof,
            Rank::Other(_) => &mut self.other,
        }
    }

    fn matches(&self, rank: &Rank) -> u64 {
        match rank {
            Rank::Prof => self.prof,
            Rank::AssocProf => self.assoc_prof,
            Rank::AsstProf => self.asst_prof,
            Rank::Other(_) => self.other,
        }
    }

    /// Percent of the group's records holding the given rank.  Pure
    /// projection; 0 when the group is empty.
    pub fn percent(&self, rank: &Rank) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches(rank) as f64 / self.total as f64 * 100.0
        }
    }
}

impl Accumulate for RankBreakdown {
    fn add(&mut self, record: &FacultyRecord) {
        self.total += 1;
        *self.slot(&record.rank) += 1;
    }

    fn remove(&mut self, record: &FacultyRecord) {
        self.total -= 1;
        *self.slot(&record.rank) -= 1;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::data::model::Sex;

    fn record(sex: Sex, rank: Rank, salary: i64) -> FacultyRecord {
        FacultyRecord {
            discipline: "A".to_string(),
            sex,
            rank,
            yrs_since_phd: 10,
            yrs_service: 5,
            salary,
        }
    }

    fn check_inverse<A: Accumulate + PartialEq + std::fmt::Debug>(
        seed: &[FacultyRecord],
        probe: &FacultyRecord,
    ) {
        let mut acc = A::default();
        for r in seed {
            acc.add(r);
        }
        let before = acc.clone();
        acc.add(probe);
        acc.remove(probe);
        assert_eq!(acc, before);
    }

    #[rstest]
    #[case(record(Sex::Female, Rank::Prof, 120_000))]
    #[case(record(Sex::Male, Rank::AsstProf, 80_000))]
    #[case(record(Sex::Male, Rank::Other("Emeritus".into()), 60_000))]
    fn remove_is_the_exact_inverse_of_add(#[case] probe: FacultyRecord) {
        let seed = vec![
            record(Sex::Female, Rank::Prof, 100_000),
            record(Sex::Male, Rank::AssocProf, 90_000),
        ];
        check_inverse::<RecordCount>(&seed, &probe);
        check_inverse::<ProfessorShare>(&seed, &probe);
        check_inverse::<SalaryAverage>(&seed, &probe);
        check_inverse::<RankBreakdown>(&seed, &probe);
    }

    #[test]
    fn order_of_adds_and_removes_does_not_matter() {
        let a = record(Sex::Female, Rank::Prof, 100_000);
        let b = record(Sex::Male, Rank::AsstProf, 80_000);
        let c = record(Sex::Male, Rank::Prof, 150_000);

        let mut forward = SalaryAverage::default();
        forward.add(&a);
        forward.add(&b);
        forward.add(&c);
        forward.remove(&b);

        let mut shuffled = SalaryAverage::default();
        shuffled.add(&c);
        shuffled.add(&b);
        shuffled.remove(&b);
        shuffled.add(&a);

        assert_eq!(forward, shuffled);
        assert_eq!(forward.count, 2);
        assert_eq!(forward.total, 250_000);
    }

    #[test]
    fn running_average_tracks_total_over_count() {
        let mut acc = SalaryAverage::default();
        acc.add(&record(Sex::Female, Rank::Prof, 100_000));
        acc.add(&record(Sex::Male, Rank::Prof, 50_000));
        assert_eq!(acc.average, acc.total as f64 / acc.count as f64);
        assert_eq!(acc.average, 75_000.0);

        acc.remove(&record(Sex::Female, Rank::Prof, 100_000));
        assert_eq!(acc.average, 50_000.0);

        acc.remove(&record(Sex::Male, Rank::Prof, 50_000));
        assert_eq!(acc.count, 0);
        assert_eq!(acc.total, 0);
        assert_eq!(acc.average, 0.0);
    }

    #[test]
    fn empty_share_reads_zero_not_nan() {
        let acc = ProfessorShare::default();
        assert_eq!(acc.fraction_professors(), 0.0);

        let breakdown = RankBreakdown::default();
        assert_eq!(breakdown.percent(&Rank::Prof), 0.0);
    }

    #[test]
    fn rank_buckets_partition_the_total() {
        let mut acc = RankBreakdown::default();
        acc.add(&record(Sex::Female, Rank::Prof, 1));
        acc.add(&record(Sex::Male, Rank::AssocProf, 1));
        acc.add(&record(Sex::Male, Rank::AsstProf, 1));

        // The three observed categories are exhaustive here.
        assert_eq!(acc.prof + acc.assoc_prof + acc.asst_prof, acc.total);

        // An out-of-category rank breaks the three-way partition but the
        // `other` bucket restores it.
        acc.add(&record(Sex::Male, Rank::Other("Emeritus".into()), 1));
        assert_ne!(acc.prof + acc.assoc_prof + acc.asst_prof, acc.total);
        assert_eq!(
            acc.prof + acc.assoc_prof + acc.asst_prof + acc.other,
            acc.total
        );
    }
}
