use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use super::aggregate::Accumulate;
use super::model::{FacultyRecord, Key};

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Key function of a dimension.  Capture-free on purpose: groups keep their
/// own copy so they can re-key records without borrowing the dimension.
pub type KeyFn = fn(&FacultyRecord) -> Key;

/// Constraint applied to one dimension's keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// No constraint; every record passes.
    All,
    /// Key must be one of the selected values.
    OneOf(BTreeSet<Key>),
    /// Inclusive range over integer keys.  Non-integer keys never pass.
    Range { min: i64, max: i64 },
}

impl Filter {
    /// Equality filter on a single key.
    pub fn one(key: Key) -> Filter {
        Filter::OneOf(BTreeSet::from([key]))
    }

    pub fn allows(&self, key: &Key) -> bool {
        match self {
            Filter::All => true,
            Filter::OneOf(selected) => selected.contains(key),
            Filter::Range { min, max } => key
                .as_int()
                .is_some_and(|i| i >= *min && i <= *max),
        }
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(usize);

struct Dimension {
    name: String,
    key_of: KeyFn,
    /// Record indices ordered by key; gives extremal access independent of
    /// any active filter.
    sorted: Vec<usize>,
    filter: Filter,
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Type-erased group so the index can push record deltas to a heterogeneous
/// set of accumulator tables.
trait GroupStore {
    fn add(&mut self, record: &FacultyRecord);
    fn remove(&mut self, record: &FacultyRecord);
    fn as_any(&self) -> &dyn Any;
}

struct GroupTable<A: Accumulate> {
    key_of: KeyFn,
    table: BTreeMap<Key, A>,
}

impl<A: Accumulate> GroupStore for GroupTable<A> {
    fn add(&mut self, record: &FacultyRecord) {
        let key = (self.key_of)(record);
        self.table.entry(key).or_default().add(record);
    }

    fn remove(&mut self, record: &FacultyRecord) {
        let key = (self.key_of)(record);
        if let Some(acc) = self.table.get_mut(&key) {
            acc.remove(record);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Crossfilter – the shared multidimensional index
// ---------------------------------------------------------------------------

/// In-memory index over the full record set.  Dimensions project records
/// onto keys, groups maintain one accumulator per key, and filters applied
/// through any dimension update every group incrementally.
///
/// A record excluded by an active filter on *any* dimension is excluded
/// from *every* group's value: filtering is global and simultaneous across
/// all views sharing the index.
pub struct Crossfilter {
    records: Vec<FacultyRecord>,
    dimensions: Vec<Dimension>,
    groups: Vec<Box<dyn GroupStore>>,
    /// Per record: number of dimensions whose filter currently rejects it.
    /// A record contributes to groups exactly when this is zero.
    fail_counts: Vec<u32>,
}

impl Crossfilter {
    pub fn new(records: Vec<FacultyRecord>) -> Self {
        let fail_counts = vec![0; records.len()];
        Crossfilter {
            records,
            dimensions: Vec::new(),
            groups: Vec::new(),
            fail_counts,
        }
    }

    /// Register a dimension keyed by `key_of`.  Builds the sorted index once.
    pub fn dimension(&mut self, name: &str, key_of: KeyFn) -> DimensionId {
        let mut sorted: Vec<usize> = (0..self.records.len()).collect();
        sorted.sort_by(|&a, &b| key_of(&self.records[a]).cmp(&key_of(&self.records[b])));

        self.dimensions.push(Dimension {
            name: name.to_string(),
            key_of,
            sorted,
            filter: Filter::All,
        });
        DimensionId(self.dimensions.len() - 1)
    }

    /// Create a group over `dim` with accumulator type `A`.
    ///
    /// One entry is seeded per key present in the *full* dataset, so a
    /// partition whose records are all filtered out stays visible at its
    /// zeroed state instead of vanishing from the charts.
    pub fn group<A: Accumulate>(&mut self, dim: DimensionId) -> GroupId {
        let key_of = self.dimensions[dim.0].key_of;

        let mut table: BTreeMap<Key, A> = BTreeMap::new();
        for record in &self.records {
            table.entry(key_of(record)).or_default();
        }
        for (i, record) in self.records.iter().enumerate() {
            if self.fail_counts[i] == 0 {
                table.entry(key_of(record)).or_default().add(record);
            }
        }

        self.groups.push(Box::new(GroupTable { key_of, table }));
        GroupId(self.groups.len() - 1)
    }

    /// Read a group's accumulator table.  `None` when `A` does not match
    /// the type the group was created with.
    pub fn group_table<A: Accumulate>(&self, id: GroupId) -> Option<&BTreeMap<Key, A>> {
        self.groups
            .get(id.0)?
            .as_any()
            .downcast_ref::<GroupTable<A>>()
            .map(|g| &g.table)
    }

    /// Replace the filter on one dimension and propagate the delta to every
    /// group.  Only records whose overall inclusion actually flips are
    /// re-reduced.
    pub fn set_filter(&mut self, dim: DimensionId, filter: Filter) {
        let key_of = self.dimensions[dim.0].key_of;
        let old = std::mem::replace(&mut self.dimensions[dim.0].filter, filter.clone());
        if old == filter {
            return;
        }

        let mut entered = 0usize;
        let mut left = 0usize;
        for (i, record) in self.records.iter().enumerate() {
            let key = key_of(record);
            let passed = old.allows(&key);
            let passes = filter.allows(&key);
            if passed == passes {
                continue;
            }
            if passes {
                self.fail_counts[i] -= 1;
                if self.fail_counts[i] == 0 {
                    entered += 1;
                    for group in &mut self.groups {
                        group.add(record);
                    }
                }
            } else {
                self.fail_counts[i] += 1;
                if self.fail_counts[i] == 1 {
                    left += 1;
                    for group in &mut self.groups {
                        group.remove(record);
                    }
                }
            }
        }

        log::debug!(
            "filter on '{}': {entered} records entered, {left} left",
            self.dimensions[dim.0].name
        );
    }

    pub fn filter(&self, dim: DimensionId) -> &Filter {
        &self.dimensions[dim.0].filter
    }

    /// Smallest key of the dimension over the full dataset, ignoring
    /// filters.  `None` only when the dataset is empty.
    pub fn min_key(&self, dim: DimensionId) -> Option<Key> {
        let d = &self.dimensions[dim.0];
        d.sorted.first().map(|&i| (d.key_of)(&self.records[i]))
    }

    /// Largest key of the dimension over the full dataset, ignoring filters.
    pub fn max_key(&self, dim: DimensionId) -> Option<Key> {
        let d = &self.dimensions[dim.0];
        d.sorted.last().map(|&i| (d.key_of)(&self.records[i]))
    }

    /// Total number of records, regardless of filters.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records passing all active filters.
    pub fn included_len(&self) -> usize {
        self.fail_counts.iter().filter(|&&c| c == 0).count()
    }
}
