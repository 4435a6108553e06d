use std::path::Path;

use anyhow::Result;

use crate::data::aggregate::{ProfessorShare, RankBreakdown, RecordCount, SalaryAverage};
use crate::data::crossfilter::{Crossfilter, DimensionId, Filter, GroupId};
use crate::data::loader;
use crate::data::model::{FacultyRecord, Key};

// ---------------------------------------------------------------------------
// Dimension key functions
// ---------------------------------------------------------------------------

fn discipline_key(r: &FacultyRecord) -> Key {
    Key::from(r.discipline.clone())
}

fn sex_key(r: &FacultyRecord) -> Key {
    Key::from(&r.sex)
}

fn service_key(r: &FacultyRecord) -> Key {
    Key::Int(r.yrs_service)
}

fn phd_key(r: &FacultyRecord) -> Key {
    Key::Int(r.yrs_since_phd)
}

/// Composite scatter key: `[x_metric, salary, rank, sex]`.  Every unique
/// combination becomes its own singleton group, one plotted point each.
fn service_point_key(r: &FacultyRecord) -> Key {
    Key::List(vec![
        Key::Int(r.yrs_service),
        Key::Int(r.salary),
        Key::from(&r.rank),
        Key::from(&r.sex),
    ])
}

fn phd_point_key(r: &FacultyRecord) -> Key {
    Key::List(vec![
        Key::Int(r.yrs_since_phd),
        Key::Int(r.salary),
        Key::from(&r.rank),
        Key::from(&r.sex),
    ])
}

// ---------------------------------------------------------------------------
// Dashboard – the crossfilter plus every view's dimensions and groups
// ---------------------------------------------------------------------------

/// Everything the views read each frame.  The crossfilter is owned here and
/// handed to view functions by reference; all cross-view synchronization
/// happens through it.
pub struct Dashboard {
    pub index: Crossfilter,

    pub discipline_dim: DimensionId,
    pub discipline_counts: GroupId,
    /// Unique disciplines in display order, for the selector.
    pub disciplines: Vec<String>,

    pub gender_counts: GroupId,
    pub average_salary: GroupId,
    pub rank_breakdown: GroupId,
    pub professor_share: GroupId,

    pub service_points: GroupId,
    pub phd_points: GroupId,
    /// X-axis bounds of the scatter plots, taken from the unfiltered
    /// dataset once at build time.
    pub service_bounds: (i64, i64),
    pub phd_bounds: (i64, i64),
}

impl Dashboard {
    pub fn new(records: Vec<FacultyRecord>) -> Self {
        let mut index = Crossfilter::new(records);

        let discipline_dim = index.dimension("discipline", discipline_key);
        let discipline_counts = index.group::<RecordCount>(discipline_dim);

        let sex_dim = index.dimension("sex", sex_key);
        let gender_counts = index.group::<RecordCount>(sex_dim);
        let average_salary = index.group::<SalaryAverage>(sex_dim);
        let rank_breakdown = index.group::<RankBreakdown>(sex_dim);
        let professor_share = index.group::<ProfessorShare>(sex_dim);

        // Auxiliary single-field dimensions exist only to read the extremal
        // x values for the scatter axes.
        let service_dim = index.dimension("yrs_service", service_key);
        let phd_dim = index.dimension("yrs_since_phd", phd_key);
        let service_bounds = axis_bounds(&index, service_dim);
        let phd_bounds = axis_bounds(&index, phd_dim);

        let service_point_dim = index.dimension("service/salary", service_point_key);
        let service_points = index.group::<RecordCount>(service_point_dim);
        let phd_point_dim = index.dimension("phd/salary", phd_point_key);
        let phd_points = index.group::<RecordCount>(phd_point_dim);

        let disciplines = index
            .group_table::<RecordCount>(discipline_counts)
            .map(|table| table.keys().map(|k| k.to_string()).collect())
            .unwrap_or_default();

        Dashboard {
            index,
            discipline_dim,
            discipline_counts,
            disciplines,
            gender_counts,
            average_salary,
            rank_breakdown,
            professor_share,
            service_points,
            phd_points,
            service_bounds,
            phd_bounds,
        }
    }

    /// Currently selected discipline, if the selector filter is active.
    pub fn selected_discipline(&self) -> Option<String> {
        match self.index.filter(self.discipline_dim) {
            Filter::OneOf(selected) if selected.len() == 1 => selected
                .iter()
                .next()
                .and_then(|k| k.as_text())
                .map(|s| s.to_string()),
            _ => None,
        }
    }

    /// Apply or clear the discipline selector.  `None` restores "All".
    pub fn set_discipline(&mut self, discipline: Option<String>) {
        let filter = match discipline {
            Some(d) => Filter::one(Key::from(d)),
            None => Filter::All,
        };
        self.index.set_filter(self.discipline_dim, filter);
    }
}

/// Min/max key of an integer dimension over the full dataset.
fn axis_bounds(index: &Crossfilter, dim: DimensionId) -> (i64, i64) {
    let min = index.min_key(dim).and_then(|k| k.as_int()).unwrap_or(0);
    let max = index.max_key(dim).and_then(|k| k.as_int()).unwrap_or(0);
    (min, max)
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Built dashboard (None until a file is loaded).
    pub dashboard: Option<Dashboard>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Ingest a freshly loaded record set and build every view over it.
    pub fn set_records(&mut self, records: Vec<FacultyRecord>) {
        log::info!("Loaded {} faculty records", records.len());
        self.dashboard = Some(Dashboard::new(records));
        self.status_message = None;
        self.loading = false;
    }

    /// Load a dataset file and rebuild the dashboard.  On failure the old
    /// dashboard is kept and the error lands in the status line.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        self.loading = true;
        match loader::load_file(path) {
            Ok(records) => {
                self.set_records(records);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Rank, Sex};

    fn record(discipline: &str, sex: Sex, rank: Rank, salary: i64) -> FacultyRecord {
        FacultyRecord {
            discipline: discipline.to_string(),
            sex,
            rank,
            yrs_since_phd: 12,
            yrs_service: 9,
            salary,
        }
    }

    /// 2 Female (both Prof), 3 Male (1 Prof) – the worked example from the
    /// original dashboard.
    fn sample() -> Vec<FacultyRecord> {
        vec![
            record("A", Sex::Female, Rank::Prof, 120_000),
            record("B", Sex::Female, Rank::Prof, 140_000),
            record("A", Sex::Male, Rank::Prof, 150_000),
            record("A", Sex::Male, Rank::AsstProf, 80_000),
            record("B", Sex::Male, Rank::AssocProf, 95_000),
        ]
    }

    #[test]
    fn dashboard_wires_up_the_readouts() {
        let dash = Dashboard::new(sample());
        let shares = dash
            .index
            .group_table::<ProfessorShare>(dash.professor_share)
            .unwrap();

        assert_eq!(shares[&Key::from("Female")].fraction_professors(), 1.0);
        let men = shares[&Key::from("Male")].fraction_professors();
        assert!((men - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn selector_filters_every_view_and_restores() {
        let mut dash = Dashboard::new(sample());
        assert_eq!(dash.disciplines, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(dash.selected_discipline(), None);

        dash.set_discipline(Some("B".to_string()));
        assert_eq!(dash.selected_discipline(), Some("B".to_string()));
        assert_eq!(dash.index.included_len(), 2);

        let counts = dash
            .index
            .group_table::<RecordCount>(dash.gender_counts)
            .unwrap();
        assert_eq!(counts[&Key::from("Female")].count, 1);
        assert_eq!(counts[&Key::from("Male")].count, 1);

        let averages = dash
            .index
            .group_table::<SalaryAverage>(dash.average_salary)
            .unwrap();
        assert_eq!(averages[&Key::from("Female")].average, 140_000.0);
        assert_eq!(averages[&Key::from("Male")].average, 95_000.0);

        dash.set_discipline(None);
        assert_eq!(dash.selected_discipline(), None);
        assert_eq!(dash.index.included_len(), 5);
        let averages = dash
            .index
            .group_table::<SalaryAverage>(dash.average_salary)
            .unwrap();
        assert_eq!(averages[&Key::from("Female")].average, 130_000.0);
    }

    #[test]
    fn scatter_groups_and_bounds_are_built_from_the_full_dataset() {
        let mut records = sample();
        records[0].yrs_service = 2;
        records[2].yrs_service = 40;
        let mut dash = Dashboard::new(records);

        assert_eq!(dash.service_bounds, (2, 40));

        // Bounds were taken once; filtering does not move them.
        dash.set_discipline(Some("B".to_string()));
        assert_eq!(dash.service_bounds, (2, 40));

        let points = dash
            .index
            .group_table::<RecordCount>(dash.phd_points)
            .unwrap();
        // Visible points are exactly the filtered records.
        let visible: u64 = points.values().map(|c| c.count).sum();
        assert_eq!(visible, 2);
    }
}
