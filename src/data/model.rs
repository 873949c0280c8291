use std::fmt;

// ---------------------------------------------------------------------------
// Column names of the launch records table
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// Wire value of the "every site" option in the site selector.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. Stored as `1` / `0` in the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a `class` value. Only exactly 0 or 1 are accepted.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 1.0 {
            Some(Outcome::Success)
        } else if class == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Payload mass in kilograms, finite and non-negative.
    pub payload_kg: f64,
    pub outcome: Outcome,
    /// Only used for colour grouping in the scatter chart.
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with values derived once at load time.
///
/// Never mutated after construction; the app shares it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in the order they first appear.
    sites: Vec<String>,
    /// `(min, max)` payload mass, `None` for an empty dataset.
    payload_bounds: Option<(f64, f64)>,
}

impl Dataset {
    /// Build derived values from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.iter().any(|s| *s == rec.site) {
                sites.push(rec.site.clone());
            }
            payload_bounds = Some(match payload_bounds {
                None => (rec.payload_kg, rec.payload_kg),
                Some((lo, hi)) => (lo.min(rec.payload_kg), hi.max(rec.payload_kg)),
            });
        }

        Dataset {
            records,
            sites,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn min_payload(&self) -> Option<f64> {
        self.payload_bounds.map(|(lo, _)| lo)
    }

    pub fn max_payload(&self) -> Option<f64> {
        self.payload_bounds.map(|(_, hi)| hi)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// Which launch sites a chart covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// The selector's wire value: `"ALL"` or the site name.
    pub fn value(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES,
            SiteSelector::Site(name) => name,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "All Sites"),
            SiteSelector::Site(name) => write!(f, "{name}"),
        }
    }
}

/// Inclusive payload mass interval in kilograms.
///
/// `lo > hi` is allowed and matches nothing; range sliders can pass through
/// that state while the user drags them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, payload_kg: f64) -> bool {
        self.lo <= payload_kg && payload_kg <= self.hi
    }

    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} – {:.0} kg", self.lo, self.hi)
    }
}

/// The control values a chart is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}
