use crate::data::filter::by_site_and_payload;
use crate::data::model::{Dataset, PayloadRange, SiteSelector, COL_CLASS, COL_PAYLOAD};

use super::{ChartSpec, ScatterPoint};

/// Payload mass against outcome for every launch passing both filters.
///
/// A direct projection in dataset order, one point per record. Selections
/// that match nothing (unknown site, inverted range) give an empty chart.
pub fn scatter_chart(dataset: &Dataset, site: &SiteSelector, payload: PayloadRange) -> ChartSpec {
    let points = by_site_and_payload(dataset, site, payload)
        .map(|rec| ScatterPoint {
            x: rec.payload_kg,
            y: f64::from(rec.outcome.class()),
            category: rec.booster_category.clone(),
        })
        .collect();

    let title = match site {
        SiteSelector::All => "Correlation between payload and success for all sites".to_string(),
        SiteSelector::Site(name) => {
            format!("Correlation between payload and success for site {name}")
        }
    };

    ChartSpec::scatter(title, COL_PAYLOAD, COL_CLASS, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("A", 1500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 5000.0, Outcome::Success, "FT"),
        ])
    }

    fn triples(spec: &ChartSpec) -> Vec<(f64, f64, &str)> {
        spec.points().iter().map(|p| (p.x, p.y, p.category.as_str())).collect()
    }

    #[test]
    fn filters_all_sites_by_payload() {
        let spec = scatter_chart(&dataset(), &SiteSelector::All, PayloadRange::new(1000.0, 6000.0));
        assert_eq!(triples(&spec), vec![(1500.0, 0.0, "v1.1"), (5000.0, 1.0, "FT")]);
        assert_eq!(spec.x_label.as_deref(), Some(COL_PAYLOAD));
    }

    #[test]
    fn full_range_keeps_every_record() {
        let ds = dataset();
        let spec = scatter_chart(&ds, &SiteSelector::All, PayloadRange::new(0.0, 10000.0));
        let expected: Vec<(f64, f64, &str)> = ds
            .records()
            .iter()
            .map(|r| (r.payload_kg, f64::from(r.outcome.class()), r.booster_category.as_str()))
            .collect();
        assert_eq!(triples(&spec), expected);
    }

    #[test]
    fn single_site_and_range() {
        let spec = scatter_chart(
            &dataset(),
            &SiteSelector::Site("A".into()),
            PayloadRange::new(0.0, 1000.0),
        );
        assert_eq!(triples(&spec), vec![(500.0, 1.0, "v1.0")]);
    }

    #[test]
    fn inverted_range_is_empty() {
        for site in [SiteSelector::All, SiteSelector::Site("A".into())] {
            let spec = scatter_chart(&dataset(), &site, PayloadRange::new(6000.0, 1000.0));
            assert!(spec.is_empty());
        }
    }

    #[test]
    fn unknown_site_is_empty() {
        let spec = scatter_chart(
            &dataset(),
            &SiteSelector::Site("nowhere".into()),
            PayloadRange::new(0.0, 10000.0),
        );
        assert!(spec.points().is_empty());
    }

    #[test]
    fn repeated_calls_agree() {
        let ds = dataset();
        let range = PayloadRange::new(0.0, 5000.0);
        assert_eq!(
            scatter_chart(&ds, &SiteSelector::All, range),
            scatter_chart(&ds, &SiteSelector::All, range)
        );
    }
}
