use super::model::{Dataset, LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Record predicates shared by the chart aggregators
// ---------------------------------------------------------------------------

/// Records launched from the selected site(s), in dataset order.
pub fn by_site<'a>(
    dataset: &'a Dataset,
    site: &'a SiteSelector,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |rec| site.matches(&rec.site))
}

/// Records passing both the site and the payload filter.
///
/// Both payload bounds are checked against the same site-filtered stream.
/// An inverted range yields nothing.
pub fn by_site_and_payload<'a>(
    dataset: &'a Dataset,
    site: &'a SiteSelector,
    payload: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    by_site(dataset, site).filter(move |rec| payload.contains(rec.payload_kg))
}
