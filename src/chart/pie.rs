use crate::data::filter::by_site;
use crate::data::model::{Dataset, SiteSelector};

use super::{ChartSpec, Slice};

pub const ALL_SITES_TITLE: &str = "Total success launches by sites";
pub const SITE_TITLE: &str = "Success and Failed Launches";
pub const SUCCESS_LABEL: &str = "success";
pub const FAILED_LABEL: &str = "failed";

/// Success breakdown for the selected site(s).
///
/// * `All` – one slice per site (first-seen order) valued by its success
///   count; sites without successes keep a zero slice.
/// * `Site` – exactly `[success, failed]` for that site. An unknown site
///   gives two zero slices rather than an error.
pub fn pie_chart(dataset: &Dataset, site: &SiteSelector) -> ChartSpec {
    match site {
        SiteSelector::All => {
            let slices = dataset
                .sites()
                .iter()
                .map(|name| {
                    let selector = SiteSelector::Site(name.clone());
                    let value = by_site(dataset, &selector)
                        .filter(|rec| rec.outcome.is_success())
                        .count() as u64;
                    Slice { label: name.clone(), value }
                })
                .collect();
            ChartSpec::pie(ALL_SITES_TITLE, slices)
        }
        SiteSelector::Site(name) => {
            let (success, failed) = by_site(dataset, site).fold((0u64, 0u64), |(s, f), rec| {
                if rec.outcome.is_success() {
                    (s + 1, f)
                } else {
                    (s, f + 1)
                }
            });
            ChartSpec::pie(
                format!("{SITE_TITLE} for site {name}"),
                vec![
                    Slice { label: SUCCESS_LABEL.to_string(), value: success },
                    Slice { label: FAILED_LABEL.to_string(), value: failed },
                ],
            )
        }
    }
}
