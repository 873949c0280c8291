use std::sync::Arc;

use crate::chart::{pie_chart, scatter_chart, ChartSpec};
use crate::data::model::{Dataset, FilterSelection, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Controls, outputs and events
// ---------------------------------------------------------------------------

/// Input controls that publish values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    SiteDropdown,
    PayloadSlider,
}

/// Chart slots the render sink fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputId {
    SuccessPie,
    PayloadScatter,
}

/// A control's new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteChanged(SiteSelector),
    PayloadChanged(PayloadRange),
}

impl ControlEvent {
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::SiteChanged(_) => ControlId::SiteDropdown,
            ControlEvent::PayloadChanged(_) => ControlId::PayloadSlider,
        }
    }
}

/// Pure chart computation bound to an output slot.
pub type ComputeFn = fn(&Dataset, &FilterSelection) -> ChartSpec;

pub struct Callback {
    pub inputs: Vec<ControlId>,
    pub output: OutputId,
    compute: ComputeFn,
}

/// Receives freshly computed charts.
pub trait RenderSink {
    fn render(&mut self, output: OutputId, chart: ChartSpec);
}

fn compute_pie(dataset: &Dataset, selection: &FilterSelection) -> ChartSpec {
    pie_chart(dataset, &selection.site)
}

fn compute_scatter(dataset: &Dataset, selection: &FilterSelection) -> ChartSpec {
    scatter_chart(dataset, &selection.site, selection.payload)
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Holds the current control values and reruns subscribed callbacks when
/// one of their inputs changes.
pub struct Dispatcher {
    dataset: Arc<Dataset>,
    selection: FilterSelection,
    callbacks: Vec<Callback>,
}

impl Dispatcher {
    /// A dispatcher with no subscriptions.
    pub fn new(dataset: Arc<Dataset>, selection: FilterSelection) -> Self {
        Self {
            dataset,
            selection,
            callbacks: Vec::new(),
        }
    }

    /// The dashboard wiring: site → pie, site + payload → scatter.
    pub fn dashboard(dataset: Arc<Dataset>, selection: FilterSelection) -> Self {
        let mut dispatcher = Self::new(dataset, selection);
        dispatcher.subscribe(&[ControlId::SiteDropdown], OutputId::SuccessPie, compute_pie);
        dispatcher.subscribe(
            &[ControlId::SiteDropdown, ControlId::PayloadSlider],
            OutputId::PayloadScatter,
            compute_scatter,
        );
        dispatcher
    }

    pub fn subscribe(&mut self, inputs: &[ControlId], output: OutputId, compute: ComputeFn) {
        self.callbacks.push(Callback {
            inputs: inputs.to_vec(),
            output,
            compute,
        });
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Apply a control change and re-render every output depending on it.
    ///
    /// Returns the number of outputs recomputed; an unchanged value
    /// recomputes nothing.
    pub fn publish(&mut self, event: ControlEvent, sink: &mut impl RenderSink) -> usize {
        let changed = match &event {
            ControlEvent::SiteChanged(site) => {
                if let SiteSelector::Site(name) = site {
                    if !self.dataset.contains_site(name) {
                        log::warn!("Selected site {name:?} is not in the dataset");
                    }
                }
                replace_if_changed(&mut self.selection.site, site.clone())
            }
            ControlEvent::PayloadChanged(range) => {
                if range.is_inverted() {
                    log::warn!("Payload range {range} is inverted, nothing will match");
                }
                replace_if_changed(&mut self.selection.payload, *range)
            }
        };
        if !changed {
            return 0;
        }

        let control = event.control();
        let mut rendered = 0;
        for cb in self.callbacks.iter().filter(|cb| cb.inputs.contains(&control)) {
            sink.render(cb.output, (cb.compute)(&self.dataset, &self.selection));
            rendered += 1;
        }
        log::debug!(
            "{:?} changed (site={}, payload={}), re-rendered {rendered} output(s)",
            control,
            self.selection.site.value(),
            self.selection.payload
        );
        rendered
    }

    /// Render every output from the current selection, e.g. on first paint.
    pub fn refresh_all(&self, sink: &mut impl RenderSink) {
        for cb in &self.callbacks {
            sink.render(cb.output, (cb.compute)(&self.dataset, &self.selection));
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    #[derive(Default)]
    struct Recorder {
        rendered: Vec<(OutputId, ChartSpec)>,
    }

    impl RenderSink for Recorder {
        fn render(&mut self, output: OutputId, chart: ChartSpec) {
            self.rendered.push((output, chart));
        }
    }

    fn dispatcher() -> Dispatcher {
        let ds = Dataset::from_records(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("A", 1500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("B", 5000.0, Outcome::Success, "FT"),
        ]);
        Dispatcher::dashboard(
            Arc::new(ds),
            FilterSelection {
                site: SiteSelector::All,
                payload: PayloadRange::new(0.0, 10000.0),
            },
        )
    }

    fn outputs(rec: &Recorder) -> Vec<OutputId> {
        rec.rendered.iter().map(|(o, _)| *o).collect()
    }

    #[test]
    fn refresh_renders_every_output() {
        let mut rec = Recorder::default();
        dispatcher().refresh_all(&mut rec);
        assert_eq!(outputs(&rec), vec![OutputId::SuccessPie, OutputId::PayloadScatter]);
    }

    #[test]
    fn site_change_rerenders_both_charts() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        let n = d.publish(ControlEvent::SiteChanged(SiteSelector::Site("B".into())), &mut rec);
        assert_eq!(n, 2);
        assert_eq!(rec.rendered[0].1.slices()[1].value, 0);
        assert_eq!(rec.rendered[1].1.points().len(), 1);
    }

    #[test]
    fn payload_change_rerenders_only_scatter() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        d.publish(ControlEvent::PayloadChanged(PayloadRange::new(1000.0, 6000.0)), &mut rec);
        assert_eq!(outputs(&rec), vec![OutputId::PayloadScatter]);
        assert_eq!(rec.rendered[0].1.points().len(), 2);
        assert_eq!(d.selection().payload, PayloadRange::new(1000.0, 6000.0));
    }

    #[test]
    fn unchanged_value_is_a_no_op() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        assert_eq!(d.publish(ControlEvent::SiteChanged(SiteSelector::All), &mut rec), 0);
        assert!(rec.rendered.is_empty());
    }

    #[test]
    fn invalid_selections_render_empty_charts() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        d.publish(ControlEvent::PayloadChanged(PayloadRange::new(9000.0, 0.0)), &mut rec);
        d.publish(ControlEvent::SiteChanged(SiteSelector::Site("C".into())), &mut rec);
        assert!(rec.rendered.iter().all(|(_, chart)| chart.is_empty()));
    }
}
