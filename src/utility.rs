use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    engine::{round_store::RoundSink, RoundPlan},
    error::SearchError,
    graphs::VertexRecord,
};

pub fn get_progressbar_long_jobs(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    if let Ok(style) =
        ProgressStyle::with_template(" {msg} {wide_bar} {pos}/{len} estimated remaining: {eta_precise}")
    {
        bar.set_style(style);
    }
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    if let Ok(style) = ProgressStyle::with_template(" {spinner} {msg} [{elapsed_precise}]") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Advances a progress bar by one for every round committed to `inner`.
pub struct ProgressSink<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: RoundSink> ProgressSink<S> {
    pub fn new(inner: S, bar: ProgressBar) -> Self {
        ProgressSink { inner, bar }
    }

    pub fn into_inner(self) -> S {
        self.bar.finish_and_clear();
        self.inner
    }
}

impl<S: RoundSink> RoundSink for ProgressSink<S> {
    fn commit(&mut self, plan: &RoundPlan, partitions: &[Vec<VertexRecord>]) -> Result<(), SearchError> {
        self.inner.commit(plan, partitions)?;

        let records: usize = partitions.iter().map(Vec::len).sum();
        self.bar
            .set_message(format!("round {} committed, {} records", plan.round + 1, records));
        self.bar.inc(1);
        Ok(())
    }
}
