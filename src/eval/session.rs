use std::sync::{Arc, Mutex};

use crate::{
    composition::model::CaptionComposition,
    eval::evaluator::{EvaluatedFrame, Evaluator, PrimaryWidths},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CuecastError, CuecastResult},
    layout::measure::{
        MeasurementSlot, ResizeObserver, ResizeSubscription, SharedSlot, TextMeasurer, lock_slot,
        measure_pending,
    },
    schedule::scheduler::ScheduledInterval,
};

/// Options controlling range evaluation.
#[derive(Clone, Debug, Default)]
pub struct SessionOpts {
    /// Evaluate frames of a range in parallel.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Front-loads scheduling once, then answers per-frame queries.
///
/// Each cue owns a measurement slot observed for resizes. Until a slot
/// resolves, that cue's layout uses the fallback width.
pub struct CaptionSession {
    comp: CaptionComposition,
    schedule: Vec<ScheduledInterval>,
    slots: Vec<SharedSlot>,
    observer: ResizeObserver,
    subscriptions: Vec<ResizeSubscription>,
    opts: SessionOpts,
}

impl CaptionSession {
    /// Validate `comp`, schedule its cues and open one measurement per cue.
    pub fn new(comp: CaptionComposition, opts: SessionOpts) -> CuecastResult<Self> {
        comp.validate()?;
        if opts.threads == Some(0) {
            return Err(CuecastError::validation(
                "session 'threads' must be >= 1 when set",
            ));
        }

        let schedule = comp.schedule();
        let observer = ResizeObserver::new();
        let slots: Vec<SharedSlot> = comp
            .cues
            .iter()
            .map(|cue| {
                let mut slot = MeasurementSlot::new();
                slot.request(&cue.primary_text);
                Arc::new(Mutex::new(slot))
            })
            .collect();
        let subscriptions = slots.iter().map(|s| observer.observe(s.clone())).collect();

        tracing::debug!(
            id = %comp.id,
            cues = comp.cues.len(),
            duration = comp.duration().0,
            "caption session ready"
        );
        Ok(Self {
            comp,
            schedule,
            slots,
            observer,
            subscriptions,
            opts,
        })
    }

    /// The composition being evaluated.
    pub fn composition(&self) -> &CaptionComposition {
        &self.comp
    }

    /// The precomputed schedule.
    pub fn schedule(&self) -> &[ScheduledInterval] {
        &self.schedule
    }

    /// Total frames.
    pub fn duration(&self) -> FrameIndex {
        self.comp.duration()
    }

    /// Measurement slot of cue `index`.
    pub fn slot(&self, index: usize) -> Option<&SharedSlot> {
        self.slots.get(index)
    }

    /// Run every outstanding measurement with `measurer`.
    ///
    /// Call after fonts become available and after each resize.
    pub fn measure_pending(&self, measurer: &mut dyn TextMeasurer) -> CuecastResult<usize> {
        let style = self
            .comp
            .typography
            .primary_text_style(f64::from(self.comp.canvas.width));
        let mut measured = 0;
        for slot in &self.slots {
            if lock_slot(slot).is_pending() {
                measure_pending(slot, measurer, &style)?;
                measured += 1;
            }
        }
        Ok(measured)
    }

    /// Container resized: every measured cue needs re-measurement.
    pub fn notify_resize(&self) -> usize {
        self.observer.notify_resize()
    }

    /// Stop observing resizes (teardown). Measured widths are kept.
    pub fn release_observers(&mut self) {
        self.subscriptions.clear();
    }

    /// Number of live resize observations.
    pub fn observed_count(&self) -> usize {
        self.observer.observed_count()
    }

    /// Evaluate one frame with the widths measured so far.
    pub fn eval_frame(&self, frame: FrameIndex) -> CuecastResult<EvaluatedFrame> {
        Evaluator::eval_frame(&self.comp, &self.schedule, frame, &self.widths())
    }

    /// Evaluate a frame range, honoring [`SessionOpts`].
    pub fn eval_range(&self, range: FrameRange) -> CuecastResult<Vec<EvaluatedFrame>> {
        let widths = self.widths();
        if !self.opts.parallel {
            return Evaluator::eval_frames(&self.comp, &self.schedule, range, &widths, false);
        }

        let pool = build_thread_pool(self.opts.threads)?;
        pool.install(|| Evaluator::eval_frames(&self.comp, &self.schedule, range, &widths, true))
    }

    fn widths(&self) -> PrimaryWidths {
        PrimaryWidths::from_slots(&self.slots)
    }
}

fn build_thread_pool(threads: Option<usize>) -> CuecastResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CuecastError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/session.rs"]
mod tests;
