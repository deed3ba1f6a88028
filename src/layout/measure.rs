use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, Weak,
    atomic::{AtomicU64, Ordering},
};

use crate::foundation::error::{CuecastError, CuecastResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Style inputs that affect measured width.
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Wrap width; the measured width never exceeds it.
    pub max_width_px: Option<f32>,
}

/// Black-box "measure text width" service supplied by the host.
pub trait TextMeasurer {
    /// Laid-out width of `text` in pixels.
    fn measure_width(&mut self, text: &str, style: &TextStyle) -> CuecastResult<f64>;
}

/// Deterministic measurer: every char advances by `advance_em * font_size`.
///
/// Useful for headless hosts and tests where no font is available.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMeasurer {
    /// Per-character advance as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure_width(&mut self, text: &str, style: &TextStyle) -> CuecastResult<f64> {
        let natural = text.chars().count() as f64 * self.advance_em * f64::from(style.font_size_px);
        Ok(match style.max_width_px {
            Some(max) => natural.min(f64::from(max)),
            None => natural,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

/// Measures text by shaping it with Parley against registered font bytes.
///
/// Construction registers the fonts; a measurer that exists is "font ready".
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    family_name: String,
}

impl std::fmt::Debug for ParleyMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasurer")
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl ParleyMeasurer {
    /// Register `font_bytes` and use its first family for all measurements.
    pub fn new(font_bytes: &[u8]) -> CuecastResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CuecastError::measurement("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CuecastError::measurement("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, "font registered for measurement");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family used for shaping.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure_width(&mut self, text: &str, style: &TextStyle) -> CuecastResult<f64> {
        if !style.font_size_px.is_finite() || style.font_size_px <= 0.0 {
            return Err(CuecastError::measurement(
                "font_size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.font_size_px));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(style.max_width_px);
        Ok(f64::from(layout.width()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle for one outstanding measurement request.
pub struct MeasureTicket {
    generation: u64,
}

/// Two-phase width measurement for one text element.
///
/// `request` opens a measurement, `resolve` completes it. Any later request or
/// resize invalidation makes earlier tickets stale, so late results for old
/// content are dropped.
#[derive(Clone, Debug, Default)]
pub struct MeasurementSlot {
    generation: u64,
    text: Option<String>,
    width: Option<f64>,
    pending: bool,
}

impl MeasurementSlot {
    /// Empty slot; nothing measured yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring `text`.
    ///
    /// Changing the text discards the previous width; re-requesting the same
    /// text keeps it until the new result arrives.
    pub fn request(&mut self, text: &str) -> MeasureTicket {
        if self.text.as_deref() != Some(text) {
            self.text = Some(text.to_string());
            self.width = None;
        }
        self.bump()
    }

    /// Mark the current width as needing re-measurement (container resized).
    pub fn invalidate(&mut self) -> Option<MeasureTicket> {
        self.text.as_ref()?;
        Some(self.bump())
    }

    /// Complete a measurement. Returns `false` (and changes nothing) for stale
    /// tickets.
    pub fn resolve(&mut self, ticket: MeasureTicket, width: f64) -> bool {
        if ticket.generation != self.generation {
            tracing::trace!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale measurement"
            );
            return false;
        }
        self.width = (width.is_finite() && width > 0.0).then_some(width);
        self.pending = false;
        true
    }

    /// Ticket for the outstanding request, if one is open.
    pub fn pending_ticket(&self) -> Option<MeasureTicket> {
        self.pending.then_some(MeasureTicket {
            generation: self.generation,
        })
    }

    /// Text the slot is measuring.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Last resolved width, if any.
    pub fn current(&self) -> Option<f64> {
        self.width
    }

    /// True while a request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn bump(&mut self) -> MeasureTicket {
        self.generation += 1;
        self.pending = true;
        MeasureTicket {
            generation: self.generation,
        }
    }
}

/// Slot shared between a display element and the resize observer.
pub type SharedSlot = Arc<Mutex<MeasurementSlot>>;

/// Lock a shared slot, recovering the data if a holder panicked.
pub fn lock_slot(slot: &SharedSlot) -> MutexGuard<'_, MeasurementSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run any outstanding measurement on `slot` synchronously.
///
/// Returns the current width after the attempt.
pub fn measure_pending(
    slot: &SharedSlot,
    measurer: &mut dyn TextMeasurer,
    style: &TextStyle,
) -> CuecastResult<Option<f64>> {
    let (ticket, text) = {
        let guard = lock_slot(slot);
        match (guard.pending_ticket(), guard.text()) {
            (Some(t), Some(text)) => (t, text.to_string()),
            _ => return Ok(guard.current()),
        }
    };

    let width = measurer.measure_width(&text, style)?;
    let mut guard = lock_slot(slot);
    guard.resolve(ticket, width);
    Ok(guard.current())
}

type Observed = Vec<(u64, SharedSlot)>;

/// Fan-out of container resize notifications to observed slots.
#[derive(Debug, Default)]
pub struct ResizeObserver {
    observed: Arc<Mutex<Observed>>,
    next_id: AtomicU64,
}

impl ResizeObserver {
    /// Observer with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `slot`. Observation ends when the guard drops.
    pub fn observe(&self, slot: SharedSlot) -> ResizeSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock_observed(&self.observed).push((id, slot));
        ResizeSubscription {
            id,
            observed: Arc::downgrade(&self.observed),
        }
    }

    /// Invalidate every observed slot; returns how many were invalidated.
    pub fn notify_resize(&self) -> usize {
        let observed = lock_observed(&self.observed);
        observed
            .iter()
            .filter(|(_, slot)| lock_slot(slot).invalidate().is_some())
            .count()
    }

    /// Number of live subscriptions.
    pub fn observed_count(&self) -> usize {
        lock_observed(&self.observed).len()
    }
}

fn lock_observed(observed: &Mutex<Observed>) -> MutexGuard<'_, Observed> {
    observed.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scoped resize observation; dropping it releases the observation.
#[derive(Debug)]
#[must_use = "dropping the subscription stops observation immediately"]
pub struct ResizeSubscription {
    id: u64,
    observed: Weak<Mutex<Observed>>,
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(observed) = self.observed.upgrade() {
            lock_observed(&observed).retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
