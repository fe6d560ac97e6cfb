//! Gain envelopes applied on top of waveform summaries
//!
//! The waveform caches only consume the [`Envelope`] contract. A version
//! counter lets a cache notice that the curve changed without comparing
//! control points. [`LinearEnvelope`] is the piecewise-linear implementation
//! used by clips.

use std::cell::{Cell, RefCell};

/// A gain curve over clip time
pub trait Envelope {
    /// Fill `out` with gains sampled at `start_time + i * sample_period`
    fn values(&self, out: &mut [f64], start_time: f64, sample_period: f64);

    /// Monotonic change counter, bumped on every modification
    fn version(&self) -> u64;

    /// True when applying the envelope cannot change any value
    fn is_trivial(&self) -> bool;
}

/// Control point of a [`LinearEnvelope`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePoint {
    pub time: f64,
    pub value: f64,
}

/// Piecewise-linear envelope with constant extrapolation
///
/// Without control points the envelope is flat at `default_value`.
/// Mutators take `&self` because the envelope is shared between the clip
/// that edits it and the caches that read it on the paint thread.
#[derive(Debug)]
pub struct LinearEnvelope {
    points: RefCell<Vec<EnvelopePoint>>,
    default_value: Cell<f64>,
    version: Cell<u64>,
}

impl LinearEnvelope {
    pub fn new(default_value: f64) -> Self {
        Self {
            points: RefCell::new(Vec::new()),
            default_value: Cell::new(default_value),
            version: Cell::new(0),
        }
    }

    pub fn default_value(&self) -> f64 {
        self.default_value.get()
    }

    pub fn set_default_value(&self, value: f64) {
        self.default_value.set(value);
        self.bump();
    }

    pub fn point_count(&self) -> usize {
        self.points.borrow().len()
    }

    /// Insert a control point, replacing any point at exactly the same time
    pub fn insert_point(&self, time: f64, value: f64) {
        {
            let mut points = self.points.borrow_mut();
            let index = points.partition_point(|p| p.time < time);

            match points.get_mut(index) {
                Some(existing) if existing.time == time => existing.value = value,
                _ => points.insert(index, EnvelopePoint { time, value }),
            }
        }
        self.bump();
    }

    /// Remove the point at `index`, returning it if it existed
    pub fn remove_point(&self, index: usize) -> Option<EnvelopePoint> {
        let removed = {
            let mut points = self.points.borrow_mut();
            (index < points.len()).then(|| points.remove(index))
        };

        if removed.is_some() {
            self.bump();
        }
        removed
    }

    pub fn clear(&self) {
        self.points.borrow_mut().clear();
        self.bump();
    }

    /// Gain at a single point in time
    pub fn value_at(&self, time: f64) -> f64 {
        let points = self.points.borrow();
        Self::interpolate(&points, self.default_value.get(), time)
    }

    fn interpolate(points: &[EnvelopePoint], default_value: f64, time: f64) -> f64 {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return default_value,
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        let upper = points.partition_point(|p| p.time <= time);
        let (a, b) = (points[upper - 1], points[upper]);
        let span = b.time - a.time;

        if span <= 0.0 {
            return b.value;
        }

        a.value + (b.value - a.value) * (time - a.time) / span
    }

    fn bump(&self) {
        self.version.set(self.version.get() + 1);
    }
}

impl Default for LinearEnvelope {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Envelope for LinearEnvelope {
    fn values(&self, out: &mut [f64], start_time: f64, sample_period: f64) {
        let points = self.points.borrow();
        let default_value = self.default_value.get();

        for (i, value) in out.iter_mut().enumerate() {
            *value = Self::interpolate(&points, default_value, start_time + i as f64 * sample_period);
        }
    }

    fn version(&self) -> u64 {
        self.version.get()
    }

    fn is_trivial(&self) -> bool {
        self.points.borrow().is_empty() && self.default_value.get() == 1.0
    }
}
