//! Count-up animation: interpolates a displayed number from `from` to `to`.

use super::{ActiveRuns, CancelHandle, DisplaySink, FrameClock, TickOutcome};
use crate::config::settings::AnimationSettings;
use crate::easing::{self, EaseOutQuart, EasingCurve};
use crate::error::{DisplayError, Result};
use crate::formatters::yen;
use shared::utils::ja_jp_format::group_digits;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

pub const DEFAULT_DURATION_MS: f64 = 700.0;

/// Renders the rounded current value for the sink.
pub type ValueFormatter = Arc<dyn Fn(i64) -> String + Send + Sync>;

/// Renders values as yen ("1億2,346万円"), falling back to plain grouping
/// for negative values.
pub fn yen_value_formatter() -> ValueFormatter {
    Arc::new(|value| yen::format(value as f64).unwrap_or_else(|_| group_digits(value)))
}

#[derive(Clone)]
pub struct CountUpRequest {
    pub from: f64,
    pub to: f64,
    /// Falls back to the animator's configured duration.
    pub duration_ms: Option<f64>,
    pub formatter: Option<ValueFormatter>,
}

impl CountUpRequest {
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: None,
            formatter: None,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(i64) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn with_value_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

impl fmt::Debug for CountUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountUpRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("formatter", &self.formatter.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// One in-flight count-up. Owns its sink until it is taken back with
/// [`AnimationRun::into_sink`].
pub struct AnimationRun<S> {
    target: String,
    from: f64,
    to: f64,
    duration_ms: f64,
    start_ms: f64,
    progress: f64,
    writes: usize,
    handle: CancelHandle,
    easing: Arc<dyn EasingCurve>,
    formatter: Option<ValueFormatter>,
    sink: S,
}

impl<S: DisplaySink> AnimationRun<S> {
    /// Advances the run to `now_ms` and writes the current value.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.handle.is_cancelled() {
            trace!(run = %self.handle.id(), "Skipping tick of cancelled run");
            return TickOutcome::Cancelled;
        }
        if self.handle.is_finished() {
            return TickOutcome::Finished;
        }

        let raw = if self.duration_ms > 0.0 {
            (now_ms - self.start_ms) / self.duration_ms
        } else {
            1.0
        };
        // NaN falls back to the last progress; a clock stepping back never rewinds the display.
        self.progress = raw.clamp(0.0, 1.0).max(self.progress);

        let eased = self.easing.ease(self.progress);
        let current = (self.from + (self.to - self.from) * eased).round() as i64;
        let text = match &self.formatter {
            Some(formatter) => formatter(current),
            None => group_digits(current),
        };
        self.sink.set_text(&text);
        self.writes += 1;
        trace!(run = %self.handle.id(), progress = self.progress, value = current, "Count-up tick");

        if self.progress < 1.0 {
            return TickOutcome::Continue;
        }

        self.handle.finish();
        debug!(
            run = %self.handle.id(),
            key = %self.target,
            writes = self.writes,
            "Count-up run finished at {}",
            text
        );
        TickOutcome::Finished
    }
}

impl<S> AnimationRun<S> {
    pub fn id(&self) -> Uuid {
        self.handle.id()
    }

    pub fn handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn is_done(&self) -> bool {
        !self.handle.is_active()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S> fmt::Debug for AnimationRun<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRun")
            .field("id", &self.handle.id())
            .field("target", &self.target)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration_ms", &self.duration_ms)
            .field("progress", &self.progress)
            .field("state", &self.handle.state())
            .field("easing", &self.easing.name())
            .finish()
    }
}

/// Starts count-up runs and keeps at most one active run per display target.
pub struct CountUpAnimator {
    duration_ms: f64,
    easing: Arc<dyn EasingCurve>,
    active: ActiveRuns,
}

impl Default for CountUpAnimator {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Arc::new(EaseOutQuart),
            active: ActiveRuns::new(),
        }
    }
}

impl CountUpAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &AnimationSettings) -> Result<Self> {
        let duration_ms = validate_duration(settings.duration_ms)?;
        let easing: Arc<dyn EasingCurve> = Arc::from(easing::from_name(&settings.easing)?);
        debug!(duration_ms, easing = easing.name(), "Configured count-up animator");
        Ok(Self {
            duration_ms,
            easing,
            active: ActiveRuns::new(),
        })
    }

    pub fn with_easing<E: EasingCurve + 'static>(mut self, easing: E) -> Self {
        self.easing = Arc::new(easing);
        self
    }

    pub fn default_duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing(&self) -> &dyn EasingCurve {
        self.easing.as_ref()
    }

    /// Starts a run on `target`, capturing `t0` from `clock`.
    ///
    /// Nothing is written until the first tick. An active run already bound
    /// to `target` is cancelled and replaced.
    pub fn start<S, C>(
        &self,
        target: impl Into<String>,
        sink: Option<S>,
        request: CountUpRequest,
        clock: &C,
    ) -> Result<AnimationRun<S>>
    where
        S: DisplaySink,
        C: FrameClock + ?Sized,
    {
        let target = target.into();
        let sink = sink.ok_or_else(|| {
            DisplayError::invalid_argument(format!("no display sink for target '{}'", target))
        })?;
        if !request.from.is_finite() || !request.to.is_finite() {
            return Err(DisplayError::invalid_argument(format!(
                "count-up bounds must be finite, got {} -> {}",
                request.from, request.to
            )));
        }
        let duration_ms = match request.duration_ms {
            Some(ms) => validate_duration(ms)?,
            None => self.duration_ms,
        };

        let handle = CancelHandle::new();
        if let Some(previous) = self.active.replace(&target, handle.clone()) {
            warn!(
                key = %target,
                replaced = %previous.id(),
                "Replacing count-up run that was still active"
            );
        }

        let start_ms = clock.now_ms();
        debug!(
            run = %handle.id(),
            key = %target,
            from = request.from,
            to = request.to,
            duration_ms,
            "Starting count-up run"
        );

        Ok(AnimationRun {
            target,
            from: request.from,
            to: request.to,
            duration_ms,
            start_ms,
            progress: 0.0,
            writes: 0,
            handle,
            easing: self.easing.clone(),
            formatter: request.formatter,
            sink,
        })
    }

    pub fn cancel(&self, target: &str) -> bool {
        self.active.cancel(target)
    }

    pub fn cancel_all(&self) -> usize {
        self.active.cancel_all()
    }

    pub fn active_runs(&self) -> usize {
        self.active.active_count()
    }
}

fn validate_duration(duration_ms: f64) -> Result<f64> {
    if duration_ms.is_nan() || duration_ms < 0.0 || duration_ms.is_infinite() {
        return Err(DisplayError::invalid_argument(format!(
            "duration must be a finite, non-negative number of milliseconds, got {}",
            duration_ms
        )));
    }
    Ok(duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualClock;
    use crate::easing::Linear;

    fn run_to_end<S: DisplaySink>(
        run: &mut AnimationRun<S>,
        clock: &mut ManualClock,
        step: f64,
    ) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if run.tick(clock.advance(step)).is_done() {
                return ticks;
            }
        }
    }

    fn parse(text: &str) -> i64 {
        text.replace(',', "").parse().unwrap()
    }

    #[test]
    fn test_final_tick_writes_target() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start("total", Some(Vec::<String>::new()), CountUpRequest::new(0.0, 1000.0), &clock)
            .unwrap();
        assert_eq!(run.duration_ms(), 700.0);

        run_to_end(&mut run, &mut clock, 16.0);
        assert!(run.is_done());
        assert_eq!(run.progress(), 1.0);
        let writes = run.into_sink();
        assert_eq!(writes.last().map(String::as_str), Some("1,000"));
    }

    #[test]
    fn test_ease_out_quart_midpoint() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start(
                "total",
                Some(String::new()),
                CountUpRequest::new(0.0, 1000.0).with_duration_ms(700.0),
                &clock,
            )
            .unwrap();
        // progress 0.5 -> eased 0.9375
        assert_eq!(run.tick(clock.advance(350.0)), TickOutcome::Continue);
        assert_eq!(run.sink(), "938");
        assert_eq!(run.tick(clock.advance(350.0)), TickOutcome::Finished);
        assert_eq!(run.sink(), "1,000");
    }

    #[test]
    fn test_values_monotonic_increasing() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start(
                "total",
                Some(Vec::<String>::new()),
                CountUpRequest::new(120.0, 98_765.0),
                &clock,
            )
            .unwrap();
        run_to_end(&mut run, &mut clock, 7.0);
        let values: Vec<i64> = run.into_sink().iter().map(|s| parse(s)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
        assert_eq!(*values.last().unwrap(), 98_765);
    }

    #[test]
    fn test_values_monotonic_decreasing() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start(
                "total",
                Some(Vec::<String>::new()),
                CountUpRequest::new(5_000.0, -250.0),
                &clock,
            )
            .unwrap();
        run_to_end(&mut run, &mut clock, 16.0);
        let values: Vec<i64> = run.into_sink().iter().map(|s| parse(s)).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]), "{:?}", values);
        assert_eq!(*values.last().unwrap(), -250);
    }

    #[test]
    fn test_clock_stepping_back_does_not_rewind() {
        let animator = CountUpAnimator::new().with_easing(Linear);
        let mut clock = ManualClock::default();
        let mut run = animator
            .start(
                "total",
                Some(Vec::<String>::new()),
                CountUpRequest::new(0.0, 100.0).with_duration_ms(100.0),
                &clock,
            )
            .unwrap();
        run.tick(50.0);
        run.tick(20.0);
        run.tick(f64::NAN);
        assert_eq!(run.sink(), &vec!["50", "50", "50"]);
        clock.set(100.0);
        assert_eq!(run.tick(clock.now_ms()), TickOutcome::Finished);
    }

    #[test]
    fn test_cancel_before_first_tick_writes_nothing() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start("total", Some(Vec::<String>::new()), CountUpRequest::new(0.0, 1000.0), &clock)
            .unwrap();
        assert!(run.handle().cancel());
        assert_eq!(run.tick(clock.advance(16.0)), TickOutcome::Cancelled);
        assert_eq!(run.writes(), 0);
        assert!(run.into_sink().is_empty());
    }

    #[test]
    fn test_cancel_mid_run_stops_writes() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start("total", Some(Vec::<String>::new()), CountUpRequest::new(0.0, 1000.0), &clock)
            .unwrap();
        run.tick(clock.advance(100.0));
        assert!(animator.cancel("total"));
        assert_eq!(run.tick(clock.advance(100.0)), TickOutcome::Cancelled);
        assert_eq!(run.writes(), 1);
    }

    #[test]
    fn test_new_run_on_same_target_replaces_old() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut first = animator
            .start("total", Some(Vec::<String>::new()), CountUpRequest::new(0.0, 1000.0), &clock)
            .unwrap();
        first.tick(clock.advance(16.0));

        let mut second = animator
            .start("total", Some(Vec::<String>::new()), CountUpRequest::new(1000.0, 2000.0), &clock)
            .unwrap();
        let mut other = animator
            .start("monthly", Some(Vec::<String>::new()), CountUpRequest::new(0.0, 10.0), &clock)
            .unwrap();
        assert_eq!(animator.active_runs(), 2);

        assert_eq!(first.tick(clock.advance(16.0)), TickOutcome::Cancelled);
        assert_eq!(first.writes(), 1);
        assert_eq!(second.tick(clock.now_ms()), TickOutcome::Continue);
        assert_eq!(other.tick(clock.now_ms()), TickOutcome::Continue);
    }

    #[test]
    fn test_finished_run_ignores_cancel() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let mut run = animator
            .start(
                "total",
                Some(String::new()),
                CountUpRequest::new(0.0, 5.0).with_duration_ms(0.0),
                &clock,
            )
            .unwrap();
        assert_eq!(run.tick(clock.now_ms()), TickOutcome::Finished);
        assert!(!run.handle().cancel());
        assert_eq!(run.tick(clock.advance(16.0)), TickOutcome::Finished);
        assert_eq!(run.writes(), 1);
        assert_eq!(animator.active_runs(), 0);
    }

    #[test]
    fn test_custom_formatter() {
        let animator = CountUpAnimator::new();
        let mut clock = ManualClock::default();
        let request =
            CountUpRequest::new(0.0, 123_456_789.0).with_value_formatter(yen_value_formatter());
        let mut run = animator.start("total", Some(String::new()), request, &clock).unwrap();
        run.tick(clock.advance(700.0));
        assert_eq!(run.sink(), "1億2,346万円");

        let request = CountUpRequest::new(0.0, 42.0).with_formatter(|v| format!("{}%", v));
        let mut run = animator.start("rate", Some(String::new()), request, &clock).unwrap();
        run.tick(clock.advance(700.0));
        assert_eq!(run.sink(), "42%");
    }

    #[test]
    fn test_start_rejects_invalid_arguments() {
        let animator = CountUpAnimator::new();
        let clock = ManualClock::default();

        let err = animator
            .start("total", None::<String>, CountUpRequest::new(0.0, 1.0), &clock)
            .unwrap_err();
        assert!(err.is_invalid_argument());

        for request in [
            CountUpRequest::new(f64::NAN, 1.0),
            CountUpRequest::new(0.0, f64::INFINITY),
            CountUpRequest::new(0.0, 1.0).with_duration_ms(-1.0),
            CountUpRequest::new(0.0, 1.0).with_duration_ms(f64::NAN),
        ] {
            let err = animator
                .start("total", Some(String::new()), request.clone(), &clock)
                .unwrap_err();
            assert!(err.is_invalid_argument(), "{:?} should be rejected", request);
        }
        // Rejected starts never register a run.
        assert_eq!(animator.active_runs(), 0);
    }

    #[test]
    fn test_from_settings() {
        let settings = AnimationSettings {
            duration_ms: 250.0,
            easing: "linear".to_string(),
            ..AnimationSettings::default()
        };
        let animator = CountUpAnimator::from_settings(&settings).unwrap();
        assert_eq!(animator.default_duration_ms(), 250.0);
        assert_eq!(animator.easing().name(), "linear");

        let bad = AnimationSettings {
            easing: "bounce".to_string(),
            ..AnimationSettings::default()
        };
        assert!(matches!(
            CountUpAnimator::from_settings(&bad),
            Err(DisplayError::ConfigError(_))
        ));
    }
}
