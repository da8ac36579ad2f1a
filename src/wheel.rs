use crate::{
    render::{Canvas, Metrics, Renderer, Screen, Snapshot, Viewport},
    spin::{Frame, Phase, SpinController, SpinRequest, SpinResult},
    RequestPaint, SpinConfig, Theme, WheelError,
};

/// A spinnable wheel of labeled entries.
///
/// Rotation is in degrees and clockwise. Entries can only change while the
/// wheel is idle, anything else can change at any time.
pub struct Wheel {
    entries: Vec<String>,
    rotation: f64,
    theme: Theme,
    config: SpinConfig,

    renderer: Renderer,
    controller: SpinController,
    rng: fastrand::Rng,

    last_result: Option<SpinResult>,
    results_tx: flume::Sender<SpinResult>,
    results_rx: flume::Receiver<SpinResult>,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl std::fmt::Debug for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("entries", &self.entries)
            .field("rotation", &self.rotation)
            .field("phase", &self.phase())
            .finish()
    }
}

impl Wheel {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let (results_tx, results_rx) = flume::unbounded();
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            rotation: 0.0,
            theme: Theme::default(),
            config: SpinConfig::default(),
            renderer: Renderer::new(&Viewport::default()),
            controller: SpinController::new(),
            rng: fastrand::Rng::new(),
            last_result: None,
            results_tx,
            results_rx,
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            ..self
        }
    }

    pub fn with_config(self, config: SpinConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Degrees, clockwise.
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    pub const fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub const fn is_spinning(&self) -> bool {
        matches!(self.phase(), Phase::Spinning)
    }

    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub const fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub const fn metrics(&self) -> &Metrics {
        self.renderer.metrics()
    }

    pub const fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    /// Every completed spin is sent here exactly once.
    pub fn results(&self) -> flume::Receiver<SpinResult> {
        self.results_rx.clone()
    }

    fn ensure_idle(&self) -> Result<(), WheelError> {
        if self.is_spinning() {
            log::warn!("entries cannot change mid-spin");
            return Err(WheelError::Busy);
        }
        Ok(())
    }

    pub fn set_entries<I>(&mut self, entries: I) -> Result<(), WheelError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.ensure_idle()?;
        self.entries = entries.into_iter().map(Into::into).collect();
        self.last_result.take();
        Ok(())
    }

    pub fn add_entry(&mut self, label: impl AsRef<str>) -> Result<usize, WheelError> {
        self.ensure_idle()?;
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(WheelError::EmptyLabel);
        }

        self.entries.push(label.to_string());
        Ok(self.entries.len() - 1)
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<String, WheelError> {
        self.ensure_idle()?;
        if index >= self.entries.len() {
            return Err(WheelError::InvalidIndex {
                index,
                len: self.entries.len(),
            });
        }

        self.last_result.take();
        Ok(self.entries.remove(index))
    }

    pub fn clear_entries(&mut self) -> Result<(), WheelError> {
        self.set_entries(Vec::<String>::new())
    }

    /// Takes effect on the next paint, even mid-spin.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Takes effect on the next spin.
    pub fn set_config(&mut self, config: SpinConfig) {
        self.config = config;
    }

    /// Picks up size or pixel density changes. Never touches the rotation.
    pub fn refresh_display(&mut self, screen: &impl Screen) -> bool {
        self.renderer.refresh(screen)
    }

    /// Starts a spin at time `now` (seconds) and returns the index it will land on.
    pub fn spin(&mut self, request: SpinRequest, now: f64) -> Result<usize, WheelError> {
        let result = self.controller.start(
            request,
            self.entries.len(),
            self.rotation,
            now,
            &mut self.rng,
            &self.config,
        );

        match &result {
            Ok(_) => log::info!("spinning {} entries ({request:?})", self.entries.len()),
            Err(err) => log::warn!("cannot spin: {err}"),
        }
        result
    }

    /// Advances the animation to `now`. Returns the result on the frame the
    /// wheel comes to rest.
    pub fn tick(&mut self, now: f64, repaint: &impl RequestPaint) -> Option<SpinResult> {
        match self.controller.update(now) {
            Frame::Idle => None,

            Frame::Moving { rotation } => {
                self.rotation = rotation;
                repaint.request_repaint();
                None
            }

            Frame::Landed { rotation, index } => {
                self.rotation = rotation;
                repaint.request_repaint();

                let result = SpinResult {
                    index,
                    label: self.entries.get(index).cloned().unwrap_or_default(),
                };
                log::info!("landed on #{} '{}'", result.index, result.label);

                let _ = self.results_tx.send(result.clone());
                self.last_result.replace(result.clone());
                Some(result)
            }
        }
    }

    /// Stops a spin where it is without producing a result. The previous
    /// winner is forgotten since the pointer no longer rests on it.
    pub fn abort_spin(&mut self) -> bool {
        let aborted = self.controller.abort();
        if aborted {
            self.last_result.take();
            self.rotation = crate::geometry::normalize_degrees(self.rotation);
            log::debug!("spin aborted at {:.2}", self.rotation);
        }
        aborted
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            entries: &self.entries,
            rotation: self.rotation,
            theme: &self.theme,
            padding: self.config.padding(),
            pointer_angle: self.config.pointer_angle(),
            highlight: match self.phase() {
                Phase::Idle => self.last_result.as_ref().map(|r| r.index),
                Phase::Spinning => None,
            },
        }
    }

    pub fn paint(&self, canvas: &mut impl Canvas) {
        self.renderer.paint(&self.snapshot(), canvas)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use egui::{vec2, Color32};

    use super::*;
    use crate::{
        geometry::{index_at_pointer, POINTER_TOP},
        render::Recorder,
        NoopRepaint,
    };

    #[derive(Default)]
    struct CountRepaint(AtomicUsize);
    impl RequestPaint for CountRepaint {
        fn request_repaint(&self) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn finish(wheel: &mut Wheel, start: f64) -> SpinResult {
        let mut now = start;
        loop {
            if let Some(result) = wheel.tick(now, &NoopRepaint) {
                return result;
            }
            assert!(now < start + 60.0);
            now += 1.0 / 30.0;
        }
    }

    #[test]
    fn alice_bob_charlie() {
        let mut wheel = Wheel::new(["Alice", "Bob", "Charlie"]).with_seed(1);
        let results = wheel.results();

        assert_eq!(wheel.spin(SpinRequest::Target(1), 0.0), Ok(1));
        let result = finish(&mut wheel, 0.0);

        assert_eq!(
            result,
            SpinResult {
                index: 1,
                label: "Bob".into()
            }
        );
        assert_eq!(index_at_pointer(3, wheel.rotation(), POINTER_TOP), Ok(1));
        assert_eq!(results.try_recv().ok(), Some(result));
        assert!(results.try_recv().is_err());
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn empty_wheel_cannot_spin() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.spin(SpinRequest::Random, 0.0), Err(WheelError::EmptyWheel));
        assert_eq!(wheel.spin(SpinRequest::Target(0), 0.0), Err(WheelError::EmptyWheel));
        assert_eq!(wheel.rotation(), 0.0);
        assert_eq!(wheel.tick(10.0, &NoopRepaint), None);
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn only_one() {
        let mut wheel = Wheel::new(["OnlyOne"]).with_seed(4);
        for _ in 0..5 {
            wheel.spin(SpinRequest::Random, 0.0).unwrap();
            assert_eq!(finish(&mut wheel, 0.0).index, 0);
        }
    }

    #[test]
    fn busy_while_spinning() {
        let mut wheel = Wheel::new(["a", "b"]).with_seed(9);
        wheel.spin(SpinRequest::Random, 0.0).unwrap();

        assert_eq!(wheel.set_entries(["c"]), Err(WheelError::Busy));
        assert_eq!(wheel.add_entry("d"), Err(WheelError::Busy));
        assert_eq!(wheel.remove_entry(0), Err(WheelError::Busy));
        assert_eq!(wheel.clear_entries(), Err(WheelError::Busy));
        assert_eq!(
            wheel.spin(SpinRequest::Random, 0.1),
            Err(WheelError::AlreadySpinning)
        );

        wheel.set_theme(Theme::new(vec![Color32::BLACK]));
        assert_eq!(wheel.theme().colors, vec![Color32::BLACK]);

        finish(&mut wheel, 0.0);
        assert_eq!(wheel.entries(), ["a", "b"]);
        assert!(wheel.set_entries(["c"]).is_ok());
    }

    #[test]
    fn resize_mid_spin_keeps_rotation() {
        let mut wheel = Wheel::new(["a", "b", "c", "d"]).with_seed(11);
        wheel.spin(SpinRequest::Target(2), 0.0).unwrap();
        wheel.tick(1.0, &NoopRepaint);
        let rotation = wheel.rotation();

        assert!(wheel.refresh_display(&Viewport::new(vec2(1200.0, 700.0), 2.5)));
        assert_eq!(wheel.rotation(), rotation);
        assert_eq!(wheel.metrics().device_size, [3000, 1750]);
        assert_eq!(finish(&mut wheel, 1.0).index, 2);
    }

    #[test]
    fn repaints_while_moving() {
        let mut wheel = Wheel::new(["a", "b"]).with_seed(5);
        let repaint = CountRepaint::default();

        wheel.tick(0.0, &repaint);
        assert_eq!(repaint.0.load(Ordering::Relaxed), 0);

        wheel.spin(SpinRequest::Random, 0.0).unwrap();
        wheel.tick(0.5, &repaint);
        wheel.tick(1.0, &repaint);
        assert_eq!(repaint.0.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn abort_delivers_nothing() {
        let mut wheel = Wheel::new(["a", "b", "c"]).with_seed(3);
        let results = wheel.results();

        wheel.spin(SpinRequest::Random, 0.0).unwrap();
        wheel.tick(2.0, &NoopRepaint);
        assert!(wheel.abort_spin());
        assert!((0.0..360.0).contains(&wheel.rotation()));
        assert_eq!(wheel.tick(100.0, &NoopRepaint), None);
        assert!(results.try_recv().is_err());
        assert!(wheel.last_result().is_none());
    }

    #[test]
    fn abort_forgets_the_previous_winner() {
        let mut wheel = Wheel::new(["a", "b", "c"]).with_seed(6);
        wheel.spin(SpinRequest::Target(0), 0.0).unwrap();
        finish(&mut wheel, 0.0);
        assert_eq!(wheel.snapshot().highlight, Some(0));

        wheel.spin(SpinRequest::Target(2), 100.0).unwrap();
        wheel.tick(101.0, &NoopRepaint);
        assert!(wheel.abort_spin());

        assert!(wheel.last_result().is_none());
        assert_eq!(wheel.snapshot().highlight, None);
    }

    #[test]
    fn editing_entries() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.add_entry("  Alice "), Ok(0));
        assert_eq!(wheel.add_entry("Bob"), Ok(1));
        assert_eq!(wheel.add_entry("   "), Err(WheelError::EmptyLabel));
        assert_eq!(
            wheel.remove_entry(2),
            Err(WheelError::InvalidIndex { index: 2, len: 2 })
        );
        assert_eq!(wheel.remove_entry(0).as_deref(), Ok("Alice"));
        assert_eq!(wheel.entries(), ["Bob"]);
        wheel.clear_entries().unwrap();
        assert!(wheel.entries().is_empty());
    }

    #[test]
    fn winner_is_highlighted_after_landing() {
        let mut wheel = Wheel::new(["a", "b", "c"]).with_seed(8);
        wheel.spin(SpinRequest::Target(2), 0.0).unwrap();
        assert_eq!(wheel.snapshot().highlight, None);

        finish(&mut wheel, 0.0);
        assert_eq!(wheel.snapshot().highlight, Some(2));
        assert_eq!(wheel.last_result().map(|r| r.index), Some(2));

        let mut recorder = Recorder::default();
        wheel.paint(&mut recorder);
        assert_eq!(recorder.texts().count(), 3);

        wheel.add_entry("d").unwrap();
        assert_eq!(wheel.snapshot().highlight, Some(2));
        wheel.remove_entry(0).unwrap();
        assert_eq!(wheel.snapshot().highlight, None);
    }
}
