use crate::{
    geometry::{self, normalize_degrees},
    SpinConfig, WheelError,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Spinning,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpinRequest {
    /// Pick uniformly among the current entries.
    Random,
    /// Land on a caller chosen entry.
    Target(usize),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpinResult {
    pub index: usize,
    pub label: String,
}

/// `1 - (1 - t)^3`, with `t` clamped to `0..=1`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One in-flight spin. Times are in seconds, angles in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animation {
    pub winner: usize,
    pub entry_count: usize,
    pub pointer_angle: f64,
    pub start_time: f64,
    pub duration: f64,
    pub start_rotation: f64,
    pub end_rotation: f64,
}

impl Animation {
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 || !self.duration.is_finite() {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn rotation_at(&self, t: f64) -> f64 {
        self.start_rotation + (self.end_rotation - self.start_rotation) * ease_out_cubic(t)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Frame {
    Idle,
    Moving { rotation: f64 },
    Landed { rotation: f64, index: usize },
}

#[derive(Debug, Default)]
pub struct SpinController {
    animation: Option<Animation>,
}

impl SpinController {
    pub const fn new() -> Self {
        Self { animation: None }
    }

    pub const fn phase(&self) -> Phase {
        match self.animation {
            Some(..) => Phase::Spinning,
            None => Phase::Idle,
        }
    }

    pub const fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Resolves the winner and plans the motion. Returns the winning index.
    pub fn start(
        &mut self,
        request: SpinRequest,
        entry_count: usize,
        current_rotation: f64,
        now: f64,
        rng: &mut fastrand::Rng,
        config: &SpinConfig,
    ) -> Result<usize, WheelError> {
        if self.animation.is_some() {
            return Err(WheelError::AlreadySpinning);
        }
        if entry_count == 0 {
            return Err(WheelError::EmptyWheel);
        }

        let winner = match request {
            SpinRequest::Random => rng.usize(0..entry_count),
            SpinRequest::Target(index) if index < entry_count => index,
            SpinRequest::Target(index) => {
                return Err(WheelError::InvalidIndex {
                    index,
                    len: entry_count,
                })
            }
        };

        let turns = rng.u32(config.turns());
        let fraction = 0.5 + (rng.f64() - 0.5) * config.jitter();
        let end_rotation = geometry::rotation_for_target_at(
            entry_count,
            winner,
            config.pointer_angle(),
            current_rotation,
            turns,
            fraction,
        )?;

        let durations = config.durations();
        let duration = durations.start() + rng.f64() * (durations.end() - durations.start());

        log::debug!(
            "spin to {winner}/{entry_count}: {current_rotation:.2} -> {end_rotation:.2} over {duration:.2}s ({turns} turns)"
        );

        self.animation.replace(Animation {
            winner,
            entry_count,
            pointer_angle: config.pointer_angle(),
            start_time: now,
            duration,
            start_rotation: current_rotation,
            end_rotation,
        });

        Ok(winner)
    }

    pub fn update(&mut self, now: f64) -> Frame {
        let animation = match &self.animation {
            Some(animation) => *animation,
            None => return Frame::Idle,
        };

        let t = animation.progress(now);
        if t < 1.0 {
            return Frame::Moving {
                rotation: animation.rotation_at(t),
            };
        }

        self.animation.take();

        let rotation = normalize_degrees(animation.end_rotation);
        let index = match geometry::index_at_pointer(
            animation.entry_count,
            rotation,
            animation.pointer_angle,
        ) {
            Ok(index) => index,
            Err(err) => {
                log::error!("cannot resolve landing index: {err}");
                animation.winner
            }
        };

        if index != animation.winner {
            log::error!(
                "landed on {index} but {} was chosen (rotation {rotation})",
                animation.winner
            );
        }
        debug_assert_eq!(index, animation.winner, "geometry round trip");

        Frame::Landed { rotation, index }
    }

    /// Drops the in-flight spin without producing a result.
    ///
    /// Not part of the normal flow: hosts that need to cancel call this and
    /// keep whatever rotation they last painted.
    pub fn abort(&mut self) -> bool {
        self.animation.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(controller: &mut SpinController, start: f64) -> (usize, Vec<Frame>) {
        let mut frames = vec![];
        let mut now = start;
        loop {
            let frame = controller.update(now);
            frames.push(frame);
            if let Frame::Landed { index, .. } = frame {
                return (index, frames);
            }
            assert!(now < start + 60.0, "spin never finished");
            now += 1.0 / 60.0;
        }
    }

    #[test]
    fn easing() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(3.0), 1.0);

        let mut last = 0.0;
        for i in 1..=1000 {
            let next = ease_out_cubic(i as f64 / 1000.0);
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn spin_terminates_once() {
        let mut rng = fastrand::Rng::with_seed(7);
        let config = SpinConfig::default();
        let mut controller = SpinController::new();

        let winner = controller
            .start(SpinRequest::Random, 6, 0.0, 10.0, &mut rng, &config)
            .unwrap();
        assert_eq!(controller.phase(), Phase::Spinning);

        let (index, frames) = run_to_end(&mut controller, 10.0);
        assert_eq!(index, winner);
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(
            frames
                .iter()
                .filter(|f| matches!(f, Frame::Landed { .. }))
                .count(),
            1
        );
        assert_eq!(controller.update(100.0), Frame::Idle);
    }

    #[test]
    fn rotation_is_monotonic_and_normalized_at_the_end() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut controller = SpinController::new();
        controller
            .start(SpinRequest::Target(2), 5, 30.0, 0.0, &mut rng, &SpinConfig::default())
            .unwrap();

        let (_, frames) = run_to_end(&mut controller, 0.0);
        let mut last = 30.0;
        for frame in &frames {
            match *frame {
                Frame::Moving { rotation } => {
                    assert!(rotation >= last);
                    last = rotation;
                }
                Frame::Landed { rotation, .. } => assert!((0.0..360.0).contains(&rotation)),
                Frame::Idle => unreachable!(),
            }
        }
        assert!(last > 30.0 + 360.0 * 3.0 - 1.0);
    }

    #[test]
    fn early_timestamps_hold_the_start() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut controller = SpinController::new();
        controller
            .start(SpinRequest::Random, 4, 12.0, 5.0, &mut rng, &SpinConfig::default())
            .unwrap();
        assert_eq!(controller.update(1.0), Frame::Moving { rotation: 12.0 });
    }

    #[test]
    fn rejects_bad_requests() {
        let mut rng = fastrand::Rng::with_seed(0);
        let config = SpinConfig::default();
        let mut controller = SpinController::new();

        assert_eq!(
            controller.start(SpinRequest::Random, 0, 0.0, 0.0, &mut rng, &config),
            Err(WheelError::EmptyWheel)
        );
        assert_eq!(
            controller.start(SpinRequest::Target(5), 5, 0.0, 0.0, &mut rng, &config),
            Err(WheelError::InvalidIndex { index: 5, len: 5 })
        );
        assert_eq!(controller.phase(), Phase::Idle);

        controller
            .start(SpinRequest::Random, 5, 0.0, 0.0, &mut rng, &config)
            .unwrap();
        assert_eq!(
            controller.start(SpinRequest::Random, 5, 0.0, 0.0, &mut rng, &config),
            Err(WheelError::AlreadySpinning)
        );
    }

    #[test]
    fn target_is_deterministic() {
        let mut rng = fastrand::Rng::with_seed(99);
        let config = SpinConfig::default();
        for start in [0.0, 17.0, 123.4, 359.0, 7200.5, -45.0] {
            let mut controller = SpinController::new();
            controller
                .start(SpinRequest::Target(3), 5, start, 0.0, &mut rng, &config)
                .unwrap();
            let (index, _) = run_to_end(&mut controller, 0.0);
            assert_eq!(index, 3);
        }
    }

    #[test]
    fn random_is_uniform() {
        const TRIALS: usize = 5000;
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let config = SpinConfig {
            min_duration: 0.0,
            max_duration: 0.0,
            ..SpinConfig::default()
        };

        let mut counts = [0usize; 5];
        let mut rotation = 0.0;
        for _ in 0..TRIALS {
            let mut controller = SpinController::new();
            controller
                .start(SpinRequest::Random, 5, rotation, 0.0, &mut rng, &config)
                .unwrap();
            match controller.update(0.0) {
                Frame::Landed { rotation: r, index } => {
                    counts[index] += 1;
                    rotation = r;
                }
                frame => panic!("zero length spin should land at once: {frame:?}"),
            }
        }

        for count in counts {
            let freq = count as f64 / TRIALS as f64;
            assert!((freq - 0.2).abs() < 0.03, "{counts:?}");
        }
    }

    #[test]
    fn non_finite_durations_still_land() {
        let configs = [
            SpinConfig {
                max_duration: f64::INFINITY,
                ..SpinConfig::default()
            },
            SpinConfig {
                min_duration: f64::NAN,
                max_duration: f64::NAN,
                ..SpinConfig::default()
            },
            SpinConfig {
                pointer_angle: f64::NAN,
                ..SpinConfig::default()
            },
        ];

        for (seed, config) in configs.iter().enumerate() {
            let mut rng = fastrand::Rng::with_seed(seed as u64);
            let mut controller = SpinController::new();
            controller
                .start(SpinRequest::Target(1), 3, 0.0, 0.0, &mut rng, config)
                .unwrap();

            let duration = controller.animation().map(|a| a.duration).unwrap();
            assert!((4.0..=6.0).contains(&duration), "{duration}");

            let (index, _) = run_to_end(&mut controller, 0.0);
            assert_eq!(index, 1);
            assert_eq!(controller.phase(), Phase::Idle);
        }
    }

    #[test]
    fn unbounded_animation_ends_at_once() {
        let animation = Animation {
            winner: 0,
            entry_count: 1,
            pointer_angle: 270.0,
            start_time: 0.0,
            duration: f64::INFINITY,
            start_rotation: 0.0,
            end_rotation: 360.0,
        };
        assert_eq!(animation.progress(1.0), 1.0);
        assert_eq!(
            Animation {
                duration: f64::NAN,
                ..animation
            }
            .progress(1.0),
            1.0
        );
    }

    #[test]
    fn abort_skips_the_result() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut controller = SpinController::new();
        controller
            .start(SpinRequest::Random, 3, 0.0, 0.0, &mut rng, &SpinConfig::default())
            .unwrap();
        assert!(controller.abort());
        assert!(!controller.abort());
        assert_eq!(controller.update(100.0), Frame::Idle);
    }
}
