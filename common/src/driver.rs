use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::log;
use crate::session_rng::RandomSource;
use crate::snake::{GameEngine, GameOverReason, TickOutcome};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverReport {
    pub ticks: u64,
    /// Times the timer was re-created because the interval changed.
    pub rearms: u64,
    pub game_over: Option<GameOverReason>,
}

impl DriverReport {
    fn record(&mut self, outcome: TickOutcome) {
        self.ticks += 1;
        if let TickOutcome::GameOver(reason) = outcome {
            self.game_over = Some(reason);
        }
    }
}

fn arm(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Drives the engine on a tokio interval until it stops running or
/// `max_ticks` is reached. `before_tick` runs just before every tick and is
/// where input is fed in.
pub async fn run_realtime<R, F>(engine: &mut GameEngine<R>, max_ticks: u64, mut before_tick: F) -> DriverReport
where
    R: RandomSource,
    F: FnMut(&mut GameEngine<R>),
{
    let mut report = DriverReport::default();
    let mut armed: Option<(Duration, Interval)> = None;

    while report.ticks < max_ticks {
        let Some(period) = engine.tick_interval() else {
            break;
        };

        if armed.as_ref().map(|(current, _)| *current) != Some(period) {
            if armed.is_some() {
                report.rearms += 1;
                log!("Tick interval changed to {}ms", period.as_millis());
            }
            armed = Some((period, arm(period)));
        }
        if let Some((_, timer)) = armed.as_mut() {
            timer.tick().await;
        }

        before_tick(engine);
        report.record(engine.tick());
    }

    report
}

/// Same loop without waiting. The session clock still advances per tick.
pub fn run_simulated<R, F>(engine: &mut GameEngine<R>, max_ticks: u64, mut before_tick: F) -> DriverReport
where
    R: RandomSource,
    F: FnMut(&mut GameEngine<R>),
{
    let mut report = DriverReport::default();
    while report.ticks < max_ticks && engine.tick_interval().is_some() {
        before_tick(engine);
        report.record(engine.tick());
    }
    report
}
