use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::game::actor::GameCommand;

/// Discussion countdown. While running, a background task sends one
/// [`GameCommand::TimerTick`] per second to the game actor, which feeds it back into
/// [`CountdownTimer::tick`]. Ticks carry the generation of the countdown that produced
/// them so ticks queued before a restart or stop are ignored.
pub(crate) struct CountdownTimer {
    remaining_seconds: u32,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Tick {
    Stale,
    Running(u32),
    Expired,
}

impl CountdownTimer {
    const TICK_PERIOD: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        CountdownTimer {
            remaining_seconds: 0,
            generation: 0,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn start(&mut self, seconds: u32, game_tx: Sender<GameCommand>) {
        self.stop();
        self.generation += 1;
        self.remaining_seconds = seconds;

        let generation = self.generation;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(
                Instant::now() + CountdownTimer::TICK_PERIOD,
                CountdownTimer::TICK_PERIOD,
            );
            loop {
                interval.tick().await;
                if game_tx
                    .send(GameCommand::TimerTick { generation })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn tick(&mut self, generation: u64) -> Tick {
        if generation != self.generation || !self.is_running() {
            return Tick::Stale;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.stop();
            Tick::Expired
        } else {
            Tick::Running(self.remaining_seconds)
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
