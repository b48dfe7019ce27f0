use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};

pub enum AppEvent {
    Input(Event),
    /// Animation frame.
    Tick,
}

pub struct EventHandler {
    event_stream: EventStream,
    frame_interval: Interval,
}

impl EventHandler {
    pub fn new(frame_rate_ms: u64) -> Self {
        let mut frame_interval = interval(Duration::from_millis(frame_rate_ms));
        // A stalled frame should not be followed by a burst of catch-up frames
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            event_stream: EventStream::new(),
            frame_interval,
        }
    }

    pub async fn next(&mut self) -> AppEvent {
        tokio::select! {
            _ = self.frame_interval.tick() => AppEvent::Tick,
            event = self.event_stream.next() => {
                match event {
                    Some(Ok(evt)) => AppEvent::Input(evt),
                    Some(Err(e)) => {
                        log::warn!("Input error: {}", e);
                        AppEvent::Tick
                    }
                    None => AppEvent::Tick,
                }
            }
        }
    }
}
