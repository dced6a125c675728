use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, interval_at};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Multiplexes terminal input and the poll timer onto one channel. The tick
/// cadence can be retuned at runtime (the poll loop slows down while the
/// diagnostic tool is failing) without dropping the event task.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    rate_tx: watch::Sender<Duration>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let (rate_tx, mut rate_rx) = watch::channel(tick_rate);

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = interval_at(Instant::now() + tick_rate, tick_rate);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    changed = rate_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let rate = *rate_rx.borrow_and_update();
                        // A full period elapses before the first tick at the
                        // new rate; the caller just rendered.
                        tick_interval = interval_at(Instant::now() + rate, rate);
                    }
                }
            }
        });

        Self {
            rx,
            rate_tx,
            _task: task,
        }
    }

    /// Retunes the poll cadence. A no-op when the rate is unchanged, so the
    /// running interval is not reset on every cycle.
    pub fn set_tick_rate(&self, rate: Duration) {
        self.rate_tx.send_if_modified(|current| {
            if *current == rate {
                false
            } else {
                *current = rate;
                true
            }
        });
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
