//! Terminal input events.
//!
//! A background thread polls crossterm and forwards key presses, resizes and
//! periodic ticks over a channel. Dropping the `EventHandler` stops and joins
//! the thread.
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use log::error;

/// Input delivered to the main loop.
#[derive(Debug, Clone)]
pub enum Event
{
    /// Regular time tick; the page is redrawn so edited files show up
    Tick,
    /// Key press
    Key(KeyEvent),
    /// The terminal changed size; the next draw picks up the new area
    Resize,
    /// Polling the terminal failed; the poller thread has stopped
    Failed(String),
}

/// Owns the input poller thread and the channel it writes to.
pub struct EventHandler
{
    /// Events sent by the poller
    event_receiver: mpsc::Receiver<Event>,
    /// Tells the poller to stop
    shutdown_sender: mpsc::Sender<()>,
    /// Poller thread, taken out when joining on drop
    thread_handle: Option<JoinHandle<()>>,
}

impl EventHandler
{
    /// Starts the poller thread.
    ///
    /// # Arguments
    ///
    /// * `tick_rate` - Time between `Tick` events
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self
    {
        let (event_sender, event_receiver) = mpsc::channel();
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop
            {
                if shutdown_receiver.try_recv().is_ok()
                {
                    break;
                }

                // Wait no longer than the time left until the next tick
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());

                let polled = event::poll(timeout).and_then(|ready| {
                    if ready { event::read().map(Some) } else { Ok(None) }
                });

                let forwarded = match polled
                {
                    // Key release and repeat events are reported on some platforms
                    Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press =>
                    {
                        Some(Event::Key(key))
                    }
                    Ok(Some(CrosstermEvent::Resize(..))) => Some(Event::Resize),
                    Ok(_) => None,
                    Err(err) =>
                    {
                        error!("Failed to read terminal event: {err}");
                        // Nothing more can be read; let the main loop exit.
                        let _ = event_sender.send(Event::Failed(err.to_string()));
                        break;
                    }
                };

                // The receiver is gone once the handler is dropped
                if let Some(event) = forwarded &&
                    event_sender.send(event).is_err()
                {
                    break;
                }

                if last_tick.elapsed() >= tick_rate
                {
                    if event_sender.send(Event::Tick).is_err()
                    {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            event_receiver,
            shutdown_sender,
            thread_handle: Some(handle),
        }
    }

    /// Blocks until the poller sends an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is disconnected or the poller
    /// thread could not read from the terminal.
    pub fn next(&self) -> Result<Event>
    {
        let event = self
            .event_receiver
            .recv()
            .context("Event channel disconnected")?;

        match event
        {
            Event::Failed(reason) => Err(anyhow!("Terminal input failed: {reason}")),
            event => Ok(event),
        }
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        // The poller may already have stopped after a failed read
        let _ = self.shutdown_sender.send(());

        if let Some(handle) = self.thread_handle.take()
        {
            let _ = handle.join();
        }
    }
}
