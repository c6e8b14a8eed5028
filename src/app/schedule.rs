use super::events::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A cancellable ticker task feeding the event loop ⏱️
pub struct Periodic {
    period: Duration,
    make: fn() -> AppEvent,
    handle: Option<JoinHandle<()>>,
}

impl Periodic {
    pub fn new(period: Duration, make: fn() -> AppEvent) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            make,
            handle: None,
        }
    }

    pub fn start(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.is_running() {
            return;
        }
        let tx = tx.clone();
        let period = self.period;
        let make = self.make;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                // A full channel just drops this tick
                match tx.try_send(make()) {
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                    _ => continue,
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Start or cancel so the task runs exactly when `active`
    pub fn sync(&mut self, active: bool, tx: &mpsc::Sender<AppEvent>) {
        match (active, self.is_running()) {
            (true, false) => self.start(tx),
            (false, true) => self.cancel(),
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Periodic {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_cancel() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut frames = Periodic::new(Duration::from_millis(5), || AppEvent::Frame);

        frames.sync(true, &tx);
        assert!(frames.is_running());
        let got = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(got, Ok(Some(AppEvent::Frame))));

        frames.sync(false, &tx);
        assert!(!frames.is_running());

        // Drain whatever was queued before the abort, then expect silence
        while rx.try_recv().is_ok() {}
        let quiet = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(quiet.is_err());
    }
}
