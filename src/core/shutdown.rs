//! Shutdown Coordination
//!
//! A one-shot "please stop" signal shared between whoever requests a stop
//! (a tailer's `close()`, a signal handler) and whoever has to honour it
//! (the task reading from the line source).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcasts a stop request to any number of subscribers
#[derive(Debug)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new coordinator together with its first subscriber
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };

        (coordinator, shutdown_rx)
    }

    /// Subscribe to shutdown notifications
    ///
    /// A subscriber created after the trigger will not receive the broadcast;
    /// check [`is_shutdown_requested`](Self::is_shutdown_requested) first.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Shared flag that flips to `true` on the first trigger
    pub fn requested_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown_requested)
    }

    pub fn trigger_shutdown(&self) {
        // Release pairs with the Acquire in is_shutdown_requested()
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Route process signals into this coordinator
    ///
    /// The first SIGINT/SIGTERM/SIGHUP/SIGQUIT triggers shutdown, a second one
    /// exits immediately with status 130. Must be called inside a tokio runtime.
    pub fn install_signal_handlers(&self) {
        setup_signal_handlers(self.shutdown_tx.clone(), self.requested_flag());
    }
}

fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    #[cfg(unix)]
    {
        // Writing to a closed stdout pipe should end the process quietly
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use std::sync::atomic::AtomicUsize;
        use tokio::signal::unix::{signal, SignalKind};

        let signal_count = Arc::new(AtomicUsize::new(0));
        let kinds = [
            SignalKind::interrupt(),
            SignalKind::terminate(),
            SignalKind::hangup(),
            SignalKind::quit(),
        ];

        for kind in kinds {
            let tx = shutdown_tx.clone();
            let requested = Arc::clone(&shutdown_requested);
            let counter = Arc::clone(&signal_count);

            tokio::spawn(async move {
                let Ok(mut stream) = signal(kind) else {
                    log::warn!("Could not install handler for {:?}", kind);
                    return;
                };
                while stream.recv().await.is_some() {
                    let previous = counter.fetch_add(1, Ordering::AcqRel);
                    requested.store(true, Ordering::Release);
                    let _ = tx.send(());
                    if previous >= 1 {
                        log::warn!("Second signal received; exiting without draining");
                        std::process::exit(130);
                    }
                    log::info!("Signal received; closing input and draining buffered lines");
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            let mut received = 0usize;
            while tokio::signal::ctrl_c().await.is_ok() {
                received += 1;
                shutdown_requested.store(true, Ordering::Release);
                let _ = shutdown_tx.send(());
                if received > 1 {
                    std::process::exit(130);
                }
            }
        });
    }
}
