//! Parallel band renderer.
//!
//! Each band is traced by its own task on a dedicated rayon pool and sent back
//! over a channel; the caller reassembles bands as they arrive and enforces the
//! optional timeout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Instant;

use umbra_core::Scene;

use crate::band::{partition_bands, render_band};
use crate::{ImageBuffer, RenderConfig, RenderError, Raytracer};

/// Render `scene` into a new image.
///
/// The scene is shared read-only between band tasks. If a timeout is
/// configured and not every band arrives in time, the remaining bands are
/// cancelled and the whole render fails; no partial image is returned.
pub fn render(scene: Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let (width, height) = (config.width, config.height);
    let bands = partition_bands(height, config.workers);
    let total = bands.len();

    log::info!(
        "Rendering {}x{} in {} bands ({} objects, {} lights, depth {})",
        width,
        height,
        total,
        scene.object_count(),
        scene.light_count(),
        config.max_depth
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("umbra-band-{}", i))
        .panic_handler(|_| log::error!("Band worker panicked"))
        .build()?;

    let scene = Arc::new(scene);
    let cancel = Arc::new(AtomicBool::new(false));
    let (sender, receiver) = mpsc::channel();

    for band in bands {
        let scene = Arc::clone(&scene);
        let cancel = Arc::clone(&cancel);
        let sender = sender.clone();
        let config = config.clone();

        pool.spawn(move || {
            let start = Instant::now();
            let tracer = Raytracer::new(&scene, &config);
            if let Some(result) = render_band(band, config.width, config.height, &tracer, &cancel) {
                log::debug!(
                    "Band {} ({} rows from {}) done in {:.2?}",
                    band.index,
                    band.height,
                    band.y_offset,
                    start.elapsed()
                );
                // The receiver is gone only if the render was abandoned
                let _ = sender.send(result);
            }
        });
    }
    // Only the tasks hold senders now, so the channel closes if they all stop
    drop(sender);

    let start = Instant::now();
    let deadline = config.timeout().map(|timeout| start + timeout);
    let mut image = ImageBuffer::new(width, height);
    let mut completed = 0;

    while completed < total {
        let received = match deadline {
            Some(deadline) => receiver.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(result) => {
                image.write_band(&result);
                completed += 1;
            }
            Err(RecvTimeoutError::Timeout) => {
                cancel.store(true, Ordering::Relaxed);
                let elapsed = start.elapsed();
                log::error!(
                    "Render timed out after {:.2?} ({}/{} bands complete)",
                    elapsed,
                    completed,
                    total
                );
                return Err(RenderError::Timeout {
                    completed,
                    total,
                    elapsed,
                });
            }
            Err(RecvTimeoutError::Disconnected) => {
                log::error!("Band workers stopped early ({}/{} bands complete)", completed, total);
                return Err(RenderError::WorkerFailed { completed, total });
            }
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
