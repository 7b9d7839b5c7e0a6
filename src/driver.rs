use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;

use crate::grid::CellView;
use crate::universe::Universe;

/// Something that can paint a generation. The renderer only ever sees a read-only view.
pub trait Renderer {
    type Error;

    fn draw(&mut self, cells: CellView<'_>) -> Result<(), Self::Error>;
}

/// Shared stop signal for a running [`Driver`]. Clones all refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Runs a universe frame by frame: tick, then draw, then wait out the rest of the frame.
#[derive(Clone, Copy, Debug)]
pub struct Driver {
    /// Minimum time between the start of two frames
    frame_time: Duration,

    /// Stop after this many frames
    generations: Option<u64>,
}

impl Driver {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            generations: None,
        }
    }

    /// A driver that never sleeps between frames
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_generations(mut self, generations: Option<u64>) -> Self {
        self.generations = generations;
        self
    }

    /// Run until `stop` is set or the generation limit is reached, returning the number of frames
    /// that ran. A renderer error ends the run immediately.
    pub fn run<R>(
        &self,
        universe: &mut Universe,
        renderer: &mut R,
        stop: &StopHandle,
    ) -> Result<u64, R::Error>
    where
        R: Renderer,
    {
        info!(
            width = universe.width(),
            height = universe.height(),
            frame_time = ?self.frame_time,
            generations = ?self.generations,
            "starting driver"
        );

        let mut frames = 0;

        while !stop.is_stopped() && self.generations.is_none_or(|n| frames < n) {
            let t = Instant::now();

            universe.tick();
            renderer.draw(universe.cells())?;
            frames += 1;

            let dt = t.elapsed();
            debug!(frame = frames, ?dt, "frame done");

            let time_left = self.frame_time.saturating_sub(dt);
            if !time_left.is_zero() {
                thread::sleep(time_left);
            }
        }

        info!(frames, generation = universe.generation(), "driver stopped");

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::Driver;
    use super::Renderer;
    use super::StopHandle;
    use crate::cell::Cell;
    use crate::grid::CellView;
    use crate::universe::Universe;

    /// Keeps a copy of every frame it is handed
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<u8>>,
        stop_after: Option<(usize, StopHandle)>,
    }

    impl Renderer for Recorder {
        type Error = Infallible;

        fn draw(&mut self, cells: CellView<'_>) -> Result<(), Self::Error> {
            self.frames.push(cells.as_bytes().to_vec());

            if let Some((n, stop)) = &self.stop_after {
                if self.frames.len() == *n {
                    stop.stop();
                }
            }

            Ok(())
        }
    }

    struct Failing;

    impl Renderer for Failing {
        type Error = &'static str;

        fn draw(&mut self, _cells: CellView<'_>) -> Result<(), Self::Error> {
            Err("canvas gone")
        }
    }

    fn blinker() -> Universe {
        Universe::create(5, 5, |row, column| Cell::from(row == 2 && (1..=3).contains(&column)))
            .unwrap()
    }

    #[test]
    fn runs_generation_limit() {
        let mut universe = blinker();
        let mut recorder = Recorder::default();

        let frames = Driver::unpaced()
            .with_generations(Some(4))
            .run(&mut universe, &mut recorder, &StopHandle::new())
            .unwrap();

        assert_eq!(frames, 4);
        assert_eq!(universe.generation(), 4);
        assert_eq!(recorder.frames.len(), 4);

        // blinker has period 2
        assert_eq!(recorder.frames[0], recorder.frames[2]);
        assert_ne!(recorder.frames[0], recorder.frames[1]);
    }

    #[test]
    fn stops_on_signal() {
        let stop = StopHandle::new();
        let mut universe = blinker();
        let mut recorder = Recorder {
            stop_after: Some((3, stop.clone())),
            ..Default::default()
        };

        let frames = Driver::unpaced()
            .run(&mut universe, &mut recorder, &stop)
            .unwrap();

        assert_eq!(frames, 3);
        assert!(stop.is_stopped());
    }

    #[test]
    fn already_stopped() {
        let stop = StopHandle::new();
        stop.stop();

        let mut universe = blinker();
        let frames = Driver::unpaced()
            .run(&mut universe, &mut Recorder::default(), &stop)
            .unwrap();

        assert_eq!(frames, 0);
        assert_eq!(universe.generation(), 0);
    }

    #[test]
    fn renderer_error_ends_run() {
        let mut universe = blinker();

        let res = Driver::unpaced().run(&mut universe, &mut Failing, &StopHandle::new());

        assert_eq!(res, Err("canvas gone"));
        assert_eq!(universe.generation(), 1);
    }
}
