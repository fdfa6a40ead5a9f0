//! Sorts an image a chunk of scan lines at a time. Starting a new run
//! invalidates the tokens of older ones.

use std::sync::Arc;

use image::RgbaImage;
use log::{debug, info, warn};

use crate::config::SortConfig;
use crate::error::Result;
use crate::line;
use crate::rotate::{self, Rotation};

/// Identifies one run of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub processed_lines: usize,
    pub total_lines: usize,
    pub percent: f64,
}

impl Progress {
    fn new(processed_lines: usize, total_lines: usize) -> Self {
        let percent = if total_lines == 0 {
            100.0
        } else {
            processed_lines as f64 / total_lines as f64 * 100.0
        };
        Progress {
            processed_lines,
            total_lines,
            percent,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed_lines >= self.total_lines
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Progress(Progress),
    /// The last chunk was sorted, the working buffer is final.
    Complete(Progress),
    Superseded,
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Done,
}

#[derive(Debug)]
struct Run {
    config: SortConfig,
    processed_lines: usize,
    total_lines: usize,
    done: bool,
}

#[derive(Debug, Default)]
pub struct SortEngine {
    source: Option<Arc<RgbaImage>>,
    working: Option<Arc<RgbaImage>>,
    generation: u64,
    run: Option<Run>,
    progress: f64,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(image: RgbaImage) -> Self {
        let mut engine = Self::new();
        engine.load(image);
        engine
    }

    /// Replaces the source image, abandoning any run in flight.
    pub fn load(&mut self, image: RgbaImage) {
        debug!("loaded {}x{} image", image.width(), image.height());
        self.supersede();
        self.source = Some(Arc::new(image));
    }

    /// Applies a rotation to the source image, abandoning any run in flight.
    pub fn rotate(&mut self, rotation: Rotation) {
        if let Some(source) = self.source.take() {
            self.supersede();
            self.source = Some(Arc::new(rotate::rotate(&source, rotation)));
        }
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_deref()
    }

    /// The latest published working buffer, or the source if no run was
    /// started since it was loaded.
    pub fn preview(&self) -> Option<Arc<RgbaImage>> {
        self.working.clone().or_else(|| self.source.clone())
    }

    /// The final buffer of the last run, once it completed.
    pub fn output(&self) -> Option<Arc<RgbaImage>> {
        match self.state() {
            EngineState::Done => self.working.clone(),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<RgbaImage> {
        if self.state() != EngineState::Done {
            return None;
        }
        self.working
            .map(|working| Arc::try_unwrap(working).unwrap_or_else(|shared| (*shared).clone()))
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> EngineState {
        match &self.run {
            None => EngineState::Idle,
            Some(run) if run.done => EngineState::Done,
            Some(_) => EngineState::Running,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == EngineState::Done
    }

    fn supersede(&mut self) {
        if self.state() == EngineState::Running {
            debug!("abandoning run {}", self.generation);
        }
        self.generation += 1;
        self.run = None;
        self.working = None;
        self.progress = 0.0;
    }

    /// Begins a new run over the loaded image, replacing any run in flight.
    ///
    /// Returns `Ok(None)` without doing anything when no image is loaded.
    pub fn start(&mut self, config: SortConfig) -> Result<Option<RunToken>> {
        config.validate()?;
        let source = match &self.source {
            Some(source) => Arc::clone(source),
            None => {
                debug!("no image loaded, not starting a sort");
                return Ok(None);
            }
        };
        self.supersede();
        let total_lines = line::line_count(&source, config.orientation);
        info!(
            "sorting {} {:?} lines of a {}x{} image by {:?}, {} lines per chunk",
            total_lines,
            config.orientation,
            source.width(),
            source.height(),
            config.mode,
            config.chunk_lines
        );
        self.working = Some(Arc::new((*source).clone()));
        self.run = Some(Run {
            config,
            processed_lines: 0,
            total_lines,
            done: false,
        });
        Ok(Some(RunToken(self.generation)))
    }

    /// Sorts the next chunk of the run identified by `token`.
    pub fn resume(&mut self, token: RunToken) -> Step {
        if token.0 != self.generation {
            warn!(
                "run {} was superseded by run {}, dropping it",
                token.0, self.generation
            );
            return Step::Superseded;
        }
        let (run, source, working) = match (&mut self.run, &self.source, &mut self.working) {
            (Some(run), Some(source), Some(working)) if !run.done => (run, source, working),
            _ => return Step::Idle,
        };

        let end = (run.processed_lines + run.config.chunk_lines).min(run.total_lines);
        let buffer = Arc::make_mut(working);
        for index in run.processed_lines..end {
            line::sort_line(source, buffer, index, &run.config);
        }
        run.processed_lines = end;

        let progress = Progress::new(run.processed_lines, run.total_lines);
        self.progress = progress.percent;
        debug!(
            "sorted {}/{} lines ({:.1}%)",
            progress.processed_lines, progress.total_lines, progress.percent
        );
        if progress.is_complete() {
            run.done = true;
            info!("sorted all {} lines", run.total_lines);
            Step::Complete(progress)
        } else {
            Step::Progress(progress)
        }
    }

    pub fn task(&mut self, token: RunToken) -> SortTask<'_> {
        SortTask {
            engine: self,
            token,
        }
    }

    /// Starts a run and drives it to completion, handing every published
    /// buffer to `observer`.
    ///
    /// Returns the final progress, or `None` when no image is loaded.
    pub fn run<F>(&mut self, config: SortConfig, mut observer: F) -> Result<Option<Progress>>
    where
        F: FnMut(&Progress, &RgbaImage),
    {
        let token = match self.start(config)? {
            Some(token) => token,
            None => return Ok(None),
        };
        let mut last = None;
        loop {
            let (progress, complete) = match self.resume(token) {
                Step::Progress(progress) => (progress, false),
                Step::Complete(progress) => (progress, true),
                Step::Superseded | Step::Idle => break,
            };
            if let Some(working) = &self.working {
                observer(&progress, working);
            }
            last = Some(progress);
            if complete {
                break;
            }
        }
        Ok(last)
    }
}

/// One chunk per `next`.
pub struct SortTask<'e> {
    engine: &'e mut SortEngine,
    token: RunToken,
}

impl SortTask<'_> {
    pub fn token(&self) -> RunToken {
        self.token
    }

    pub fn preview(&self) -> Option<Arc<RgbaImage>> {
        self.engine.preview()
    }
}

impl Iterator for SortTask<'_> {
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        match self.engine.resume(self.token) {
            Step::Progress(progress) | Step::Complete(progress) => Some(progress),
            Step::Superseded | Step::Idle => None,
        }
    }
}
