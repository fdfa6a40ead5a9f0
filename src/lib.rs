use image::RgbaImage;

pub mod config;
pub mod engine;
pub mod error;
pub mod interval;
pub mod line;
pub mod rotate;
pub mod section;
pub mod smoothing;
pub mod sorting;

pub use self::config::{Direction, Orientation, SortConfig, SortMode};
pub use self::engine::{EngineState, Progress, RunToken, SortEngine, SortTask, Step};
pub use self::error::{PixelsortError, Result};
pub use self::line::PixelSample;
pub use self::rotate::Rotation;

/// Sorts `image` in place in one go.
pub fn sort_image(image: &mut RgbaImage, config: &SortConfig) -> Result<()> {
    let mut engine = SortEngine::with_image(image.clone());
    engine.run(config.clone(), |_, _| ())?;
    if let Some(sorted) = engine.into_output() {
        *image = sorted;
    }
    Ok(())
}
