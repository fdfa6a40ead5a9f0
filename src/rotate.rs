use std::str;

use image::{imageops, RgbaImage};

use crate::error::{PixelsortError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Zero,
    Quarter,
    Half,
    NegQuarter,
}

impl Rotation {
    /// The rotation undoing `self`.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Zero => Rotation::Zero,
            Rotation::Quarter => Rotation::NegQuarter,
            Rotation::Half => Rotation::Half,
            Rotation::NegQuarter => Rotation::Quarter,
        }
    }
}

impl str::FromStr for Rotation {
    type Err = PixelsortError;
    fn from_str(s: &str) -> Result<Self> {
        let num = s
            .parse::<isize>()
            .map_err(|_| PixelsortError::value("rotation angle", s))?
            .rem_euclid(360);
        match num {
            0 => Ok(Rotation::Zero),
            90 => Ok(Rotation::Quarter),
            180 => Ok(Rotation::Half),
            270 => Ok(Rotation::NegQuarter),
            _ => Err(PixelsortError::value("rotation angle (multiple of 90)", s)),
        }
    }
}

/// Rotates clockwise by 90 degrees, swapping width and height.
pub fn rotate90(image: &RgbaImage) -> RgbaImage {
    imageops::rotate90(image)
}

pub fn rotate(image: &RgbaImage, rotation: Rotation) -> RgbaImage {
    match rotation {
        Rotation::Zero => image.clone(),
        Rotation::Quarter => rotate90(image),
        Rotation::Half => imageops::rotate180(image),
        Rotation::NegQuarter => imageops::rotate270(image),
    }
}
