//! Rendered frame capture.
use crate::error::TrajectError;
use crate::Env;
use anyhow::{Context, Result};
use image::{imageops, RgbImage};
use std::fs;
use std::path::PathBuf;

/// A raw RGB frame produced by an environment's offscreen renderer.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    /// Row-major RGB8 pixel data, `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl Frame {
    fn into_image(self) -> Result<RgbImage, TrajectError> {
        let (width, height) = (self.width, self.height);
        let len = self.data.len();
        RgbImage::from_raw(width, height, self.data)
            .ok_or(TrajectError::BadFrameBuffer { width, height, len })
    }
}

/// Writes one frame per timestep under a per-episode directory tree.
///
/// Frames land at `<img_dir>/episode-<i>/img_<i>_<t>.jpg`. The renderer
/// output is flipped vertically before encoding so frames are stored in
/// the canonical orientation. Episode directories are created lazily;
/// creation is idempotent.
pub struct FrameWriter {
    img_dir: PathBuf,
    camera: String,
    width: u32,
    height: u32,
}

impl FrameWriter {
    /// Creates a writer rendering `width` x `height` frames from `camera`.
    pub fn new(img_dir: PathBuf, camera: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            img_dir,
            camera: camera.into(),
            width,
            height,
        }
    }

    /// Renders the environment and writes the frame for `(episode, step)`.
    ///
    /// Any render or I/O failure propagates; there is no partial-frame
    /// recovery.
    pub fn capture<E: Env>(&self, env: &mut E, episode: usize, step: usize) -> Result<()> {
        let frame = env.render(&self.camera, self.width, self.height)?;
        let img = imageops::flip_vertical(&frame.into_image()?);

        let dir = self.img_dir.join(format!("episode-{}", episode));
        fs::create_dir_all(&dir).with_context(|| format!("cannot create {:?}", dir))?;
        let path = dir.join(format!("img_{}_{}.jpg", episode, step));
        img.save(&path)
            .with_context(|| format!("cannot write {:?}", path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undersized_buffer_is_rejected() {
        let frame = Frame {
            width: 4,
            height: 4,
            data: vec![0; 10],
        };
        assert!(matches!(
            frame.into_image(),
            Err(TrajectError::BadFrameBuffer {
                width: 4,
                height: 4,
                len: 10
            })
        ));
    }

    #[test]
    fn well_formed_buffer_converts() {
        let frame = Frame {
            width: 2,
            height: 3,
            data: vec![7; 2 * 3 * 3],
        };
        let img = frame.into_image().unwrap();
        assert_eq!(img.dimensions(), (2, 3));
    }
}
