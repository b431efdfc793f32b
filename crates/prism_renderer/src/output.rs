//! Writing finished pixel buffers to disk.
//!
//! PPM is written directly (`P3` text or `P6` binary, max value 255); any
//! other extension is handed to the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::pixel::{PixelBuffer, MAX_CHANNEL};

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Buffer holds {actual} pixels but {width}x{height} needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// PPM encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpmFormat {
    /// `P3`: whitespace-separated decimal values
    Ascii,
    /// `P6`: raw bytes
    #[default]
    Binary,
}

fn check_size(buffer: &PixelBuffer) -> OutputResult<()> {
    if buffer.is_complete() {
        Ok(())
    } else {
        Err(OutputError::SizeMismatch {
            width: buffer.width,
            height: buffer.height,
            expected: buffer.width as usize * buffer.height as usize,
            actual: buffer.pixels.len(),
        })
    }
}

/// Encode `buffer` as PPM into `writer`.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, mut writer: W, format: PpmFormat) -> OutputResult<()> {
    check_size(buffer)?;

    let magic = match format {
        PpmFormat::Ascii => "P3",
        PpmFormat::Binary => "P6",
    };
    writeln!(writer, "{}", magic)?;
    writeln!(writer, "{} {}", buffer.width, buffer.height)?;
    writeln!(writer, "{}", MAX_CHANNEL)?;

    match format {
        PpmFormat::Ascii => {
            for pixel in &buffer.pixels {
                writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
            }
        }
        PpmFormat::Binary => writer.write_all(buffer.as_bytes())?,
    }

    writer.flush()?;
    Ok(())
}

/// Write `buffer` to a PPM file.
pub fn save_ppm<P: AsRef<Path>>(buffer: &PixelBuffer, path: P, format: PpmFormat) -> OutputResult<()> {
    let file = File::create(path.as_ref())?;
    write_ppm(buffer, BufWriter::new(file), format)
}

/// Write `buffer` to `path`, choosing the format from the extension.
///
/// `.ppm` (or no extension) writes binary PPM; anything else goes through
/// the `image` crate.
pub fn save_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        None | Some("ppm") => save_ppm(buffer, path, PpmFormat::Binary)?,
        Some(_) => {
            check_size(buffer)?;
            image::save_buffer(
                path,
                buffer.as_bytes(),
                buffer.width,
                buffer.height,
                image::ColorType::Rgb8,
            )?;
        }
    }

    info!("Saved {}x{} image to {}", buffer.width, buffer.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    fn checker() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set(0, 0, Pixel::new(255, 0, 0));
        buffer.set(1, 1, Pixel::new(0, 0, 255));
        buffer
    }

    #[test]
    fn test_ascii_ppm() {
        let mut out = Vec::new();
        write_ppm(&checker(), &mut out, PpmFormat::Ascii).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 2\n255\n255 0 0\n0 0 0\n0 0 0\n0 0 255\n");
    }

    #[test]
    fn test_binary_ppm() {
        let mut out = Vec::new();
        write_ppm(&checker(), &mut out, PpmFormat::Binary).unwrap();

        let header = b"P6\n2 2\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(out.len(), header.len() + 12);
        assert_eq!(&out[header.len()..header.len() + 3], &[255, 0, 0]);
        assert_eq!(&out[out.len() - 3..], &[0, 0, 255]);
    }

    #[test]
    fn test_size_mismatch() {
        let mut buffer = checker();
        buffer.pixels.pop();

        let err = write_ppm(&buffer, Vec::new(), PpmFormat::Binary).unwrap_err();
        assert!(matches!(
            err,
            OutputError::SizeMismatch { expected: 4, actual: 3, .. }
        ));
    }

    #[test]
    fn test_save_ppm_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let ppm = dir.path().join("checker.ppm");
        let png = dir.path().join("checker.png");

        save_image(&checker(), &ppm).unwrap();
        let bytes = std::fs::read(&ppm).unwrap();
        assert!(bytes.starts_with(b"P6\n2 2\n255\n"));

        save_image(&checker(), &png).unwrap();
        let decoded = image::open(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 255]);
    }

    #[test]
    fn test_unwritable_path() {
        let err = save_image(&checker(), "/nonexistent/prism/out.ppm").unwrap_err();
        assert!(matches!(err, OutputError::Io(_)));
    }
}
