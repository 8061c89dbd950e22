use image::{codecs::png::PngEncoder, ImageEncoder, ImageFormat, Rgb, RgbImage};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::data_url::{to_data_url, PNG_MIME_TYPE};
use crate::error::{FixtureError, Result};

pub const OUTPUT_PATH: &str = "test-image.png";
pub const WIDTH: u32 = 300;
pub const HEIGHT: u32 = 300;
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Number of data URL characters echoed in the console summary.
const PREVIEW_CHARS: usize = 100;

pub trait FixtureConfig {
    fn output_path(&self) -> &Path;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn color(&self) -> Rgb<u8>;
    /// Human readable colour used in the summary line, e.g. "red".
    fn color_name(&self) -> &str;

    fn mime_type(&self) -> &str {
        PNG_MIME_TYPE
    }
}

/// The hardcoded 300x300 red square written to `test-image.png`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedSquareFixture;

impl FixtureConfig for RedSquareFixture {
    fn output_path(&self) -> &Path {
        Path::new(OUTPUT_PATH)
    }

    fn width(&self) -> u32 {
        WIDTH
    }

    fn height(&self) -> u32 {
        HEIGHT
    }

    fn color(&self) -> Rgb<u8> {
        RED
    }

    fn color_name(&self) -> &str {
        "red"
    }
}

/// A solid-colour RGB pixel grid. Read-only once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Rgb<u8>> {
        self.image.pixels()
    }

    /// True when every cell holds `color`.
    pub fn is_filled_with(&self, color: Rgb<u8>) -> bool {
        self.image.pixels().all(|p| *p == color)
    }
}

/// PNG bytes produced by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for EncodedImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

pub fn generate(width: u32, height: u32, color: Rgb<u8>) -> Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(FixtureError::InvalidDimensions { width, height });
    }

    Ok(PixelBuffer {
        image: RgbImage::from_pixel(width, height, color),
    })
}

/// Encode the buffer as an RGB8 PNG with the encoder's default settings.
pub fn encode(buffer: &PixelBuffer) -> Result<EncodedImage> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    encoder.write_image(
        buffer.image.as_raw(),
        buffer.width(),
        buffer.height(),
        image::ColorType::Rgb8.into(),
    )?;

    Ok(EncodedImage { bytes })
}

/// Decode PNG bytes back into an RGB pixel grid.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgb8();
    Ok(PixelBuffer { image })
}

/// Create or truncate `path` and write `bytes` to it. The handle is flushed
/// before returning and closed on every exit path.
pub fn write_to_file<P: AsRef<Path>>(bytes: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}

/// Outcome of a successful [`run_fixture`]. Its `Display` impl renders the
/// three console summary lines.
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub color_name: String,
    pub encoded_len: usize,
    pub data_url: String,
}

impl FixtureReport {
    /// Leading slice of the data URL shown in the summary.
    pub fn preview(&self) -> &str {
        let end = self.data_url.len().min(PREVIEW_CHARS);
        &self.data_url[..end]
    }
}

impl fmt::Display for FixtureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} ({}x{} {} square)",
            self.output_path.display(),
            self.width,
            self.height,
            self.color_name
        )?;
        writeln!(f, "Base64 data URL length: {} characters", self.data_url.len())?;
        write!(f, "First 100 chars: {}", self.preview())
    }
}

/// Generate, encode, persist and textualize the configured fixture.
pub fn run_fixture<T: FixtureConfig>(config: &T) -> Result<FixtureReport> {
    let buffer = generate(config.width(), config.height(), config.color())?;
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        "generated pixel buffer"
    );

    let encoded = encode(&buffer)?;
    debug!(bytes = encoded.len(), "encoded png");

    // Persist first so a failed write never produces a report
    write_to_file(encoded.as_ref(), config.output_path())?;
    debug!(path = %config.output_path().display(), "wrote image file");

    // Same bytes, as text
    let data_url = to_data_url(encoded.as_ref(), config.mime_type());
    debug!(chars = data_url.len(), "built data url");

    Ok(FixtureReport {
        output_path: config.output_path().to_path_buf(),
        width: buffer.width(),
        height: buffer.height(),
        color_name: config.color_name().to_string(),
        encoded_len: encoded.len(),
        data_url,
    })
}
