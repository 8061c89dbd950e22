pub mod data_url;
pub mod error;
pub mod fixture_lib;

pub use data_url::{data_url_len, parse_data_url, to_data_url, PNG_MIME_TYPE};
pub use error::{FixtureError, Result};
pub use fixture_lib::{
    decode, encode, generate, run_fixture, write_to_file, EncodedImage, FixtureConfig,
    FixtureReport, PixelBuffer, RedSquareFixture, HEIGHT, OUTPUT_PATH, RED, WIDTH,
};
