use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use image::reader::P6Reader;
use image::writer::P6Writer;

mod error;
pub mod image;
mod logger;
pub mod text;

pub use error::Error;
pub use image::{Image, Pixel};

pub type Result<T> = std::result::Result<T, error::Error>;

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(file_path.display().to_string(), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

/// Loads a binary P6 image from disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Image> {
    let file = open_input_file(path.as_ref())?;
    let mut reader = P6Reader::new(BufReader::new(file));
    reader.read_image()
}

/// Saves an image to disk in the binary P6 format.
pub fn save<P: AsRef<Path>>(path: P, image: &Image) -> Result<()> {
    let file = open_output_file(path.as_ref())?;
    let mut writer = P6Writer::new(BufWriter::new(file));
    writer.write_image(image)
}
