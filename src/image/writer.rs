use std::io::Write;

use super::Image;
use crate::error::Error;

/// Writes a binary P6 image to any byte sink.
pub struct P6Writer<W: Write> {
    writer: W,
}

impl<W: Write> P6Writer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_image(&mut self, image: &Image) -> crate::Result<()> {
        self.write_header(image)?;
        self.write_pixel_data(image)?;
        self.writer.flush().map_err(Error::FailedToWriteImage)?;
        log::debug!(
            "wrote P6 image of {}x{} pixels",
            image.width(),
            image.height()
        );
        Ok(())
    }

    fn write_header(&mut self, image: &Image) -> crate::Result<()> {
        write!(
            self.writer,
            "P6\n{} {}\n255\n",
            image.width(),
            image.height()
        )
        .map_err(Error::FailedToWriteImage)
    }

    /// The payload is exactly `width * height * 3` raw bytes in row-major
    /// r,g,b order, with no separators between pixels or rows.
    fn write_pixel_data(&mut self, image: &Image) -> crate::Result<()> {
        for pixel in image.pixels() {
            self.writer
                .write_all(&[pixel.r, pixel.g, pixel.b])
                .map_err(Error::FailedToWriteImage)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::P6Writer;
    use crate::error::Error;
    use crate::image::{Image, Pixel};

    #[test]
    fn write_minimal_image() {
        let mut image = Image::new(2, 1).expect("allocation of a 2x1 image failed");
        image
            .set_pixel(Pixel::new(b'a', b'b', b'c'), 0, 0)
            .expect("coordinate (0, 0) must be in bounds");
        image
            .set_pixel(Pixel::new(b'd', b'e', b'f'), 1, 0)
            .expect("coordinate (1, 0) must be in bounds");

        let mut sink: Vec<u8> = Vec::new();
        P6Writer::new(&mut sink)
            .write_image(&image)
            .expect("writing to a vector cannot fail");
        assert_eq!(&sink, b"P6\n2 1\n255\nabcdef");
    }

    #[test]
    fn write_zero_area_image() {
        let image = Image::new(0, 4).expect("zero-area allocation failed");
        let mut sink: Vec<u8> = Vec::new();
        P6Writer::new(&mut sink)
            .write_image(&image)
            .expect("writing to a vector cannot fail");
        assert_eq!(&sink, b"P6\n0 4\n255\n");
    }

    #[test]
    fn full_sink_is_reported_as_write_failure() {
        let image = Image::new(2, 2).expect("allocation of a 2x2 image failed");
        let mut sink = [0u8; 4];
        let result = P6Writer::new(&mut sink[..]).write_image(&image);
        assert!(
            matches!(result, Err(Error::FailedToWriteImage(_))),
            "short write not detected"
        );
    }
}
