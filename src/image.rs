use crate::error::Error;

pub mod reader;
pub mod writer;

/// A single 8-bit RGB sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An in-memory raster with exclusive ownership of its pixel buffer.
///
/// The buffer always holds exactly `width * height` pixels in row-major order.
/// A value of this type is always usable: construction either allocates a full
/// buffer or fails, and [`Image::release`] consumes the value, so a released
/// image cannot be touched again.
#[derive(Debug)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
}

impl Image {
    /// Allocates a black image of the given dimensions.
    pub fn new(width: usize, height: usize) -> crate::Result<Self> {
        let data = allocate_pixel_buffer(width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Adopts an existing pixel buffer. The buffer length must match the
    /// dimensions exactly.
    pub fn from_pixels(width: usize, height: usize, data: Vec<Pixel>) -> crate::Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(Error::ImageTooLarge(width, height))?;
        if data.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel buffer in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Writes one pixel at `(x, y)`. Coordinates outside the image extents
    /// leave the buffer untouched.
    pub fn set_pixel(&mut self, pixel: Pixel, x: usize, y: usize) -> crate::Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[y * self.width + x] = pixel;
        Ok(())
    }

    /// Reads one pixel at `(x, y)`, or `None` outside the image extents.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Ends the image's life and frees its buffer. Taking the image by value
    /// makes any later access a compile error and rules out a double release.
    pub fn release(self) {}
}

pub(crate) fn allocate_pixel_buffer(width: usize, height: usize) -> crate::Result<Vec<Pixel>> {
    let length = width
        .checked_mul(height)
        .ok_or(Error::ImageTooLarge(width, height))?;
    let mut data = Vec::new();
    data.try_reserve_exact(length)
        .map_err(|_| Error::BufferAllocationFailed(length))?;
    data.resize(length, Pixel::default());
    Ok(data)
}
