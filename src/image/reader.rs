use std::io::{ErrorKind, Read};

use super::{allocate_pixel_buffer, Image, Pixel};
use crate::error::Error;

const P6_MAGIC_TOKEN_NAME: &str = "P6 Magic";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";

/// Reads a binary P6 image from any byte source.
pub struct P6Reader<R: Read> {
    reader: R,
}

impl<R: Read> P6Reader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read_image(&mut self) -> crate::Result<Image> {
        let (width, height) = self.read_header()?;
        log::debug!("parsed P6 header of a {}x{} image", width, height);
        let data = self.read_pixel_data(width, height)?;
        Image::from_pixels(width, height, data)
    }

    /// Parses `P6 <width> <height> 255` token by token. The tokenizer stops
    /// directly behind the single whitespace byte that terminates the max
    /// value token, which is where the raw payload begins.
    fn read_header(&mut self) -> crate::Result<(usize, usize)> {
        let mut tokenizer = HeaderTokenizer::new(&mut self.reader);

        let magic = tokenizer
            .next()
            .ok_or(Error::MissingHeaderToken(P6_MAGIC_TOKEN_NAME))?;
        if magic != "P6" {
            return Err(Error::MissingHeaderToken(P6_MAGIC_TOKEN_NAME));
        }

        let width: usize = tokenizer
            .next()
            .ok_or(Error::MissingHeaderToken(WIDTH_HEADER_TOKEN_NAME))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(WIDTH_HEADER_TOKEN_NAME))?;

        let height: usize = tokenizer
            .next()
            .ok_or(Error::MissingHeaderToken(HEIGHT_HEADER_TOKEN_NAME))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(HEIGHT_HEADER_TOKEN_NAME))?;

        let max_value = tokenizer
            .next()
            .ok_or(Error::MissingHeaderToken(MAX_VALUE_HEADER_TOKEN_NAME))?;
        if max_value != "255" {
            return Err(Error::UnsupportedMaxValue(max_value));
        }

        Ok((width, height))
    }

    fn read_pixel_data(&mut self, width: usize, height: usize) -> crate::Result<Vec<Pixel>> {
        let mut data = allocate_pixel_buffer(width, height)?;
        let byte_count = data
            .len()
            .checked_mul(3)
            .ok_or(Error::ImageTooLarge(width, height))?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(byte_count)
            .map_err(|_| Error::BufferAllocationFailed(byte_count))?;
        bytes.resize(byte_count, 0);

        let mut filled = 0;
        while filled < byte_count {
            match self.reader.read(&mut bytes[filled..]) {
                Ok(0) => {
                    return Err(Error::TruncatedPixelData {
                        expected: byte_count,
                        actual: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::FailedToReadPixelData(e)),
            }
        }

        for (pixel, triplet) in data.iter_mut().zip(bytes.chunks_exact(3)) {
            *pixel = Pixel::new(triplet[0], triplet[1], triplet[2]);
        }
        Ok(data)
    }
}

/// Splits the ASCII header into whitespace-separated tokens, discarding `#`
/// comment lines through their terminating newline. Exactly one whitespace
/// byte is consumed after each token, so the underlying reader is never
/// advanced into the binary payload.
struct HeaderTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: Read> HeaderTokenizer<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        HeaderTokenizer {
            reader,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read> Iterator for HeaderTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        let mut byte = [0; 1];
        let mut in_comment = false;

        while self.reader.read(&mut byte).unwrap_or(0) > 0 {
            if in_comment {
                if byte[0] == b'\n' {
                    in_comment = false;
                }
                continue;
            }
            if byte[0] == b'#' {
                in_comment = true;
                continue;
            }
            if byte[0].is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte[0]);
            }
        }

        if self.buffer.is_empty() {
            return None;
        }

        // Non-UTF-8 garbage becomes a token that fails to parse downstream.
        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

#[cfg(test)]
mod test {
    use super::P6Reader;
    use crate::error::Error;
    use crate::image::Pixel;

    #[test]
    fn read_minimal_image() {
        let data = b"P6\n2 1\n255\nabcdef";
        let image = P6Reader::new(&data[..])
            .read_image()
            .expect("2x1 image should parse");
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.pixel(0, 0), Some(Pixel::new(b'a', b'b', b'c')));
        assert_eq!(image.pixel(1, 0), Some(Pixel::new(b'd', b'e', b'f')));
    }

    #[test]
    fn read_image_with_comments() {
        let data = b"P6\n# first comment\n# second comment\n2 1\n255\nabcdef";
        let image = P6Reader::new(&data[..])
            .read_image()
            .expect("comments before the dimensions are legal");
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
    }

    #[test]
    fn read_image_with_comment_between_dimensions() {
        let data = b"P6\n2\n# squeezed in\n1\n255\nabcdef";
        let image = P6Reader::new(&data[..])
            .read_image()
            .expect("comments at any header whitespace boundary are legal");
        assert_eq!(image.height(), 1);
    }

    #[test]
    fn payload_byte_after_header_is_not_consumed_as_whitespace() {
        // First payload byte is 0x0A, which must survive as pixel data.
        let data = b"P6\n1 1\n255\n\n\x20\x23";
        let image = P6Reader::new(&data[..])
            .read_image()
            .expect("1x1 image should parse");
        assert_eq!(image.pixel(0, 0), Some(Pixel::new(b'\n', 0x20, 0x23)));
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let data = b"P3\n2 1\n255\nabcdef";
        let result = P6Reader::new(&data[..]).read_image();
        assert!(
            matches!(result, Err(Error::MissingHeaderToken("P6 Magic"))),
            "wrong magic not detected"
        );
    }

    #[test]
    fn empty_stream_is_rejected() {
        let result = P6Reader::new(&b""[..]).read_image();
        assert!(matches!(result, Err(Error::MissingHeaderToken("P6 Magic"))));
    }

    #[test]
    fn non_numeric_width_is_rejected() {
        let data = b"P6\nwide 1\n255\nabcdef";
        let result = P6Reader::new(&data[..]).read_image();
        assert!(matches!(
            result,
            Err(Error::ParsingOfTokenFailed("Width Header"))
        ));
    }

    #[test]
    fn missing_max_value_is_rejected() {
        let data = b"P6\n2 1\n";
        let result = P6Reader::new(&data[..]).read_image();
        assert!(matches!(
            result,
            Err(Error::MissingHeaderToken("Max Value Header"))
        ));
    }

    #[test]
    fn wrong_max_value_is_rejected() {
        let data = b"P6\n2 1\n254\nabcdef";
        match P6Reader::new(&data[..]).read_image() {
            Err(Error::UnsupportedMaxValue(value)) => assert_eq!(value, "254"),
            other => panic!("wrong max value not detected: {:?}", other),
        }
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let data = b"P6\n2 2\n255\nabc";
        match P6Reader::new(&data[..]).read_image() {
            Err(Error::TruncatedPixelData { expected, actual }) => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 3);
            }
            other => panic!("truncated payload not detected: {:?}", other),
        }
    }

    #[test]
    fn zero_area_image_has_no_payload() {
        let data = b"P6\n0 3\n255\n";
        let image = P6Reader::new(&data[..])
            .read_image()
            .expect("zero-area image should parse");
        assert!(image.pixels().is_empty());
    }
}
