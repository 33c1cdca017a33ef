//! Reversible byte string ↔ pixel buffer codec.
//!
//! Three consecutive message bytes become the r, g and b channels of one
//! pixel. Every byte value maps to its channel value unchanged, 255
//! included; a final group shorter than three bytes is filled up with
//! zeroes.

use crate::image::{Image, Pixel};

/// Packs a byte string into pixels. The result holds exactly
/// `ceil(message.len() / 3)` pixels.
pub fn encode(message: &[u8]) -> Vec<Pixel> {
    message
        .chunks(3)
        .map(|group| {
            Pixel::new(
                group[0],
                group.get(1).copied().unwrap_or(0),
                group.get(2).copied().unwrap_or(0),
            )
        })
        .collect()
}

/// Flattens an image back into its `width * height * 3` payload bytes in
/// r,g,b order. The length of the returned vector is exact; no terminator
/// is appended, since pixel data may contain any byte value.
pub fn decode(image: &Image) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(image.pixels().len() * 3);
    for pixel in image.pixels() {
        bytes.push(pixel.r);
        bytes.push(pixel.g);
        bytes.push(pixel.b);
    }
    bytes
}
