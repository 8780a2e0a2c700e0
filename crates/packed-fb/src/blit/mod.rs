//! Tile blit kernels, one per pixel depth.
//!
//! Every kernel takes the raw buffer, its row stride in pixels, a destination
//! pixel and a tile whose format matches the kernel. Kernels do no clipping;
//! callers check the footprint first.

use crate::{format::PixelFormat, tile::Tile};


/// Dispatches to the kernel for `tile.format()`.
#[inline]
pub(crate) fn blit(buffer: &mut [u8], stride: usize, x: usize, y: usize, tile: &Tile<'_>) {
    match tile.format() {
        PixelFormat::Grey1 => blit_1bpp(buffer, stride, x, y, tile),
        PixelFormat::Grey2 => blit_2bpp(buffer, stride, x, y, tile),
        PixelFormat::Grey4 => blit_4bpp(buffer, stride, x, y, tile),
        PixelFormat::Indexed8 => blit_8bpp(buffer, stride, x, y, tile),
        PixelFormat::Rgb565 => blit_16bpp(buffer, stride, x, y, tile),
    }
}

/// 8 pixels per byte; the destination bit offset (linear index mod 8) picks
/// how far each tile byte is shifted across the byte boundary.
///
/// ```text
///   x%8=0   XXXXXXXX YYYYYYYY
///           01234567
///   x%8=3   XXXXXXXX YYYYYYYY
///           ---01234 567
/// ```
pub fn blit_1bpp(buffer: &mut [u8], stride: usize, x: usize, y: usize, tile: &Tile<'_>) {
    blit_packed::<1>(buffer, stride, x, y, tile);
}

/// 4 pixels per byte; alignment case is the linear index mod 4.
pub fn blit_2bpp(buffer: &mut [u8], stride: usize, x: usize, y: usize, tile: &Tile<'_>) {
    blit_packed::<2>(buffer, stride, x, y, tile);
}

/// 2 pixels per byte.
///
/// When the destination nibble parity matches the tile's, rows are copied as
/// whole bytes. Otherwise the high pixel of each tile byte lands in the low
/// nibble of one destination byte and its low pixel in the high nibble of the
/// next. Odd sides leave a half byte per row that is merged, never
/// overwritten.
pub fn blit_4bpp(buffer: &mut [u8], stride: usize, x: usize, y: usize, tile: &Tile<'_>) {
    blit_packed::<4>(buffer, stride, x, y, tile);
}

/// One pixel per byte; rows are plain slice copies.
pub fn blit_8bpp(buffer: &mut [u8], stride: usize, x: usize, y: usize, tile: &Tile<'_>) {
    let side = tile.side_length();
    let data = tile.data();

    for yy in 0..side {
        let start = (y + yy) * stride + x;
        buffer[start..start + side].copy_from_slice(&data[yy * side..][..side]);
    }
}

/// Little-endian words, copied two bytes per pixel.
pub fn blit_16bpp(buffer: &mut [u8], stride: usize, x: usize, y: usize, tile: &Tile<'_>) {
    let side = tile.side_length();
    let row_bytes = side * 2;
    let data = tile.data();

    for yy in 0..side {
        let start = ((y + yy) * stride + x) * 2;
        buffer[start..start + row_bytes].copy_from_slice(&data[yy * row_bytes..][..row_bytes]);
    }
}

fn blit_packed<const BITS: usize>(
    buffer: &mut [u8],
    stride: usize,
    x: usize,
    y: usize,
    tile: &Tile<'_>,
) {
    let per_byte = 8 / BITS;
    let side = tile.side_length();
    let row_bytes = tile.row_bytes();
    let data = tile.data();

    for yy in 0..side {
        let src = &data[yy * row_bytes..][..row_bytes];
        let bit = ((y + yy) * stride + x) * BITS;
        let dst = bit / 8;
        let offset = (bit % 8) as u32;

        if offset == 0 {
            let whole = side / per_byte;
            buffer[dst..dst + whole].copy_from_slice(&src[..whole]);

            let rest = side % per_byte;
            if rest != 0 {
                splice(buffer, dst + whole, 0, src[whole], leading_mask(rest * BITS));
            }
            continue;
        }

        for (k, &byte) in src.iter().enumerate() {
            let pixels = (side - k * per_byte).min(per_byte);
            splice(buffer, dst + k, offset, byte, leading_mask(pixels * BITS));
        }
    }
}

/// Mask covering the top `bits` bits of a byte.
#[inline]
const fn leading_mask(bits: usize) -> u8 {
    (0xFF00u16 >> bits) as u8
}

/// Writes the `mask`ed bits of `data`, shifted right by `offset`, starting at
/// `buffer[index]`. Bits pushed past the byte land in the top of
/// `buffer[index + 1]`. Destination bits outside the mask are kept.
#[inline]
fn splice(buffer: &mut [u8], index: usize, offset: u32, data: u8, mask: u8) {
    let bits = data & mask;

    let head_mask = mask >> offset;
    buffer[index] = (buffer[index] & !head_mask) | (bits >> offset);

    if offset == 0 {
        return;
    }

    let tail_mask = ((mask as u16) << (8 - offset)) as u8;
    if tail_mask != 0 {
        let tail = ((bits as u16) << (8 - offset)) as u8;
        buffer[index + 1] = (buffer[index + 1] & !tail_mask) | tail;
    }
}
