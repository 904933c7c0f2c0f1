//! System font installation.
//!
//! Two glyph tables ship with the crate and are copied into low memory at
//! boot: sixteen 5-byte low-res glyphs for hex digits 0-F, and sixteen
//! 10-byte hi-res glyphs used by Super-CHIP and later. Each low-res glyph
//! row uses only the high 4 bits of its byte.
use crate::{
    arch::Arch,
    constants::*,
    error::{Chip8Error, Chip8Result},
    mem::Ram,
};

/// The 80-byte low-res hex font, installed at [`SMALL_FONT_ADDR`].
pub const SMALL_FONT: &[u8] = include_bytes!("../fonts/hexfont-5.bin");

/// The 160-byte hi-res hex font, installed at [`BIG_FONT_ADDR`].
pub const BIG_FONT: &[u8] = include_bytes!("../fonts/hexfont-10.bin");

/// Copy the bundled glyph tables into memory.
pub(crate) fn install(ram: &mut Ram, arch: Arch) {
    ram.load(SMALL_FONT_ADDR, SMALL_FONT);
    if arch.has_big_font() {
        ram.load(BIG_FONT_ADDR, BIG_FONT);
    }
}

/// Copy host-supplied glyph tables into memory in place of the bundled
/// ones. The tables must have the exact bundled sizes.
pub(crate) fn install_custom(ram: &mut Ram, arch: Arch, small: &[u8], big: &[u8]) -> Chip8Result<()> {
    if small.len() != SMALL_FONT.len() {
        return Err(Chip8Error::Config(format!(
            "low-res font must be {} bytes, got {}",
            SMALL_FONT.len(),
            small.len()
        )));
    }
    if big.len() != BIG_FONT.len() {
        return Err(Chip8Error::Config(format!(
            "hi-res font must be {} bytes, got {}",
            BIG_FONT.len(),
            big.len()
        )));
    }
    ram.load(SMALL_FONT_ADDR, small);
    if arch.has_big_font() {
        ram.load(BIG_FONT_ADDR, big);
    }
    Ok(())
}

/// Address of the 5-byte glyph for a hex digit.
#[inline]
pub fn small_glyph_addr(digit: u8) -> usize {
    SMALL_FONT_ADDR + SMALL_GLYPH_SIZE * (digit & 0xF) as usize
}

/// Address of the 10-byte glyph for a hex digit.
#[inline]
pub fn big_glyph_addr(digit: u8) -> usize {
    BIG_FONT_ADDR + BIG_GLYPH_SIZE * (digit & 0xF) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sizes() {
        assert_eq!(SMALL_FONT.len(), 16 * SMALL_GLYPH_SIZE);
        assert_eq!(BIG_FONT.len(), 16 * BIG_GLYPH_SIZE);
    }

    #[test]
    fn low_res_glyphs_use_high_nibble_only() {
        for byte in SMALL_FONT {
            assert_eq!(byte & 0x0F, 0);
        }
    }

    #[test]
    fn install_skips_big_font_on_base_chip8() {
        let mut ram = Ram::new(0x1000);
        install(&mut ram, Arch::Chip8);
        assert_eq!(ram.read(SMALL_FONT_ADDR), SMALL_FONT[0]);
        assert_eq!(ram.read(BIG_FONT_ADDR), 0);

        let mut ram = Ram::new(0x1000);
        install(&mut ram, Arch::SuperChip1_1);
        assert_eq!(ram.read(BIG_FONT_ADDR), BIG_FONT[0]);
    }

    #[test]
    fn custom_fonts_are_size_checked() {
        let mut ram = Ram::new(0x1000);
        let err = install_custom(&mut ram, Arch::Chip8, &[0; 79], BIG_FONT);
        assert!(matches!(err, Err(Chip8Error::Config(_))));
        install_custom(&mut ram, Arch::Chip8, &[0xF0; 80], BIG_FONT).unwrap();
        assert_eq!(ram.read(SMALL_FONT_ADDR), 0xF0);
    }

    #[test]
    fn glyph_addresses() {
        assert_eq!(small_glyph_addr(0x0), 0x000);
        assert_eq!(small_glyph_addr(0x9), 0x02D);
        assert_eq!(small_glyph_addr(0x1F), 0x04B); // digit is masked
        assert_eq!(big_glyph_addr(0x0), 0x050);
        assert_eq!(big_glyph_addr(0xF), 0x0E6);
    }
}
