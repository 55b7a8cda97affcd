//! Multiboot2 header.
//!
//! The loader scans the first 32 KiB of the image for an 8-byte aligned [`MAGIC`] and refuses the
//! image unless `magic + architecture + header_length + checksum` wraps to zero. The header is
//! never parsed by us, only emitted.

use core::mem::size_of;

/// Multiboot2 header magic.
pub const MAGIC: u32 = 0xE852_50D6;

/// Architecture tag for 32-bit protected mode i386.
pub const ARCH_I386: u32 = 0;

/// Multiboot2 tag list terminator.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EndTag {
    kind: u16,
    flags: u16,
    size: u32,
}

impl EndTag {
    const fn new() -> Self {
        Self {
            kind: 0,
            flags: 0,
            size: size_of::<EndTag>() as u32,
        }
    }
}

/// The four header words followed by the end tag.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootHeader {
    pub magic: u32,
    pub architecture: u32,
    pub header_length: u32,
    pub checksum: u32,
    end_tag: EndTag,
}

/// Size of the encoded header, end tag included.
pub const HEADER_LENGTH: usize = size_of::<BootHeader>();

/// The value that makes the four header words sum to zero modulo 2^32.
pub const fn checksum(magic: u32, architecture: u32, header_length: u32) -> u32 {
    0u32.wrapping_sub(magic.wrapping_add(architecture).wrapping_add(header_length))
}

impl BootHeader {
    pub const fn new(magic: u32, architecture: u32) -> Self {
        let header_length = HEADER_LENGTH as u32;
        Self {
            magic,
            architecture,
            header_length,
            checksum: checksum(magic, architecture, header_length),
            end_tag: EndTag::new(),
        }
    }

    /// The words covered by the checksum, in layout order.
    pub const fn words(&self) -> [u32; 4] {
        [
            self.magic,
            self.architecture,
            self.header_length,
            self.checksum,
        ]
    }

    /// Performs the same check as the loader.
    pub const fn is_valid(&self) -> bool {
        let [magic, architecture, header_length, checksum] = self.words();
        magic
            .wrapping_add(architecture)
            .wrapping_add(header_length)
            .wrapping_add(checksum)
            == 0
    }

    /// Little-endian encoding, exactly as it sits in the image.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut out = [0u8; HEADER_LENGTH];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.words()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out[16..18].copy_from_slice(&self.end_tag.kind.to_le_bytes());
        out[18..20].copy_from_slice(&self.end_tag.flags.to_le_bytes());
        out[20..24].copy_from_slice(&self.end_tag.size.to_le_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiboot2_header_sums_to_zero() {
        let header = BootHeader::new(MAGIC, ARCH_I386);
        assert_eq!(header.header_length, 24);
        assert_eq!(header.checksum, 0x17AD_AF12);
        assert!(header.is_valid());
    }

    #[test]
    fn checksum_cancels_any_fields() {
        let samples = [
            (MAGIC, ARCH_I386, 24),
            (0x1BAD_B002, 0x0000_0003, 0),
            (u32::MAX, u32::MAX, u32::MAX),
            (0, 0, 0),
            (0x8000_0000, 4, 0x7FFF_FFFF),
        ];
        for (magic, architecture, header_length) in samples {
            let sum = magic
                .wrapping_add(architecture)
                .wrapping_add(header_length)
                .wrapping_add(checksum(magic, architecture, header_length));
            assert_eq!(sum, 0, "fields {magic:#x} {architecture:#x} {header_length:#x}");
        }
    }

    #[test]
    fn corrupted_header_is_rejected() {
        let mut header = BootHeader::new(MAGIC, ARCH_I386);
        header.architecture = 4;
        assert!(!header.is_valid());
    }

    #[test]
    fn encoding_matches_loader_layout() {
        let bytes = BootHeader::new(MAGIC, ARCH_I386).to_bytes();
        assert_eq!(&bytes[0..4], &[0xD6, 0x50, 0x52, 0xE8]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[24, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[0x12, 0xAF, 0xAD, 0x17]);
        assert_eq!(&bytes[16..24], &[0, 0, 0, 0, 8, 0, 0, 0]);

        let words: u32 = bytes[..16]
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
            .fold(0, u32::wrapping_add);
        assert_eq!(words, 0);
    }

    #[test]
    fn header_is_eight_byte_aligned() {
        assert_eq!(core::mem::align_of::<BootHeader>(), 8);
    }
}
