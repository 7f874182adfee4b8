//! Pre-auth encoding
//!
//! This is a low level detail used to build PASETO version implementations.

/// A sink for PAE output. Lets MACs and digests consume the encoding without
/// an intermediate buffer.
pub trait WriteBytes {
    fn write(&mut self, slice: &[u8]);
}

impl WriteBytes for Vec<u8> {
    fn write(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice);
    }
}

impl<W: WriteBytes + ?Sized> WriteBytes for &mut W {
    fn write(&mut self, slice: &[u8]) {
        W::write(self, slice);
    }
}

/// Lengths are encoded as unsigned 64 bit little endian with the top bit cleared.
fn le64(n: usize) -> [u8; 8] {
    ((n as u64) & (u64::MAX >> 1)).to_le_bytes()
}

pub fn pre_auth_encode(pieces: &[&[u8]], mut out: impl WriteBytes) {
    out.write(&le64(pieces.len()));
    for piece in pieces {
        out.write(&le64(piece.len()));
        out.write(piece);
    }
}

/// [`pre_auth_encode`] into a fresh buffer.
pub fn pae(pieces: &[&[u8]]) -> Vec<u8> {
    let capacity = 8 + pieces.iter().map(|p| 8 + p.len()).sum::<usize>();
    let mut out = Vec::with_capacity(capacity);
    pre_auth_encode(pieces, &mut out);
    out
}
