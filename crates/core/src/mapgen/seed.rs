//! Deterministic seed mixing so each generation stage draws from its own stream.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    Rooms,
    Connections,
}

impl Stream {
    fn code(self) -> u64 {
        match self {
            Stream::Rooms => 1,
            Stream::Connections => 2,
        }
    }
}

pub fn derive_stream_seed(run_seed: u64, stream: Stream) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= stream.code().wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
