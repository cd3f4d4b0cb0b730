//! CRC-32 as used by zlib and PNG (reflected polynomial `0xedb88320`).

const POLYNOMIAL: u32 = 0xedb88320;

const CRC_TABLE: [u32; 256] = {
    let mut table = [0; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut i = 0;
        while i < 8 {
            if c & 1 != 0 {
                c = POLYNOMIAL ^ (c >> 1);
            } else {
                c >>= 1;
            }
            i += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
};

/// Starting register value for a fresh checksum.
pub const INITIAL: u32 = 0xffffffff;

/// Feeds `data` into a running (non-finalized) CRC register.
pub fn update(crc: u32, data: &[u8]) -> u32 {
    data.iter().fold(crc, |crc, &b| {
        CRC_TABLE[((crc ^ b as u32) & 0xff) as usize] ^ (crc >> 8)
    })
}

/// Completes a running register into the checksum value.
pub const fn finalize(crc: u32) -> u32 {
    crc ^ 0xffffffff
}

/// Computes the CRC-32 of `data` in one go.
pub fn compute(data: &[u8]) -> u32 {
    finalize(update(INITIAL, data))
}

#[cfg(test)]
mod tests {
    use super::{compute, finalize, update, INITIAL};

    #[test]
    fn empty_input_has_zero_crc() {
        assert_eq!(compute(&[]), 0);
    }

    #[test]
    fn matches_known_check_values() {
        assert_eq!(compute(b"123456789"), 0xcbf43926);
        assert_eq!(compute(b"IEND"), 0xae426082);
        assert_eq!(
            compute(b"The quick brown fox jumps over the lazy dog"),
            0x414fa339
        );
    }

    #[test]
    fn incremental_update_equals_one_shot() {
        let running = update(update(INITIAL, b"IHDR"), &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]);
        assert_eq!(finalize(running), 0x907753de);
    }

    #[test]
    fn table_is_shared_across_threads() {
        let data: Vec<u8> = (0..=255).collect();
        let expected = compute(&data);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let data = data.clone();
                std::thread::spawn(move || compute(&data))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
