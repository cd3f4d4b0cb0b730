use lootbox::{
    chunks::{self, Chunk},
    decode, encode,
    source::{PixelSource, UniformRandom},
    Compression, Error, ImageBuffer, PngEncoder,
};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn single_red_pixel_is_byte_exact() {
    let png = encode(&[255, 0, 0], 1, 1).unwrap();
    assert_eq!(png.len(), 61);
    insta::assert_snapshot!(hex(&png[..8]), @"89504e470d0a1a0a");
    insta::assert_snapshot!(hex(&png[8..33]), @"0000000d4948445200000001000000010802000000907753de");
    insta::assert_snapshot!(hex(&png[33..49]), @"000000044944415400ff000054bbd3ea");
    insta::assert_snapshot!(hex(&png[49..]), @"0000000049454e44ae426082");
}

#[test]
fn chunk_sequence_is_ihdr_idat_iend() {
    let pixels = vec![128; 7 * 5 * 3];
    let png = encode(&pixels, 7, 5).unwrap();
    let (rest, _) = lootbox::parse_signature(&png).unwrap();
    let chunks: Vec<_> = chunks::iter_chunks(rest)
        .collect::<anyhow::Result<_>>()
        .unwrap();
    assert_eq!(chunks.len(), 3);
    match &chunks[0] {
        Chunk::IHDR(header) => assert_eq!((header.width, header.height), (7, 5)),
        other => panic!("expected IHDR, got {other:?}"),
    }
    match &chunks[1] {
        Chunk::IDAT(idat) => {
            assert_eq!(idat.data.len(), 5 + 7 * 5 * 3);
            assert!(idat.data.iter().step_by(7 * 3 + 1).all(|&filter| filter == 0));
        }
        other => panic!("expected IDAT, got {other:?}"),
    }
    assert!(matches!(chunks[2], Chunk::IEND));
}

#[test]
fn round_trips_through_the_decoder() {
    let mut source = UniformRandom::new(Some(2024));
    for (width, height) in [(1, 1), (2, 3), (24, 24), (200, 40), (3, 97)] {
        let image = source.produce(width, height).unwrap();
        for compression in [Compression::Stored, Compression::Zlib] {
            let png = PngEncoder::with_compression(compression)
                .encode_image(&image)
                .unwrap();
            let decoded = decode(&png).unwrap();
            assert_eq!(decoded, image, "{width}x{height} {compression:?}");
        }
    }
}

#[test]
fn identical_inputs_give_identical_bytes_across_threads() {
    let image = UniformRandom::new(Some(1)).produce(33, 17).unwrap();
    let expected = encode(image.data(), 33, 17).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let image = image.clone();
            std::thread::spawn(move || PngEncoder::new().encode_image(&image).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn mismatched_buffers_are_invalid_arguments() {
    assert!(matches!(encode(&[0; 11], 2, 2), Err(Error::InvalidArgument(_))));
    assert!(matches!(encode(&[0; 13], 2, 2), Err(Error::InvalidArgument(_))));
    assert!(matches!(encode(&[], 0, 1), Err(Error::InvalidArgument(_))));
    assert!(ImageBuffer::new(3, 1, vec![0; 9]).is_ok());
}
