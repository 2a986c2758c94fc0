//! Object codec
//!
//! Canonical framing, hashing and compression of a single object.
//!
//! ## Format
//!
//! Framed (pre-compression): `<kind> <payload-length>\0<payload>`.
//! The object id is the SHA-1 of the framed bytes. On disk the framed bytes are
//! stored inside a zlib stream.

use crate::artifacts::core::{Malformation, StoreError, StoreResult};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_BYTES;
use bytes::Bytes;
use derive_new::new;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Read, Write};

/// An object framed and hashed, ready for compression.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct EncodedObject {
    pub oid: ObjectId,
    pub framed: Bytes,
}

/// Frame `payload` under the `kind` header and hash the framed bytes.
pub fn encode(kind: ObjectType, payload: &[u8]) -> EncodedObject {
    let header = format!("{} {}\0", kind.as_str(), payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);

    let mut digest = [0u8; OBJECT_ID_BYTES];
    digest.copy_from_slice(&Sha1::digest(&framed));
    EncodedObject::new(ObjectId::from_raw(&digest), framed.into())
}

/// Zlib-compress `data`; the caller attaches the object path to a failure.
pub fn compress(data: &[u8]) -> std::io::Result<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish().map(Bytes::from)
}

pub fn decompress(data: &[u8]) -> StoreResult<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed_content = Vec::new();
    decoder
        .read_to_end(&mut decompressed_content)
        .map_err(|e| StoreError::from(Malformation::CorruptStream(e.to_string())))?;

    Ok(decompressed_content.into())
}

/// Split the header off `framed`, returning the kind, the declared payload
/// length and the offset at which the payload starts.
pub fn decode_header(framed: &[u8]) -> StoreResult<(ObjectType, usize, usize)> {
    let space = framed
        .iter()
        .position(|&b| b == b' ')
        .ok_or(Malformation::MissingSpace)?;
    let nul = framed
        .iter()
        .position(|&b| b == b'\0')
        .ok_or(Malformation::MissingNul)?;
    if nul < space {
        return Err(Malformation::MissingSpace.into());
    }

    let kind = std::str::from_utf8(&framed[..space])
        .map_err(|_| Malformation::UnknownKind(String::from_utf8_lossy(&framed[..space]).into()))?;
    let kind = ObjectType::try_from(kind)?;

    let length = parse_length(&framed[space + 1..nul])?;

    Ok((kind, length, nul + 1))
}

/// Decode framed bytes into kind and payload, validating the declared length.
pub fn decode(framed: &Bytes) -> StoreResult<(ObjectType, Bytes)> {
    let (kind, declared, offset) = decode_header(framed)?;
    let actual = framed.len() - offset;

    if actual < declared {
        return Err(Malformation::Truncated { declared, actual }.into());
    }
    if actual > declared {
        return Err(Malformation::LengthMismatch { declared, actual }.into());
    }

    Ok((kind, framed.slice(offset..)))
}

/// Read just the header from a compressed object stream.
///
/// Only as much of the zlib stream is inflated as is needed to reach the
/// header's null terminator.
pub fn read_header(compressed: impl Read) -> StoreResult<(ObjectType, usize)> {
    let mut reader = std::io::BufReader::new(flate2::read::ZlibDecoder::new(compressed));

    let mut header = Vec::new();
    reader
        .read_until(b'\0', &mut header)
        .map_err(|e| StoreError::from(Malformation::CorruptStream(e.to_string())))?;
    if header.last() != Some(&b'\0') {
        return Err(Malformation::MissingNul.into());
    }

    let (kind, length, _) = decode_header(&header)?;
    Ok((kind, length))
}

fn parse_length(raw: &[u8]) -> StoreResult<usize> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| Malformation::InvalidLength(String::from_utf8_lossy(raw).into()))?;

    // only plain decimal digits; rejects signs and surrounding whitespace
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Malformation::InvalidLength(text.to_string()).into());
    }

    text.parse::<usize>()
        .map_err(|_| Malformation::InvalidLength(text.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn reason(error: StoreError) -> Malformation {
        match error {
            StoreError::MalformedObject { reason, .. } => reason,
            other => panic!("Expected MalformedObject, got {other:?}"),
        }
    }

    #[test]
    fn frames_hello_world_blob() {
        let encoded = encode(ObjectType::Blob, b"hello world\n");

        assert_eq!(&encoded.framed[..8], b"blob 12\0");
        assert_eq!(&encoded.framed[8..], b"hello world\n");
        assert_eq!(
            encoded.oid.as_ref(),
            "3b18e512dba79e4c8300dd08aeb37f8e728b8dad"
        );
    }

    #[test]
    fn empty_tree_has_the_well_known_id() {
        let encoded = encode(ObjectType::Tree, b"");
        assert_eq!(
            encoded.oid.as_ref(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn read_header_stops_at_the_header() {
        let encoded = encode(ObjectType::Commit, b"tree abc\n");
        let compressed = compress(&encoded.framed).unwrap();

        let (kind, length) = read_header(&compressed[..]).unwrap();

        assert_eq!(kind, ObjectType::Commit);
        assert_eq!(length, 9);
    }

    #[rstest]
    #[case(b"blob12\0".as_slice(), Malformation::MissingSpace)]
    #[case(b"blob 12".as_slice(), Malformation::MissingNul)]
    #[case(b"blob\0 12".as_slice(), Malformation::MissingSpace)]
    #[case(b"blob -1\0".as_slice(), Malformation::InvalidLength("-1".to_string()))]
    #[case(b"blob x\0".as_slice(), Malformation::InvalidLength("x".to_string()))]
    #[case(b"blob \0".as_slice(), Malformation::InvalidLength(String::new()))]
    #[case(b"tag 0\0".as_slice(), Malformation::UnknownKind("tag".to_string()))]
    fn rejects_bad_headers(#[case] framed: &[u8], #[case] expected: Malformation) {
        assert_eq!(reason(decode_header(framed).unwrap_err()), expected);
    }

    #[test]
    fn rejects_truncated_payload() {
        let framed = Bytes::from_static(b"blob 10\0short");

        assert_eq!(
            reason(decode(&framed).unwrap_err()),
            Malformation::Truncated {
                declared: 10,
                actual: 5
            }
        );
    }

    #[test]
    fn rejects_trailing_bytes() {
        let framed = Bytes::from_static(b"blob 2\0abc");

        assert_eq!(
            reason(decode(&framed).unwrap_err()),
            Malformation::LengthMismatch {
                declared: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_corrupt_stream() {
        let error = decompress(b"definitely not zlib").unwrap_err();
        assert!(matches!(reason(error), Malformation::CorruptStream(_)));
    }

    proptest! {
        #[test]
        fn decode_recovers_encoded_objects(
            kind in prop_oneof![
                Just(ObjectType::Blob),
                Just(ObjectType::Tree),
                Just(ObjectType::Commit)
            ],
            payload in proptest::collection::vec(any::<u8>(), 0..512)
        ) {
            let encoded = encode(kind, &payload);
            let restored = decompress(&compress(&encoded.framed).unwrap()).unwrap();
            let (decoded_kind, decoded_payload) = decode(&restored).unwrap();

            prop_assert_eq!(decoded_kind, kind);
            prop_assert_eq!(&decoded_payload[..], &payload[..]);
        }

        #[test]
        fn identical_input_yields_identical_id(payload in proptest::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(
                encode(ObjectType::Blob, &payload).oid,
                encode(ObjectType::Blob, &payload).oid
            );
        }
    }
}
