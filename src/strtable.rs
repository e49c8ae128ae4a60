//! Prefix-trie string table codec (PopCap RSB/RSGP/PAK family).
//!
//! A table of `(key, fixed payload)` pairs is packed into a stream of
//! 4-byte cells.  A cell carries one character of a key in its low byte
//! (0 terminates the key) and, in bits 8..32, an optional back-reference to
//! the cell index where a descendant key's unique suffix begins.  Once a
//! key's characters are written, its payload block follows verbatim.
//!
//! Keys are upper-cased and sorted in descending order before encoding.
//! Each entry inherits its longest usable prefix from the earlier entry
//! that claimed it; the claim is recorded by seeking back and OR-ing the
//! descendant's start cell into the ancestor's already-written cell.  The
//! encoder therefore keeps two cursors: the append cursor only moves
//! forward, the patch cursor jumps back to 4-byte-aligned cells.
//!
//! `compute_ripe_size` is the same traversal with the byte emission turned
//! off; both directions run through [`run_encode`] so the size pass cannot
//! drift from the real encoder.

use crate::error::{Error, Result};
use crate::stream::{Reader, Stream, Writer};

/// Cell width in bytes; the patch cursor only lands on multiples of this.
pub const CELL_SIZE: usize = 4;

/// Fixed-size payload stored after each key.  Must occupy a whole number
/// of cells.
pub trait TrieBlock: Default + Clone {
    /// Payload size in bytes, a multiple of [`CELL_SIZE`].
    const SIZE: usize;

    fn exchange<S: Stream>(stream: &mut S, value: &mut Self) -> Result<()>;
}

/// One table entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrieEntry<B> {
    pub key: String,
    pub value: B,
}

/// Upper-case every key and sort the table in descending key order — the
/// canonical sequence the encoder requires.
pub fn adjust_sequence<B>(entries: &mut [TrieEntry<B>]) {
    for entry in entries.iter_mut() {
        entry.key.make_ascii_uppercase();
    }
    entries.sort_by(|a, b| b.key.cmp(&a.key));
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[derive(Clone, Copy)]
struct Claim {
    /// Leading characters already represented by the ancestor.
    inherit: usize,
    /// Ancestor cell to patch once this entry's start cell is known.
    /// `usize::MAX` marks the table head, which has nothing to patch.
    parent_cell: usize,
}

/// Shared traversal behind `encode` and `compute_ripe_size`.  With a sink
/// it emits cells and performs the back-patches; without one it only
/// advances the virtual cell cursor.  Returns the total cell count.
fn run_encode<B: TrieBlock>(entries: &[TrieEntry<B>], mut sink: Option<&mut Writer>) -> Result<usize> {
    debug_assert_eq!(B::SIZE % CELL_SIZE, 0, "payload must fill whole cells");
    let mut work: Vec<Option<Claim>> = vec![None; entries.len()];
    if !entries.is_empty() {
        work[0] = Some(Claim {
            inherit: 0,
            parent_cell: usize::MAX,
        });
    }
    let mut cell_cursor = 0usize;
    for index in 0..entries.len() {
        let key = entries[index].key.as_bytes();
        if !key.is_ascii() {
            return Err(Error::InvalidString {
                offset: cell_cursor * CELL_SIZE,
            });
        }
        let inherit = work[index].map_or(0, |w| w.inherit);

        // Claim descendants: for each shared-prefix depth not yet taken,
        // the earliest later entry still without an ancestor inherits it.
        let mut depth_taken = vec![false; key.len() + 1];
        for later in index + 1..entries.len() {
            if work[later].is_some() {
                continue;
            }
            let common = common_prefix_len(key, entries[later].key.as_bytes());
            if !depth_taken[common] && common >= inherit {
                depth_taken[common] = true;
                work[later] = Some(Claim {
                    inherit: common,
                    parent_cell: cell_cursor + (common - inherit),
                });
            }
        }

        // Patch the ancestor now that this entry's start cell is known.
        if let Some(claim) = work[index].take() {
            if claim.parent_cell != usize::MAX {
                if let Some(writer) = sink.as_deref_mut() {
                    let pos = claim.parent_cell * CELL_SIZE;
                    let cell = writer.read_back_u32(pos);
                    let start = u32::try_from(cell_cursor).map_err(|_| Error::EncodingOverflow {
                        what: "trie cell index",
                        value: cell_cursor as u64,
                        bits: 24,
                    })?;
                    if start >= 1 << 24 {
                        return Err(Error::EncodingOverflow {
                            what: "trie cell index",
                            value: start as u64,
                            bits: 24,
                        });
                    }
                    writer.patch_u32(pos, cell | start << 8);
                }
            }
        }

        // Remaining characters, terminator, payload.
        if let Some(writer) = sink.as_deref_mut() {
            for &byte in &key[inherit..] {
                let mut cell = byte as u32;
                writer.exchange_u32(&mut cell)?;
            }
            let mut terminator = 0u32;
            writer.exchange_u32(&mut terminator)?;
            let mut value = entries[index].value.clone();
            B::exchange(writer, &mut value)?;
        }
        cell_cursor += key.len() - inherit + 1 + B::SIZE / CELL_SIZE;
    }
    Ok(cell_cursor)
}

/// Exact encoded size in bytes, without producing output.  Stays in
/// lock-step with [`encode`] by construction.
pub fn compute_ripe_size<B: TrieBlock>(entries: &[TrieEntry<B>]) -> Result<usize> {
    Ok(run_encode::<B>(entries, None)? * CELL_SIZE)
}

/// Encode a table previously normalized by [`adjust_sequence`].
pub fn encode<B: TrieBlock>(entries: &[TrieEntry<B>]) -> Result<Vec<u8>> {
    let size = compute_ripe_size::<B>(entries)?;
    let mut writer = Writer::with_capacity(size);
    run_encode::<B>(entries, Some(&mut writer))?;
    let bytes = writer.into_bytes();
    debug_assert_eq!(bytes.len(), size);
    Ok(bytes)
}

/// Decode a cell stream back into the ordered table.
pub fn decode<B: TrieBlock>(data: &[u8]) -> Result<Vec<TrieEntry<B>>> {
    let mut reader = Reader::new(data);
    let cell_count = data.len() / CELL_SIZE;
    let mut inherited: Vec<Option<String>> = vec![None; cell_count + 1];
    let mut entries = Vec::new();
    while !reader.is_exhausted() {
        let start_cell = reader.position() / CELL_SIZE;
        let mut key = match inherited
            .get_mut(start_cell)
            .and_then(|slot| slot.take())
        {
            Some(prefix) => prefix,
            None => String::new(),
        };
        loop {
            let mut cell = 0u32;
            reader.exchange_u32(&mut cell)?;
            let descendant = (cell >> 8) as usize;
            if descendant != 0 {
                if descendant >= inherited.len() {
                    return Err(Error::UnknownVariant {
                        context: "trie back-reference",
                        offset: reader.position() - CELL_SIZE,
                        tag: descendant as u32,
                    });
                }
                inherited[descendant] = Some(key.clone());
            }
            match (cell & 0xFF) as u8 {
                0 => break,
                byte if byte.is_ascii() => key.push(byte as char),
                _ => {
                    return Err(Error::InvalidString {
                        offset: reader.position() - CELL_SIZE,
                    })
                }
            }
        }
        let mut value = B::default();
        B::exchange(&mut reader, &mut value)?;
        entries.push(TrieEntry { key, value });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal payload: one cell holding a resource index.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    struct Index(u32);

    impl TrieBlock for Index {
        const SIZE: usize = 4;

        fn exchange<S: Stream>(stream: &mut S, value: &mut Self) -> Result<()> {
            stream.exchange_u32(&mut value.0)
        }
    }

    fn table(keys: &[&str]) -> Vec<TrieEntry<Index>> {
        let mut entries: Vec<TrieEntry<Index>> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| TrieEntry {
                key: (*k).to_owned(),
                value: Index(i as u32 + 100),
            })
            .collect();
        adjust_sequence(&mut entries);
        entries
    }

    #[test]
    fn adjust_sequence_uppercases_and_sorts_descending() {
        let entries = table(&["banana", "band", "bar"]);
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["BAR", "BAND", "BANANA"]);
    }

    #[test]
    fn single_entry_has_no_back_references() {
        let entries = table(&["solo"]);
        let bytes = encode(&entries).unwrap();
        // 4 characters + terminator + one payload cell.
        assert_eq!(bytes.len(), 6 * CELL_SIZE);
        for cell in bytes[..5 * CELL_SIZE].chunks(4) {
            let word = u32::from_le_bytes(cell.try_into().unwrap());
            assert_eq!(word >> 8, 0, "unexpected back-reference in {word:#x}");
        }
        assert_eq!(decode::<Index>(&bytes).unwrap(), entries);
    }

    #[test]
    fn shared_prefixes_roundtrip() {
        let entries = table(&["banana", "band", "bar"]);
        let bytes = encode(&entries).unwrap();
        assert_eq!(decode::<Index>(&bytes).unwrap(), entries);
    }

    #[test]
    fn prefix_sharing_actually_compresses() {
        let entries = table(&["banana", "band", "bar"]);
        let bytes = encode(&entries).unwrap();
        // Naive layout would need 3+4+6 chars; sharing "BA"/"BAN" drops 5.
        let chars = 3 + 4 + 6 - 2 - 3;
        assert_eq!(bytes.len(), (chars + 3 + 3) * CELL_SIZE);
    }

    #[test]
    fn ripe_size_matches_encoded_length() {
        for keys in [
            &["a"][..],
            &["alpha", "beta", "gamma", "delta"][..],
            &["same", "same_longer", "same_longest", "other"][..],
        ] {
            let entries = table(keys);
            let bytes = encode(&entries).unwrap();
            assert_eq!(compute_ripe_size::<Index>(&entries).unwrap(), bytes.len());
        }
    }

    #[test]
    fn empty_table_encodes_to_nothing() {
        let entries: Vec<TrieEntry<Index>> = Vec::new();
        let bytes = encode(&entries).unwrap();
        assert!(bytes.is_empty());
        assert!(decode::<Index>(&bytes).unwrap().is_empty());
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let entries = table(&["ab"]);
        let bytes = encode(&entries).unwrap();
        let err = decode::<Index>(&bytes[..bytes.len() - 2]);
        assert!(matches!(err, Err(Error::TruncatedInput { .. })));
    }
}
