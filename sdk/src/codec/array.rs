//! Array helpers shared by every model with a repeated field.
//!
//! Three shapes show up on the wire:
//!
//! - plain arrays, counted by a sibling field;
//! - sorted arrays, which must be strictly ascending by a key (mosaics by
//!   id, for instance) and are checked on both write and read;
//! - variable-size element lists (embedded transactions), where each element
//!   is padded to an alignment boundary and the list is bounded by a byte
//!   size rather than a count.

use super::{ensure_remaining, Codec, CodecError};
use ::bytes::{Buf, BufMut};

/// Rounds `size` up to the next multiple of `alignment`.
pub fn align_up(size: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return size;
    }
    size.div_ceil(alignment) * alignment
}

/// Zero bytes needed after an element of `size` bytes.
pub fn padding_size(size: usize, alignment: usize) -> usize {
    align_up(size, alignment) - size
}

/// Total serialized size of `elements`.
///
/// With `alignment > 0` every element is padded, except the last one when
/// `skip_last_padding` is set.
pub fn size<T: Codec>(elements: &[T], alignment: usize, skip_last_padding: bool) -> usize {
    let count = elements.len();
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            if skip_last_padding && index + 1 == count {
                element.size()
            } else {
                align_up(element.size(), alignment)
            }
        })
        .sum()
}

/// Writes every element in order, unpadded.
pub fn write_array<T: Codec>(writer: &mut impl BufMut, elements: &[T]) -> Result<(), CodecError> {
    elements.iter().try_for_each(|element| element.write(writer))
}

/// Writes every element after checking the keys are strictly ascending.
pub fn write_sorted_array<T, K, F>(
    writer: &mut impl BufMut,
    elements: &[T],
    name: &'static str,
    key: F,
) -> Result<(), CodecError>
where
    T: Codec,
    K: Ord,
    F: Fn(&T) -> K,
{
    ensure_sorted(elements, name, &key)?;
    write_array(writer, elements)
}

/// Reads `count` elements.
pub fn read_array<T: Codec>(reader: &mut impl Buf, count: usize) -> Result<Vec<T>, CodecError> {
    (0..count).map(|_| T::read(reader)).collect()
}

/// Reads `count` elements and rejects them unless strictly ascending by key.
pub fn read_sorted_array<T, K, F>(
    reader: &mut impl Buf,
    count: usize,
    name: &'static str,
    key: F,
) -> Result<Vec<T>, CodecError>
where
    T: Codec,
    K: Ord,
    F: Fn(&T) -> K,
{
    let elements = read_array(reader, count)?;
    ensure_sorted(&elements, name, &key)?;
    Ok(elements)
}

/// Writes each element followed by its alignment padding.
pub fn write_variable_size_elements<T: Codec>(
    writer: &mut impl BufMut,
    elements: &[T],
    alignment: usize,
    skip_last_padding: bool,
) -> Result<(), CodecError> {
    let count = elements.len();
    for (index, element) in elements.iter().enumerate() {
        element.write(writer)?;
        if !(skip_last_padding && index + 1 == count) {
            writer.put_bytes(0, padding_size(element.size(), alignment));
        }
    }
    Ok(())
}

/// Reads padded elements until exactly `total_size` bytes are consumed.
pub fn read_variable_size_elements<T: Codec>(
    reader: &mut impl Buf,
    total_size: usize,
    alignment: usize,
    skip_last_padding: bool,
) -> Result<Vec<T>, CodecError> {
    ensure_remaining(reader, total_size)?;
    let mut view = reader.copy_to_bytes(total_size);
    let mut elements = Vec::new();
    while view.has_remaining() {
        let element = T::read(&mut view)?;
        let element_size = element.size();
        let padding = if skip_last_padding && !view.has_remaining() {
            0
        } else {
            padding_size(element_size, alignment)
        };
        ensure_remaining(&view, padding)?;
        view.advance(padding);
        elements.push(element);
    }
    Ok(elements)
}

fn ensure_sorted<T, K, F>(elements: &[T], name: &'static str, key: &F) -> Result<(), CodecError>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let ascending = elements.windows(2).all(|pair| key(&pair[0]) < key(&pair[1]));
    if ascending {
        Ok(())
    } else {
        Err(CodecError::UnsortedArray { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_boundary() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(123, 8), 128);
        assert_eq!(align_up(5, 0), 5);
    }

    #[test]
    fn size_honours_skip_last_padding() {
        let elements = vec![1u8, 2u8, 3u8];
        assert_eq!(size(&elements, 0, false), 3);
        assert_eq!(size(&elements, 4, false), 12);
        assert_eq!(size(&elements, 4, true), 9);
    }

    #[test]
    fn sorted_write_rejects_out_of_order_keys() {
        let mut buffer = Vec::new();
        assert!(write_sorted_array(&mut buffer, &[1u64, 5, 9], "ids", |v| *v).is_ok());

        let mut buffer = Vec::new();
        assert_eq!(
            write_sorted_array(&mut buffer, &[5u64, 1], "ids", |v| *v).unwrap_err(),
            CodecError::UnsortedArray { name: "ids" }
        );
    }

    #[test]
    fn sorted_write_rejects_duplicates() {
        let mut buffer = Vec::new();
        assert!(write_sorted_array(&mut buffer, &[3u16, 3], "ids", |v| *v).is_err());
    }

    #[test]
    fn sorted_read_rejects_out_of_order_keys() {
        let mut reader: &[u8] = &[2, 1];
        assert!(read_sorted_array::<u8, _, _>(&mut reader, 2, "ids", |v| *v).is_err());

        let mut reader: &[u8] = &[1, 2];
        assert_eq!(read_sorted_array::<u8, _, _>(&mut reader, 2, "ids", |v| *v).unwrap(), vec![1, 2]);
    }

    #[test]
    fn variable_size_elements_are_padded() {
        let elements = vec![0x0102u16, 0x0304u16];
        let mut buffer = Vec::new();
        write_variable_size_elements(&mut buffer, &elements, 4, false).unwrap();
        assert_eq!(buffer, vec![2, 1, 0, 0, 4, 3, 0, 0]);

        let mut reader: &[u8] = &buffer;
        let decoded: Vec<u16> = read_variable_size_elements(&mut reader, 8, 4, false).unwrap();
        assert_eq!(decoded, elements);
        assert!(reader.is_empty());
    }

    #[test]
    fn variable_size_elements_can_skip_last_padding() {
        let elements = vec![0x0102u16, 0x0304u16];
        let mut buffer = Vec::new();
        write_variable_size_elements(&mut buffer, &elements, 4, true).unwrap();
        assert_eq!(buffer, vec![2, 1, 0, 0, 4, 3]);

        let mut reader: &[u8] = &buffer;
        let decoded: Vec<u16> = read_variable_size_elements(&mut reader, 6, 4, true).unwrap();
        assert_eq!(decoded, elements);
    }

    #[test]
    fn variable_size_elements_detect_truncated_padding() {
        let mut reader: &[u8] = &[2, 1, 0];
        assert!(read_variable_size_elements::<u16>(&mut reader, 3, 4, false).is_err());
    }
}
