//! Computational-basis indexing for qubit registers.
//!
//! Basis index `i` has bit `q` (least significant first) equal to the value
//! of qubit `q`. Ket labels are written with qubit 0 leftmost, so `|10⟩` on
//! two qubits is index 1.

use num_complex::Complex64;

/// `2^n`, or `None` when a vector of `2^n` amplitudes cannot be addressed.
///
/// # Example
/// ```
/// use qgoal::index::checked_dim;
/// assert_eq!(checked_dim(3), Some(8));
/// assert_eq!(checked_dim(64), None);
/// ```
pub fn checked_dim(n: usize) -> Option<usize> {
    let dim = 1usize.checked_shl(u32::try_from(n).ok()?)?;
    let bytes = dim.checked_mul(std::mem::size_of::<Complex64>())?;
    (bytes <= isize::MAX as usize).then_some(dim)
}

/// Value (0 or 1) of qubit `q` in basis index `index`.
#[inline]
pub fn bit(index: usize, q: usize) -> usize {
    (index >> q) & 1
}

/// Basis index with qubit `q` flipped.
#[inline]
pub fn flip(index: usize, q: usize) -> usize {
    index ^ (1 << q)
}

/// Mask with a 1 at every listed qubit.
pub fn mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |m, &q| m | (1 << q))
}

/// Compose a basis index from per-qubit bits (bits[q] is qubit q).
///
/// # Example
/// ```
/// use qgoal::index::basis_index;
/// assert_eq!(basis_index(&[1, 0]), 1);
/// assert_eq!(basis_index(&[0, 1, 1]), 6);
/// ```
pub fn basis_index(bits: &[u8]) -> usize {
    bits.iter()
        .enumerate()
        .fold(0, |acc, (q, &b)| acc | ((b as usize & 1) << q))
}

/// Decompose a basis index into `n` per-qubit bits.
///
/// # Example
/// ```
/// use qgoal::index::basis_bits;
/// assert_eq!(basis_bits(6, 3), vec![0, 1, 1]);
/// ```
pub fn basis_bits(index: usize, n: usize) -> Vec<u8> {
    (0..n).map(|q| bit(index, q) as u8).collect()
}

/// Ket label of a basis index, qubit 0 leftmost.
///
/// # Example
/// ```
/// use qgoal::index::ket_label;
/// assert_eq!(ket_label(1, 2), "|10⟩");
/// assert_eq!(ket_label(6, 3), "|011⟩");
/// ```
pub fn ket_label(index: usize, n: usize) -> String {
    let bits: String = (0..n)
        .map(|q| if bit(index, q) == 1 { '1' } else { '0' })
        .collect();
    format!("|{}⟩", bits)
}

/// Iterate the `2^(n-1)` index pairs `(i0, i1)` that differ only in qubit `q`,
/// with qubit `q` equal to 0 in `i0` and 1 in `i1`. Each pair is yielded once.
///
/// # Example
/// ```
/// use qgoal::index::iter_pairs;
/// let pairs: Vec<_> = iter_pairs(2, 1).collect();
/// assert_eq!(pairs, vec![(0, 2), (1, 3)]);
/// ```
pub fn iter_pairs(n: usize, q: usize) -> impl Iterator<Item = (usize, usize)> {
    debug_assert!(q < n, "qubit {} out of range for {} qubits", q, n);
    let low = (1usize << q) - 1;
    let half = 1usize << (n - 1);
    (0..half).map(move |k| {
        // Insert a 0 bit at position q.
        let i0 = ((k & !low) << 1) | (k & low);
        (i0, i0 | (1 << q))
    })
}

/// Iterate the basis indices where every qubit in `fixed_mask` is 1.
pub fn iter_basis_fixed(n: usize, fixed_mask: usize) -> impl Iterator<Item = usize> {
    (0..1usize << n).filter(move |&i| i & fixed_mask == fixed_mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_and_flip() {
        // 0b101: qubit 0 = 1, qubit 1 = 0, qubit 2 = 1
        assert_eq!(bit(5, 0), 1);
        assert_eq!(bit(5, 1), 0);
        assert_eq!(bit(5, 2), 1);
        assert_eq!(flip(5, 1), 7);
        assert_eq!(flip(5, 0), 4);
    }

    #[test]
    fn test_roundtrip_bits() {
        let n = 4;
        for i in 0..1 << n {
            assert_eq!(basis_index(&basis_bits(i, n)), i);
        }
    }

    #[test]
    fn test_iter_pairs_covers_every_index_once() {
        for n in 1..=5 {
            for q in 0..n {
                let mut seen = vec![0u8; 1 << n];
                for (i0, i1) in iter_pairs(n, q) {
                    assert_eq!(bit(i0, q), 0);
                    assert_eq!(i1, flip(i0, q));
                    seen[i0] += 1;
                    seen[i1] += 1;
                }
                assert!(seen.iter().all(|&c| c == 1), "n={} q={}", n, q);
            }
        }
    }

    #[test]
    fn test_iter_pairs_single_qubit() {
        let pairs: Vec<_> = iter_pairs(1, 0).collect();
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_iter_basis_fixed() {
        // qubits 0 and 2 set on 3 qubits: 0b101, 0b111
        let indices: Vec<_> = iter_basis_fixed(3, mask(&[0, 2])).collect();
        assert_eq!(indices, vec![5, 7]);
        let all: Vec<_> = iter_basis_fixed(2, 0).collect();
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_checked_dim_limits() {
        assert_eq!(checked_dim(0), Some(1));
        assert_eq!(checked_dim(20), Some(1 << 20));
        assert_eq!(checked_dim(63), None);
        assert_eq!(checked_dim(usize::MAX), None);
    }

    #[test]
    fn test_ket_label_single() {
        assert_eq!(ket_label(0, 1), "|0⟩");
        assert_eq!(ket_label(1, 1), "|1⟩");
    }
}
