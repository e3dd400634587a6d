//! Myers' diff algorithm, adapted from
//! <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/myers.rs>
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! The linear space variant is used: the middle snake of the edit graph is
//! found by running the greedy algorithm from both corners at once, then both
//! halves are solved recursively.

use std::{
    fmt::Debug,
    ops::{Index, IndexMut, Range},
};

use super::raw_operation::{RawOperation, push_joined};

/// Diff `old` against `new`.
///
/// Adjacent operations of the same kind are joined, but deletions and
/// insertions of a changed region may still interleave.
pub fn myers_diff<T>(old: &[T], new: &[T]) -> Vec<RawOperation<T>>
where
    T: PartialEq + Clone + Debug,
{
    let max_d = (old.len() + new.len()).div_ceil(2) + 1;
    let mut vb = V::new(max_d);
    let mut vf = V::new(max_d);
    let mut result = Vec::new();

    conquer(
        old,
        0..old.len(),
        new,
        0..new.len(),
        &mut vf,
        &mut vb,
        &mut result,
    );

    result
}

fn common_prefix_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

fn common_suffix_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

fn to_isize(value: usize) -> isize { isize::try_from(value).unwrap_or(isize::MAX) }

/// `V` contains the endpoints of the furthest reaching `D-paths`. For each
/// recorded endpoint `(x,y)` in diagonal `k`, only `x` is retained because
/// `y` can be computed from `x - k`.
///
/// `k` can be negative, so `V` wraps a Vec plus an `offset` mapping the
/// smallest possible `k` to 0.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: to_isize(max_d),
            v: vec![0; 2 * max_d],
        }
    }

    fn len(&self) -> usize { self.v.len() }

    fn slot(&self, k: isize) -> usize {
        let idx = usize::try_from(k + self.offset).unwrap_or(0);
        idx.min(self.v.len().saturating_sub(1))
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, k: isize) -> &Self::Output { &self.v[self.slot(k)] }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut Self::Output {
        let slot = self.slot(k);
        &mut self.v[slot]
    }
}

/// Find the start of the middle snake of an optimal D-path between the two
/// ranges by simultaneously searching forward from the top-left corner and
/// backward from the bottom-right corner until the paths overlap.
fn find_middle_snake<T>(
    old: &[T],
    old_range: Range<usize>,
    new: &[T],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)>
where
    T: PartialEq,
{
    let n = old_range.len();
    let m = new_range.len();

    // By Lemma 1 in the paper, the optimal edit script length is odd or even as
    // `delta` is odd or even.
    let delta = to_isize(n) - to_isize(m);
    let odd = delta & 1 == 1;

    // The initial point at (0, -1)
    vf[1] = 0;
    // The initial point at (N, M+1)
    vb[1] = 0;

    let d_max = (n + m).div_ceil(2) + 1;
    debug_assert!(vf.len() >= d_max);
    debug_assert!(vb.len() >= d_max);

    for d in 0..to_isize(d_max) {
        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = usize::try_from(to_isize(x) - k).unwrap_or(0);

            let (x0, y0) = (x, y);
            if x < n && y < m {
                x += common_prefix_len(
                    &old[old_range.start + x..old_range.end],
                    &new[new_range.start + y..new_range.end],
                );
            }

            vf[k] = x;

            // Paths can only meet on the forward pass when delta is odd and
            // the reverse search has reached the reciprocal diagonal.
            if odd && (k - delta).abs() < d && vf[k] + vb[-(k - delta)] >= n {
                return Some((x0 + old_range.start, y0 + new_range.start));
            }
        }

        // Backward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = usize::try_from(to_isize(x) - k).unwrap_or(0);

            if x < n && y < m {
                let advance = common_suffix_len(
                    &old[old_range.start..old_range.start + n - x],
                    &new[new_range.start..new_range.start + m - y],
                );
                x += advance;
                y += advance;
            }

            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((n - x + old_range.start, m - y + new_range.start));
            }
        }
    }

    None
}

fn conquer<T>(
    old: &[T],
    mut old_range: Range<usize>,
    new: &[T],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    result: &mut Vec<RawOperation<T>>,
) where
    T: PartialEq + Clone + Debug,
{
    let prefix_len = common_prefix_len(&old[old_range.clone()], &new[new_range.clone()]);
    push_joined(
        result,
        RawOperation::Equal(old[old_range.start..old_range.start + prefix_len].to_vec()),
    );
    old_range.start += prefix_len;
    new_range.start += prefix_len;

    let suffix_len = common_suffix_len(&old[old_range.clone()], &new[new_range.clone()]);
    let suffix = old[old_range.end - suffix_len..old_range.end].to_vec();
    old_range.end -= suffix_len;
    new_range.end -= suffix_len;

    if old_range.is_empty() && new_range.is_empty() {
        // nothing left between the common prefix and suffix
    } else if new_range.is_empty() {
        push_joined(result, RawOperation::Delete(old[old_range].to_vec()));
    } else if old_range.is_empty() {
        push_joined(result, RawOperation::Insert(new[new_range].to_vec()));
    } else if let Some((x_start, y_start)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        conquer(
            old,
            old_range.start..x_start,
            new,
            new_range.start..y_start,
            vf,
            vb,
            result,
        );
        conquer(
            old,
            x_start..old_range.end,
            new,
            y_start..new_range.end,
            vf,
            vb,
            result,
        );
    } else {
        push_joined(result, RawOperation::Delete(old[old_range].to_vec()));
        push_joined(result, RawOperation::Insert(new[new_range].to_vec()));
    }

    push_joined(result, RawOperation::Equal(suffix));
}
