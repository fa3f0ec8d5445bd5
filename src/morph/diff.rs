//! Correspondence between two primitive sequences.
//!
//! Alignment is a longest common subsequence under [`Primitive::same_shape`], computed with
//! Myers' O((N+M)·D) algorithm in its linear-space, middle-snake bisection form. Leftover
//! deletions are then re-paired with leftover insertions of the same shape (salvage pass),
//! so reordered content moves instead of cross-fading.

use crate::{
    foundation::core::Vec2,
    svg::{parse::ParsedGraphic, primitive::Primitive},
};

/// A matched pair: `from` indexes the old graphic's nodes, `to` the new graphic's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TransformedPair {
    /// Index into the old node list.
    pub from: usize,
    /// Index into the new node list.
    pub to: usize,
}

/// Partition of two node lists into matched, inserted and deleted indices.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CorrespondencePlan {
    /// Content size of the old graphic.
    pub from_size: Vec2,
    /// Content size of the new graphic.
    pub to_size: Vec2,
    /// Indices into the new graphic's nodes, ascending.
    pub inserted: Vec<usize>,
    /// Indices into the old graphic's nodes, ascending.
    pub deleted: Vec<usize>,
    /// Aligned pairs in sequence order, followed by salvaged pairs.
    pub transformed: Vec<TransformedPair>,
    /// How many of `transformed` came from the salvage pass.
    pub salvaged: usize,
}

impl CorrespondencePlan {
    /// True when nothing fades in or out.
    pub fn is_pure_transform(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty()
    }
}

/// Diff two parsed graphics.
#[tracing::instrument(skip_all, fields(from = from.nodes.len(), to = to.nodes.len()))]
pub fn diff(from: &ParsedGraphic, to: &ParsedGraphic) -> CorrespondencePlan {
    let mut plan = diff_nodes(&from.nodes, &to.nodes);
    plan.from_size = from.size;
    plan.to_size = to.size;
    tracing::debug!(
        transformed = plan.transformed.len(),
        salvaged = plan.salvaged,
        inserted = plan.inserted.len(),
        deleted = plan.deleted.len(),
        "correspondence plan"
    );
    plan
}

/// Diff two node lists; sizes in the returned plan are zero.
pub fn diff_nodes(from: &[Primitive], to: &[Primitive]) -> CorrespondencePlan {
    let pairs = lcs_pairs(from, to, |a, b| a.same_shape(b));

    let mut from_matched = vec![false; from.len()];
    let mut to_matched = vec![false; to.len()];
    for &(i, j) in &pairs {
        from_matched[i] = true;
        to_matched[j] = true;
    }

    let mut deleted: Vec<usize> = (0..from.len()).filter(|i| !from_matched[*i]).collect();
    let mut inserted: Vec<usize> = (0..to.len()).filter(|j| !to_matched[*j]).collect();
    let mut transformed: Vec<TransformedPair> = pairs
        .into_iter()
        .map(|(from, to)| TransformedPair { from, to })
        .collect();

    let salvaged = salvage(from, to, &mut deleted, &mut inserted, &mut transformed);

    CorrespondencePlan {
        from_size: Vec2::ZERO,
        to_size: Vec2::ZERO,
        inserted,
        deleted,
        transformed,
        salvaged,
    }
}

/// Pair each deletion with the first remaining insertion of the same shape.
fn salvage(
    from: &[Primitive],
    to: &[Primitive],
    deleted: &mut Vec<usize>,
    inserted: &mut Vec<usize>,
    transformed: &mut Vec<TransformedPair>,
) -> usize {
    let mut salvaged = 0;
    let mut still_deleted = Vec::with_capacity(deleted.len());
    for &d in deleted.iter() {
        match inserted.iter().position(|&i| from[d].same_shape(&to[i])) {
            Some(pos) => {
                let i = inserted.remove(pos);
                transformed.push(TransformedPair { from: d, to: i });
                salvaged += 1;
            }
            None => still_deleted.push(d),
        }
    }
    *deleted = still_deleted;
    salvaged
}

/// Index pairs of a longest common subsequence of `a` and `b` under `eq`, ascending in both.
///
/// Runs in O((N+M)·D) time and O(N+M) space, where D is the number of unmatched items.
pub fn lcs_pairs<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut bisect = Bisect::with_capacity(a.len() + b.len());
    conquer(a, b, (0, 0), &eq, &mut bisect, &mut out);
    out
}

fn common_prefix<T>(a: &[T], b: &[T], eq: &impl Fn(&T, &T) -> bool) -> usize {
    a.iter().zip(b).take_while(|&(x, y)| eq(x, y)).count()
}

fn common_suffix<T>(a: &[T], b: &[T], eq: &impl Fn(&T, &T) -> bool) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|&(x, y)| eq(x, y))
        .count()
}

/// Emit the LCS of `a` and `b` into `out`; `base` is the position of both slices in the
/// original sequences.
fn conquer<T>(
    a: &[T],
    b: &[T],
    base: (usize, usize),
    eq: &impl Fn(&T, &T) -> bool,
    bisect: &mut Bisect,
    out: &mut Vec<(usize, usize)>,
) {
    let prefix = common_prefix(a, b, eq);
    out.extend((0..prefix).map(|i| (base.0 + i, base.1 + i)));
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let base = (base.0 + prefix, base.1 + prefix);

    let suffix = common_suffix(a, b, eq);
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if !a.is_empty() && !b.is_empty() {
        // No split means nothing in the middle matches.
        if let Some((x, y)) = bisect.split(a, b, eq) {
            conquer(&a[..x], &b[..y], base, eq, bisect, out);
            conquer(&a[x..], &b[y..], (base.0 + x, base.1 + y), eq, bisect, out);
        }
    }

    let tail = (base.0 + a.len(), base.1 + b.len());
    out.extend((0..suffix).map(|s| (tail.0 + s, tail.1 + s)));
}

/// Furthest-reaching frontiers for the forward and reverse middle-snake searches.
/// Reused across recursion levels; each search only touches its own prefix.
struct Bisect {
    fwd: Vec<isize>,
    rev: Vec<isize>,
}

impl Bisect {
    fn with_capacity(total: usize) -> Self {
        Self {
            fwd: Vec::with_capacity(total + 4),
            rev: Vec::with_capacity(total + 4),
        }
    }

    /// A point on an optimal edit path that splits it into two strictly smaller problems.
    /// `a` and `b` must be non-empty without a common prefix or suffix.
    fn split<T>(
        &mut self,
        a: &[T],
        b: &[T],
        eq: &impl Fn(&T, &T) -> bool,
    ) -> Option<(usize, usize)> {
        let n = a.len() as isize;
        let m = b.len() as isize;
        let max_d = (n + m + 1) / 2;
        let offset = max_d;
        let len = (2 * max_d + 2) as usize;

        self.fwd.clear();
        self.fwd.resize(len, -1);
        self.rev.clear();
        self.rev.resize(len, -1);
        self.fwd[(offset + 1) as usize] = 0;
        self.rev[(offset + 1) as usize] = 0;

        let delta = n - m;
        // With an odd delta the paths meet during a forward step, otherwise during a reverse one.
        let front = delta % 2 != 0;
        let (mut fwd_start, mut fwd_end, mut rev_start, mut rev_end) = (0, 0, 0, 0);

        for d in 0..max_d {
            let mut k = -d + fwd_start;
            while k <= d - fwd_end {
                let i = (offset + k) as usize;
                let mut x = if k == -d || (k != d && self.fwd[i - 1] < self.fwd[i + 1]) {
                    self.fwd[i + 1]
                } else {
                    self.fwd[i - 1] + 1
                };
                let mut y = x - k;
                while x < n && y < m && eq(&a[x as usize], &b[y as usize]) {
                    x += 1;
                    y += 1;
                }
                self.fwd[i] = x;
                if x > n {
                    fwd_end += 2;
                } else if y > m {
                    fwd_start += 2;
                } else if front {
                    let j = offset + delta - k;
                    if j >= 0 && (j as usize) < len && self.rev[j as usize] != -1 {
                        let rev_x = n - self.rev[j as usize];
                        if x >= rev_x {
                            return Some((x as usize, y as usize));
                        }
                    }
                }
                k += 2;
            }

            let mut k = -d + rev_start;
            while k <= d - rev_end {
                let i = (offset + k) as usize;
                let mut x = if k == -d || (k != d && self.rev[i - 1] < self.rev[i + 1]) {
                    self.rev[i + 1]
                } else {
                    self.rev[i - 1] + 1
                };
                let mut y = x - k;
                while x < n
                    && y < m
                    && eq(&a[(n - x - 1) as usize], &b[(m - y - 1) as usize])
                {
                    x += 1;
                    y += 1;
                }
                self.rev[i] = x;
                if x > n {
                    rev_end += 2;
                } else if y > m {
                    rev_start += 2;
                } else if !front {
                    let j = offset + delta - k;
                    if j >= 0 && (j as usize) < len && self.fwd[j as usize] != -1 {
                        let fwd_x = self.fwd[j as usize];
                        let fwd_y = fwd_x - (delta - k);
                        if fwd_x >= n - x {
                            return Some((fwd_x as usize, fwd_y as usize));
                        }
                    }
                }
                k += 2;
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/diff.rs"]
mod tests;
