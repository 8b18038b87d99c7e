//! Algebraic rewriting of set expressions.
//!
//! [`optimize`] runs up to [`MAX_PASSES`] rounds of [`optimize_pass`],
//! stopping early at a fixed point. One pass applies, in order:
//!
//! 1. [`normalize`](super::normalize)
//! 2. complement laws: `!U = 0`, `!0 = U`, `x & !x = 0`, `x | !x = U`
//! 3. complement-to-subtraction: an intersection with both complemented
//!    and plain children becomes `Subtract(plain..., inners...)`
//! 4. one pattern-match step over the top node: involution, unary
//!    identity, flattening, identity/domination elements, absorption,
//!    De Morgan, and the subtraction rules
//!
//! De Morgan fires only when *every* child is a complement; mixed nodes
//! are covered by the complement-to-subtraction rewrite instead.

use super::{normalize, Expr};

/// Pass budget. Every rewrite shrinks or preserves the node count, so a
/// fixed point is normally reached in two or three passes.
pub const MAX_PASSES: usize = 5;

/// Rewrite `expr` into an equivalent but cheaper form.
///
/// Deterministic: equal inputs (up to normalization) produce equal outputs.
pub fn optimize<S: Clone + PartialEq>(expr: Expr<S>) -> Expr<S> {
    let mut current = expr;
    for _ in 0..MAX_PASSES {
        let next = optimize_pass(current.clone());
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// One full rewrite pass. Public so the pass-by-pass behavior is testable.
pub fn optimize_pass<S: Clone + PartialEq>(expr: Expr<S>) -> Expr<S> {
    let expr = normalize(expr);
    let expr = complement_laws(expr);
    let expr = complement_to_subtraction(expr);
    pattern_step(expr)
}

fn is_complement<S>(e: &Expr<S>) -> bool {
    matches!(e, Expr::Complement(_))
}

/// `x & !x = Empty`, `x | !x = Universe`, `!Universe = Empty`, `!Empty = Universe`.
fn complement_laws<S: Clone + PartialEq>(expr: Expr<S>) -> Expr<S> {
    fn contains_pair<S: PartialEq>(children: &[Expr<S>]) -> bool {
        children.iter().any(|c| match c {
            Expr::Complement(inner) => children.iter().any(|other| other == inner.as_ref()),
            _ => false,
        })
    }

    match expr {
        Expr::Complement(inner) if *inner == Expr::Universe => Expr::Empty,
        Expr::Complement(inner) if *inner == Expr::Empty => Expr::Universe,
        Expr::Intersect(children) if contains_pair(&children) => Expr::Empty,
        Expr::Union(children) if contains_pair(&children) => Expr::Universe,
        other => other,
    }
}

/// `Intersect(a..., !b...)` with at least one plain and one complemented
/// child becomes `Subtract(Intersect(a...), b...)`; the subtraction rules
/// in the pattern step then finish the job.
fn complement_to_subtraction<S>(expr: Expr<S>) -> Expr<S> {
    match expr {
        Expr::Intersect(children)
            if children.iter().any(is_complement) && !children.iter().all(is_complement) =>
        {
            let (complemented, plain): (Vec<_>, Vec<_>) =
                children.into_iter().partition(is_complement);
            let subtrahends = complemented
                .into_iter()
                .map(|c| match c {
                    Expr::Complement(inner) => *inner,
                    _ => unreachable!("partitioned on is_complement"),
                })
                .collect();
            Expr::Subtract(Box::new(Expr::Intersect(plain)), subtrahends)
        }
        other => other,
    }
}

/// Absorption over a two-child node: `op(dual(inner...), x)` collapses to
/// `x` when `x` appears among `inner`. `nested_children` projects the dual
/// operator's child list.
fn absorb<S, F>(children: &[Expr<S>], nested_children: F) -> Option<Expr<S>>
where
    S: Clone + PartialEq,
    F: Fn(&Expr<S>) -> Option<&[Expr<S>]>,
{
    if children.len() != 2 {
        return None;
    }
    for (nested, kept) in [(0, 1), (1, 0)] {
        if let Some(inner) = nested_children(&children[nested]) {
            if inner.contains(&children[kept]) {
                return Some(children[kept].clone());
            }
        }
    }
    None
}

fn strip_complements<S>(children: Vec<Expr<S>>) -> Vec<Expr<S>> {
    children
        .into_iter()
        .map(|c| match c {
            Expr::Complement(inner) => *inner,
            _ => unreachable!("caller checked all children are complements"),
        })
        .collect()
}

/// The single pattern-match step over the top node.
fn pattern_step<S: Clone + PartialEq>(expr: Expr<S>) -> Expr<S> {
    match expr {
        Expr::Complement(inner) => match *inner {
            // involution
            Expr::Complement(x) => optimize_pass(*x),
            x => Expr::complement(optimize_pass(x)),
        },

        Expr::Subtract(minuend, subtrahends) => optimize_subtract(*minuend, subtrahends),

        Expr::Union(mut children) => {
            // unary identity
            if children.len() == 1 {
                return optimize_pass(children.pop().expect("len checked"));
            }
            // flatten nested unions
            if children.iter().any(|c| matches!(c, Expr::Union(_))) {
                let mut flat = Vec::with_capacity(children.len());
                for c in children {
                    match c {
                        Expr::Union(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                return optimize_pass(Expr::Union(flat));
            }
            // identity element
            if children.contains(&Expr::Empty) {
                children.retain(|c| *c != Expr::Empty);
                return optimize_pass(Expr::Union(children));
            }
            // domination
            if children.contains(&Expr::Universe) {
                return Expr::Universe;
            }
            // absorption: Union(Intersect(inner...), x) with x in inner
            if let Some(kept) = absorb(&children, |c| match c {
                Expr::Intersect(inner) => Some(inner.as_slice()),
                _ => None,
            }) {
                return kept;
            }
            // De Morgan, all-complement case only
            if children.iter().all(is_complement) {
                return Expr::complement(Expr::Intersect(strip_complements(children)));
            }
            Expr::Union(children)
        }

        Expr::Intersect(mut children) => {
            if children.len() == 1 {
                return optimize_pass(children.pop().expect("len checked"));
            }
            if children.iter().any(|c| matches!(c, Expr::Intersect(_))) {
                let mut flat = Vec::with_capacity(children.len());
                for c in children {
                    match c {
                        Expr::Intersect(inner) => flat.extend(inner),
                        other => flat.push(other),
                    }
                }
                return optimize_pass(Expr::Intersect(flat));
            }
            if children.contains(&Expr::Universe) {
                children.retain(|c| *c != Expr::Universe);
                return optimize_pass(Expr::Intersect(children));
            }
            if children.contains(&Expr::Empty) {
                return Expr::Empty;
            }
            // absorption: Intersect(Union(inner...), x) with x in inner
            if let Some(kept) = absorb(&children, |c| match c {
                Expr::Union(inner) => Some(inner.as_slice()),
                _ => None,
            }) {
                return kept;
            }
            if children.iter().all(is_complement) {
                return Expr::complement(Expr::Union(strip_complements(children)));
            }
            Expr::Intersect(children)
        }

        leaf => leaf,
    }
}

/// Subtraction rules. The minuend is never commuted.
fn optimize_subtract<S: Clone + PartialEq>(
    minuend: Expr<S>,
    mut subtrahends: Vec<Expr<S>>,
) -> Expr<S> {
    subtrahends.retain(|s| *s != Expr::Empty);
    if subtrahends.is_empty() {
        return minuend;
    }
    if minuend == Expr::Empty {
        return Expr::Empty;
    }
    if let Expr::Intersect(children) = &minuend {
        if children.iter().any(|c| subtrahends.contains(c)) {
            return Expr::Empty;
        }
    }
    if subtrahends.contains(&minuend) || subtrahends.contains(&Expr::Universe) {
        return Expr::Empty;
    }
    let mut flat = Vec::with_capacity(subtrahends.len());
    for s in subtrahends {
        match s {
            Expr::Union(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    Expr::Subtract(
        Box::new(optimize_pass(minuend)),
        flat.into_iter().map(optimize_pass).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::Bitset;
    use crate::index::Term;

    type E = Expr<Bitset>;

    fn a() -> E {
        Expr::Term(Term::Position(0, 'A'))
    }
    fn b() -> E {
        Expr::Term(Term::Position(0, 'B'))
    }
    fn c() -> E {
        Expr::Term(Term::Position(0, 'C'))
    }
    fn d() -> E {
        Expr::Term(Term::Position(0, 'D'))
    }
    fn e() -> E {
        Expr::Term(Term::Position(0, 'E'))
    }
    fn f() -> E {
        Expr::Term(Term::Position(0, 'F'))
    }
    fn x() -> E {
        Expr::Term(Term::Length(1))
    }
    fn y() -> E {
        Expr::Term(Term::Length(2))
    }

    #[test]
    fn test_double_complement() {
        assert_eq!(optimize(E::complement(E::complement(x()))), x());
    }

    #[test]
    fn test_unary_intersect() {
        assert_eq!(optimize(E::intersect(vec![a()])), a());
    }

    #[test]
    fn test_union_identity_element() {
        assert_eq!(
            optimize(E::union(vec![a(), Expr::Empty, b()])),
            Expr::Union(vec![a(), b()])
        );
    }

    #[test]
    fn test_intersect_identity_element() {
        assert_eq!(
            optimize(E::intersect(vec![a(), Expr::Universe, b()])),
            Expr::Intersect(vec![a(), b()])
        );
    }

    #[test]
    fn test_union_domination() {
        assert_eq!(optimize(E::union(vec![a(), Expr::Universe, b()])), Expr::Universe);
    }

    #[test]
    fn test_intersect_domination() {
        assert_eq!(optimize(E::intersect(vec![a(), Expr::Empty, b()])), Expr::Empty);
    }

    #[test]
    fn test_intersect_with_own_complement() {
        assert_eq!(
            optimize(E::intersect(vec![a(), E::complement(a())])),
            Expr::Empty
        );
    }

    #[test]
    fn test_union_with_own_complement() {
        assert_eq!(
            optimize(E::union(vec![a(), E::complement(a())])),
            Expr::Universe
        );
    }

    #[test]
    fn test_de_morgan_all_complements() {
        assert_eq!(
            optimize(E::intersect(vec![E::complement(a()), E::complement(b())])),
            E::complement(Expr::Union(vec![a(), b()]))
        );
    }

    #[test]
    fn test_union_absorption() {
        assert_eq!(
            optimize(E::union(vec![a(), E::intersect(vec![b(), c(), a()])])),
            a()
        );
    }

    #[test]
    fn test_intersect_absorption() {
        assert_eq!(
            optimize(E::intersect(vec![a(), E::union(vec![b(), c(), a()])])),
            a()
        );
    }

    #[test]
    fn test_subtract_universe() {
        assert_eq!(optimize(E::subtract(x(), vec![Expr::Universe])), Expr::Empty);
    }

    #[test]
    fn test_subtract_empty_subtrahends_drop() {
        assert_eq!(optimize(E::subtract(x(), vec![Expr::Empty])), x());
    }

    #[test]
    fn test_subtract_self() {
        assert_eq!(optimize(E::subtract(x(), vec![y(), x()])), Expr::Empty);
    }

    #[test]
    fn test_subtract_empty_minuend() {
        assert_eq!(optimize(E::subtract(Expr::Empty, vec![x()])), Expr::Empty);
    }

    #[test]
    fn test_subtract_intersect_minuend_shares_child() {
        assert_eq!(
            optimize(E::subtract(E::intersect(vec![a(), b()]), vec![b()])),
            Expr::Empty
        );
    }

    #[test]
    fn test_complement_to_subtraction() {
        assert_eq!(
            optimize(E::intersect(vec![x(), E::complement(y())])),
            E::subtract(x(), vec![y()])
        );
    }

    #[test]
    fn test_complement_to_subtraction_nested() {
        let input = E::intersect(vec![
            a(),
            E::intersect(vec![b(), c()]),
            E::complement(E::union(vec![d(), e(), f()])),
        ]);
        assert_eq!(
            optimize(input),
            E::subtract(Expr::Intersect(vec![b(), c(), a()]), vec![d(), e(), f()])
        );
    }

    #[test]
    fn test_flatten_nested_unions() {
        assert_eq!(
            optimize(E::union(vec![E::union(vec![a(), b()]), c()])),
            Expr::Union(vec![a(), b(), c()])
        );
    }

    #[test]
    fn test_sentinel_complements() {
        assert_eq!(optimize(E::complement(Expr::Universe)), Expr::Empty);
        assert_eq!(optimize(E::complement(Expr::Empty)), Expr::Universe);
    }

    #[test]
    fn test_optimize_is_deterministic() {
        let input = || {
            E::union(vec![
                E::intersect(vec![a(), Expr::Universe, b()]),
                Expr::Empty,
                E::complement(E::complement(c())),
            ])
        };
        assert_eq!(optimize(input()), optimize(input()));
    }

    #[test]
    fn test_leaf_passthrough() {
        assert_eq!(optimize(a()), a());
        assert_eq!(optimize(E::Universe), Expr::Universe);
        assert_eq!(optimize(E::Empty), Expr::Empty);
    }
}
