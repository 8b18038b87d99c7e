//! Expression evaluation against a term source.
//!
//! Post-order fold of the optimized expression. Term leaves borrow the
//! source's sets; each internal node clones exactly one operand (via
//! `Cow::to_mut`) and folds the rest into it destructively. The returned
//! `Cow` may therefore alias source-owned data; callers clone before
//! mutating.

use std::borrow::Cow;

use super::{optimize, Expr, SetOps, TermSource};
use crate::error::Error;

/// Optimize and execute `expr` against `src`.
///
/// A term with no postings evaluates to the empty set. A `Complement`
/// that survives optimization cannot be executed directly and yields
/// [`Error::UnknownOperator`].
pub fn evaluate<'a, Src>(expr: &Expr<Src::Set>, src: &'a Src) -> Result<Cow<'a, Src::Set>, Error>
where
    Src: TermSource,
    Src::Set: PartialEq,
{
    eval_node(optimize(expr.clone()), src)
}

fn eval_node<'a, Src>(expr: Expr<Src::Set>, src: &'a Src) -> Result<Cow<'a, Src::Set>, Error>
where
    Src: TermSource,
    Src::Set: PartialEq,
{
    match expr {
        Expr::Empty => Ok(Cow::Owned(src.empty())),
        Expr::Universe => Ok(Cow::Owned(src.universe())),
        Expr::Set(s) => Ok(Cow::Owned(s)),
        Expr::Term(term) => Ok(match src.resolve(&term) {
            Some(set) => Cow::Borrowed(set),
            // no postings: the term matches nothing
            None => Cow::Owned(src.empty()),
        }),
        Expr::Intersect(children) => fold(children, src, Src::Set::intersect_with),
        Expr::Union(children) => fold(children, src, Src::Set::union_with),
        Expr::Subtract(minuend, subtrahends) => {
            let mut acc = eval_node(*minuend, src)?;
            for s in subtrahends {
                let rhs = eval_node(s, src)?;
                acc.to_mut().subtract(&rhs)?;
            }
            Ok(acc)
        }
        Expr::Complement(_) => Err(Error::UnknownOperator("complement")),
    }
}

fn fold<'a, Src>(
    children: Vec<Expr<Src::Set>>,
    src: &'a Src,
    op: fn(&mut Src::Set, &Src::Set) -> Result<(), Error>,
) -> Result<Cow<'a, Src::Set>, Error>
where
    Src: TermSource,
    Src::Set: PartialEq,
{
    let mut iter = children.into_iter();
    let first = iter.next().ok_or(Error::UnknownOperator("empty operator"))?;
    let mut acc = eval_node(first, src)?;
    for child in iter {
        let rhs = eval_node(child, src)?;
        op(acc.to_mut(), &rhs)?;
    }
    Ok(acc)
}
