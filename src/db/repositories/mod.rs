pub mod diet;
pub mod ingredient;
pub mod meal;
pub mod user;

use sea_orm::sea_query::{Alias, Expr, Func, IntoColumnRef, SimpleExpr};

/// Case-sensitive literal substring match on a text column.
///
/// SQLite's `LIKE` folds ASCII case and treats `%`/`_` as wildcards, so the
/// match goes through `instr` instead.
pub(crate) fn contains_literal<C>(column: C, pattern: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    Expr::expr(
        Func::cust(Alias::new("instr"))
            .arg(Expr::col(column))
            .arg(pattern),
    )
    .gt(0)
}
