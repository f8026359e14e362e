//! Stack growth for recursive tree algorithms.
//!
//! Deep copies and structural comparisons of syntax trees recurse once per
//! nesting level. Long `elseif` chains or generated expressions can nest
//! thousands of levels deep, so every such recursion goes through
//! [`ensure_sufficient_stack`], which switches to a freshly allocated stack
//! segment when the current one runs low.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn depth(ast: &Ast, id: NodeId) -> usize {
///     ensure_sufficient_stack(|| {
///         1 + ast.children(id).iter().map(|&c| depth(ast, c)).max().unwrap_or(0)
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A linked chain as deep as a pathological `elseif` ladder.
    enum Chain {
        Link(Box<Chain>),
        End,
    }

    fn build(depth: usize) -> Chain {
        let mut chain = Chain::End;
        for _ in 0..depth {
            chain = Chain::Link(Box::new(chain));
        }
        chain
    }

    fn length(chain: &Chain) -> usize {
        ensure_sufficient_stack(|| match chain {
            Chain::Link(next) => 1 + length(next),
            Chain::End => 0,
        })
    }

    #[test]
    fn shallow_chain() {
        assert_eq!(length(&build(16)), 16);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let chain = build(200_000);
        assert_eq!(length(&chain), 200_000);
        // Drop iteratively; the derived drop glue would recurse.
        let mut cur = chain;
        while let Chain::Link(next) = cur {
            cur = *next;
        }
    }

    #[test]
    fn passes_result_through() {
        let out: Result<u8, &str> = ensure_sufficient_stack(|| Err("boom"));
        assert_eq!(out, Err("boom"));
    }
}
