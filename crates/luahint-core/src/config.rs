/// Safety policy for the inline suggestion pass.
///
/// The defaults refuse rewrites that could change program behavior. The
/// permissive configuration reproduces the historical behavior of naive
/// inliners: argument text is duplicated or dropped verbatim, and payload
/// identifiers are left to collide with whatever is in scope at the call
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineOptions {
    /// Require arguments to be provably side-effect-free whenever the
    /// matching parameter is referenced more or fewer than exactly once in
    /// the payload. Duplicating `g()` evaluates it twice; dropping it
    /// evaluates it never — both observable when `g` has effects.
    pub require_pure_arguments: bool,

    /// Refuse the rewrite when a free identifier of the payload is bound to
    /// something else at the call site.
    pub check_capture: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            require_pure_arguments: true,
            check_capture: true,
        }
    }
}

impl InlineOptions {
    /// All safety checks off.
    pub fn permissive() -> Self {
        Self {
            require_pure_arguments: false,
            check_capture: false,
        }
    }
}
