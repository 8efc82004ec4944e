/// Generates one `is_*` predicate per variant of a lifecycle union.
///
/// Each predicate compares the union's [`Lifecycle::tag`](crate::Lifecycle::tag)
/// against a tag variant, so the predicates never look at the payload.
///
/// ```ignore
/// variant_predicates!(Field[T] => FieldTag {
///     Editable => is_editable,
///     ReadOnly => is_read_only,
/// });
/// ```
macro_rules! variant_predicates {
    ($union:ident [$($generic:ident),*] => $tag:ident { $($variant:ident => $predicate:ident),+ $(,)? }) => {
        impl<$($generic),*> $union<$($generic),*> {
            $(
                #[doc = concat!("Returns true if this value is in the `", stringify!($variant), "` state.")]
                pub fn $predicate(&self) -> bool {
                    matches!($crate::Lifecycle::tag(self), $tag::$variant)
                }
            )+
        }
    };
}
