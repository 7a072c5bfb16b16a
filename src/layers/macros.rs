//! Macros to reduce boilerplate in layer implementations

/// Implements the `LayerTrait` accessors that read a `LayerProperties` field.
///
/// Usage:
/// ```ignore
/// impl LayerTrait for MyLayer {
///     pinmap::impl_layer_trait!(properties);
///     // options() and any overrides follow
/// }
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($properties_field:ident) => {
        fn id(&self) -> &str {
            &self.$properties_field.id
        }

        fn name(&self) -> &str {
            &self.$properties_field.name
        }
    };
}
