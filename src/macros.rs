//! macros for declaring typed error variants

/// Declare newtype error variants backed by [`TemplatedError`](crate::TemplatedError).
///
/// Each declaration names the struct, an optional parent variant, and the
/// [`Variant`](crate::Variant) builder calls to apply (`template`,
/// `formatter`). Anything left out is inherited from the parent.
///
/// # Examples
///
/// ```
/// use exception_template::{templated_error, UppercaseFormatter};
///
/// templated_error! {
///     /// Lookup failures
///     pub struct NotFound {
///         template = "no {kind} named '{name}'",
///     }
///
///     /// Same message, shouted
///     pub struct LoudNotFound: NotFound {
///         formatter = &UppercaseFormatter,
///     }
/// }
///
/// let err = LoudNotFound::new([("kind", "user"), ("name", "ryan")]).unwrap();
/// assert_eq!(err.to_string(), "NO USER NAMED 'RYAN'");
/// assert_eq!(err.get("name").unwrap(), "ryan");
/// assert!(err.is_a("NotFound"));
///
/// assert!(NotFound::new([("kind", "user")]).is_err());
/// ```
#[macro_export]
macro_rules! templated_error {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(: $parent:ty)? {
            $($key:ident = $value:expr),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name($crate::TemplatedError);

        #[allow(dead_code)]
        impl $name {
            /// Descriptor for this variant
            pub const VARIANT: &'static $crate::Variant = &$crate::Variant::new(stringify!($name))
                $(.extends(<$parent>::VARIANT))?
                $(.$key($value))*;

            /// Validate `fields` against the template and build the error
            pub fn new<I, K, S>(fields: I) -> ::std::result::Result<Self, $crate::ArgumentError>
            where
                I: ::std::iter::IntoIterator<Item = (K, S)>,
                K: ::std::convert::Into<::std::string::String>,
                S: ::std::convert::Into<::std::string::String>,
            {
                $crate::TemplatedError::new(Self::VARIANT, fields).map(Self)
            }

            /// Construction step with access to this instance's template
            pub fn builder() -> $crate::Builder {
                $crate::TemplatedError::builder(Self::VARIANT)
            }

            /// Wrap a value built from [`Self::builder`]
            pub fn from_builder(
                builder: $crate::Builder,
            ) -> ::std::result::Result<Self, $crate::ArgumentError> {
                builder.build().map(Self)
            }

            pub fn into_inner(self) -> $crate::TemplatedError {
                self.0
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::TemplatedError;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::error::Error for $name {}

        impl ::std::convert::From<$name> for $crate::TemplatedError {
            fn from(err: $name) -> Self {
                err.0
            }
        }
    )*};
}
