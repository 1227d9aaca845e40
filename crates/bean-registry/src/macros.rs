//! Compile-time registration of component types.

/// Generate the registration metadata and the interception proxy of a
/// component type.
///
/// The type must implement the named capability trait. Every method listed
/// under `methods` must take `&self`; arguments must be owned
/// `DeserializeOwned` types and return values `Serialize`, so the generated
/// method handles can be invoked with JSON values. For methods returning
/// `Result<T, E>`, `E` must implement `std::error::Error + Send + Sync`; a
/// returned `Err` takes the rollback path of the interceptor. Other return
/// types always take the commit path unless the method panics.
///
/// The return type of a fallible method must be written as `Result<T, E>`,
/// `std::result::Result<T, E>` or `core::result::Result<T, E>` (with or
/// without a leading `::`). Any other return type that resolves to a
/// `Result`, such as `io::Result<T>` or a local alias, is rejected at compile
/// time rather than silently taking the commit path.
///
/// # Default methods
///
/// Every method of the capability trait must be listed, including methods
/// with a default body. An unlisted default method is not intercepted on the
/// proxy and runs the trait default instead of the component's override.
///
/// `markers` and `constructor` are optional. `constructor` takes any callable
/// returning `Self` or `Result<Self, E: Display>`; without it the type cannot
/// be instantiated by the registry.
///
/// # Example
///
/// ```ignore
/// use bean_registry::{component, Marker};
///
/// pub trait PaymentApi: Send + Sync {
///     fn charge(&self, amount: u64) -> Result<String, PaymentError>;
///     fn balance(&self) -> u64;
///     fn reset(&self);
/// }
///
/// #[derive(Default)]
/// pub struct PaymentService { /* ... */ }
///
/// impl PaymentApi for PaymentService { /* ... */ }
///
/// component! {
///     PaymentService as PaymentApi {
///         markers: [Marker::Transactional],
///         constructor: PaymentService::default,
///         methods {
///             fn charge(&self, amount: u64) -> Result<String, PaymentError>;
///             fn balance(&self) -> u64;
///             fn reset(&self);
///         }
///     }
/// }
/// ```
///
/// A `Result` alias does not compile:
///
/// ```compile_fail
/// use bean_registry::component;
///
/// type Outcome<T> = Result<T, String>;
///
/// pub trait Store: Send + Sync {
///     fn load(&self) -> Outcome<u64>;
/// }
///
/// pub struct Disk;
///
/// impl Store for Disk {
///     fn load(&self) -> Outcome<u64> {
///         Ok(1)
///     }
/// }
///
/// component! {
///     Disk as Store {
///         methods {
///             fn load(&self) -> Outcome<u64>;
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! component {
    // ---------------------------------------------------------------------
    // Return type normalization: path-qualified `Result` becomes `Result`
    // ---------------------------------------------------------------------
    (@normalize [$($next:tt)*] [$($out:tt)*]) => {
        $crate::component!{$($next)* [] $($out)*}
    };

    (@normalize $next:tt [$($out:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $(::)? std::result::Result<$ok:ty, $err:ty>;
        $($rest:tt)*
    ) => {
        $crate::component!{@normalize $next [$($out)*
            fn $name(&self $(, $arg: $ty)*) -> Result<$ok, $err>;
        ] $($rest)*}
    };

    (@normalize $next:tt [$($out:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $(::)? core::result::Result<$ok:ty, $err:ty>;
        $($rest:tt)*
    ) => {
        $crate::component!{@normalize $next [$($out)*
            fn $name(&self $(, $arg: $ty)*) -> Result<$ok, $err>;
        ] $($rest)*}
    };

    (@normalize $next:tt [$($out:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> Result<$ok:ty, $err:ty>;
        $($rest:tt)*
    ) => {
        $crate::component!{@normalize $next [$($out)*
            fn $name(&self $(, $arg: $ty)*) -> Result<$ok, $err>;
        ] $($rest)*}
    };

    (@normalize $next:tt [$($out:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty;
        $($rest:tt)*
    ) => {
        $crate::component!{@normalize $next [$($out)*
            fn $name(&self $(, $arg: $ty)*) -> $ret;
        ] $($rest)*}
    };

    (@normalize $next:tt [$($out:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*);
        $($rest:tt)*
    ) => {
        $crate::component!{@normalize $next [$($out)*
            fn $name(&self $(, $arg: $ty)*);
        ] $($rest)*}
    };

    // ---------------------------------------------------------------------
    // Method table
    // ---------------------------------------------------------------------
    (@descriptors $api:ident [$($done:expr,)*]) => {
        ::std::vec![$($done),*]
    };

    (@descriptors $api:ident [$($done:expr,)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> Result<$ok:ty, $err:ty>;
        $($rest:tt)*
    ) => {
        $crate::component!(@descriptors $api [$($done,)*
            $crate::domain::MethodDescriptor::new(
                stringify!($name),
                ::std::vec![$($crate::domain::Parameter::of::<$ty>(stringify!($arg))),*],
                $crate::domain::MethodHandle::new::<dyn $api, _>(stringify!($name), |api, args| {
                    $crate::component!(@check_arity $name args [$($arg)*]);
                    #[allow(unused_mut, unused_variables)]
                    let mut values = args.iter();
                    $(
                        let $arg: $ty = $crate::domain::method::decode_argument(
                            stringify!($name),
                            stringify!($arg),
                            values.next(),
                        )?;
                    )*
                    match $api::$name(api $(, $arg)*) {
                        ::std::result::Result::Ok(value) => {
                            $crate::domain::method::encode_return(stringify!($name), &value)
                        }
                        ::std::result::Result::Err(error) => ::std::result::Result::Err(
                            $crate::error::InvocationError::failed(stringify!($name), error),
                        ),
                    }
                }),
            ),
        ] $($rest)*)
    };

    (@descriptors $api:ident [$($done:expr,)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty;
        $($rest:tt)*
    ) => {
        $crate::component!(@descriptors $api [$($done,)*
            $crate::domain::MethodDescriptor::new(
                stringify!($name),
                ::std::vec![$($crate::domain::Parameter::of::<$ty>(stringify!($arg))),*],
                $crate::domain::MethodHandle::new::<dyn $api, _>(stringify!($name), |api, args| {
                    $crate::component!(@check_arity $name args [$($arg)*]);
                    #[allow(unused_mut, unused_variables)]
                    let mut values = args.iter();
                    $(
                        let $arg: $ty = $crate::domain::method::decode_argument(
                            stringify!($name),
                            stringify!($arg),
                            values.next(),
                        )?;
                    )*
                    let value: $ret = $api::$name(api $(, $arg)*);
                    $crate::domain::method::encode_return(stringify!($name), &value)
                }),
            ),
        ] $($rest)*)
    };

    (@descriptors $api:ident [$($done:expr,)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*);
        $($rest:tt)*
    ) => {
        $crate::component!(@descriptors $api [$($done,)*
            $crate::domain::MethodDescriptor::new(
                stringify!($name),
                ::std::vec![$($crate::domain::Parameter::of::<$ty>(stringify!($arg))),*],
                $crate::domain::MethodHandle::new::<dyn $api, _>(stringify!($name), |api, args| {
                    $crate::component!(@check_arity $name args [$($arg)*]);
                    #[allow(unused_mut, unused_variables)]
                    let mut values = args.iter();
                    $(
                        let $arg: $ty = $crate::domain::method::decode_argument(
                            stringify!($name),
                            stringify!($arg),
                            values.next(),
                        )?;
                    )*
                    $api::$name(api $(, $arg)*);
                    ::std::result::Result::Ok($crate::serde_json::Value::Null)
                }),
            ),
        ] $($rest)*)
    };

    (@check_arity $name:ident $args:ident [$($arg:ident)*]) => {
        $crate::domain::method::check_arity(
            stringify!($name),
            $args,
            <[&str]>::len(&[$(stringify!($arg)),*]),
        )?
    };

    // ---------------------------------------------------------------------
    // Proxy implementation of the capability trait
    // ---------------------------------------------------------------------
    (@proxy $target:ident $api:ident [$($done:tt)*]) => {
        impl $api for $crate::proxy::Proxy<$target> {
            $($done)*
        }
    };

    (@proxy $target:ident $api:ident [$($done:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> Result<$ok:ty, $err:ty>;
        $($rest:tt)*
    ) => {
        $crate::component!(@proxy $target $api [
            $($done)*
            fn $name(&self $(, $arg: $ty)*) -> ::std::result::Result<$ok, $err> {
                self.intercept(stringify!($name), move |target| {
                    <$target as $api>::$name(target $(, $arg)*)
                })
            }
        ] $($rest)*);
    };

    (@proxy $target:ident $api:ident [$($done:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty;
        $($rest:tt)*
    ) => {
        $crate::component!(@proxy $target $api [
            $($done)*
            fn $name(&self $(, $arg: $ty)*) -> $ret {
                $crate::proxy::assert_infallible_return::<$ret, _>();
                self.intercept_infallible(stringify!($name), move |target| {
                    <$target as $api>::$name(target $(, $arg)*)
                })
            }
        ] $($rest)*);
    };

    (@proxy $target:ident $api:ident [$($done:tt)*]
        fn $name:ident(&self $(, $arg:ident : $ty:ty)*);
        $($rest:tt)*
    ) => {
        $crate::component!(@proxy $target $api [
            $($done)*
            fn $name(&self $(, $arg: $ty)*) {
                self.intercept_infallible(stringify!($name), move |target| {
                    <$target as $api>::$name(target $(, $arg)*)
                })
            }
        ] $($rest)*);
    };

    // ---------------------------------------------------------------------
    // Entry point
    // ---------------------------------------------------------------------
    (
        $target:ident as $api:ident {
            $(markers: [$($marker:expr),* $(,)?],)?
            $(constructor: $ctor:expr,)?
            methods {
                $($methods:tt)*
            }
        }
    ) => {
        impl $crate::domain::Component for $target {
            type Api = dyn $api;

            fn simple_name() -> &'static str {
                stringify!($target)
            }

            $(
                fn markers() -> &'static [$crate::domain::Marker] {
                    const MARKERS: &[$crate::domain::Marker] = &[$($marker),*];
                    MARKERS
                }
            )?

            $(
                fn instantiate() -> ::std::result::Result<Self, $crate::error::InstantiationError> {
                    $crate::domain::IntoInstance::<Self>::into_instance(($ctor)())
                }
            )?

            fn methods() -> ::std::vec::Vec<$crate::domain::MethodDescriptor> {
                $crate::component!(@normalize [@descriptors $api] [] $($methods)*)
            }

            fn upcast(this: ::std::sync::Arc<Self>) -> ::std::sync::Arc<dyn $api> {
                this
            }

            fn upcast_proxy(
                proxy: ::std::sync::Arc<$crate::proxy::Proxy<Self>>,
            ) -> ::std::option::Option<::std::sync::Arc<dyn $api>> {
                ::std::option::Option::Some(proxy)
            }
        }

        $crate::component!(@normalize [@proxy $target $api] [] $($methods)*);
    };
}
