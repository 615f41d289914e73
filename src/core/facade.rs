//! Typed accessors over a [`ResolutionProxy`].
//!
//! [`constants!`](crate::constants) declares a struct whose methods map one
//! to one onto logical keys, together with the schema those keys imply:
//!
//! ```
//! use std::sync::Arc;
//! use proptable::constants;
//! use proptable::core::{ResolutionProxy, TypedPropertyTable};
//!
//! constants! {
//!     pub struct Labels {
//!         greeting: String = "Hello, {0}!";
//!         retries: i32 = 3;
//!         title: String;
//!     }
//! }
//!
//! let schema = Arc::new(Labels::schema());
//! let mut table = TypedPropertyTable::new(schema.clone());
//! table.load_str("title=Dashboard\nretries=5\n").unwrap();
//!
//! let labels = Labels::new(ResolutionProxy::new(schema, Arc::new(table), "en"));
//! assert_eq!(labels.title(&[]).unwrap(), Some("Dashboard".to_string()));
//! assert_eq!(labels.retries(&[]).unwrap(), Some(5));
//! assert_eq!(labels.greeting(&[&"Ann"]).unwrap(), Some("Hello, Ann!".to_string()));
//! ```

use std::collections::BTreeMap;

use super::error::ResolveError;
use super::resolve::ResolutionProxy;
use super::value::{DeclaredType, Value};

/// Rust types an accessor can return, with the schema type they declare.
pub trait FromValue: Sized {
    const DECLARED: DeclaredType;

    /// Convert a value of the matching variant; `None` for any other variant.
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for bool {
    const DECLARED: DeclaredType = DeclaredType::Boolean;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const DECLARED: DeclaredType = DeclaredType::Integer;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const DECLARED: DeclaredType = DeclaredType::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const DECLARED: DeclaredType = DeclaredType::Double;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Double(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for String {
    const DECLARED: DeclaredType = DeclaredType::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for Vec<String> {
    const DECLARED: DeclaredType = DeclaredType::StringArray;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringArray(items) => Some(items),
            _ => None,
        }
    }
}

impl FromValue for BTreeMap<String, String> {
    const DECLARED: DeclaredType = DeclaredType::StringMap;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringMap(map) => Some(map),
            _ => None,
        }
    }
}

/// Values accepted as the default of a `T` accessor in
/// [`constants!`](crate::constants).
///
/// Each accessor type accepts exactly one literal type, so an unsuffixed
/// float literal on an `f32` key is an `f32`.
pub trait IntoDefault<T> {
    fn into_default(self) -> Value;
}

impl IntoDefault<bool> for bool {
    fn into_default(self) -> Value {
        Value::Boolean(self)
    }
}

impl IntoDefault<i32> for i32 {
    fn into_default(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoDefault<f32> for f32 {
    fn into_default(self) -> Value {
        Value::Float(self)
    }
}

impl IntoDefault<f64> for f64 {
    fn into_default(self) -> Value {
        Value::Double(self)
    }
}

impl IntoDefault<String> for &str {
    fn into_default(self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoDefault<String> for String {
    fn into_default(self) -> Value {
        Value::String(self)
    }
}

impl<const N: usize> IntoDefault<Vec<String>> for [&str; N] {
    fn into_default(self) -> Value {
        Value::from(self)
    }
}

impl IntoDefault<Vec<String>> for Vec<String> {
    fn into_default(self) -> Value {
        Value::StringArray(self)
    }
}

impl IntoDefault<BTreeMap<String, String>> for BTreeMap<String, String> {
    fn into_default(self) -> Value {
        Value::StringMap(self)
    }
}

/// A ready-made value; the schema still checks it against the declared type.
impl<T: FromValue> IntoDefault<T> for Value {
    fn into_default(self) -> Value {
        self
    }
}

/// Resolve `key` through `proxy` and convert the result to `T`.
///
/// Used by the accessors [`constants!`](crate::constants) generates.
pub fn resolve_as<T: FromValue>(
    proxy: &ResolutionProxy,
    key: &str,
    args: &[&dyn std::fmt::Display],
) -> Result<Option<T>, ResolveError> {
    let Some(value) = proxy.resolve(key, args)? else {
        return Ok(None);
    };
    let found = value.kind();
    T::from_value(value)
        .map(Some)
        .ok_or_else(|| ResolveError::TypeMismatch {
            key: key.to_string(),
            expected: T::DECLARED,
            found,
        })
}

/// Declare a struct of typed accessors over a [`ResolutionProxy`].
///
/// Each `name: Type [= default];` line declares the logical key `name` with
/// the schema type `Type` implies (see [`FromValue`]) and an optional
/// default. The generated struct has:
///
/// - `schema()`: the [`Schema`](crate::core::Schema) implied by the
///   declarations,
/// - `new(proxy)`: wraps a proxy built over that schema,
/// - `name(&self, args)`: resolves the key and converts it to `Type`.
///
/// Defaults are taken as the accessor type (see [`IntoDefault`]).
#[macro_export]
macro_rules! constants {
    (@declare $schema:ident, $key:ident, $ty:ty) => {
        $schema.declare(
            stringify!($key),
            <$ty as $crate::core::FromValue>::DECLARED,
        )
    };

    (@declare $schema:ident, $key:ident, $ty:ty, $default:expr) => {
        match $schema.declare_with_default(
            stringify!($key),
            <$ty as $crate::core::FromValue>::DECLARED,
            <_ as $crate::core::IntoDefault<$ty>>::into_default($default),
        ) {
            ::std::result::Result::Ok(schema) => schema,
            ::std::result::Result::Err(err) => panic!("invalid default in constants!: {}", err),
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $key:ident : $ty:ty $(= $default:expr)? ; )*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            proxy: $crate::core::ResolutionProxy,
        }

        impl $name {
            /// Schema implied by the declared accessors.
            pub fn schema() -> $crate::core::Schema {
                let schema = $crate::core::Schema::new();
                $(
                    let schema = $crate::constants!(@declare schema, $key, $ty $(, $default)?);
                )*
                schema
            }

            pub fn new(proxy: $crate::core::ResolutionProxy) -> Self {
                Self { proxy }
            }

            pub fn proxy(&self) -> &$crate::core::ResolutionProxy {
                &self.proxy
            }

            $(
                $(#[$field_meta])*
                pub fn $key(
                    &self,
                    args: &[&dyn ::std::fmt::Display],
                ) -> ::std::result::Result<::std::option::Option<$ty>, $crate::core::ResolveError> {
                    $crate::core::resolve_as::<$ty>(&self.proxy, stringify!($key), args)
                }
            )*
        }
    };
}
