//! Values that can be accumulated by [`LruCache::add`](crate::LruCache::add).
//!
//! `add` reads the stored value, combines it with a delta and writes the
//! result back. The combination is defined by [`Accumulate`]. Integers use
//! checked arithmetic, floats plain addition, and the dynamic [`Value`] type
//! only combines payloads of the same kind. Nothing is coerced.

extern crate alloc;

use crate::error::{CacheError, Result};
use alloc::string::String;
use alloc::vec::Vec;

/// Combines a stored value with a delta.
///
/// # Examples
///
/// ```
/// use forgetful::{Accumulate, CacheError, Value};
///
/// assert_eq!(5u32.accumulate(&3), Ok(8));
/// assert_eq!(
///     u8::MAX.accumulate(&1),
///     Err(CacheError::Overflow { kind: "u8" })
/// );
///
/// let greeting = Value::from("hello, ").accumulate(&Value::from("world"));
/// assert_eq!(greeting, Ok(Value::from("hello, world")));
/// assert!(Value::Int(1).accumulate(&Value::Float(0.5)).is_err());
/// ```
pub trait Accumulate: Sized {
    /// Returns `self + delta`, or an error if the two cannot be combined.
    fn accumulate(&self, delta: &Self) -> Result<Self>;
}

macro_rules! impl_accumulate_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Accumulate for $t {
                #[inline]
                fn accumulate(&self, delta: &Self) -> Result<Self> {
                    self.checked_add(*delta).ok_or(CacheError::Overflow {
                        kind: stringify!($t),
                    })
                }
            }
        )*
    };
}

impl_accumulate_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_accumulate_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Accumulate for $t {
                #[inline]
                fn accumulate(&self, delta: &Self) -> Result<Self> {
                    Ok(*self + *delta)
                }
            }
        )*
    };
}

impl_accumulate_float!(f32, f64);

/// A dynamically typed cache payload.
///
/// Useful when one cache holds values of mixed kinds, as a cache fronted by
/// an RPC endpoint does. `Nil` is a real stored value: a lookup returning
/// `Some(&Value::Nil)` is distinct from a miss.
///
/// The default value is `Int(0)`, which makes [`LruCache::add`] start
/// counters from zero.
///
/// [`LruCache::add`]: crate::LruCache::add
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicit "no value" payload.
    Nil,
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double precision float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Int(0)
    }
}

impl Value {
    /// Short name of the payload kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for `Nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl Accumulate for Value {
    fn accumulate(&self, delta: &Self) -> Result<Self> {
        match (self, delta) {
            (Value::Int(a), Value::Int(b)) => a.accumulate(b).map(Value::Int),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::Str(joined))
            }
            (Value::Bytes(a), Value::Bytes(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend_from_slice(a);
                joined.extend_from_slice(b);
                Ok(Value::Bytes(joined))
            }
            (stored, delta) => Err(CacheError::IncompatibleTypes {
                stored: stored.kind(),
                delta: delta.kind(),
            }),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}
