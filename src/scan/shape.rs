//! Shape descriptions for the struct scanner
//!
//! A target type registers its fields once through [`Scannable::describe`]:
//! each binding names the field, the wire column (or element property) it is
//! read from and an accessor returning a mutable reference to the field.
//! The builder erases the field type into a setter so a shape can be stored
//! and shared without knowing its field types.

use std::sync::Arc;

use crate::{errors::DecodeError, wire::Value};

/// A type that rows (or vertex / edge list elements) can be scanned into.
pub trait Scannable: Default + 'static {
    /// Key of the cached shape. Two types must not share a name.
    fn shape_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    fn describe(shape: &mut ShapeBuilder<Self>);
}

/// Primitive kind of a bound field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Unsigned,
    Char,
    List,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int8 => "int8",
            FieldKind::Int16 => "int16",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Float32 => "float32",
            FieldKind::Float64 => "float64",
            FieldKind::String => "string",
            FieldKind::Unsigned => "unsigned",
            FieldKind::Char => "char",
            FieldKind::List => "list",
        }
    }
}

/// Why a wire value could not be stored in a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarError {
    Mismatch {
        expected: &'static str,
        actual: &'static str,
    },
    Overflow(i64),
    Unsupported,
}

/// A field type the scanner can fill from a single wire value.
pub trait ScanScalar: Sized + 'static {
    const KIND: FieldKind;

    fn from_wire(value: &Value) -> Result<Self, ScalarError>;
}

impl ScanScalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_wire(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(ScalarError::Mismatch {
                expected: "bool",
                actual: other.type_name(),
            }),
        }
    }
}

macro_rules! signed_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScanScalar for $ty {
                const KIND: FieldKind = FieldKind::$kind;

                fn from_wire(value: &Value) -> Result<Self, ScalarError> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i).map_err(|_| ScalarError::Overflow(*i)),
                        other => Err(ScalarError::Mismatch {
                            expected: "int",
                            actual: other.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

signed_scalar!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);

impl ScanScalar for f64 {
    const KIND: FieldKind = FieldKind::Float64;

    fn from_wire(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::Float(f) => Ok(*f),
            other => Err(ScalarError::Mismatch {
                expected: "float",
                actual: other.type_name(),
            }),
        }
    }
}

impl ScanScalar for f32 {
    const KIND: FieldKind = FieldKind::Float32;

    fn from_wire(value: &Value) -> Result<Self, ScalarError> {
        f64::from_wire(value).map(|f| f as f32)
    }
}

impl ScanScalar for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_wire(value: &Value) -> Result<Self, ScalarError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ScalarError::Mismatch {
                expected: "string",
                actual: other.type_name(),
            }),
        }
    }
}

macro_rules! unsupported_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScanScalar for $ty {
                const KIND: FieldKind = FieldKind::$kind;

                fn from_wire(_: &Value) -> Result<Self, ScalarError> {
                    Err(ScalarError::Unsupported)
                }
            }
        )*
    };
}

// Bindable so shapes can name them, but the wire has no value kind for them.
unsupported_scalar!(u8 => Unsigned, u16 => Unsigned, u32 => Unsigned, u64 => Unsigned, char => Char);

type ScalarSetter<T> = Arc<dyn Fn(&mut T, &Value) -> Result<(), ScalarError> + Send + Sync>;
type ListSetter<T> = Arc<dyn Fn(&mut T, &[Value], &FieldBinding<T>) -> Result<(), DecodeError> + Send + Sync>;

pub(crate) enum Setter<T> {
    Scalar(ScalarSetter<T>),
    List(ListSetter<T>),
}

pub(crate) struct FieldBinding<T> {
    pub(crate) shape: &'static str,
    pub(crate) field: &'static str,
    pub(crate) column: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) setter: Setter<T>,
}

impl<T> FieldBinding<T> {
    /// Store one wire value into a scalar field of `target`.
    ///
    /// Null and empty values leave the field untouched.
    pub(crate) fn set_scalar(&self, target: &mut T, value: &Value) -> Result<(), DecodeError> {
        if matches!(value, Value::Null(_) | Value::Empty) {
            return Ok(());
        }
        let setter = match &self.setter {
            Setter::Scalar(setter) => setter,
            Setter::List(_) => return Err(self.unsupported()),
        };
        setter(target, value).map_err(|err| match err {
            ScalarError::Mismatch { expected, actual } => DecodeError::ScanTypeMismatch {
                shape: self.shape,
                field: self.field,
                expected,
                actual,
            },
            ScalarError::Overflow(value) => DecodeError::IntegerOverflow {
                shape: self.shape,
                field: self.field,
                value,
            },
            ScalarError::Unsupported => self.unsupported(),
        })
    }

    pub(crate) fn unsupported(&self) -> DecodeError {
        DecodeError::UnsupportedFieldType {
            shape: self.shape,
            field: self.field,
            kind: self.kind.name(),
        }
    }
}

/// Collects the field bindings of one shape.
pub struct ShapeBuilder<T> {
    shape: &'static str,
    fields: Vec<FieldBinding<T>>,
}

impl<T: Scannable> ShapeBuilder<T> {
    pub(crate) fn new() -> Self {
        ShapeBuilder {
            shape: T::shape_name(),
            fields: Vec::new(),
        }
    }

    /// Bind a scalar field to a column.
    pub fn field<F: ScanScalar>(
        &mut self,
        field: &'static str,
        column: &'static str,
        access: fn(&mut T) -> &mut F,
    ) -> &mut Self {
        let setter: ScalarSetter<T> = Arc::new(move |target: &mut T, value: &Value| -> Result<(), ScalarError> {
            *access(target) = F::from_wire(value)?;
            Ok(())
        });
        self.fields.push(FieldBinding {
            shape: self.shape,
            field,
            column,
            kind: F::KIND,
            setter: Setter::Scalar(setter),
        });
        self
    }

    /// Bind a list of vertex- or edge-shaped elements to a column.
    pub fn list<U: Scannable>(
        &mut self,
        field: &'static str,
        column: &'static str,
        access: fn(&mut T) -> &mut Vec<U>,
    ) -> &mut Self {
        let setter: ListSetter<T> = Arc::new(
            move |target: &mut T, items: &[Value], binding: &FieldBinding<T>| -> Result<(), DecodeError> {
                let decoded = super::decode_elements::<U>(items, binding.shape, binding.column)?;
                *access(target) = decoded;
                Ok(())
            },
        );
        self.push_list(field, column, setter)
    }

    /// Like [`ShapeBuilder::list`], for a list of boxed elements.
    pub fn boxed_list<U: Scannable>(
        &mut self,
        field: &'static str,
        column: &'static str,
        access: fn(&mut T) -> &mut Vec<Box<U>>,
    ) -> &mut Self {
        let setter: ListSetter<T> = Arc::new(
            move |target: &mut T, items: &[Value], binding: &FieldBinding<T>| -> Result<(), DecodeError> {
                let decoded = super::decode_elements::<U>(items, binding.shape, binding.column)?;
                *access(target) = decoded.into_iter().map(Box::new).collect();
                Ok(())
            },
        );
        self.push_list(field, column, setter)
    }

    fn push_list(&mut self, field: &'static str, column: &'static str, setter: ListSetter<T>) -> &mut Self {
        self.fields.push(FieldBinding {
            shape: self.shape,
            field,
            column,
            kind: FieldKind::List,
            setter: Setter::List(setter),
        });
        self
    }

    pub(crate) fn finish(self) -> ShapeSchema<T> {
        ShapeSchema {
            name: self.shape,
            fields: self.fields,
        }
    }
}

/// Registered bindings of one shape.
pub struct ShapeSchema<T> {
    name: &'static str,
    pub(crate) fields: Vec<FieldBinding<T>>,
}

impl<T> ShapeSchema<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `(field, column, kind)` per binding, in registration order
    pub fn columns(&self) -> Vec<(&'static str, &'static str, FieldKind)> {
        self.fields
            .iter()
            .map(|b| (b.field, b.column, b.kind))
            .collect()
    }
}
